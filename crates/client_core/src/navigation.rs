use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Beneficiaries,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Beneficiaries => "/beneficiaries",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        match path.trim_end_matches('/') {
            "/login" => Some(Route::Login),
            "/beneficiaries" => Some(Route::Beneficiaries),
            _ => None,
        }
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, Route::Beneficiaries)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Where a navigation request actually lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay(Route),
    Redirect { from: Option<Route>, to: Route },
}

impl Navigation {
    pub fn destination(self) -> Route {
        match self {
            Navigation::Stay(route) => route,
            Navigation::Redirect { to, .. } => to,
        }
    }
}

pub fn home(authenticated: bool) -> Route {
    if authenticated {
        Route::Beneficiaries
    } else {
        Route::Login
    }
}

/// Protected routes need a session; the login route is skipped once signed in.
pub fn guard(requested: Route, authenticated: bool) -> Navigation {
    let allowed = if requested.requires_auth() {
        authenticated
    } else {
        !authenticated
    };
    if allowed {
        Navigation::Stay(requested)
    } else {
        Navigation::Redirect {
            from: Some(requested),
            to: home(authenticated),
        }
    }
}

/// Unknown paths fall back to the home route for the current session.
pub fn resolve_path(path: &str, authenticated: bool) -> Navigation {
    match Route::from_path(path) {
        Some(route) => guard(route, authenticated),
        None => Navigation::Redirect {
            from: None,
            to: home(authenticated),
        },
    }
}
