use std::sync::Arc;

use shared::domain::{BeneficiaryId, BeneficiaryRecord, Category};
use tracing::{info, warn};
use url::Url;

use crate::{
    directory::Directory,
    error::ClientError,
    list_view::{ListPage, ListView},
    modal::{DetailModal, ModalAction, ModalCommand, ModalOutcome},
    navigation::{resolve_path, Navigation, Route},
    ports::{AuthPort, DirectoryPort},
    session::{Session, LOGIN_FAILED_MESSAGE},
};

/// What pressing the modal's action control produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// The transition went through and the modal closed.
    Updated(BeneficiaryRecord),
    /// The modal stays open with this message shown.
    Failed(String),
    Contact(Url),
}

/// The whole admin client: session, directory copy, list controller, open modal and route.
pub struct AdminApp {
    session: Session,
    directory: Directory,
    list: ListView,
    modal: Option<DetailModal>,
    route: Route,
    login_error: Option<String>,
}

impl AdminApp {
    pub fn new(auth: Arc<dyn AuthPort>, directory: Arc<dyn DirectoryPort>) -> Self {
        Self {
            session: Session::new(auth),
            directory: Directory::new(directory),
            list: ListView::default(),
            modal: None,
            route: Route::Login,
            login_error: None,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn records(&self) -> &[BeneficiaryRecord] {
        self.directory.records()
    }

    pub fn modal(&self) -> Option<&DetailModal> {
        self.modal.as_ref()
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    /// Applies the route guard and mounts the directory view when it is entered.
    pub async fn navigate(&mut self, path: &str) -> Route {
        let navigation = resolve_path(path, self.session.is_authenticated());
        if let Navigation::Redirect { to, .. } = navigation {
            info!(%path, to = %to, "redirecting");
        }
        self.enter(navigation.destination()).await;
        self.route
    }

    async fn enter(&mut self, route: Route) {
        let entering = self.route != route;
        self.route = route;
        if route == Route::Beneficiaries && (entering || !self.directory.is_loaded()) {
            // Load failures are kept on the list view.
            let _ = self.mount_directory().await;
        }
    }

    pub async fn submit_login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        match self.session.login(username, password).await {
            Ok(()) => {
                self.login_error = None;
                self.enter(Route::Beneficiaries).await;
                Ok(())
            }
            Err(err) => {
                self.login_error = Some(LOGIN_FAILED_MESSAGE.to_string());
                Err(err)
            }
        }
    }

    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let result = self.session.logout().await;
        self.directory.clear();
        self.list.reset();
        self.modal = None;
        self.route = Route::Login;
        result
    }

    /// Fresh view state followed by a full load.
    pub async fn mount_directory(&mut self) -> Result<(), ClientError> {
        self.list.reset();
        self.modal = None;
        self.refresh().await
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        if !self.session.is_authenticated() {
            return Err(ClientError::Unauthorized);
        }
        self.list.begin_loading();
        match self.directory.load_all().await {
            Ok(_) => {
                self.list.finish_loading(false);
                self.list.clamp_page(self.directory.records());
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "directory load failed");
                self.list.finish_loading(true);
                if err.requires_reauth() {
                    self.session.expire();
                    self.modal = None;
                    self.route = Route::Login;
                }
                Err(err)
            }
        }
    }

    pub fn page(&self) -> ListPage {
        self.list.derive(self.directory.records())
    }

    pub fn set_category(&mut self, category: Category) {
        self.list.set_category(category);
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.list.set_search_term(term);
    }

    pub fn next_page(&mut self) {
        self.list.next_page(self.directory.records());
    }

    pub fn previous_page(&mut self) {
        self.list.previous_page();
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.list.go_to_page(page, self.directory.records());
    }

    /// Opens the modal for a record. Granted records get the transition, eligible ones contact.
    pub fn open_details(&mut self, id: &BeneficiaryId) -> Result<&DetailModal, ClientError> {
        if !self.session.is_authenticated() {
            return Err(ClientError::Unauthorized);
        }
        let record = self
            .list
            .select(self.directory.records(), id)
            .ok_or_else(|| ClientError::NotFound(id.clone()))?;
        let action = match record.category() {
            Category::Granted => ModalAction::MakeEligible,
            Category::Eligible => ModalAction::Contact,
        };
        Ok(&*self.modal.insert(DetailModal::new(record, action)))
    }

    pub async fn invoke_modal_action(&mut self) -> Result<ActionResult, ClientError> {
        let modal = self.modal.as_mut().ok_or(ClientError::NoSelection)?;
        let (id, status) = match modal.invoke()? {
            ModalCommand::OpenContact(link) => return Ok(ActionResult::Contact(link)),
            ModalCommand::SetStatus { id, status } => (id, status),
        };

        let result = self.directory.set_status(&id, status).await;
        let reauth = matches!(&result, Err(err) if err.requires_reauth());
        let outcome = match self.modal.as_mut() {
            Some(modal) => modal.resolve(result),
            None => return Err(ClientError::NoSelection),
        };

        match outcome {
            ModalOutcome::Completed(record) => {
                info!(id = %record.id, category = %record.category(), "beneficiary updated");
                self.close_modal();
                self.list.clamp_page(self.directory.records());
                Ok(ActionResult::Updated(record))
            }
            ModalOutcome::Failed(message) => {
                if reauth {
                    self.session.expire();
                    self.modal = None;
                    self.route = Route::Login;
                }
                Ok(ActionResult::Failed(message))
            }
        }
    }

    /// Discards the modal without touching the directory.
    pub fn close_modal(&mut self) {
        self.modal = None;
        self.list.clear_selection();
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
