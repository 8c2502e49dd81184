//! Client-side core of the beneficiary admin tool.
//!
//! Everything here is UI-agnostic: the console app (or any other front end) drives an
//! [`AdminApp`] and renders what it derives. Backends plug in through [`AuthPort`] and
//! [`DirectoryPort`].

pub mod app;
pub mod directory;
pub mod error;
pub mod list_view;
pub mod mock;
pub mod modal;
pub mod navigation;
pub mod ports;
pub mod session;
pub mod transport;

pub use app::{ActionResult, AdminApp};
pub use error::ClientError;
pub use list_view::{ListPage, ListRow, ListView, PAGE_SIZE};
pub use mock::{MockBackend, MockLatency};
pub use modal::{DetailModal, DetailView, ModalAction};
pub use navigation::Route;
pub use ports::{AuthPort, DirectoryPort};
pub use session::{Session, LOGIN_FAILED_MESSAGE};
pub use transport::HttpBackend;
