pub mod services;
pub mod session;
pub mod store;
pub mod utils;

pub use session::LedgerSession;
pub use store::{AppStore, StateContainer};
