pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod server;
pub mod storage;

pub use auth::{AuthSession, LoginViewModel, RegistrationOutcome, SessionFlag};
pub use server::Server;
