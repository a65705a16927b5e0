//! Client management
//!
//! Per-connection session loop and the registry of connected clients.

pub mod handler;
pub mod registry;

pub use handler::handle_client;
pub use registry::{ClientInfo, ClientRegistry};
