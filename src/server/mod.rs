//! Server core functionality
//!
//! The TCP accept loop that hands each connection its own auth session.

pub mod core;

pub use self::core::Server;
