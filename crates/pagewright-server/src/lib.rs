//! Documentation server for pagewright docs.
//!
//! Serves pre-rendered pages when a build output is available and renders
//! any other page on demand.

pub mod error;
pub mod server;

pub use error::ServerError;
pub use server::{router, AppState, DocsServer, ServerConfig};
