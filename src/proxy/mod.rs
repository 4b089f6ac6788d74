//! Server-side proxy that holds the service credential.
//!
//! Panel clients post the chat-completion body here without any secret;
//! the proxy fills in the configured model, attaches the credential and
//! relays the service's answer.

pub mod error;
pub mod health;
pub mod router;
pub mod server;
pub mod shutdown;
pub mod upstream;

pub use error::{ErrorResponse, ProxyError};
pub use router::{build_router, RouterEngine};
pub use server::{ProxyHandle, ProxyServer};
