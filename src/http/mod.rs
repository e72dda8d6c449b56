//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing, timeout)
//!     → request.rs (request ID)
//!     → middleware/navigation.rs (decode path, cache on request)
//!     → server.rs handler (re-read cached state, build canonical link)
//!     → response.rs (JSON body)
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
