//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Ctrl+C or Shutdown::trigger → stop accepting → drain in-flight requests → exit
//! ```

pub mod shutdown;

pub use shutdown::{wait_for_shutdown, Shutdown};
