//! Request middleware.

pub mod navigation;

pub use navigation::navigation_middleware;
