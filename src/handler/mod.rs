//! Request handler module
//!
//! Maps the fixed routes to the reducers and wraps results as JSON.

pub mod router;

pub use router::handle_request;
