//! Backend client module for HTTP communication

mod client;
mod error;
mod submit;
mod traits;

pub use client::HttpBackend;
pub use error::BackendError;
pub use submit::{submit_registration, SubmitOutcome};
pub use traits::BackendClientTrait;

#[cfg(test)]
pub use traits::MockBackendClientTrait;
