//! Trait abstraction for the backend client to enable mocking in tests

use super::BackendError;
use crate::state::{FormData, Registration};
use async_trait::async_trait;

/// Operations the registration backend offers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendClientTrait: Send + Sync {
    /// POST one registration; any 2xx answer is success
    async fn submit_registration(&self, data: &FormData) -> Result<(), BackendError>;

    /// GET the stored registrations
    async fn list_registrations(&self) -> Result<Vec<Registration>, BackendError>;
}
