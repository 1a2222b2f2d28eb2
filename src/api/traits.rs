//! Trait abstraction for the API client to enable mocking in tests

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::state::AccountType;

/// Operations against the Sereno platform API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupApi: Send + Sync {
    /// Check if the GraphQL endpoint is reachable
    async fn check_connection(&self) -> bool;

    /// Fire the `createUser` mutation once with the given field values.
    /// Returns the response payload verbatim for the token store.
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        account_type: AccountType,
    ) -> Result<Value>;
}
