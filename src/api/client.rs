//! GraphQL client for the Sereno platform API
//!
//! Posts the standard `{"query", "variables"}` envelope and unwraps the
//! GraphQL response, surfacing transport and resolver errors separately.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::traits::SignupApi;
use crate::config::AppConfig;
use crate::state::AccountType;

/// Default GraphQL endpoint
const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:4000/graphql";

/// Environment variable overriding the endpoint from config
const ENDPOINT_ENV: &str = "SERENO_API_URL";

/// The sign-up mutation. The server schema names the first argument `name`;
/// it carries the address entered on the email step.
const CREATE_USER_MUTATION: &str = "\
mutation ($name: String!, $password: String!, $accountType: String!) {
    createUser(name: $name, password: $password, accountType: $accountType)
}";

/// Errors from talking to the platform API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not reach the API at {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("the server rejected the sign-up: {0}")]
    Rejected(String),
    #[error("the server returned no data")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Client for the Sereno GraphQL API
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ApiClient {
    /// Create a new client. The endpoint comes from `SERENO_API_URL`, then
    /// the config file, then the built-in default.
    pub fn new(config: &AppConfig) -> Self {
        let endpoint = resolve_endpoint(std::env::var(ENDPOINT_ENV).ok(), config);
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute_create_user(
        &self,
        email: &str,
        password: &str,
        account_type: AccountType,
    ) -> Result<Value, ApiError> {
        let request = GraphqlRequest {
            query: CREATE_USER_MUTATION,
            variables: mutation_variables(email, password, account_type),
        };

        let transport = |source| ApiError::Transport {
            endpoint: self.endpoint.clone(),
            source,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let body: GraphqlResponse = response.json().await.map_err(transport)?;

        if !body.errors.is_empty() {
            let messages = body
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ApiError::Rejected(messages));
        }

        body.data.ok_or(ApiError::EmptyResponse)
    }
}

#[async_trait]
impl SignupApi for ApiClient {
    async fn check_connection(&self) -> bool {
        self.http.get(&self.endpoint).send().await.is_ok()
    }

    async fn create_user(
        &self,
        email: &str,
        password: &str,
        account_type: AccountType,
    ) -> Result<Value> {
        let data = self
            .execute_create_user(email, password, account_type)
            .await?;
        tracing::debug!("createUser mutation accepted");
        Ok(data)
    }
}

fn resolve_endpoint(env_override: Option<String>, config: &AppConfig) -> String {
    env_override
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}

/// Build the mutation variables. The `name` variable is bound to the email
/// value so the mutation carries the address the user typed.
fn mutation_variables(email: &str, password: &str, account_type: AccountType) -> Value {
    serde_json::json!({
        "name": email,
        "password": password,
        "accountType": account_type.as_str(),
    })
}
