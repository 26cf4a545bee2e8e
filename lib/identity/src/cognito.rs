//! Cognito user-pool provider.
//!
//! Concrete [`IdentityProvider`] over the AWS Cognito Identity Provider
//! JSON API. Every operation is a single `x-amz-json-1.1` POST against
//! the regional endpoint with an `X-Amz-Target` header naming the
//! action. Tokens returned by `InitiateAuth` are cached in-process so
//! session queries can answer without re-authenticating; the cache is
//! never persisted.

use crate::provider::{IdentityProvider, ProviderError};
use crate::user::UserRecord;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Configuration for the Cognito user pool.
///
/// The defaults are the pool the xmldoc front end was built against;
/// a default-constructed config is ready to use. Deployments can
/// override any field through the environment via [`CognitoConfig::from_env`].
#[derive(Debug, Clone, Deserialize)]
pub struct CognitoConfig {
    /// AWS region hosting the user pool.
    #[serde(default = "default_region")]
    region: String,
    /// The Cognito user-pool identifier.
    #[serde(default = "default_user_pool_id")]
    user_pool_id: String,
    /// The app-client identifier registered with the pool.
    #[serde(default = "default_client_id")]
    client_id: String,
    /// Full endpoint URL override. When unset, the endpoint is derived
    /// from the region. Intended for tests against a local stand-in.
    #[serde(default)]
    endpoint: Option<String>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_user_pool_id() -> String {
    "us-east-1_wc88avkny".to_string()
}

fn default_client_id() -> String {
    "lfqu8edjkppsrl7chspdui4le".to_string()
}

impl Default for CognitoConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            user_pool_id: default_user_pool_id(),
            client_id: default_client_id(),
            endpoint: None,
        }
    }
}

impl CognitoConfig {
    /// Creates a configuration for the given pool.
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        user_pool_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            user_pool_id: user_pool_id.into(),
            client_id: client_id.into(),
            endpoint: None,
        }
    }

    /// Loads configuration from `XMLDOC_*` environment variables,
    /// falling back to the built-in defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable fails to parse.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("XMLDOC")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Overrides the derived endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Returns the AWS region.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the user-pool identifier.
    #[must_use]
    pub fn user_pool_id(&self) -> &str {
        &self.user_pool_id
    }

    /// Returns the app-client identifier.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the service endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://cognito-idp.{}.amazonaws.com/", self.region))
    }
}

/// Tokens cached after a successful credential exchange.
#[derive(Debug, Clone)]
struct TokenSet {
    id_token: String,
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl TokenSet {
    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Cognito error envelope: `{"__type": "...", "message": "..."}`.
///
/// The `__type` value is sometimes namespaced
/// (`com.amazonaws...#NotAuthorizedException`); only the fragment after
/// the `#` is the error code.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "__type")]
    kind: String,
    #[serde(default, alias = "Message")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InitiateAuthResponse {
    #[serde(rename = "AuthenticationResult")]
    authentication_result: Option<AuthenticationResult>,
    #[serde(rename = "ChallengeName")]
    challenge_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthenticationResult {
    #[serde(rename = "IdToken")]
    id_token: String,
    #[serde(rename = "AccessToken")]
    access_token: String,
    #[serde(rename = "ExpiresIn")]
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct GetUserResponse {
    #[serde(rename = "Username")]
    username: String,
    #[serde(rename = "UserAttributes", default)]
    user_attributes: Vec<CognitoAttribute>,
}

#[derive(Debug, Deserialize)]
struct CognitoAttribute {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Value")]
    value: String,
}

impl From<GetUserResponse> for UserRecord {
    fn from(response: GetUserResponse) -> Self {
        response
            .user_attributes
            .into_iter()
            .fold(UserRecord::new(response.username), |user, attr| {
                user.with_attribute(attr.name, attr.value)
            })
    }
}

fn parse_error_envelope(status: reqwest::StatusCode, body: &str) -> ProviderError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let code = envelope
                .kind
                .rsplit('#')
                .next()
                .unwrap_or(envelope.kind.as_str())
                .to_string();
            let message = envelope
                .message
                .unwrap_or_else(|| format!("request rejected with status {status}"));
            ProviderError::new(code, message)
        }
        Err(_) => ProviderError::new("HttpError", format!("status {status}: {body}")),
    }
}

/// Identity provider backed by a Cognito user pool.
pub struct CognitoProvider {
    config: CognitoConfig,
    client: reqwest::Client,
    tokens: Arc<RwLock<Option<TokenSet>>>,
}

impl CognitoProvider {
    /// Creates a provider for the configured pool.
    #[must_use]
    pub fn new(config: CognitoConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            tokens: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the pool configuration.
    #[must_use]
    pub fn config(&self) -> &CognitoConfig {
        &self.config
    }

    /// Issues one Cognito action call and returns the response body.
    async fn call(&self, action: &str, body: JsonValue) -> Result<JsonValue, ProviderError> {
        debug!(action, "calling Cognito");

        let response = self
            .client
            .post(self.config.endpoint())
            .header(CONTENT_TYPE, "application/x-amz-json-1.1")
            .header(
                "X-Amz-Target",
                format!("AWSCognitoIdentityProviderService.{action}"),
            )
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| ProviderError::new("RequestFailed", e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::new("RequestFailed", e.to_string()))?;

        if !status.is_success() {
            return Err(parse_error_envelope(status, &text));
        }

        if text.is_empty() {
            return Ok(json!({}));
        }
        serde_json::from_str(&text)
            .map_err(|e| ProviderError::new("ResponseParseFailed", e.to_string()))
    }

    /// Fetches the user record for the given access token.
    async fn get_user(&self, access_token: &str) -> Result<UserRecord, ProviderError> {
        let value = self
            .call("GetUser", json!({ "AccessToken": access_token }))
            .await?;
        let response: GetUserResponse = serde_json::from_value(value)
            .map_err(|e| ProviderError::new("ResponseParseFailed", e.to_string()))?;
        Ok(response.into())
    }

    /// Returns the cached access token, rejecting when no live session
    /// is cached.
    async fn cached_access_token(&self) -> Result<String, ProviderError> {
        let tokens = self.tokens.read().await;
        match tokens.as_ref() {
            Some(set) if !set.is_expired() => Ok(set.access_token.clone()),
            _ => Err(ProviderError::no_session()),
        }
    }
}

#[async_trait]
impl IdentityProvider for CognitoProvider {
    async fn sign_in(&self, username: &str, password: &str) -> Result<UserRecord, ProviderError> {
        let value = self
            .call(
                "InitiateAuth",
                json!({
                    "AuthFlow": "USER_PASSWORD_AUTH",
                    "ClientId": self.config.client_id(),
                    "AuthParameters": {
                        "USERNAME": username,
                        "PASSWORD": password,
                    },
                }),
            )
            .await?;

        let response: InitiateAuthResponse = serde_json::from_value(value)
            .map_err(|e| ProviderError::new("ResponseParseFailed", e.to_string()))?;

        let result = match (response.authentication_result, response.challenge_name) {
            (Some(result), _) => result,
            (None, Some(challenge)) => {
                return Err(ProviderError::new(
                    challenge,
                    "authentication challenge not supported",
                ));
            }
            (None, None) => {
                return Err(ProviderError::new(
                    "ResponseParseFailed",
                    "no authentication result in response",
                ));
            }
        };

        let set = TokenSet {
            id_token: result.id_token,
            access_token: result.access_token,
            expires_at: Utc::now() + Duration::seconds(result.expires_in),
        };
        let user = self.get_user(&set.access_token).await?;
        *self.tokens.write().await = Some(set);
        Ok(user)
    }

    async fn sign_up(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<UserRecord, ProviderError> {
        self.call(
            "SignUp",
            json!({
                "ClientId": self.config.client_id(),
                "Username": username,
                "Password": password,
                "UserAttributes": [
                    { "Name": "email", "Value": email },
                ],
            }),
        )
        .await?;

        // The account exists but is unconfirmed; no session is
        // established until the user confirms and signs in.
        Ok(UserRecord::new(username).with_attribute("email", email))
    }

    async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<(), ProviderError> {
        self.call(
            "ConfirmSignUp",
            json!({
                "ClientId": self.config.client_id(),
                "Username": username,
                "ConfirmationCode": code,
            }),
        )
        .await?;
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let access_token = {
            let tokens = self.tokens.read().await;
            tokens.as_ref().map(|set| set.access_token.clone())
        };

        // Nothing cached means nothing to revoke at the provider.
        let Some(access_token) = access_token else {
            return Ok(());
        };

        self.call("GlobalSignOut", json!({ "AccessToken": access_token }))
            .await?;
        *self.tokens.write().await = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<UserRecord, ProviderError> {
        let access_token = self.cached_access_token().await?;
        self.get_user(&access_token).await
    }

    async fn current_token(&self) -> Result<String, ProviderError> {
        let tokens = self.tokens.read().await;
        match tokens.as_ref() {
            Some(set) if !set.is_expired() => Ok(set.id_token.clone()),
            _ => Err(ProviderError::no_session()),
        }
    }
}
