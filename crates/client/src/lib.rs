//! A thin client for the Azure AI agent-hosting REST API.
//!
//! Covers the three operations the CLI tools need: creating an agent wired to
//! an Azure AI Search index, opening a session against an existing agent, and
//! sending a single user message to that session.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;
use std::time::Duration;

use mime::Mime;
use reqwest::{Client, RequestBuilder, header};
use serde_json::Value;

pub use config::AzureConfig;
pub use proto::{
    AgentDefinition, FieldsMapping, ResponseRequest, Session, user_message,
};
pub use reqwest::StatusCode;

/// The wire-protocol schema version, appended to every request as the
/// `api-version` query parameter.
pub const API_VERSION: &str = "2024-05-01-preview";

/// The model deployment an agent is bound to unless overridden.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

// Session creation is expected to be fast; response generation is not.
const CREATE_AGENT_TIMEOUT: Duration = Duration::from_secs(30);
const CREATE_SESSION_TIMEOUT: Duration = Duration::from_secs(15);
const SEND_MESSAGE_TIMEOUT: Duration = Duration::from_secs(60);

/// Error type for [`AgentsClient`].
#[derive(Debug)]
pub enum Error {
    /// The server answered with a non-2xx status.
    Status { status: StatusCode, body: String },
    /// The request never completed (DNS failure, refused connection,
    /// timeout).
    Transport(reqwest::Error),
    /// The server answered 2xx with a body the client cannot use.
    MalformedResponse(String),
}

impl Error {
    /// Returns the HTTP status for [`Error::Status`] errors.
    #[inline]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Status { status, .. } => {
                write!(f, "request failed with status {status}")
            }
            Error::Transport(err) => write!(f, "request error: {err}"),
            Error::MalformedResponse(message) => {
                write!(f, "malformed response: {message}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            _ => None,
        }
    }
}

/// Client for the agent-hosting API of one Azure AI project.
#[derive(Clone, Debug)]
pub struct AgentsClient {
    client: Client,
    config: Arc<AzureConfig>,
}

impl AgentsClient {
    /// Creates a new `AgentsClient` with the given configuration.
    #[inline]
    pub fn new(config: AzureConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Creates an agent from the given definition and returns the server's
    /// JSON representation of it, including the assigned id.
    pub async fn create_agent(
        &self,
        definition: &AgentDefinition,
    ) -> Result<Value, Error> {
        debug!("creating agent");
        let req = self
            .client
            .post(self.url("agents"))
            .timeout(CREATE_AGENT_TIMEOUT)
            .json(definition);
        self.execute(req).await
    }

    /// Opens a new session against an existing agent.
    pub async fn create_session(
        &self,
        agent_id: &str,
    ) -> Result<Session, Error> {
        debug!(agent_id, "creating session");
        let req = self
            .client
            .post(self.url(&format!("agents/{agent_id}/sessions")))
            .timeout(CREATE_SESSION_TIMEOUT);
        let body = self.execute(req).await?;
        serde_json::from_value(body).map_err(|err| {
            Error::MalformedResponse(format!(
                "session object without a usable id: {err}"
            ))
        })
    }

    /// Sends a single user message to a session and returns the structured
    /// response object as-is.
    pub async fn send_message(
        &self,
        agent_id: &str,
        session_id: &str,
        user_text: &str,
    ) -> Result<Value, Error> {
        debug!(agent_id, session_id, "sending message");
        let payload = proto::user_message(user_text);
        let req = self
            .client
            .post(self.url(&format!(
                "agents/{agent_id}/sessions/{session_id}/responses"
            )))
            .timeout(SEND_MESSAGE_TIMEOUT)
            .json(&payload);
        self.execute(req).await
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/openai/projects/{}/{}?api-version={}",
            self.config.endpoint(),
            self.config.project(),
            path,
            API_VERSION
        )
    }

    async fn execute(&self, req: RequestBuilder) -> Result<Value, Error> {
        let resp = req
            .header("api-key", &self.config.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            // Keep the raw body text; it usually carries the server's error
            // detail.
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status { status, body });
        }

        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        let is_json = content_type
            .and_then(|v| v.parse().ok())
            .map(|m: Mime| m.subtype().as_str() == "json")
            .unwrap_or(false);
        if !is_json {
            warn!("unexpected content type: {content_type:?}");
        }

        resp.json()
            .await
            .map_err(|err| Error::MalformedResponse(format!("{err}")))
    }
}
