use std::fmt::Debug;

/// Connection settings for an Azure AI project.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AzureConfig {
    pub(crate) endpoint: String,
    pub(crate) project: String,
    pub(crate) api_key: String,
}

impl AzureConfig {
    /// Creates a configuration from the endpoint base URL, the project name
    /// and the API key.
    ///
    /// A trailing slash in the endpoint is stripped so that request paths can
    /// be appended uniformly.
    pub fn new<S: Into<String>>(endpoint: S, project: S, api_key: S) -> Self {
        let mut endpoint = endpoint.into();
        while endpoint.ends_with('/') {
            endpoint.pop();
        }
        Self {
            endpoint,
            project: project.into(),
            api_key: api_key.into(),
        }
    }

    /// Returns the endpoint base URL, without a trailing slash.
    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the project name.
    #[inline]
    pub fn project(&self) -> &str {
        &self.project
    }
}

impl Debug for AzureConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureConfig")
            .field("endpoint", &self.endpoint)
            .field("project", &self.project)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
