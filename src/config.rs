//! Deployment-time choice of the extraction backend.

use anyhow::{Context, Result};
use log::info;
use reqwest::Client;
use url::Url;

use crate::constants::{DEFAULT_RELAY_ENDPOINT, ENDPOINT_ENV_NAME, TRANSPORT_ENV_NAME, USER_AGENT};
use crate::extract::{ConfiguredExtractor, DirectExtractor, RelayExtractor, ServiceExtractor};

/// Enum representing how the sitemap is retrieved.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Transport {
    /// Fetch the sitemap URL directly
    #[default]
    Direct,
    /// Fetch through a relay returning `{ "contents": ... }`
    Relay,
    /// Delegate to a remote extraction service
    Service,
}

impl std::str::FromStr for Transport {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "direct" => Ok(Transport::Direct),
            "relay" => Ok(Transport::Relay),
            "service" => Ok(Transport::Service),
            _ => Err(format!("Invalid transport: {}", input)),
        }
    }
}

/// Settings needed to build the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub transport: Transport,
    /// Relay or service endpoint. Ignored by the direct transport.
    pub endpoint: Option<String>,
    pub user_agent: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            endpoint: None,
            user_agent: USER_AGENT.to_owned(),
        }
    }
}

impl ExtractorConfig {
    /// Reads the transport and endpoint from the environment, keeping defaults
    /// for whatever is unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport variable holds an unknown value.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(transport) = std::env::var(TRANSPORT_ENV_NAME) {
            config.transport = transport
                .parse()
                .map_err(|e| anyhow::anyhow!("{TRANSPORT_ENV_NAME}: {e}"))?;
        }
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV_NAME)
            && !endpoint.trim().is_empty()
        {
            config.endpoint = Some(endpoint);
        }

        Ok(config)
    }

    /// Applies command line overrides on top of this config.
    pub fn with_overrides(
        mut self,
        transport: Option<Transport>,
        endpoint: Option<String>,
    ) -> Self {
        if let Some(transport) = transport {
            self.transport = transport;
        }
        if endpoint.is_some() {
            self.endpoint = endpoint;
        }
        self
    }

    /// Builds the extractor for the configured transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, the endpoint is not a
    /// valid URL, or the service transport has no endpoint.
    pub fn build(&self) -> Result<ConfiguredExtractor> {
        let client = Client::builder()
            .user_agent(self.user_agent.as_str())
            .build()
            .context("Unable to build HTTP client.")?;

        let extractor = match self.transport {
            Transport::Direct => ConfiguredExtractor::Direct(DirectExtractor::new(client)),
            Transport::Relay => {
                let endpoint = self.endpoint_url(Some(DEFAULT_RELAY_ENDPOINT))?;
                ConfiguredExtractor::Relay(RelayExtractor::new(client, endpoint))
            }
            Transport::Service => {
                let endpoint = self.endpoint_url(None)?;
                ConfiguredExtractor::Service(ServiceExtractor::new(client, endpoint))
            }
        };

        info!("Using {:?} transport", self.transport);
        Ok(extractor)
    }

    fn endpoint_url(&self, fallback: Option<&str>) -> Result<Url> {
        let endpoint = self
            .endpoint
            .as_deref()
            .or(fallback)
            .context(format!(
                "Set {ENDPOINT_ENV_NAME} or --endpoint for the {:?} transport.",
                self.transport
            ))?;

        Url::parse(endpoint).map_err(|e| anyhow::anyhow!("Invalid endpoint url: {}", e))
    }
}
