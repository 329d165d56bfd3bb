use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a fullnode REST endpoint.
#[derive(Clone, Debug)]
pub struct StudioConfig {
    name: String,
    fullnode_url: Url,
    timeout: Duration,
}

impl StudioConfig {
    /// Movement Network testnet.
    pub fn movement_testnet() -> Self {
        Self {
            name: "movement-testnet".to_string(),
            fullnode_url: Url::parse("https://testnet.movementnetwork.xyz/v1")
                .expect("static url must parse"),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Aptos Labs testnet.
    pub fn aptos_testnet() -> Self {
        Self {
            name: "aptos-testnet".to_string(),
            fullnode_url: Url::parse("https://api.testnet.aptoslabs.com/v1")
                .expect("static url must parse"),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// A locally running node, e.g. from `aptos node run-local-testnet`.
    pub fn localnet() -> Self {
        Self {
            name: "localnet".to_string(),
            fullnode_url: Url::parse("http://127.0.0.1:8080/v1")
                .expect("static url must parse"),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Any other fullnode REST endpoint.
    pub fn custom(name: &str, fullnode_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            name: name.to_string(),
            fullnode_url: Url::parse(fullnode_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fullnode_url(&self) -> &Url {
        &self.fullnode_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
