use crate::config::StudioConfig;
use move_studio_types::{AccountData, Resource, StudioError, StudioResult};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Thin REST client over the fullnode endpoints the simulator needs:
/// account lookup, resource lookup, and transaction simulation.
#[derive(Clone, Debug)]
pub struct FullnodeClient {
    config: StudioConfig,
    client: Client,
}

impl FullnodeClient {
    pub fn new(config: StudioConfig) -> StudioResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Joins a relative path onto the configured fullnode URL, keeping
    /// the base path (e.g. a `/v1` suffix) intact.
    fn build_url(&self, path: &str) -> StudioResult<Url> {
        let base = self.config.fullnode_url().as_str();
        let url = if base.ends_with('/') {
            Url::parse(base)?.join(path)?
        } else {
            Url::parse(&format!("{}/", base))?.join(path)?
        };
        Ok(url)
    }

    pub async fn get_account(&self, address: &str) -> StudioResult<AccountData> {
        let url = self.build_url(&format!("accounts/{}", address))?;
        debug!(%url, "fetching account");
        let response = self.client.get(url).send().await?;
        Self::handle_response(response).await
    }

    /// Current sequence number of an on-chain account.
    pub async fn get_sequence_number(&self, address: &str) -> StudioResult<u64> {
        let account = self.get_account(address).await?;
        account.sequence_number().map_err(|e| {
            StudioError::Internal(format!("unparseable sequence number for {}: {}", address, e))
        })
    }

    /// A single resource under `address`, identified by its full Move
    /// struct tag (e.g. `0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>`).
    pub async fn get_account_resource(
        &self,
        address: &str,
        resource_type: &str,
    ) -> StudioResult<Resource> {
        let encoded = urlencoding::encode(resource_type);
        let url = self.build_url(&format!("accounts/{}/resource/{}", address, encoded))?;
        debug!(%url, "fetching resource");
        let response = self.client.get(url).send().await?;
        Self::handle_response(response).await
    }

    /// Submits a transaction to the simulation endpoint. Returns the raw
    /// per-transaction outputs, one entry per simulated transaction.
    pub async fn simulate_transaction(&self, request: &Value) -> StudioResult<Vec<Value>> {
        let url = self.build_url("transactions/simulate")?;
        debug!(%url, "simulating transaction");
        let response = self.client.post(url).json(request).send().await?;
        Self::handle_response(response).await
    }

    /// Deserializes a successful response body, or converts a fullnode
    /// error body (`message`, `error_code`, `vm_error_code`) into
    /// [`StudioError::Api`].
    async fn handle_response<T: DeserializeOwned>(response: Response) -> StudioResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected fullnode response")
            })
            .to_string();
        let error_code = body
            .get("error_code")
            .and_then(Value::as_str)
            .map(str::to_string);
        let vm_error_code = body.get("vm_error_code").and_then(Value::as_u64);
        Err(StudioError::api_with_details(
            status.as_u16(),
            message,
            error_code,
            vm_error_code,
        ))
    }
}
