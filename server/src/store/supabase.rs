//! Supabase REST client for row inserts.
//!
//! Inserts go through PostgREST at `{base}/rest/v1/{table}` using the
//! service-role key. Only inserts are needed; rows are never read back,
//! mutated, or deleted by this service.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use super::{RecordStore, StoreError};

/// Row-insert client backed by the Supabase REST API.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    http: Client,
    base_url: String,
    service_key: String,
    timeout: Duration,
}

impl SupabaseStore {
    /// Create a new store client for the given project URL and service key.
    pub fn new(base_url: String, service_key: String, timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            base_url,
            service_key,
            timeout,
        }
    }

    /// Build the PostgREST endpoint URL for a table.
    fn endpoint(&self, table: &str) -> Result<Url, StoreError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| StoreError::Transport(format!("invalid store URL: {e}")))?;
        base.join(&format!("rest/v1/{table}"))
            .map_err(|e| StoreError::Transport(format!("invalid table path: {e}")))
    }
}

#[async_trait::async_trait]
impl RecordStore for SupabaseStore {
    async fn insert(&self, table: &str, record: &Value) -> Result<(), StoreError> {
        let endpoint = self.endpoint(table)?;

        let response = self
            .http
            .post(endpoint)
            .timeout(self.timeout)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    StoreError::Transport(format!("insert timed out: {e}"))
                } else {
                    StoreError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                table = table,
                status_code = status.as_u16(),
                body = %body,
                "store_insert_rejected"
            );
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(table = table, "store_insert_ok");

        Ok(())
    }
}
