//! Relational store abstraction.
//!
//! Submissions are append-only rows in a hosted Postgres (Supabase). The
//! store is behind a trait so the submission pipeline can be exercised in
//! isolation; the production implementation talks to the Supabase REST API.

pub mod supabase;

use async_trait::async_trait;
use serde_json::Value;

pub use supabase::SupabaseStore;

/// Storage abstraction so the submission pipeline can be exercised in
/// isolation.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert exactly one row into the named table.
    async fn insert(&self, table: &str, record: &Value) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(String),
    #[error("store rejected insert with status {status}")]
    Rejected { status: u16, body: String },
}
