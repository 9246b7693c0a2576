//! Transport contract
//!
//! The calls a remote records API must support. Implementations own
//! authentication, retries and error translation; callers only ever see
//! decoded JSON or a `NocoError`.

use async_trait::async_trait;
use noco_core::{NocoResult, Scalar};
use noco_queries::ParameterSet;
use serde_json::Value;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordTransport: Send + Sync {
    /// GET a page of records. `params.where_clause` must be sent unencoded.
    async fn list_records(&self, table: &str, params: &ParameterSet) -> NocoResult<Value>;

    /// GET one record by primary key
    async fn get_record(&self, table: &str, id: &Scalar) -> NocoResult<Value>;

    /// POST one record or an array of records
    async fn create_records(&self, table: &str, payload: Value) -> NocoResult<Value>;

    /// PATCH an array of records, each carrying its `Id`
    async fn update_records(&self, table: &str, payload: Value) -> NocoResult<Value>;

    /// DELETE an array of `{Id}` objects sent as the request body
    async fn delete_records(&self, table: &str, payload: Value) -> NocoResult<Value>;
}
