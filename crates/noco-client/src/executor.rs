//! Query Executor
//!
//! Runs query descriptors against a `RecordTransport`: list reads, row
//! count probes, pagination, and the create/update/delete flows. Filter
//! compilation is delegated to a `QueryCompiler`.

use noco_core::{NocoError, NocoResult, Page, PageInfo, PageRequest, Row, Scalar};
use noco_queries::{ParameterSet, QueryCompiler, QueryDescriptor, WhereCompiler};
use serde_json::Value;

use crate::payload::{delete_payload, find_primary_key, unwrap_single, update_payload, WriteInput};
use crate::rows::RowSet;
use crate::transport::RecordTransport;

/// Query executor over a transport
pub struct QueryExecutor<T, C = WhereCompiler> {
    transport: T,
    compiler: C,
}

impl<T: RecordTransport> QueryExecutor<T, WhereCompiler> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            compiler: WhereCompiler,
        }
    }
}

impl<T, C> QueryExecutor<T, C>
where
    T: RecordTransport,
    C: QueryCompiler,
{
    pub fn with_compiler(transport: T, compiler: C) -> Self {
        Self {
            transport,
            compiler,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Parameters a list request for this descriptor would carry
    pub fn params(&self, descriptor: &QueryDescriptor) -> ParameterSet {
        self.compiler.build_params(descriptor)
    }

    /// Execute the query as a list request
    pub async fn get(&self, descriptor: &QueryDescriptor) -> NocoResult<RowSet> {
        let params = self.params(descriptor);
        tracing::debug!(table = %descriptor.table, ?params, "listing records");

        let response = self
            .transport
            .list_records(&descriptor.table, &params)
            .await?;

        Ok(RowSet::from_response(response))
    }

    /// First matching row
    pub async fn first(&self, descriptor: &QueryDescriptor) -> NocoResult<Option<Row>> {
        let query = descriptor.with_window(Some(1), descriptor.offset);
        Ok(self.get(&query).await?.rows.into_iter().next())
    }

    /// Fetch one record by primary key
    pub async fn find(&self, table: &str, id: impl Into<Scalar>) -> NocoResult<Option<Row>> {
        let id = id.into();
        let response = self.transport.get_record(table, &id).await?;

        Ok(match response {
            Value::Object(map) => Some(Row::from(map)),
            _ => None,
        })
    }

    /// Total rows matching the filter, read from a `limit=1` probe.
    /// A deployment that does not report `totalRows` yields 0.
    pub async fn count_for_page(&self, descriptor: &QueryDescriptor) -> NocoResult<u64> {
        let params = ParameterSet::probe(self.compiler.compile(descriptor.filter()));

        let response = self
            .transport
            .list_records(&descriptor.table, &params)
            .await?;

        let total = PageInfo::from_response(&response).total();
        tracing::debug!(table = %descriptor.table, total, "row count probe");
        Ok(total)
    }

    /// Fetch one page (1-indexed) together with the full result size
    pub async fn paginate(
        &self,
        descriptor: &QueryDescriptor,
        per_page: u64,
        page: u64,
    ) -> NocoResult<Page<Row>> {
        self.paginate_with_total(descriptor, per_page, page, None).await
    }

    /// Like `paginate`, skipping the count probe when the total is known
    pub async fn paginate_with_total(
        &self,
        descriptor: &QueryDescriptor,
        per_page: u64,
        page: u64,
        total: Option<u64>,
    ) -> NocoResult<Page<Row>> {
        let request = PageRequest::new(page, per_page);
        let query = descriptor.with_window(Some(request.limit()), Some(request.offset()));

        let (total, rows) = match total {
            Some(total) => (total, self.get(&query).await?),
            None => futures::try_join!(self.count_for_page(descriptor), self.get(&query))?,
        };

        Ok(Page::new(rows.into_rows(), total, request))
    }

    /// Create one or many records.
    ///
    /// A single record comes back as the response's first element; a bulk
    /// create returns the full response. An empty bulk input sends nothing.
    pub async fn create(&self, table: &str, input: impl Into<WriteInput>) -> NocoResult<Value> {
        let input = input.into();
        if input.is_empty() {
            return Ok(Value::Array(Vec::new()));
        }

        let single = input.is_single();
        tracing::debug!(table, records = input.len(), "creating records");
        let response = self
            .transport
            .create_records(table, input.into_payload())
            .await?;

        Ok(if single { unwrap_single(response) } else { response })
    }

    /// Create records, discarding the response body
    pub async fn insert(&self, table: &str, input: impl Into<WriteInput>) -> NocoResult<bool> {
        self.create(table, input).await?;
        Ok(true)
    }

    /// Create one record and return the primary key the API assigned
    pub async fn insert_get_id(&self, table: &str, row: Row) -> NocoResult<Option<Scalar>> {
        let created = self.create(table, WriteInput::Single(row)).await?;

        Ok(match created {
            Value::Object(map) => Row::from(map).id(),
            _ => None,
        })
    }

    /// Update the record identified by the descriptor's primary key filter
    pub async fn update(&self, descriptor: &QueryDescriptor, fields: Row) -> NocoResult<Value> {
        let key = find_primary_key(descriptor).ok_or_else(|| {
            NocoError::invalid_operation(format!(
                "update on '{}' requires a primary key in the where clause",
                descriptor.table
            ))
        })?;

        tracing::debug!(table = %descriptor.table, id = %key, "updating record");
        let response = self
            .transport
            .update_records(&descriptor.table, update_payload(fields, &key))
            .await?;

        Ok(unwrap_single(response))
    }

    /// Delete by explicit key, or by the descriptor's primary key filter
    pub async fn delete(
        &self,
        descriptor: &QueryDescriptor,
        id: Option<Scalar>,
    ) -> NocoResult<Value> {
        let key = match id.filter(|id| !id.is_blank()) {
            Some(id) => id,
            None => find_primary_key(descriptor).ok_or_else(|| {
                NocoError::invalid_operation(format!(
                    "delete on '{}' requires a primary key",
                    descriptor.table
                ))
            })?,
        };

        tracing::debug!(table = %descriptor.table, id = %key, "deleting record");
        self.transport
            .delete_records(&descriptor.table, delete_payload(&key))
            .await
    }
}
