//! Query Descriptor
//!
//! Everything needed to describe one list request: target table, filter
//! tree, sort keys, and the limit/offset window. A descriptor lives for a
//! single operation and is read-only once handed to a compiler.

use crate::predicate::Predicate;
use crate::sorts::SortOrder;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryDescriptor {
    /// Table id or name as the remote API addresses it
    pub table: String,
    /// Root of the filter tree; `None` means no filter
    pub filter: Option<Predicate>,
    pub sorts: SortOrder,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl QueryDescriptor {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn filter(&self) -> Option<&Predicate> {
        self.filter.as_ref()
    }

    /// Copy with a different window
    pub fn with_window(&self, limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            limit,
            offset,
            ..self.clone()
        }
    }
}
