use crate::core::errors::BackofficeError;
use async_trait::async_trait;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
}

/// One comparison applied to a document field when counting.
#[derive(Clone, Debug)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Filter {
            field: field.to_string(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn gte(field: &str, value: impl Into<Value>) -> Self {
        Filter {
            field: field.to_string(),
            op: FilterOp::Gte,
            value: value.into(),
        }
    }

    pub fn lte(field: &str, value: impl Into<Value>) -> Self {
        Filter {
            field: field.to_string(),
            op: FilterOp::Lte,
            value: value.into(),
        }
    }
}

/// Remote data backend shared by both components: append-only inserts and
/// count-only filtered queries against named collections.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Append one document to a named collection.
    async fn insert(&self, collection: &str, document: Value) -> Result<(), BackofficeError>;

    /// Count the documents matching every filter. No rows are returned.
    async fn count(&self, collection: &str, filters: &[Filter]) -> Result<u64, BackofficeError>;
}

pub mod in_memory;
