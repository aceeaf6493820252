use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use log::debug;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::core::errors::BackofficeError;
use crate::infrastructure::backend::{Backend, Filter, FilterOp};

#[derive(Clone)]
pub struct InMemoryBackend {
    collections: Arc<RwLock<HashMap<String, Vec<Value>>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        InMemoryBackend {
            collections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Snapshot of the documents currently held in a collection, in insert
    /// order.
    pub async fn documents(&self, collection: &str) -> Vec<Value> {
        let collections = self.collections.read().await;
        collections.get(collection).cloned().unwrap_or_default()
    }
}

fn document_matches(document: &Value, filter: &Filter) -> bool {
    let Some(field) = document.get(&filter.field) else {
        return false;
    };
    match filter.op {
        FilterOp::Eq => field == &filter.value,
        FilterOp::Gte => matches!(
            compare(field, &filter.value),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        FilterOp::Lte => matches!(
            compare(field, &filter.value),
            Some(Ordering::Less | Ordering::Equal)
        ),
    }
}

// Numbers compare numerically and strings lexicographically, except that two
// strings which both parse as RFC 3339 timestamps compare chronologically so
// the `Z` and `+00:00` renderings of one instant order consistently.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64()?, b.as_f64()?);
            a.partial_cmp(&b)
        }
        (Value::String(a), Value::String(b)) => {
            match (DateTime::parse_from_rfc3339(a), DateTime::parse_from_rfc3339(b)) {
                (Ok(a), Ok(b)) => Some(a.cmp(&b)),
                _ => Some(a.cmp(b)),
            }
        }
        _ => None,
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn insert(&self, collection: &str, document: Value) -> Result<(), BackofficeError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        debug!("inserted document into {}", collection);
        Ok(())
    }

    async fn count(&self, collection: &str, filters: &[Filter]) -> Result<u64, BackofficeError> {
        let collections = self.collections.read().await;
        let count = collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| filters.iter().all(|f| document_matches(document, f)))
                    .count()
            })
            .unwrap_or(0);
        Ok(count as u64)
    }
}
