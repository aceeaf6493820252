use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::infrastructure::session::SessionStore;

#[derive(Clone)]
pub struct InMemorySession {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        InMemorySession {
            values: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
    }
}

impl SessionStore for InMemorySession {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }
}
