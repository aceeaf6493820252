
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::constants::{
    APPROVALS_BADGE, HEADER_NOTIFICATION_BADGE, REQUESTS_BADGE, SESSION_USER_EMAIL,
    SESSION_USER_ID, SESSION_USER_NAME, SESSION_USER_ROLE,
};
use crate::core::errors::BackofficeError;
use crate::core::services::{ActivityRecorder, NotificationCenter};
use crate::infrastructure::backend::in_memory::InMemoryBackend;
use crate::infrastructure::backend::{Backend, Filter};
use crate::infrastructure::badges::in_memory::InMemoryBadges;
use crate::infrastructure::ip::IpResolver;
use crate::infrastructure::ip::fixed::FixedIpResolver;
use crate::infrastructure::session::in_memory::InMemorySession;

pub const TEST_IP: &str = "203.0.113.9";
pub const TEST_USER_AGENT: &str = "backoffice-tests/1.0";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
    crate::logging::init();
}

pub fn admin_session() -> InMemorySession {
    let session = InMemorySession::new();
    session.set(SESSION_USER_ID, "u-1001");
    session.set(SESSION_USER_EMAIL, "admin@example.com");
    session.set(SESSION_USER_NAME, "Admin User");
    session.set(SESSION_USER_ROLE, "admin");
    session
}

pub fn session_with_role(role: &str) -> InMemorySession {
    let session = admin_session();
    session.set(SESSION_USER_ROLE, role);
    session
}

pub fn create_test_recorder(
    session: InMemorySession,
) -> (
    ActivityRecorder<InMemoryBackend, InMemorySession, FixedIpResolver>,
    InMemoryBackend,
) {
    init_logging();
    let backend = InMemoryBackend::new();
    let recorder = ActivityRecorder::new(
        backend.clone(),
        session,
        FixedIpResolver::new(TEST_IP),
        TEST_USER_AGENT,
    );
    (recorder, backend)
}

pub fn create_test_center(
    session: InMemorySession,
) -> (
    NotificationCenter<InMemoryBackend, InMemorySession, InMemoryBadges>,
    InMemoryBackend,
    InMemoryBadges,
) {
    init_logging();
    let backend = InMemoryBackend::new();
    let badges = InMemoryBadges::new();
    for badge_id in [REQUESTS_BADGE, APPROVALS_BADGE, HEADER_NOTIFICATION_BADGE] {
        badges.register(badge_id);
    }
    let center = NotificationCenter::new(backend.clone(), session, badges.clone());
    (center, backend, badges)
}

/// Backend double whose every call fails.
#[derive(Clone)]
pub struct FailingBackend;

#[async_trait]
impl Backend for FailingBackend {
    async fn insert(&self, collection: &str, _document: Value) -> Result<(), BackofficeError> {
        Err(BackofficeError::StorageError(format!(
            "insert into {} refused",
            collection
        )))
    }

    async fn count(&self, collection: &str, _filters: &[Filter]) -> Result<u64, BackofficeError> {
        Err(BackofficeError::StorageError(format!(
            "count on {} refused",
            collection
        )))
    }
}

/// Resolver double whose lookup always fails.
#[derive(Clone)]
pub struct FailingResolver;

#[async_trait]
impl IpResolver for FailingResolver {
    async fn resolve(&self) -> Result<String, BackofficeError> {
        Err(BackofficeError::NetworkError(
            "connection refused".to_string(),
        ))
    }
}

/// Delegating backend that records which collections were count-queried.
#[derive(Clone)]
pub struct RecordingBackend {
    pub inner: InMemoryBackend,
    counted: Arc<Mutex<Vec<String>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        RecordingBackend {
            inner: InMemoryBackend::new(),
            counted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn counted(&self) -> Vec<String> {
        self.counted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    async fn insert(&self, collection: &str, document: Value) -> Result<(), BackofficeError> {
        self.inner.insert(collection, document).await
    }

    async fn count(&self, collection: &str, filters: &[Filter]) -> Result<u64, BackofficeError> {
        self.counted.lock().unwrap().push(collection.to_string());
        self.inner.count(collection, filters).await
    }
}
