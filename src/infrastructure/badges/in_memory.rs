use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::infrastructure::badges::BadgeSink;

/// State of one registered badge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeState {
    pub text: String,
    pub visible: bool,
}

#[derive(Clone)]
pub struct InMemoryBadges {
    badges: Arc<RwLock<HashMap<String, BadgeState>>>,
}

impl InMemoryBadges {
    pub fn new() -> Self {
        InMemoryBadges {
            badges: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a badge id so updates to it are tracked. Badges start hidden
    /// with no text.
    pub fn register(&self, badge_id: &str) {
        let mut badges = self.badges.write().unwrap_or_else(|e| e.into_inner());
        badges.insert(
            badge_id.to_string(),
            BadgeState {
                text: String::new(),
                visible: false,
            },
        );
    }

    pub fn badge(&self, badge_id: &str) -> Option<BadgeState> {
        let badges = self.badges.read().unwrap_or_else(|e| e.into_inner());
        badges.get(badge_id).cloned()
    }
}

impl BadgeSink for InMemoryBadges {
    fn set_text(&self, badge_id: &str, text: &str) {
        let mut badges = self.badges.write().unwrap_or_else(|e| e.into_inner());
        if let Some(badge) = badges.get_mut(badge_id) {
            badge.text = text.to_string();
        }
    }

    fn set_visible(&self, badge_id: &str, visible: bool) {
        let mut badges = self.badges.write().unwrap_or_else(|e| e.into_inner());
        if let Some(badge) = badges.get_mut(badge_id) {
            badge.visible = visible;
        }
    }
}
