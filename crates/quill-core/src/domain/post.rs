use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Subject;

/// Post entity - a blog post owned by the user that created it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    /// Owner reference. Set once at creation, never changed.
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a post. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Post {
    /// Create a new post owned by `owner`.
    pub fn new(owner: Subject, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: owner.into(),
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, subject: &Subject) -> bool {
        self.user_id == *subject.as_uuid()
    }

    /// Apply a patch, returning whether anything changed.
    ///
    /// Blank values are ignored so a post can never lose its title or content.
    pub fn apply(&mut self, patch: PostPatch) -> bool {
        let mut changed = false;

        if let Some(title) = patch.title.filter(|t| !t.trim().is_empty()) {
            if title != self.title {
                self.title = title;
                changed = true;
            }
        }
        if let Some(content) = patch.content.filter(|c| !c.trim().is_empty()) {
            if content != self.content {
                self.content = content;
                changed = true;
            }
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}
