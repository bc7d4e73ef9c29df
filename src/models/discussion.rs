use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::models::plant::ValidationError;

pub const TITLE_MIN: usize = 5;
pub const TITLE_MAX: usize = 100;
pub const CONTENT_MIN: usize = 10;

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub username: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl Author {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            profile_picture: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reply {
    pub id: String,
    pub author: Author,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A discussion thread. Replies are kept oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub id: String,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl NewPost {
    pub fn validate(self, id: String, author: Author) -> Result<Post, ValidationError> {
        let title = self.title.trim();
        let title_len = title.chars().count();
        if title_len < TITLE_MIN {
            return Err(ValidationError::new(
                "title",
                "Title must be at least 5 characters long.",
            ));
        }
        if title_len > TITLE_MAX {
            return Err(ValidationError::new(
                "title",
                "Title cannot be longer than 100 characters.",
            ));
        }
        let content = self.content.trim();
        if content.chars().count() < CONTENT_MIN {
            return Err(ValidationError::new(
                "content",
                "Content must be at least 10 characters long.",
            ));
        }
        Ok(Post {
            id,
            author,
            title: title.to_string(),
            content: content.to_string(),
            timestamp: Utc::now(),
            replies: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewReply {
    pub content: String,
}

impl NewReply {
    pub fn validate(self, id: String, author: Author) -> Result<Reply, ValidationError> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(ValidationError::new("content", "Reply cannot be empty."));
        }
        Ok(Reply {
            id,
            author,
            content: content.to_string(),
            timestamp: Utc::now(),
        })
    }
}

/// Threads a fresh board starts with, dated relative to `now`.
pub fn seed_posts(now: DateTime<Utc>) -> Vec<Post> {
    vec![
        Post {
            id: "demo-post-2".into(),
            author: Author::new("TomatoKing"),
            title: "Best way to deal with tomato blight?".into(),
            content: "I've noticed some of my tomato plants are showing signs of early blight. \
                      What are your best organic treatment methods?"
                .into(),
            timestamp: now - Duration::minutes(30),
            replies: Vec::new(),
        },
        Post {
            id: "demo-post-1".into(),
            author: Author::new("Admin"),
            title: "Welcome to the community!".into(),
            content: "This is the discussion board for all things related to smart farming. \
                      Feel free to ask questions, share your tips, or show off your farm layouts!"
                .into(),
            timestamp: now - Duration::days(1),
            replies: vec![Reply {
                id: "demo-reply-1".into(),
                author: Author::new("FarmManager"),
                content: "Great to be here! I'm excited to learn from everyone.".into(),
                timestamp: now - Duration::hours(12),
            }],
        },
    ]
}
