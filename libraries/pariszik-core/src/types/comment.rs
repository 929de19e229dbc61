/// Comment domain type
use crate::types::{CommentId, ContentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Listener comment attached to a content record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content_id: ContentId,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Data required to add a comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateComment {
    pub author: String,
    pub text: String,
}
