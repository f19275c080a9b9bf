//! Comments attached to projects and forum posts.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::AuthorProfile;

/// Maximum comment length in characters.
pub const COMMENT_MAX_CHARS: usize = 1000;

/// Validation errors for comment text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    #[error("comment content must not be empty")]
    Empty,
    #[error("comment content must be at most {max} characters")]
    TooLong { max: usize },
}

/// Validated comment text.
///
/// ## Invariants
/// - Non-empty once trimmed.
/// - At most [`COMMENT_MAX_CHARS`] characters.
///
/// The text is stored as submitted; trimming only decides emptiness.
///
/// # Examples
/// ```
/// use devhunt::domain::CommentContent;
///
/// assert!(CommentContent::new("Great launch!").is_ok());
/// assert!(CommentContent::new("   ").is_err());
/// assert!(CommentContent::new("x".repeat(1001)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContent(String);

impl CommentContent {
    pub fn new(value: impl Into<String>) -> Result<Self, CommentValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CommentValidationError::Empty);
        }
        if value.chars().count() > COMMENT_MAX_CHARS {
            return Err(CommentValidationError::TooLong {
                max: COMMENT_MAX_CHARS,
            });
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for CommentContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<CommentContent> for String {
    fn from(value: CommentContent) -> Self {
        value.0
    }
}

/// Stored comment joined with its author projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: AuthorProfile,
}
