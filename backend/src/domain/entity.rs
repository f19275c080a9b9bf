//! Votable and commentable entities.
//!
//! Projects and forum posts share one vote/comment model. [`EntityKind`]
//! selects the backing tables and the fallback key namespace.

use std::fmt;

use uuid::Uuid;

use super::{Slug, UserId};

/// Kind of entity that accumulates votes and comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    ForumPost,
}

impl EntityKind {
    /// Every supported kind.
    pub const ALL: [Self; 2] = [Self::Project, Self::ForumPost];

    /// Path segment under `/api/v1`.
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::ForumPost => "forum",
        }
    }

    /// Human-readable label used in messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::ForumPost => "forum post",
        }
    }

    /// Prefix of the synthetic fallback key.
    pub const fn fallback_prefix(self) -> &'static str {
        match self {
            Self::Project => "mock-project-",
            Self::ForumPost => "mock-post-",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A persisted project or forum post, resolved by slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotableEntity {
    pub id: Uuid,
    pub kind: EntityKind,
    pub slug: Slug,
    pub owner_id: UserId,
}

/// Synthetic key identifying a non-persisted entity in the fallback store.
///
/// # Examples
/// ```
/// use devhunt::domain::{EntityKind, FallbackKey, Slug};
///
/// let slug = Slug::parse("code-craft").expect("valid slug");
/// let key = FallbackKey::new(EntityKind::ForumPost, &slug);
/// assert_eq!(key.as_ref(), "mock-post-code-craft");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FallbackKey(String);

impl FallbackKey {
    pub fn new(kind: EntityKind, slug: &Slug) -> Self {
        Self(format!("{}{slug}", kind.fallback_prefix()))
    }
}

impl AsRef<str> for FallbackKey {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FallbackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
