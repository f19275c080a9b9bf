//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP and
//! persistence adapters, plus the services that implement the driving ports.
//! Types stay free of transport concerns; invariants and serialisation
//! contracts are documented on each type.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Identity, UserId — the verified caller and its ownership key.
//! - EntityKind, Slug, VotableEntity — what votes and comments attach to.
//! - VoteService, CommentService — the engagement engines shared by every
//!   entity kind.
//! - ProjectService, ForumPostService — project submission, detail reads and
//!   paged listings.

pub mod auth;
pub mod comment;
pub mod comment_service;
pub(crate) mod engagement_support;
pub mod entity;
pub mod error;
pub mod fallback;
pub mod forum;
pub mod forum_service;
pub mod listing;
pub mod ports;
pub mod project_service;
pub mod projects;
pub mod slug;
pub mod trace_id;
pub mod user;
pub mod vote_service;

#[cfg(test)]
mod service_test_helpers;

pub use self::auth::{DEMO_ACCOUNTS, DemoAccount, LoginCredentials, LoginValidationError};
pub use self::comment::{COMMENT_MAX_CHARS, Comment, CommentContent, CommentValidationError};
pub use self::comment_service::CommentService;
pub use self::entity::{EntityKind, FallbackKey, VotableEntity};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::fallback::FallbackRecord;
pub use self::forum::{ForumPost, ForumPostDetail};
pub use self::forum_service::ForumPostService;
pub use self::listing::{
    FORUM_PAGE_SIZE, ForumPostListQuery, ForumPostSummary, ForumSort, ListingValidationError,
    MAX_PAGE_SIZE, PROJECT_PAGE_SIZE, PageRequest, Paginated, ProjectListQuery, ProjectSort,
    ProjectSummary, SearchTerm,
};
pub use self::project_service::ProjectService;
pub use self::projects::{
    NewProject, Project, ProjectDetail, ProjectDraft, ProjectStatus, ProjectValidationError,
};
pub use self::slug::{Slug, SlugValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{AuthorProfile, EmailAddress, Identity, OwnerProfile, UserId, UserValidationError};
pub use self::vote_service::VoteService;
