//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`FallbackStore`]) are implemented by
//! outbound adapters. Driving ports (`*Command`, `*Query`, [`LoginService`])
//! are implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod comment_command;
mod comment_repository;
mod fallback_store;
mod forum_post_query;
mod forum_post_repository;
mod login_service;
mod project_command;
mod project_repository;
mod user_repository;
mod votable_entity_repository;
mod vote_command;
mod vote_repository;

#[cfg(test)]
pub use comment_command::{MockCommentCommand, MockCommentQuery};
pub use comment_command::{
    AddCommentRequest, CommentCommand, CommentQuery, FixtureCommentCommand, FixtureCommentQuery,
};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError, FixtureCommentRepository};
#[cfg(test)]
pub use fallback_store::MockFallbackStore;
pub use fallback_store::{DisabledFallbackStore, FallbackStore, FallbackStoreError};
#[cfg(test)]
pub use forum_post_query::MockForumPostQuery;
pub use forum_post_query::{FixtureForumPostQuery, ForumPostQuery};
#[cfg(test)]
pub use forum_post_repository::MockForumPostRepository;
pub use forum_post_repository::{
    FixtureForumPostRepository, ForumPostRepository, ForumPostRepositoryError,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{DisabledLoginService, FixtureLoginService, LoginService};
#[cfg(test)]
pub use project_command::{MockProjectCommand, MockProjectQuery};
pub use project_command::{FixtureProjectCommand, FixtureProjectQuery, ProjectCommand, ProjectQuery};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{FixtureProjectRepository, ProjectRepository, ProjectRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use votable_entity_repository::MockVotableEntityRepository;
pub use votable_entity_repository::{
    EntityRepositoryError, FixtureVotableEntityRepository, VotableEntityRepository,
};
#[cfg(test)]
pub use vote_command::{MockVoteCommand, MockVoteQuery};
pub use vote_command::{
    FixtureVoteCommand, FixtureVoteQuery, ToggleVoteRequest, VoteCommand, VoteOutcome, VoteQuery,
};
#[cfg(test)]
pub use vote_repository::MockVoteRepository;
pub use vote_repository::{FixtureVoteRepository, VoteRepository, VoteRepositoryError};
