//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CommentCommand, CommentQuery, FixtureCommentCommand, FixtureCommentQuery,
    FixtureForumPostQuery, FixtureLoginService, FixtureProjectCommand, FixtureProjectQuery,
    FixtureVoteCommand, FixtureVoteQuery, ForumPostQuery, LoginService, ProjectCommand,
    ProjectQuery, VoteCommand, VoteQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// [`Default`] wires every port to its fixture, which handler tests override
/// field by field.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub votes: Arc<dyn VoteCommand>,
    pub votes_query: Arc<dyn VoteQuery>,
    pub comments: Arc<dyn CommentCommand>,
    pub comments_query: Arc<dyn CommentQuery>,
    pub projects: Arc<dyn ProjectCommand>,
    pub projects_query: Arc<dyn ProjectQuery>,
    pub forum_posts: Arc<dyn ForumPostQuery>,
}

impl Default for HttpState {
    fn default() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            votes: Arc::new(FixtureVoteCommand),
            votes_query: Arc::new(FixtureVoteQuery),
            comments: Arc::new(FixtureCommentCommand),
            comments_query: Arc::new(FixtureCommentQuery),
            projects: Arc::new(FixtureProjectCommand),
            projects_query: Arc::new(FixtureProjectQuery),
            forum_posts: Arc::new(FixtureForumPostQuery),
        }
    }
}
