//! Wiring of domain services onto the HTTP state.
//!
//! With a database pool the engines run over the Diesel repositories;
//! without one they run over the empty fixtures, so every slug is served by
//! the fallback store. The fallback store itself is in-memory or disabled
//! depending on configuration.

use std::sync::Arc;

use tracing::{info, warn};

use devhunt::domain::ports::{
    CommentRepository, FallbackStore, FixtureCommentRepository, FixtureForumPostRepository,
    FixtureLoginService, FixtureProjectRepository, FixtureVotableEntityRepository,
    FixtureVoteRepository, ForumPostRepository, LoginService, ProjectRepository,
    VotableEntityRepository, VoteRepository,
};
use devhunt::domain::ports::{DisabledFallbackStore, DisabledLoginService};
use devhunt::domain::{CommentService, ForumPostService, ProjectService, VoteService};
use devhunt::inbound::http::state::HttpState;
use devhunt::outbound::fallback::InMemoryFallbackStore;
use devhunt::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselForumPostRepository, DieselLoginService,
    DieselProjectRepository, DieselUserRepository, DieselVotableEntityRepository,
    DieselVoteRepository,
};

use super::ServerConfig;

/// Driven ports shared by the engines.
struct Repositories<E, V, C, P, F> {
    entities: Arc<E>,
    votes: Arc<V>,
    comments: Arc<C>,
    projects: Arc<P>,
    forum_posts: Arc<F>,
    login: Arc<dyn LoginService>,
}

fn diesel_repositories(
    pool: &DbPool,
) -> Repositories<
    DieselVotableEntityRepository,
    DieselVoteRepository,
    DieselCommentRepository,
    DieselProjectRepository,
    DieselForumPostRepository,
> {
    Repositories {
        entities: Arc::new(DieselVotableEntityRepository::new(pool.clone())),
        votes: Arc::new(DieselVoteRepository::new(pool.clone())),
        comments: Arc::new(DieselCommentRepository::new(pool.clone())),
        projects: Arc::new(DieselProjectRepository::new(pool.clone())),
        forum_posts: Arc::new(DieselForumPostRepository::new(pool.clone())),
        login: Arc::new(DieselLoginService::new(DieselUserRepository::new(
            pool.clone(),
        ))),
    }
}

fn fixture_repositories() -> Repositories<
    FixtureVotableEntityRepository,
    FixtureVoteRepository,
    FixtureCommentRepository,
    FixtureProjectRepository,
    FixtureForumPostRepository,
> {
    Repositories {
        entities: Arc::new(FixtureVotableEntityRepository),
        votes: Arc::new(FixtureVoteRepository),
        comments: Arc::new(FixtureCommentRepository),
        projects: Arc::new(FixtureProjectRepository),
        forum_posts: Arc::new(FixtureForumPostRepository),
        login: Arc::new(FixtureLoginService),
    }
}

fn wire<E, V, C, P, F, S>(repos: Repositories<E, V, C, P, F>, fallback: Arc<S>) -> HttpState
where
    E: VotableEntityRepository + 'static,
    V: VoteRepository + 'static,
    C: CommentRepository + 'static,
    P: ProjectRepository + 'static,
    F: ForumPostRepository + 'static,
    S: FallbackStore + 'static,
{
    let Repositories {
        entities,
        votes,
        comments,
        projects,
        forum_posts,
        login,
    } = repos;

    let vote_service = Arc::new(VoteService::new(
        entities.clone(),
        votes.clone(),
        fallback.clone(),
    ));
    let comment_service = Arc::new(CommentService::new(entities, comments.clone(), fallback));
    let project_service = Arc::new(ProjectService::new(
        projects,
        votes.clone(),
        comments.clone(),
    ));
    let forum_service = Arc::new(ForumPostService::new(forum_posts, votes, comments));

    HttpState {
        login,
        votes: vote_service.clone(),
        votes_query: vote_service,
        comments: comment_service.clone(),
        comments_query: comment_service,
        projects: project_service.clone(),
        projects_query: project_service,
        forum_posts: forum_service,
    }
}

fn with_fallback<S>(pool: Option<&DbPool>, fallback: Arc<S>) -> HttpState
where
    S: FallbackStore + 'static,
{
    match pool {
        Some(pool) => wire(diesel_repositories(pool), fallback),
        None => {
            warn!("no database configured; all entities are served by the fallback store");
            wire(fixture_repositories(), fallback)
        }
    }
}

/// Build the HTTP state for `config`.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let pool = config.db_pool.as_ref();
    let mut state = if config.fallback_enabled {
        info!("fallback store enabled (in-memory, non-durable)");
        with_fallback(pool, Arc::new(InMemoryFallbackStore::new()))
    } else {
        info!("fallback store disabled; unknown slugs are not found");
        with_fallback(pool, Arc::new(DisabledFallbackStore))
    };
    if config.demo_login_enabled {
        warn!("development login enabled; demo accounts are accepted");
    } else {
        state.login = Arc::new(DisabledLoginService);
    }
    state
}
