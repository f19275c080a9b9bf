//! Shared helpers for the HTTP integration tests.
//!
//! Integration tests compile as separate crates, so the in-memory adapters
//! and the app harness live here rather than behind `#[cfg(test)]` in the
//! library.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use actix_session::SessionMiddleware;
use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use devhunt::domain::ports::{
    CommentRepository, CommentRepositoryError, EntityRepositoryError, FallbackStore,
    VotableEntityRepository, VoteRepository, VoteRepositoryError,
};
use devhunt::domain::{
    Comment, CommentContent, CommentService, EntityKind, Slug, UserId, VotableEntity, VoteService,
};
use devhunt::inbound::http::configure_api;
use devhunt::inbound::http::state::HttpState;
use devhunt::outbound::fallback::InMemoryFallbackStore;

pub const DEMO_EMAIL: &str = "ada@devhunt.dev";
pub const DEMO_PASSWORD: &str = "password";
pub const OTHER_EMAIL: &str = "grace@devhunt.dev";

type VoteKey = (EntityKind, Uuid, UserId);

#[derive(Default)]
struct Tables {
    entities: Vec<VotableEntity>,
    votes: HashSet<VoteKey>,
    comments: HashMap<(EntityKind, Uuid), Vec<Comment>>,
}

/// Persistence double with the same uniqueness rule as the votes tables.
#[derive(Clone, Default)]
pub struct InMemoryPersistence {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryPersistence {
    /// Register a persisted entity owned by a random user.
    pub fn with_entity(self, kind: EntityKind, slug: &str) -> Self {
        self.tables
            .lock()
            .expect("tables lock")
            .entities
            .push(VotableEntity {
                id: Uuid::new_v4(),
                kind,
                slug: Slug::parse(slug).expect("valid slug"),
                owner_id: UserId::random(),
            });
        self
    }

    pub fn vote_rows(&self) -> usize {
        self.tables.lock().expect("tables lock").votes.len()
    }

    pub fn comment_rows(&self) -> usize {
        self.lock().comments.values().map(Vec::len).sum()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("tables lock")
    }
}

#[async_trait]
impl VotableEntityRepository for InMemoryPersistence {
    async fn find_by_slug(
        &self,
        kind: EntityKind,
        slug: &Slug,
    ) -> Result<Option<VotableEntity>, EntityRepositoryError> {
        Ok(self
            .lock()
            .entities
            .iter()
            .find(|entity| entity.kind == kind && &entity.slug == slug)
            .cloned())
    }
}

#[async_trait]
impl VoteRepository for InMemoryPersistence {
    async fn has_vote(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        user: &UserId,
    ) -> Result<bool, VoteRepositoryError> {
        Ok(self.lock().votes.contains(&(kind, entity_id, user.clone())))
    }

    async fn insert_vote(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        user: &UserId,
    ) -> Result<(), VoteRepositoryError> {
        if self.lock().votes.insert((kind, entity_id, user.clone())) {
            Ok(())
        } else {
            Err(VoteRepositoryError::DuplicateVote)
        }
    }

    async fn delete_vote(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        user: &UserId,
    ) -> Result<bool, VoteRepositoryError> {
        Ok(self.lock().votes.remove(&(kind, entity_id, user.clone())))
    }

    async fn count_votes(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
    ) -> Result<u64, VoteRepositoryError> {
        let count = self
            .lock()
            .votes
            .iter()
            .filter(|(k, id, _)| *k == kind && *id == entity_id)
            .count();
        Ok(u64::try_from(count).expect("count fits in u64"))
    }
}

#[async_trait]
impl CommentRepository for InMemoryPersistence {
    async fn insert_comment(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        author: &UserId,
        content: &CommentContent,
    ) -> Result<Comment, CommentRepositoryError> {
        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            content: content.as_ref().to_owned(),
            created_at: now,
            updated_at: now,
            author: devhunt::domain::AuthorProfile {
                id: author.clone(),
                name: None,
                image: None,
            },
        };
        self.lock()
            .comments
            .entry((kind, entity_id))
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    async fn list_comments(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        Ok(self
            .lock()
            .comments
            .get(&(kind, entity_id))
            .map(|comments| comments.iter().rev().cloned().collect())
            .unwrap_or_default())
    }
}

/// HTTP state running the real engines over `persistence` and `fallback`.
pub fn engagement_state<F>(persistence: &InMemoryPersistence, fallback: Arc<F>) -> HttpState
where
    F: FallbackStore + 'static,
{
    let shared = Arc::new(persistence.clone());
    let votes = Arc::new(VoteService::new(
        shared.clone(),
        shared.clone(),
        fallback.clone(),
    ));
    let comments = Arc::new(CommentService::new(shared.clone(), shared, fallback));
    HttpState {
        votes: votes.clone(),
        votes_query: votes,
        comments: comments.clone(),
        comments_query: comments,
        ..HttpState::default()
    }
}

pub fn fresh_fallback() -> Arc<InMemoryFallbackStore> {
    Arc::new(InMemoryFallbackStore::new())
}

/// Initialise the `/api/v1` scope behind cookie sessions signed with `key`.
pub async fn init_app(
    state: HttpState,
    key: Key,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
{
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_secure(false)
        .cookie_content_security(CookieContentSecurity::Private)
        .build();
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").wrap(session).configure(configure_api)),
    )
    .await
}

/// Log in as `email` and return the session cookie.
pub async fn login<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"email": email, "password": DEMO_PASSWORD}))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login failed for {email}");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
