//! Tests for the vote toggle engine.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    FixtureVotableEntityRepository, FixtureVoteRepository, MockFallbackStore,
    MockVotableEntityRepository, MockVoteRepository,
};
use crate::domain::service_test_helpers::{MapFallbackStore, persisted, slug};

fn entity_repo_returning(entity: Option<VotableEntity>) -> MockVotableEntityRepository {
    let mut repo = MockVotableEntityRepository::new();
    repo.expect_find_by_slug()
        .returning(move |_, _| Ok(entity.clone()));
    repo
}

fn persisted_service(
    entity: &VotableEntity,
    votes: MockVoteRepository,
) -> VoteService<MockVotableEntityRepository, MockVoteRepository, MapFallbackStore> {
    VoteService::new(
        Arc::new(entity_repo_returning(Some(entity.clone()))),
        Arc::new(votes),
        Arc::new(MapFallbackStore::default()),
    )
}

fn fallback_service(
    store: Arc<MapFallbackStore>,
) -> VoteService<FixtureVotableEntityRepository, FixtureVoteRepository, MapFallbackStore> {
    VoteService::new(
        Arc::new(FixtureVotableEntityRepository),
        Arc::new(FixtureVoteRepository),
        store,
    )
}

fn toggle(kind: EntityKind, raw_slug: &str, user: &UserId) -> ToggleVoteRequest {
    ToggleVoteRequest {
        kind,
        slug: slug(raw_slug),
        user: user.clone(),
    }
}

#[rstest]
#[case(EntityKind::Project)]
#[case(EntityKind::ForumPost)]
#[tokio::test]
async fn first_toggle_inserts_a_vote(#[case] kind: EntityKind) {
    let entity = persisted(kind, "code-craft");
    let user = UserId::random();
    let mut votes = MockVoteRepository::new();
    votes
        .expect_has_vote()
        .with(eq(kind), eq(entity.id), eq(user.clone()))
        .times(1)
        .return_once(|_, _, _| Ok(false));
    votes
        .expect_insert_vote()
        .with(eq(kind), eq(entity.id), eq(user.clone()))
        .times(1)
        .return_once(|_, _, _| Ok(()));
    votes.expect_delete_vote().never();
    votes
        .expect_count_votes()
        .with(eq(kind), eq(entity.id))
        .times(1)
        .return_once(|_, _| Ok(1));

    let outcome = persisted_service(&entity, votes)
        .toggle_vote(toggle(kind, "code-craft", &user))
        .await
        .expect("toggle succeeds");

    assert_eq!(
        outcome,
        VoteOutcome {
            voted: true,
            vote_count: 1
        }
    );
}

#[tokio::test]
async fn second_toggle_deletes_the_vote() {
    let entity = persisted(EntityKind::Project, "code-craft");
    let user = UserId::random();
    let mut votes = MockVoteRepository::new();
    votes.expect_has_vote().return_once(|_, _, _| Ok(true));
    votes.expect_insert_vote().never();
    votes
        .expect_delete_vote()
        .times(1)
        .return_once(|_, _, _| Ok(true));
    votes.expect_count_votes().return_once(|_, _| Ok(0));

    let outcome = persisted_service(&entity, votes)
        .toggle_vote(toggle(EntityKind::Project, "code-craft", &user))
        .await
        .expect("toggle succeeds");

    assert_eq!(
        outcome,
        VoteOutcome {
            voted: false,
            vote_count: 0
        }
    );
}

#[tokio::test]
async fn duplicate_insert_is_absorbed_and_recounted() {
    let entity = persisted(EntityKind::ForumPost, "rust-tips");
    let mut votes = MockVoteRepository::new();
    votes.expect_has_vote().return_once(|_, _, _| Ok(false));
    votes
        .expect_insert_vote()
        .return_once(|_, _, _| Err(VoteRepositoryError::duplicate_vote()));
    votes
        .expect_count_votes()
        .times(1)
        .return_once(|_, _| Ok(3));

    let outcome = persisted_service(&entity, votes)
        .toggle_vote(toggle(EntityKind::ForumPost, "rust-tips", &UserId::random()))
        .await
        .expect("duplicate vote is not an error");

    assert_eq!(
        outcome,
        VoteOutcome {
            voted: true,
            vote_count: 3
        }
    );
}

#[tokio::test]
async fn concurrent_retraction_is_absorbed() {
    let entity = persisted(EntityKind::Project, "code-craft");
    let mut votes = MockVoteRepository::new();
    votes.expect_has_vote().return_once(|_, _, _| Ok(true));
    votes.expect_delete_vote().return_once(|_, _, _| Ok(false));
    votes.expect_count_votes().return_once(|_, _| Ok(0));

    let outcome = persisted_service(&entity, votes)
        .toggle_vote(toggle(EntityKind::Project, "code-craft", &UserId::random()))
        .await
        .expect("toggle succeeds");

    assert!(!outcome.voted);
}

#[rstest]
#[case(VoteRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(VoteRepositoryError::query("boom"), ErrorCode::InternalError)]
#[tokio::test]
async fn insert_failures_are_surfaced(#[case] failure: VoteRepositoryError, #[case] code: ErrorCode) {
    let entity = persisted(EntityKind::Project, "code-craft");
    let mut votes = MockVoteRepository::new();
    votes.expect_has_vote().return_once(|_, _, _| Ok(false));
    votes
        .expect_insert_vote()
        .return_once(move |_, _, _| Err(failure));
    votes.expect_count_votes().never();

    let error = persisted_service(&entity, votes)
        .toggle_vote(toggle(EntityKind::Project, "code-craft", &UserId::random()))
        .await
        .expect_err("insert failure propagates");

    assert_eq!(error.code(), code);
}

#[tokio::test]
async fn entity_lookup_failure_is_unavailable() {
    let mut entities = MockVotableEntityRepository::new();
    entities.expect_find_by_slug().return_once(|_, _| {
        Err(crate::domain::ports::EntityRepositoryError::connection(
            "refused",
        ))
    });
    let service = VoteService::new(
        Arc::new(entities),
        Arc::new(FixtureVoteRepository),
        Arc::new(MapFallbackStore::default()),
    );

    let error = service
        .toggle_vote(toggle(EntityKind::Project, "code-craft", &UserId::random()))
        .await
        .expect_err("lookup failure propagates");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn scenario_two_users_on_a_fallback_project() {
    let store = Arc::new(MapFallbackStore::default());
    let service = fallback_service(store.clone());
    let ada = UserId::random();
    let grace = UserId::random();

    let first = service
        .toggle_vote(toggle(EntityKind::Project, "code-craft", &ada))
        .await
        .expect("first toggle");
    let second = service
        .toggle_vote(toggle(EntityKind::Project, "code-craft", &ada))
        .await
        .expect("second toggle");
    let third = service
        .toggle_vote(toggle(EntityKind::Project, "code-craft", &grace))
        .await
        .expect("third toggle");

    assert_eq!(
        (first.voted, first.vote_count),
        (true, 1),
        "first toggle records the vote"
    );
    assert_eq!((second.voted, second.vote_count), (false, 0));
    assert_eq!((third.voted, third.vote_count), (true, 1));

    let key = FallbackKey::new(EntityKind::Project, &slug("code-craft"));
    let record = store.record(&key).expect("record stored");
    assert!(record.has_voted(&grace));
    assert!(!record.has_voted(&ada));
}

#[tokio::test]
async fn fallback_record_is_removed_once_empty() {
    let store = Arc::new(MapFallbackStore::default());
    let service = fallback_service(store.clone());
    let user = UserId::random();

    for _ in 0..2 {
        service
            .toggle_vote(toggle(EntityKind::ForumPost, "welcome", &user))
            .await
            .expect("toggle succeeds");
    }

    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn fallback_keys_do_not_collide_across_kinds() {
    let store = Arc::new(MapFallbackStore::default());
    let service = fallback_service(store.clone());
    let user = UserId::random();

    service
        .toggle_vote(toggle(EntityKind::Project, "welcome", &user))
        .await
        .expect("project toggle");
    let forum = service
        .toggle_vote(toggle(EntityKind::ForumPost, "welcome", &user))
        .await
        .expect("forum toggle");

    assert_eq!((forum.voted, forum.vote_count), (true, 1));
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn disabled_fallback_reports_not_found() {
    let service = VoteService::new(
        Arc::new(FixtureVotableEntityRepository),
        Arc::new(FixtureVoteRepository),
        Arc::new(MapFallbackStore::disabled()),
    );

    let error = service
        .toggle_vote(toggle(EntityKind::Project, "ghost", &UserId::random()))
        .await
        .expect_err("absent entity without fallback");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn fallback_store_outage_is_unavailable() {
    let mut store = MockFallbackStore::new();
    store.expect_is_enabled().return_const(true);
    store.expect_get().return_once(|_| {
        Err(crate::domain::ports::FallbackStoreError::unavailable(
            "cache down",
        ))
    });
    store.expect_put().never();
    let service = VoteService::new(
        Arc::new(FixtureVotableEntityRepository),
        Arc::new(FixtureVoteRepository),
        Arc::new(store),
    );

    let error = service
        .toggle_vote(toggle(EntityKind::Project, "code-craft", &UserId::random()))
        .await
        .expect_err("store outage propagates");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn anonymous_callers_have_not_voted_and_storage_is_untouched() {
    let mut entities = MockVotableEntityRepository::new();
    entities.expect_find_by_slug().never();
    let mut votes = MockVoteRepository::new();
    votes.expect_has_vote().never();
    let service = VoteService::new(
        Arc::new(entities),
        Arc::new(votes),
        Arc::new(MapFallbackStore::default()),
    );

    let voted = service
        .has_voted(EntityKind::Project, slug("code-craft"), None)
        .await
        .expect("query succeeds");

    assert!(!voted);
}

#[tokio::test]
async fn has_voted_reads_persisted_votes() {
    let entity = persisted(EntityKind::ForumPost, "rust-tips");
    let user = UserId::random();
    let mut votes = MockVoteRepository::new();
    votes
        .expect_has_vote()
        .with(eq(EntityKind::ForumPost), eq(entity.id), eq(user.clone()))
        .return_once(|_, _, _| Ok(true));
    let service = persisted_service(&entity, votes);

    let voted = service
        .has_voted(EntityKind::ForumPost, slug("rust-tips"), Some(user))
        .await
        .expect("query succeeds");

    assert!(voted);
}

#[tokio::test]
async fn has_voted_reflects_fallback_votes() {
    let store = Arc::new(MapFallbackStore::default());
    let service = fallback_service(store);
    let user = UserId::random();

    let before = service
        .has_voted(EntityKind::ForumPost, slug("welcome"), Some(user.clone()))
        .await
        .expect("query succeeds");
    service
        .toggle_vote(toggle(EntityKind::ForumPost, "welcome", &user))
        .await
        .expect("toggle succeeds");
    let after = service
        .has_voted(EntityKind::ForumPost, slug("welcome"), Some(user))
        .await
        .expect("query succeeds");

    assert!(!before);
    assert!(after);
}

#[tokio::test]
async fn has_voted_is_false_when_fallback_disabled() {
    let service = VoteService::new(
        Arc::new(FixtureVotableEntityRepository),
        Arc::new(FixtureVoteRepository),
        Arc::new(MapFallbackStore::disabled()),
    );

    let voted = service
        .has_voted(EntityKind::Project, slug("ghost"), Some(UserId::random()))
        .await
        .expect("query succeeds");

    assert!(!voted);
}
