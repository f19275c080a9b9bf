//! Vote toggle engine.
//!
//! One implementation serves every [`EntityKind`]. Slugs with a persisted row
//! go through the vote repository, whose uniqueness constraint on
//! `(user, entity)` is the only arbiter of concurrent toggles. Slugs without a
//! row are served by the fallback store when it is enabled.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::engagement_support::{
    entity_not_found, map_fallback_error, map_vote_error, resolve_entity,
};
use crate::domain::ports::{
    FallbackStore, ToggleVoteRequest, VotableEntityRepository, VoteCommand, VoteOutcome,
    VoteQuery, VoteRepository, VoteRepositoryError,
};
use crate::domain::{EntityKind, Error, FallbackKey, Slug, UserId, VotableEntity};

/// Vote service implementing [`VoteCommand`] and [`VoteQuery`].
#[derive(Clone)]
pub struct VoteService<E, V, F> {
    entities: Arc<E>,
    votes: Arc<V>,
    fallback: Arc<F>,
}

impl<E, V, F> VoteService<E, V, F> {
    pub fn new(entities: Arc<E>, votes: Arc<V>, fallback: Arc<F>) -> Self {
        Self {
            entities,
            votes,
            fallback,
        }
    }
}

impl<E, V, F> VoteService<E, V, F>
where
    E: VotableEntityRepository,
    V: VoteRepository,
    F: FallbackStore,
{
    async fn toggle_persisted(
        &self,
        entity: &VotableEntity,
        user: &UserId,
    ) -> Result<VoteOutcome, Error> {
        let existing = self
            .votes
            .has_vote(entity.kind, entity.id, user)
            .await
            .map_err(map_vote_error)?;

        let voted = if existing {
            let removed = self
                .votes
                .delete_vote(entity.kind, entity.id, user)
                .await
                .map_err(map_vote_error)?;
            if !removed {
                debug!(entity_id = %entity.id, "vote already retracted by a concurrent request");
            }
            false
        } else {
            match self.votes.insert_vote(entity.kind, entity.id, user).await {
                Ok(()) => true,
                Err(VoteRepositoryError::DuplicateVote) => {
                    debug!(entity_id = %entity.id, "vote already recorded by a concurrent request");
                    true
                }
                Err(error) => return Err(map_vote_error(error)),
            }
        };

        let vote_count = self
            .votes
            .count_votes(entity.kind, entity.id)
            .await
            .map_err(map_vote_error)?;

        debug!(
            kind = %entity.kind,
            slug = %entity.slug,
            voted,
            vote_count,
            "vote toggled"
        );
        Ok(VoteOutcome { voted, vote_count })
    }

    async fn toggle_fallback(
        &self,
        kind: EntityKind,
        slug: &Slug,
        user: &UserId,
    ) -> Result<VoteOutcome, Error> {
        if !self.fallback.is_enabled() {
            return Err(entity_not_found(kind, slug));
        }

        let key = FallbackKey::new(kind, slug);
        let mut record = self
            .fallback
            .get(&key)
            .await
            .map_err(map_fallback_error)?
            .unwrap_or_default();
        let voted = record.toggle_vote(user);
        let vote_count = record.vote_count();

        let stored = if record.is_empty() {
            self.fallback.delete(&key).await
        } else {
            self.fallback.put(&key, record).await
        };
        stored.map_err(map_fallback_error)?;

        info!(key = %key, voted, vote_count, "vote served by fallback store");
        Ok(VoteOutcome { voted, vote_count })
    }
}

#[async_trait]
impl<E, V, F> VoteCommand for VoteService<E, V, F>
where
    E: VotableEntityRepository,
    V: VoteRepository,
    F: FallbackStore,
{
    async fn toggle_vote(&self, request: ToggleVoteRequest) -> Result<VoteOutcome, Error> {
        let ToggleVoteRequest { kind, slug, user } = request;
        match resolve_entity(self.entities.as_ref(), kind, &slug).await? {
            Some(entity) => self.toggle_persisted(&entity, &user).await,
            None => self.toggle_fallback(kind, &slug, &user).await,
        }
    }
}

#[async_trait]
impl<E, V, F> VoteQuery for VoteService<E, V, F>
where
    E: VotableEntityRepository,
    V: VoteRepository,
    F: FallbackStore,
{
    async fn has_voted(
        &self,
        kind: EntityKind,
        slug: Slug,
        user: Option<UserId>,
    ) -> Result<bool, Error> {
        let Some(user) = user else {
            return Ok(false);
        };

        if let Some(entity) = resolve_entity(self.entities.as_ref(), kind, &slug).await? {
            return self
                .votes
                .has_vote(entity.kind, entity.id, &user)
                .await
                .map_err(map_vote_error);
        }

        if !self.fallback.is_enabled() {
            return Ok(false);
        }
        let record = self
            .fallback
            .get(&FallbackKey::new(kind, &slug))
            .await
            .map_err(map_fallback_error)?;
        Ok(record.is_some_and(|record| record.has_voted(&user)))
    }
}

#[cfg(test)]
#[path = "vote_service_tests.rs"]
mod tests;
