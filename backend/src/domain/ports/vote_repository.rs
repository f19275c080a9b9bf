//! Port for vote rows keyed by `(user, entity)`.
//!
//! Adapters enforce uniqueness of `(user, entity)` with the store's own
//! constraint. A second insert for the same pair reports
//! [`VoteRepositoryError::DuplicateVote`] instead of creating a row.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{EntityKind, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by vote repository adapters.
    pub enum VoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "vote repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vote repository query failed: {message}",
        /// A vote for this user and entity already exists.
        DuplicateVote => "vote already recorded for this user and entity",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Whether `user` currently has a vote on the entity.
    async fn has_vote(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        user: &UserId,
    ) -> Result<bool, VoteRepositoryError>;

    /// Insert a vote row.
    async fn insert_vote(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        user: &UserId,
    ) -> Result<(), VoteRepositoryError>;

    /// Delete `user`'s vote, returning `true` when a row was removed.
    async fn delete_vote(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        user: &UserId,
    ) -> Result<bool, VoteRepositoryError>;

    /// Count vote rows for the entity.
    async fn count_votes(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
    ) -> Result<u64, VoteRepositoryError>;
}

/// Repository holding no votes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVoteRepository;

#[async_trait]
impl VoteRepository for FixtureVoteRepository {
    async fn has_vote(
        &self,
        _kind: EntityKind,
        _entity_id: Uuid,
        _user: &UserId,
    ) -> Result<bool, VoteRepositoryError> {
        Ok(false)
    }

    async fn insert_vote(
        &self,
        _kind: EntityKind,
        _entity_id: Uuid,
        _user: &UserId,
    ) -> Result<(), VoteRepositoryError> {
        Ok(())
    }

    async fn delete_vote(
        &self,
        _kind: EntityKind,
        _entity_id: Uuid,
        _user: &UserId,
    ) -> Result<bool, VoteRepositoryError> {
        Ok(false)
    }

    async fn count_votes(
        &self,
        _kind: EntityKind,
        _entity_id: Uuid,
    ) -> Result<u64, VoteRepositoryError> {
        Ok(0)
    }
}
