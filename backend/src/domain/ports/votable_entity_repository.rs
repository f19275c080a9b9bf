//! Port resolving project and forum post slugs to persisted rows.

use async_trait::async_trait;

use crate::domain::{EntityKind, Slug, VotableEntity};

use super::define_port_error;

define_port_error! {
    /// Errors raised by entity lookup adapters.
    pub enum EntityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "entity repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "entity repository query failed: {message}",
    }
}

/// Resolve a slug to the persisted entity of the given kind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VotableEntityRepository: Send + Sync {
    /// `Ok(None)` when no row of `kind` has `slug`.
    async fn find_by_slug(
        &self,
        kind: EntityKind,
        slug: &Slug,
    ) -> Result<Option<VotableEntity>, EntityRepositoryError>;
}

/// Repository with no persisted entities; every slug resolves to the fallback
/// store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVotableEntityRepository;

#[async_trait]
impl VotableEntityRepository for FixtureVotableEntityRepository {
    async fn find_by_slug(
        &self,
        _kind: EntityKind,
        _slug: &Slug,
    ) -> Result<Option<VotableEntity>, EntityRepositoryError> {
        Ok(None)
    }
}
