//! Internal helpers shared by the vote and comment services.

use crate::domain::ports::{
    CommentRepositoryError, EntityRepositoryError, FallbackStoreError, VotableEntityRepository,
    VoteRepositoryError,
};
use crate::domain::{EntityKind, Error, Slug, VotableEntity};

pub(crate) fn map_entity_error(error: EntityRepositoryError) -> Error {
    match error {
        EntityRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("entity repository unavailable: {message}"))
        }
        EntityRepositoryError::Query { message } => {
            Error::internal(format!("entity repository error: {message}"))
        }
    }
}

pub(crate) fn map_vote_error(error: VoteRepositoryError) -> Error {
    match error {
        VoteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("vote repository unavailable: {message}"))
        }
        VoteRepositoryError::Query { message } => {
            Error::internal(format!("vote repository error: {message}"))
        }
        VoteRepositoryError::DuplicateVote => Error::conflict("vote already recorded"),
    }
}

pub(crate) fn map_comment_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
    }
}

pub(crate) fn map_fallback_error(error: FallbackStoreError) -> Error {
    match error {
        FallbackStoreError::Unavailable { message } => {
            Error::service_unavailable(format!("fallback store unavailable: {message}"))
        }
    }
}

pub(crate) fn entity_not_found(kind: EntityKind, slug: &Slug) -> Error {
    Error::not_found(format!("{kind} {slug} not found"))
}

pub(crate) async fn resolve_entity<E>(
    entities: &E,
    kind: EntityKind,
    slug: &Slug,
) -> Result<Option<VotableEntity>, Error>
where
    E: VotableEntityRepository + ?Sized,
{
    entities
        .find_by_slug(kind, slug)
        .await
        .map_err(map_entity_error)
}
