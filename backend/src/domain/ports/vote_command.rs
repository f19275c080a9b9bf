//! Driving ports for vote toggling and vote-status reads.

use async_trait::async_trait;

use crate::domain::{EntityKind, Error, Slug, UserId};

/// Request to flip `user`'s vote on the entity identified by `kind`/`slug`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleVoteRequest {
    pub kind: EntityKind,
    pub slug: Slug,
    pub user: UserId,
}

/// State after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub voted: bool,
    pub vote_count: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteCommand: Send + Sync {
    async fn toggle_vote(&self, request: ToggleVoteRequest) -> Result<VoteOutcome, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteQuery: Send + Sync {
    /// Whether `user` has a vote on the entity. Anonymous callers never do.
    async fn has_voted(
        &self,
        kind: EntityKind,
        slug: Slug,
        user: Option<UserId>,
    ) -> Result<bool, Error>;
}

/// Command that records a vote without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVoteCommand;

#[async_trait]
impl VoteCommand for FixtureVoteCommand {
    async fn toggle_vote(&self, _request: ToggleVoteRequest) -> Result<VoteOutcome, Error> {
        Ok(VoteOutcome {
            voted: true,
            vote_count: 1,
        })
    }
}

/// Query reporting that nobody has voted.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVoteQuery;

#[async_trait]
impl VoteQuery for FixtureVoteQuery {
    async fn has_voted(
        &self,
        _kind: EntityKind,
        _slug: Slug,
        _user: Option<UserId>,
    ) -> Result<bool, Error> {
        Ok(false)
    }
}
