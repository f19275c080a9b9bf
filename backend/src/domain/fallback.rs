//! Vote and comment bookkeeping for entities with no persisted row.
//!
//! A [`FallbackRecord`] is held by a
//! [`FallbackStore`](crate::domain::ports::FallbackStore) under a
//! [`FallbackKey`](crate::domain::FallbackKey). Records are never written to
//! the persistent store.

use std::collections::BTreeSet;

use super::{Comment, UserId};

/// Votes and comments recorded for one fallback entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackRecord {
    voters: BTreeSet<UserId>,
    comments: Vec<Comment>,
}

impl FallbackRecord {
    /// Flip `user`'s vote, returning whether the user now has a vote.
    pub fn toggle_vote(&mut self, user: &UserId) -> bool {
        if self.voters.remove(user) {
            false
        } else {
            self.voters.insert(user.clone());
            true
        }
    }

    pub fn has_voted(&self, user: &UserId) -> bool {
        self.voters.contains(user)
    }

    pub fn vote_count(&self) -> u64 {
        self.voters.len() as u64
    }

    /// Append a comment.
    pub fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Comments, newest first: the reverse of append order.
    pub fn comments_newest_first(&self) -> Vec<Comment> {
        self.comments.iter().rev().cloned().collect()
    }

    /// `true` when the record holds neither votes nor comments.
    pub fn is_empty(&self) -> bool {
        self.voters.is_empty() && self.comments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use crate::domain::AuthorProfile;

    #[test]
    fn toggling_twice_restores_the_original_state() {
        let mut record = FallbackRecord::default();
        let user = UserId::random();

        assert!(record.toggle_vote(&user));
        assert!(record.has_voted(&user));
        assert_eq!(record.vote_count(), 1);

        assert!(!record.toggle_vote(&user));
        assert!(!record.has_voted(&user));
        assert_eq!(record.vote_count(), 0);
        assert!(record.is_empty());
    }

    #[test]
    fn votes_are_counted_per_distinct_user() {
        let mut record = FallbackRecord::default();
        record.toggle_vote(&UserId::random());
        record.toggle_vote(&UserId::random());
        assert_eq!(record.vote_count(), 2);
    }

    #[test]
    fn comments_are_returned_newest_first() {
        let mut record = FallbackRecord::default();
        let author = AuthorProfile {
            id: UserId::random(),
            name: Some("Ada Lovelace".to_owned()),
            image: None,
        };
        let earlier = Utc::now();
        for (offset, content) in [(0, "first"), (1, "second")] {
            let at = earlier + Duration::seconds(offset);
            record.push_comment(Comment {
                id: Uuid::new_v4(),
                content: content.to_owned(),
                created_at: at,
                updated_at: at,
                author: author.clone(),
            });
        }
        let contents: Vec<_> = record
            .comments_newest_first()
            .into_iter()
            .map(|comment| comment.content)
            .collect();
        assert_eq!(contents, ["second", "first"]);
    }

    #[test]
    fn comments_sharing_a_timestamp_keep_reverse_append_order() {
        let mut record = FallbackRecord::default();
        let author = AuthorProfile {
            id: UserId::random(),
            name: None,
            image: None,
        };
        let at = Utc::now();
        for content in ["one", "two", "three", "four", "five"] {
            record.push_comment(Comment {
                id: Uuid::new_v4(),
                content: content.to_owned(),
                created_at: at,
                updated_at: at,
                author: author.clone(),
            });
        }
        let contents: Vec<_> = record
            .comments_newest_first()
            .into_iter()
            .map(|comment| comment.content)
            .collect();
        assert_eq!(contents, ["five", "four", "three", "two", "one"]);
    }
}
