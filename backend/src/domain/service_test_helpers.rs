//! Test doubles shared by the domain service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{FallbackStore, FallbackStoreError};
use crate::domain::{
    AuthorProfile, Comment, EmailAddress, EntityKind, FallbackKey, FallbackRecord, Identity, Slug,
    UserId, VotableEntity,
};

/// Map-backed fallback store that records how often it was written.
#[derive(Default)]
pub(crate) struct MapFallbackStore {
    records: Mutex<HashMap<FallbackKey, FallbackRecord>>,
    disabled: bool,
}

impl MapFallbackStore {
    pub(crate) fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    pub(crate) fn record(&self, key: &FallbackKey) -> Option<FallbackRecord> {
        self.records.lock().expect("records lock").get(key).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("records lock").len()
    }
}

#[async_trait]
impl FallbackStore for MapFallbackStore {
    fn is_enabled(&self) -> bool {
        !self.disabled
    }

    async fn get(&self, key: &FallbackKey) -> Result<Option<FallbackRecord>, FallbackStoreError> {
        Ok(self.record(key))
    }

    async fn put(&self, key: &FallbackKey, record: FallbackRecord) -> Result<(), FallbackStoreError> {
        self.records
            .lock()
            .expect("records lock")
            .insert(key.clone(), record);
        Ok(())
    }

    async fn delete(&self, key: &FallbackKey) -> Result<(), FallbackStoreError> {
        self.records.lock().expect("records lock").remove(key);
        Ok(())
    }
}

pub(crate) fn slug(raw: &str) -> Slug {
    Slug::parse(raw).expect("valid slug")
}

pub(crate) fn persisted(kind: EntityKind, raw_slug: &str) -> VotableEntity {
    VotableEntity {
        id: Uuid::new_v4(),
        kind,
        slug: slug(raw_slug),
        owner_id: UserId::random(),
    }
}

pub(crate) fn identity(name: &str) -> Identity {
    let email = format!("{}@devhunt.dev", name.to_lowercase());
    Identity::new(
        UserId::random(),
        EmailAddress::new(email).expect("valid email"),
    )
    .with_name(name)
}

pub(crate) fn stored_comment(author: &Identity, content: &str) -> Comment {
    let now = Utc::now();
    Comment {
        id: Uuid::new_v4(),
        content: content.to_owned(),
        created_at: now,
        updated_at: now,
        author: AuthorProfile {
            id: author.user_id().clone(),
            name: author.name().map(str::to_owned),
            image: None,
        },
    }
}
