//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them to
//! domain values before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    comments, forum_comments, forum_posts, forum_votes, projects, users, votes,
};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub image: Option<&'a str>,
}

/// Author projection attached to comments.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AuthorRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub image: Option<String>,
}

/// Owner projection attached to projects and forum posts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OwnerRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
}

// ---------------------------------------------------------------------------
// Projects and forum posts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub website: Option<String>,
    pub github: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub(crate) struct NewProjectRow<'a> {
    pub id: Uuid,
    pub slug: &'a str,
    pub name: &'a str,
    pub tagline: &'a str,
    pub description: &'a str,
    pub website: Option<&'a str>,
    pub github: Option<&'a str>,
    pub status: &'a str,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = forum_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ForumPostRow {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Votes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = votes)]
pub(crate) struct NewVoteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = forum_votes)]
pub(crate) struct NewForumVoteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub forum_post_id: Uuid,
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub id: Uuid,
    pub content: &'a str,
    pub project_id: Uuid,
    pub author_id: Uuid,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = forum_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ForumCommentRow {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = forum_comments)]
pub(crate) struct NewForumCommentRow<'a> {
    pub id: Uuid,
    pub content: &'a str,
    pub forum_post_id: Uuid,
    pub author_id: Uuid,
}

impl From<ForumCommentRow> for CommentRow {
    fn from(row: ForumCommentRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
