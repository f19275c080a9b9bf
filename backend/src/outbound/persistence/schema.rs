//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Accounts created by the login adapter.
    users (id) {
        id -> Uuid,
        /// Lowercased login email; unique.
        email -> Varchar,
        name -> Nullable<Varchar>,
        /// Avatar URL.
        image -> Nullable<Varchar>,
        bio -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Submitted projects. `slug` is unique.
    projects (id) {
        id -> Uuid,
        slug -> Varchar,
        name -> Varchar,
        tagline -> Varchar,
        description -> Text,
        website -> Nullable<Varchar>,
        github -> Nullable<Varchar>,
        /// One of `development`, `beta`, `launched`.
        status -> Varchar,
        owner_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    forum_posts (id) {
        id -> Uuid,
        slug -> Varchar,
        title -> Varchar,
        content -> Text,
        author_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project votes; unique on `(user_id, project_id)`.
    votes (id) {
        id -> Uuid,
        user_id -> Uuid,
        project_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Forum post votes; unique on `(user_id, forum_post_id)`.
    forum_votes (id) {
        id -> Uuid,
        user_id -> Uuid,
        forum_post_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project comments.
    comments (id) {
        id -> Uuid,
        content -> Text,
        project_id -> Uuid,
        author_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    forum_comments (id) {
        id -> Uuid,
        content -> Text,
        forum_post_id -> Uuid,
        author_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> users (owner_id));
diesel::joinable!(forum_posts -> users (author_id));
diesel::joinable!(votes -> projects (project_id));
diesel::joinable!(votes -> users (user_id));
diesel::joinable!(forum_votes -> forum_posts (forum_post_id));
diesel::joinable!(forum_votes -> users (user_id));
diesel::joinable!(comments -> projects (project_id));
diesel::joinable!(comments -> users (author_id));
diesel::joinable!(forum_comments -> forum_posts (forum_post_id));
diesel::joinable!(forum_comments -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    projects,
    forum_posts,
    votes,
    forum_votes,
    comments,
    forum_comments,
);
