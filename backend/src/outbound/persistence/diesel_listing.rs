//! Raw SQL for the paged project and forum listings.
//!
//! Aggregates are correlated sub-selects so that a page never joins the
//! whole vote table. Filters bind as nullable text; a `NULL` parameter
//! disables its clause.

use chrono::{DateTime, Utc};
use diesel::QueryableByName;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Nullable, Text, Timestamptz};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::{ForumPostListQuery, ForumSort, PageRequest, ProjectListQuery, ProjectSort};

use super::diesel_helpers::count_from_db;
use super::models::{ForumPostRow, OwnerRow, ProjectRow};

const PROJECT_SELECT: &str = r"
SELECT p.id, p.slug, p.name, p.tagline, p.description, p.website, p.github,
       p.status, p.created_at,
       u.id AS owner_id, u.name AS owner_name, u.image AS owner_image, u.bio AS owner_bio,
       (SELECT COUNT(*) FROM votes v WHERE v.project_id = p.id) AS vote_count,
       (SELECT COUNT(*) FROM comments c WHERE c.project_id = p.id) AS comment_count";

const PROJECT_FILTER: &str = r"
FROM projects p
JOIN users u ON u.id = p.owner_id
WHERE ($1::text IS NULL OR p.status = $1)
  AND ($2::text IS NULL
       OR p.name ILIKE $2
       OR p.tagline ILIKE $2
       OR p.description ILIKE $2)";

const FORUM_SELECT: &str = r"
SELECT f.id, f.slug, f.title, f.content, f.created_at,
       u.id AS owner_id, u.name AS owner_name, u.image AS owner_image, u.bio AS owner_bio,
       (SELECT COUNT(*) FROM forum_votes v WHERE v.forum_post_id = f.id) AS vote_count,
       (SELECT COUNT(*) FROM forum_comments c WHERE c.forum_post_id = f.id) AS comment_count";

const FORUM_FILTER: &str = r"
FROM forum_posts f
JOIN users u ON u.id = f.author_id
WHERE ($1::text IS NULL OR f.title ILIKE $1 OR f.content ILIKE $1)";

fn project_order(sort: ProjectSort) -> &'static str {
    match sort {
        ProjectSort::Newest => "p.created_at DESC, p.id DESC",
        ProjectSort::Popular => "vote_count DESC, p.created_at DESC, p.id DESC",
        ProjectSort::Trending => {
            "(SELECT COUNT(*) FROM votes v \
               WHERE v.project_id = p.id AND v.created_at > now() - interval '7 days') DESC, \
             vote_count DESC, p.created_at DESC, p.id DESC"
        }
    }
}

fn forum_order(sort: ForumSort) -> &'static str {
    match sort {
        ForumSort::Newest => "f.created_at DESC, f.id DESC",
        ForumSort::Popular => "vote_count DESC, f.created_at DESC, f.id DESC",
        ForumSort::Active => "comment_count DESC, f.created_at DESC, f.id DESC",
    }
}

fn project_page_sql(sort: ProjectSort) -> String {
    format!(
        "{PROJECT_SELECT}{PROJECT_FILTER}\nORDER BY {}\nLIMIT $3 OFFSET $4",
        project_order(sort)
    )
}

fn forum_page_sql(sort: ForumSort) -> String {
    format!(
        "{FORUM_SELECT}{FORUM_FILTER}\nORDER BY {}\nLIMIT $2 OFFSET $3",
        forum_order(sort)
    )
}

fn count_sql(filter: &str) -> String {
    format!("SELECT COUNT(*) AS total{filter}")
}

fn limit_and_offset(page: PageRequest) -> (i64, i64) {
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
    (i64::from(page.limit()), offset)
}

#[derive(QueryableByName)]
struct TotalRow {
    #[diesel(sql_type = BigInt)]
    total: i64,
}

#[derive(QueryableByName)]
pub(crate) struct ProjectListRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    id: Uuid,
    #[diesel(sql_type = Text)]
    slug: String,
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    tagline: String,
    #[diesel(sql_type = Text)]
    description: String,
    #[diesel(sql_type = Nullable<Text>)]
    website: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    github: Option<String>,
    #[diesel(sql_type = Text)]
    status: String,
    #[diesel(sql_type = Timestamptz)]
    created_at: DateTime<Utc>,
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    owner_id: Uuid,
    #[diesel(sql_type = Nullable<Text>)]
    owner_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    owner_image: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    owner_bio: Option<String>,
    #[diesel(sql_type = BigInt)]
    vote_count: i64,
    #[diesel(sql_type = BigInt)]
    comment_count: i64,
}

#[derive(QueryableByName)]
pub(crate) struct ForumListRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    id: Uuid,
    #[diesel(sql_type = Text)]
    slug: String,
    #[diesel(sql_type = Text)]
    title: String,
    #[diesel(sql_type = Text)]
    content: String,
    #[diesel(sql_type = Timestamptz)]
    created_at: DateTime<Utc>,
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    owner_id: Uuid,
    #[diesel(sql_type = Nullable<Text>)]
    owner_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    owner_image: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    owner_bio: Option<String>,
    #[diesel(sql_type = BigInt)]
    vote_count: i64,
    #[diesel(sql_type = BigInt)]
    comment_count: i64,
}

/// A listed row split into the shapes the single-row mappers accept, plus
/// its vote and comment counts.
pub(crate) struct ListedRow<R> {
    pub row: R,
    pub owner: OwnerRow,
    pub vote_count: u64,
    pub comment_count: u64,
}

impl From<ProjectListRow> for ListedRow<ProjectRow> {
    fn from(row: ProjectListRow) -> Self {
        Self {
            row: ProjectRow {
                id: row.id,
                slug: row.slug,
                name: row.name,
                tagline: row.tagline,
                description: row.description,
                website: row.website,
                github: row.github,
                status: row.status,
                created_at: row.created_at,
            },
            owner: OwnerRow {
                id: row.owner_id,
                name: row.owner_name,
                image: row.owner_image,
                bio: row.owner_bio,
            },
            vote_count: count_from_db(row.vote_count),
            comment_count: count_from_db(row.comment_count),
        }
    }
}

impl From<ForumListRow> for ListedRow<ForumPostRow> {
    fn from(row: ForumListRow) -> Self {
        Self {
            row: ForumPostRow {
                id: row.id,
                slug: row.slug,
                title: row.title,
                content: row.content,
                created_at: row.created_at,
            },
            owner: OwnerRow {
                id: row.owner_id,
                name: row.owner_name,
                image: row.owner_image,
                bio: row.owner_bio,
            },
            vote_count: count_from_db(row.vote_count),
            comment_count: count_from_db(row.comment_count),
        }
    }
}

/// Load one page of projects and the size of the filtered set.
pub(crate) async fn load_project_page(
    conn: &mut AsyncPgConnection,
    query: &ProjectListQuery,
) -> Result<(Vec<ListedRow<ProjectRow>>, u64), diesel::result::Error> {
    let status = query.status.map(|status| status.as_str());
    let pattern = query.search.as_ref().map(|term| term.like_pattern());
    let (limit, offset) = limit_and_offset(query.page);

    let total = sql_query(count_sql(PROJECT_FILTER))
        .bind::<Nullable<Text>, _>(status)
        .bind::<Nullable<Text>, _>(pattern.as_deref())
        .get_result::<TotalRow>(conn)
        .await?
        .total;

    let rows = sql_query(project_page_sql(query.sort))
        .bind::<Nullable<Text>, _>(status)
        .bind::<Nullable<Text>, _>(pattern.as_deref())
        .bind::<BigInt, _>(limit)
        .bind::<BigInt, _>(offset)
        .load::<ProjectListRow>(conn)
        .await?;

    Ok((
        rows.into_iter().map(ListedRow::from).collect(),
        count_from_db(total),
    ))
}

/// Load one page of forum posts and the size of the filtered set.
pub(crate) async fn load_forum_page(
    conn: &mut AsyncPgConnection,
    query: &ForumPostListQuery,
) -> Result<(Vec<ListedRow<ForumPostRow>>, u64), diesel::result::Error> {
    let pattern = query.search.as_ref().map(|term| term.like_pattern());
    let (limit, offset) = limit_and_offset(query.page);

    let total = sql_query(count_sql(FORUM_FILTER))
        .bind::<Nullable<Text>, _>(pattern.as_deref())
        .get_result::<TotalRow>(conn)
        .await?
        .total;

    let rows = sql_query(forum_page_sql(query.sort))
        .bind::<Nullable<Text>, _>(pattern.as_deref())
        .bind::<BigInt, _>(limit)
        .bind::<BigInt, _>(offset)
        .load::<ForumListRow>(conn)
        .await?;

    Ok((
        rows.into_iter().map(ListedRow::from).collect(),
        count_from_db(total),
    ))
}
