//! `DieselProjectRepository` and `DieselForumPostRepository` against
//! embedded PostgreSQL: slug uniqueness, detail lookups and the paged
//! listings.

use devhunt::domain::ports::{ForumPostRepository, ProjectRepository, ProjectRepositoryError};
use devhunt::domain::{
    ForumPostListQuery, ForumSort, NewProject, PageRequest, ProjectDraft, ProjectListQuery,
    ProjectSort, ProjectStatus, SearchTerm, Slug, UserId,
};
use devhunt::outbound::persistence::{DieselForumPostRepository, DieselProjectRepository};
use postgres::Client;
use rstest::{fixture, rstest};
use uuid::Uuid;

#[path = "support/embedded_postgres.rs"]
mod embedded_postgres;

use embedded_postgres::{
    PgTestDatabase, SeedProject, handle_cluster_setup_failure, seed_forum_post, seed_project,
    seed_project_vote, seed_user,
};

const DAY: i32 = 86_400;

struct ProjectContext {
    projects: DieselProjectRepository,
    posts: DieselForumPostRepository,
    owner: Uuid,
    /// Dropped last so the pools above release their connections first.
    db: PgTestDatabase,
}

fn setup_context() -> Result<ProjectContext, String> {
    let db = PgTestDatabase::start()?;
    let owner = seed_user(&mut db.client(), "Ada Lovelace");
    let projects = DieselProjectRepository::new(db.pool.clone());
    let posts = DieselForumPostRepository::new(db.pool.clone());
    Ok(ProjectContext {
        db,
        projects,
        posts,
        owner,
    })
}

#[fixture]
fn project_context() -> Option<ProjectContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn new_project() -> NewProject {
    NewProject::try_from_draft(ProjectDraft {
        name: "Code Craft".to_owned(),
        tagline: "Sharpen your tools".to_owned(),
        description: "A workshop for building better developer tooling.".to_owned(),
        website: Some("https://codecraft.dev/".to_owned()),
        github: None,
        status: "beta".to_owned(),
    })
    .expect("valid project")
}

fn slug(raw: &str) -> Slug {
    Slug::parse(raw).expect("valid slug")
}

fn project_query(page: u32, limit: u32) -> ProjectListQuery {
    ProjectListQuery {
        page: PageRequest::new(page, limit).expect("valid page"),
        status: None,
        sort: ProjectSort::Newest,
        search: None,
    }
}

fn forum_query(sort: ForumSort) -> ForumPostListQuery {
    ForumPostListQuery {
        page: PageRequest::first(10).expect("valid page"),
        sort,
        search: None,
    }
}

fn search(raw: &str) -> Option<SearchTerm> {
    SearchTerm::parse(raw).expect("valid search")
}

/// Three projects with distinct ages, vote histories and statuses:
///
/// - `old-popular`: launched 30 days ago, three votes from 20 days ago.
/// - `fresh-trend`: beta, 2 days old, two votes from the last hour.
/// - `newest-quiet`: beta, just created, no votes, one comment, and a `%`
///   in its tagline.
fn seed_listing(client: &mut Client, owner: Uuid) {
    let voters: Vec<Uuid> = ["Grace", "Linus", "Barbara"]
        .into_iter()
        .map(|name| seed_user(client, name))
        .collect();

    let old = seed_project(
        client,
        owner,
        &SeedProject {
            name: "Old Popular",
            status: "launched",
            age_secs: 30 * DAY,
            ..SeedProject::new("old-popular")
        },
    );
    let fresh = seed_project(
        client,
        owner,
        &SeedProject {
            name: "Fresh Trend",
            status: "beta",
            age_secs: 2 * DAY,
            ..SeedProject::new("fresh-trend")
        },
    );
    let quiet = seed_project(
        client,
        owner,
        &SeedProject {
            name: "Newest Quiet",
            tagline: "Sharpen 100% of your tools",
            status: "beta",
            ..SeedProject::new("newest-quiet")
        },
    );

    for voter in &voters {
        seed_project_vote(client, *voter, old, 20 * DAY);
    }
    for voter in &voters[..2] {
        seed_project_vote(client, *voter, fresh, 3_600);
    }
    client
        .execute(
            "INSERT INTO comments (id, content, project_id, author_id) VALUES ($1, 'Nice', $2, $3)",
            &[&Uuid::new_v4(), &quiet, &voters[0]],
        )
        .expect("seed comment");
}

fn slugs<T>(items: &[T], slug_of: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|item| slug_of(item).to_owned()).collect()
}

#[rstest]
fn created_projects_are_found_by_slug(project_context: Option<ProjectContext>) {
    let Some(ctx) = project_context else {
        eprintln!("SKIP-TEST-CLUSTER: created_projects_are_found_by_slug skipped");
        return;
    };
    let owner = UserId::from(ctx.owner);
    let code_craft = slug("code-craft");

    ctx.db.runtime.block_on(async {
        assert!(!ctx.projects.slug_exists(&code_craft).await.expect("exists"));
        ctx.projects
            .create(&owner, &code_craft, &new_project())
            .await
            .expect("create");
        assert!(ctx.projects.slug_exists(&code_craft).await.expect("exists"));

        let project = ctx
            .projects
            .find_by_slug(&code_craft)
            .await
            .expect("lookup")
            .expect("project exists");
        assert_eq!(project.name, "Code Craft");
        assert_eq!(project.status, ProjectStatus::Beta);
        assert_eq!(project.website.as_deref(), Some("https://codecraft.dev/"));
        assert_eq!(project.owner.author.id, owner);
        assert_eq!(project.owner.author.name.as_deref(), Some("Ada Lovelace"));
    });
}

#[rstest]
fn slug_collisions_map_to_duplicate_slug(project_context: Option<ProjectContext>) {
    let Some(ctx) = project_context else {
        eprintln!("SKIP-TEST-CLUSTER: slug_collisions_map_to_duplicate_slug skipped");
        return;
    };
    let owner = UserId::from(ctx.owner);
    let code_craft = slug("code-craft");

    let second = ctx.db.runtime.block_on(async {
        ctx.projects
            .create(&owner, &code_craft, &new_project())
            .await
            .expect("first create");
        ctx.projects
            .create(&owner, &code_craft, &new_project())
            .await
    });

    assert_eq!(
        second,
        Err(ProjectRepositoryError::DuplicateSlug {
            slug: "code-craft".to_owned()
        })
    );
}

#[rstest]
fn unknown_slugs_are_absent(project_context: Option<ProjectContext>) {
    let Some(ctx) = project_context else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_slugs_are_absent skipped");
        return;
    };

    ctx.db.runtime.block_on(async {
        let ghost = slug("ghost");
        assert!(ctx.projects.find_by_slug(&ghost).await.expect("lookup").is_none());
        assert!(ctx.posts.find_by_slug(&ghost).await.expect("lookup").is_none());
    });
}

#[rstest]
#[case::newest(ProjectSort::Newest, ["newest-quiet", "fresh-trend", "old-popular"])]
#[case::popular(ProjectSort::Popular, ["old-popular", "fresh-trend", "newest-quiet"])]
#[case::trending(ProjectSort::Trending, ["fresh-trend", "old-popular", "newest-quiet"])]
fn project_listings_follow_the_sort(
    project_context: Option<ProjectContext>,
    #[case] sort: ProjectSort,
    #[case] expected: [&str; 3],
) {
    let Some(ctx) = project_context else {
        eprintln!("SKIP-TEST-CLUSTER: project_listings_follow_the_sort skipped");
        return;
    };
    seed_listing(&mut ctx.db.client(), ctx.owner);

    let listing = ctx
        .db
        .runtime
        .block_on(ctx.projects.list(&ProjectListQuery {
            sort,
            ..project_query(1, 9)
        }))
        .expect("list");

    assert_eq!(listing.total, 3);
    assert_eq!(
        slugs(&listing.items, |s| s.project.slug.as_ref()),
        expected
    );
}

#[rstest]
fn project_listings_carry_aggregates(project_context: Option<ProjectContext>) {
    let Some(ctx) = project_context else {
        eprintln!("SKIP-TEST-CLUSTER: project_listings_carry_aggregates skipped");
        return;
    };
    seed_listing(&mut ctx.db.client(), ctx.owner);

    let listing = ctx
        .db
        .runtime
        .block_on(ctx.projects.list(&project_query(1, 9)))
        .expect("list");

    let counts: Vec<(u64, u64)> = listing
        .items
        .iter()
        .map(|s| (s.vote_count, s.comment_count))
        .collect();
    assert_eq!(counts, [(0, 1), (2, 0), (3, 0)]);
    assert_eq!(
        listing.items[0].project.owner.author.name.as_deref(),
        Some("Ada Lovelace")
    );
}

#[rstest]
fn project_listings_page_through_the_set(project_context: Option<ProjectContext>) {
    let Some(ctx) = project_context else {
        eprintln!("SKIP-TEST-CLUSTER: project_listings_page_through_the_set skipped");
        return;
    };
    seed_listing(&mut ctx.db.client(), ctx.owner);

    let second_page = ctx
        .db
        .runtime
        .block_on(ctx.projects.list(&project_query(2, 2)))
        .expect("list");

    assert_eq!(second_page.total, 3);
    assert_eq!(second_page.total_pages(), 2);
    assert_eq!(
        slugs(&second_page.items, |s| s.project.slug.as_ref()),
        ["old-popular"]
    );
}

#[rstest]
#[case::status(Some(ProjectStatus::Beta), None, vec!["newest-quiet", "fresh-trend"])]
#[case::name(None, Some("TREND"), vec!["fresh-trend"])]
#[case::literal_percent(None, Some("%"), vec!["newest-quiet"])]
#[case::status_and_search(Some(ProjectStatus::Launched), Some("quiet"), vec![])]
fn project_listings_filter(
    project_context: Option<ProjectContext>,
    #[case] status: Option<ProjectStatus>,
    #[case] term: Option<&str>,
    #[case] expected: Vec<&str>,
) {
    let Some(ctx) = project_context else {
        eprintln!("SKIP-TEST-CLUSTER: project_listings_filter skipped");
        return;
    };
    seed_listing(&mut ctx.db.client(), ctx.owner);

    let listing = ctx
        .db
        .runtime
        .block_on(ctx.projects.list(&ProjectListQuery {
            status,
            search: term.and_then(search),
            ..project_query(1, 9)
        }))
        .expect("list");

    assert_eq!(listing.total, expected.len() as u64);
    assert_eq!(
        slugs(&listing.items, |s| s.project.slug.as_ref()),
        expected
    );
}

/// Three forum posts:
///
/// - `quiet-post`: just created.
/// - `busy-post`: a day old with two comments.
/// - `liked-post`: two days old with one vote.
fn seed_forum(client: &mut Client, owner: Uuid) {
    let reader = seed_user(client, "Grace Hopper");
    seed_forum_post(client, owner, "quiet-post", "Quiet thoughts", 0);
    let busy = seed_forum_post(client, owner, "busy-post", "Busy thread", DAY);
    let liked = seed_forum_post(client, owner, "liked-post", "Liked announcement", 2 * DAY);
    for text in ["One", "Two"] {
        client
            .execute(
                concat!(
                    "INSERT INTO forum_comments (id, content, forum_post_id, author_id) ",
                    "VALUES ($1, $2, $3, $4)"
                ),
                &[&Uuid::new_v4(), &text, &busy, &reader],
            )
            .expect("seed forum comment");
    }
    client
        .execute(
            "INSERT INTO forum_votes (id, user_id, forum_post_id) VALUES ($1, $2, $3)",
            &[&Uuid::new_v4(), &reader, &liked],
        )
        .expect("seed forum vote");
}

#[rstest]
#[case::newest(ForumSort::Newest, ["quiet-post", "busy-post", "liked-post"])]
#[case::popular(ForumSort::Popular, ["liked-post", "quiet-post", "busy-post"])]
#[case::active(ForumSort::Active, ["busy-post", "quiet-post", "liked-post"])]
fn forum_listings_follow_the_sort(
    project_context: Option<ProjectContext>,
    #[case] sort: ForumSort,
    #[case] expected: [&str; 3],
) {
    let Some(ctx) = project_context else {
        eprintln!("SKIP-TEST-CLUSTER: forum_listings_follow_the_sort skipped");
        return;
    };
    seed_forum(&mut ctx.db.client(), ctx.owner);

    let listing = ctx
        .db
        .runtime
        .block_on(ctx.posts.list(&forum_query(sort)))
        .expect("list");

    assert_eq!(listing.total, 3);
    assert_eq!(slugs(&listing.items, |s| s.post.slug.as_ref()), expected);
}

#[rstest]
fn forum_listings_search_titles(project_context: Option<ProjectContext>) {
    let Some(ctx) = project_context else {
        eprintln!("SKIP-TEST-CLUSTER: forum_listings_search_titles skipped");
        return;
    };
    seed_forum(&mut ctx.db.client(), ctx.owner);

    let listing = ctx
        .db
        .runtime
        .block_on(ctx.posts.list(&ForumPostListQuery {
            search: search("busy"),
            ..forum_query(ForumSort::Newest)
        }))
        .expect("list");

    assert_eq!(listing.total, 1);
    let busy = &listing.items[0];
    assert_eq!(busy.post.slug.as_ref(), "busy-post");
    assert_eq!((busy.vote_count, busy.comment_count), (0, 2));
}
