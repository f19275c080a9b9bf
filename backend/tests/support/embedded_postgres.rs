//! Embedded PostgreSQL harness for the Diesel adapter suites.
//!
//! One cluster is shared per test binary. Each test clones a fresh database
//! from a template that already carries the embedded migrations; the template
//! name includes a hash of `migrations/` so schema edits never reuse a stale
//! template.
//!
//! Set `SKIP_TEST_CLUSTER=1` where the cluster cannot start.
#![allow(dead_code, reason = "each suite uses a subset of the helpers")]

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use devhunt::outbound::persistence::{DbPool, MIGRATIONS, PoolConfig};
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;
use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "devhunt_template";
const PROVISION_RETRIES: usize = 5;
const PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);
const STABLE_PASSWORD: &str = "devhunt_embedded_test";

/// Whether `SKIP_TEST_CLUSTER` is truthy ("1", "true" or "yes").
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip when `SKIP_TEST_CLUSTER` is set; fail loudly otherwise.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Render a `postgres` error with its SQLSTATE and detail when present.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Process-wide cluster handle.
///
/// `PG_PASSWORD` is pinned during bootstrap so a reused data directory keeps
/// accepting the password it was initialised with.
fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let _env = std::env::var_os("PG_PASSWORD")
        .is_none()
        .then(|| env_lock::lock_env([("PG_PASSWORD", Some(STABLE_PASSWORD))]));
    pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
        .map_err(|err| format!("shared cluster: {err:?}"))
}

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, String> {
    let hash =
        hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        migrate_schema(&cluster.connection().database_url(&template_name))?;
    }
    Ok(template_name)
}

/// Clone a migrated database for one test, retrying transient failures.
pub fn provision_template_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let mut last_error = String::from("create database from template: exhausted retries");
    for attempt in 1..=PROVISION_RETRIES {
        let outcome = ensure_template_database(cluster).and_then(|template| {
            let name = format!("test_{}", Uuid::new_v4().simple());
            cluster
                .temporary_database_from_template(name.as_str(), template.as_str())
                .map_err(|err| format!("create database from template: {err:?}"))
        });
        match outcome {
            Ok(database) => return Ok(database),
            Err(error) => last_error = format!("attempt {attempt}/{PROVISION_RETRIES}: {error}"),
        }
        if attempt < PROVISION_RETRIES {
            std::thread::sleep(PROVISION_RETRY_DELAY);
        }
    }
    Err(last_error)
}

/// A migrated database, a pool over it and the runtime that drives the pool.
///
/// The suites are synchronous: cluster bootstrap blocks, so it must not run
/// inside a Tokio runtime.
pub struct PgTestDatabase {
    pub runtime: Runtime,
    pub pool: DbPool,
    pub url: String,
    _database: TemporaryDatabase,
}

impl PgTestDatabase {
    pub fn start() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = shared_cluster()?;
        let database = provision_template_database(cluster)?;
        let url = database.url().to_string();

        let config = PoolConfig::new(url.as_str())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            pool,
            url,
            _database: database,
        })
    }

    /// Open a plain client for seeding and inspecting rows.
    pub fn client(&self) -> Client {
        Client::connect(self.url.as_str(), NoTls)
            .unwrap_or_else(|err| panic!("connect seed client: {}", format_postgres_error(&err)))
    }
}

/// Insert a user and return its id.
pub fn seed_user(client: &mut Client, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    let email = format!("{id}@devhunt.test");
    client
        .execute(
            "INSERT INTO users (id, email, name) VALUES ($1, $2, $3)",
            &[&id, &email, &name],
        )
        .unwrap_or_else(|err| panic!("seed user: {}", format_postgres_error(&err)));
    id
}

/// Project columns the seeding helpers vary.
pub struct SeedProject<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub tagline: &'a str,
    pub status: &'a str,
    /// Seconds before now.
    pub age_secs: i32,
}

impl<'a> SeedProject<'a> {
    pub fn new(slug: &'a str) -> Self {
        Self {
            slug,
            name: "Code Craft",
            tagline: "Sharpen your tools",
            status: "development",
            age_secs: 0,
        }
    }
}

/// Insert a project owned by `owner` and return its id.
pub fn seed_project(client: &mut Client, owner: Uuid, project: &SeedProject<'_>) -> Uuid {
    let id = Uuid::new_v4();
    let age = f64::from(project.age_secs);
    client
        .execute(
            concat!(
                "INSERT INTO projects (id, slug, name, tagline, description, status, owner_id, created_at) ",
                "VALUES ($1, $2, $3, $4, 'A workshop for building better developer tooling.', $5, $6, ",
                "now() - make_interval(secs => $7))"
            ),
            &[
                &id,
                &project.slug,
                &project.name,
                &project.tagline,
                &project.status,
                &owner,
                &age,
            ],
        )
        .unwrap_or_else(|err| panic!("seed project: {}", format_postgres_error(&err)));
    id
}

/// Insert a forum post written by `author` and return its id.
pub fn seed_forum_post(
    client: &mut Client,
    author: Uuid,
    slug: &str,
    title: &str,
    age_secs: i32,
) -> Uuid {
    let id = Uuid::new_v4();
    let age = f64::from(age_secs);
    client
        .execute(
            concat!(
                "INSERT INTO forum_posts (id, slug, title, content, author_id, created_at) ",
                "VALUES ($1, $2, $3, 'Share what you are building.', $4, now() - make_interval(secs => $5))"
            ),
            &[&id, &slug, &title, &author, &age],
        )
        .unwrap_or_else(|err| panic!("seed forum post: {}", format_postgres_error(&err)));
    id
}

/// Record a project vote cast `age_secs` ago.
pub fn seed_project_vote(client: &mut Client, user: Uuid, project: Uuid, age_secs: i32) {
    let age = f64::from(age_secs);
    client
        .execute(
            concat!(
                "INSERT INTO votes (id, user_id, project_id, created_at) ",
                "VALUES ($1, $2, $3, now() - make_interval(secs => $4))"
            ),
            &[&Uuid::new_v4(), &user, &project, &age],
        )
        .unwrap_or_else(|err| panic!("seed vote: {}", format_postgres_error(&err)));
}

/// Count rows in `table`.
pub fn count_rows(client: &mut Client, table: &str) -> i64 {
    let sql = format!(r#"SELECT COUNT(*) FROM "{}""#, table.replace('"', "\"\""));
    client
        .query_one(sql.as_str(), &[])
        .map(|row| row.get::<_, i64>(0))
        .unwrap_or_else(|err| panic!("count {table}: {}", format_postgres_error(&err)))
}
