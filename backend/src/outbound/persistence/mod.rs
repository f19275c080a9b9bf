//! PostgreSQL persistence adapters built on Diesel.
//!
//! Repositories are thin: they translate between internal row structs
//! (`models`, `schema`) and domain types and map database failures onto each
//! port's error enum. Connections come from a shared bb8 pool of
//! `diesel-async` connections.
//!
//! ```ignore
//! use devhunt::outbound::persistence::{DbPool, DieselVoteRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/devhunt")).await?;
//! let votes = DieselVoteRepository::new(pool);
//! ```

mod diesel_comment_repository;
mod diesel_entity_repository;
pub(crate) mod diesel_helpers;
mod diesel_listing;
mod diesel_login_service;
mod diesel_project_repository;
mod diesel_user_repository;
mod diesel_vote_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_entity_repository::DieselVotableEntityRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_project_repository::{DieselForumPostRepository, DieselProjectRepository};
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vote_repository::DieselVoteRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
