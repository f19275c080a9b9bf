//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod comments;
pub mod error;
pub mod forum;
pub mod health;
pub mod projects;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;
pub mod votes;

pub use error::ApiResult;

/// Register the JSON endpoints served under `/api/v1`.
///
/// The caller owns the scope and its session middleware.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(projects::list_projects)
        .service(projects::create_project)
        .service(projects::get_project)
        .service(votes::toggle_project_vote)
        .service(votes::project_vote_status)
        .service(comments::add_project_comment)
        .service(comments::list_project_comments)
        .service(forum::list_forum_posts)
        .service(forum::get_forum_post)
        .service(votes::toggle_forum_vote)
        .service(votes::forum_vote_status)
        .service(comments::add_forum_comment)
        .service(comments::list_forum_comments);
}
