//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler plus the health probes, the
//! domain error schema wrappers and the session cookie security scheme. Debug
//! builds serve it through Swagger UI.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "DevHunt API",
        description = "Project showcase and forum: votes, comments and project submissions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::get_project,
        crate::inbound::http::votes::toggle_project_vote,
        crate::inbound::http::votes::project_vote_status,
        crate::inbound::http::comments::list_project_comments,
        crate::inbound::http::comments::add_project_comment,
        crate::inbound::http::forum::list_forum_posts,
        crate::inbound::http::forum::get_forum_post,
        crate::inbound::http::votes::toggle_forum_vote,
        crate::inbound::http::votes::forum_vote_status,
        crate::inbound::http::comments::list_forum_comments,
        crate::inbound::http::comments::add_forum_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "Development login and session"),
        (name = "projects", description = "Project submissions, votes and comments"),
        (name = "forum", description = "Forum posts, votes and comments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
