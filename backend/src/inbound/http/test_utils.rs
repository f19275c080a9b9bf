//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation and disables the `Secure` flag so
/// cookies survive plain HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Sign in as a demo account through `POST /api/v1/login` and return the
/// session cookie. The app must mount [`super::users::login`] under `/api/v1`.
pub async fn login_cookie<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let res = actix_web::test::call_service(
        app,
        actix_web::test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({ "email": email, "password": "password" }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "demo login failed: {}", res.status());
    session_cookie(&res).expect("login sets a session cookie")
}
