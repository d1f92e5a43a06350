use salvo::prelude::Json;
use salvo::{Depot, Router, handler};
use serde::Serialize;
use vow_service::auth::get_session_from_depot;

#[derive(Debug, Serialize)]
struct SessionStatus {
    authenticated: bool,
    username: Option<String>,
}

/// ## Summary
/// Reports whether the caller holds an authenticated admin session.
#[handler]
async fn session_status(depot: &Depot) -> Json<SessionStatus> {
    let session = get_session_from_depot(depot);
    let authenticated = session.is_authenticated();
    Json(SessionStatus {
        authenticated,
        username: session
            .username()
            .filter(|_| authenticated)
            .map(str::to_string),
    })
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("session").get(session_status)
}
