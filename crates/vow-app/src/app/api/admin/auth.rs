use chrono::{DateTime, Utc};
use salvo::http::StatusCode;
use salvo::http::cookie::{Cookie, SameSite};
use salvo::{Depot, Request, Response, Router, handler};
use serde::{Deserialize, Serialize};
use vow_core::constants::SESSION_COOKIE;
use vow_service::auth::{IssuedSession, get_session_token_from_depot, login};

use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult, render_result};
use crate::services_handler::get_services_from_depot;

/// ## Summary
/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// ## Summary
/// Login response payload
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

fn session_cookie(value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// ## Summary
/// POST /api/{admin}/login - exchanges the admin credentials for a session cookie.
///
/// ## Side Effects
/// Opens a server-side session and sets the `vow_session` cookie.
///
/// ## Errors
/// Returns HTTP 401 for wrong credentials, or when no admin password is configured.
#[handler]
async fn login_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = match req.parse_json::<LoginRequest>().await {
        Ok(credentials) => open_session(depot, credentials).await,
        Err(e) => Err(AppError::BadRequest(e.to_string())),
    };

    match result {
        Ok(issued) => {
            tracing::info!(username = ?issued.session.username(), "Admin logged in");
            res.add_cookie(session_cookie(issued.token.to_string()));
            render_result(
                res,
                StatusCode::OK,
                Ok(LoginResponse {
                    username: issued.session.username().unwrap_or_default().to_string(),
                    expires_at: issued.expires_at,
                }),
            );
        }
        Err(e) => e.render(res),
    }
}

async fn open_session(depot: &Depot, credentials: LoginRequest) -> AppResult<IssuedSession> {
    let config = get_config_from_depot(depot)?;
    let services = get_services_from_depot(depot)?;

    Ok(login(
        &config.auth,
        &services.sessions,
        &credentials.username,
        &credentials.password,
    )
    .await?)
}

/// ## Summary
/// POST /api/{admin}/logout - ends the caller's session.
///
/// ## Side Effects
/// Revokes the server-side session, drops its content draft and clears the cookie.
#[handler]
async fn logout_handler(depot: &mut Depot, res: &mut Response) {
    let services = match get_services_from_depot(depot) {
        Ok(services) => services,
        Err(e) => return e.render(res),
    };

    if let Some(token) = get_session_token_from_depot(depot) {
        services.sessions.revoke(token).await;
        services.editor.discard(token).await;
    }

    let mut cookie = session_cookie(String::new());
    cookie.make_removal();
    res.add_cookie(cookie);
    res.status_code(StatusCode::NO_CONTENT);
}

#[must_use]
pub fn login_routes() -> Router {
    Router::with_path("login").post(login_handler)
}

#[must_use]
pub fn logout_routes() -> Router {
    Router::with_path("logout").post(logout_handler)
}
