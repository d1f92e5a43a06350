//! Admin login, session cookie and logout.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

async fn session_status(app: &TestApp, token: Option<&str>) -> serde_json::Value {
    let request = TestRequest::get("/api/app/session");
    let request = match token {
        Some(token) => request.session(token),
        None => request,
    };
    request
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json()
}

#[test_log::test(tokio::test)]
async fn wrong_credentials_are_rejected() {
    let app = TestApp::new().await;

    for (username, password) in [(ADMIN_USERNAME, "sai-mat-khau"), ("root", ADMIN_PASSWORD)] {
        let response = TestRequest::post(&admin_path("login"))
            .json(&json!({ "username": username, "password": password }))
            .send(&app.service)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        assert!(response.session_cookie().is_none());
        assert!(response.json()["error"].is_string());
    }
}

#[test_log::test(tokio::test)]
async fn login_opens_a_session() {
    let app = TestApp::new().await;

    assert_eq!(session_status(&app, None).await["authenticated"], false);

    let token = app.login().await;
    let status = session_status(&app, Some(&token)).await;
    assert_eq!(status["authenticated"], true);
    assert_eq!(status["username"], ADMIN_USERNAME);
}

#[test_log::test(tokio::test)]
async fn login_cookie_is_http_only() {
    let app = TestApp::new().await;
    let response = TestRequest::post(&admin_path("login"))
        .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);

    let cookie = response
        .header_values("set-cookie")
        .find(|c| c.starts_with("vow_session="))
        .expect("session cookie")
        .to_string();
    assert!(cookie.contains("HttpOnly"));
    assert!(response.json()["expires_at"].is_string());
}

#[test_log::test(tokio::test)]
async fn logout_ends_the_session() {
    let app = TestApp::new().await;
    let token = app.login().await;

    TestRequest::post(&admin_path("logout"))
        .session(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(session_status(&app, Some(&token)).await["authenticated"], false);
    TestRequest::get(&admin_path("guests"))
        .session(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn login_is_disabled_without_a_configured_password() {
    let mut config = test_config();
    config.auth.admin_password_hash = None;
    let app = TestApp::with_config(config, true).await;

    TestRequest::post(&admin_path("login"))
        .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
