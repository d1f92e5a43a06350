//! In-place content editing: per-session drafts and explicit save.

use salvo::http::StatusCode;
use serde_json::{Value, json};

use super::helpers::*;

async fn apply(app: &TestApp, token: &str, edits: Value) -> TestResponse {
    TestRequest::post(&admin_path("content/edits"))
        .session(token)
        .json(&json!({ "edits": edits }))
        .send(&app.service)
        .await
}

async fn public_groom(app: &TestApp) -> Value {
    TestRequest::get(INVITATION_ROUTE_PREFIX)
        .send(&app.service)
        .await
        .json()["content"]["details"]["groom_name"]
        .clone()
}

#[test_log::test(tokio::test)]
async fn edits_are_published_on_save() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let draft = apply(
        &app,
        &token,
        json!([
            { "op": "set_detail", "field": "groom_name", "value": "Minh" },
            { "op": "set_event_field", "event": "thanhHon", "field": "time", "value": "18:00" },
            { "op": "set_album_photo", "slot": 5, "url": "https://cdn.example/6.jpg" },
        ]),
    )
    .await
    .assert_status(StatusCode::OK)
    .json();

    assert_eq!(draft["dirty"], true);
    assert_eq!(draft["content"]["details"]["groom_name"], "Minh");
    assert_eq!(draft["content"]["details"]["thanhHon"]["time"], "18:00");
    assert_eq!(draft["content"]["album_urls"][5], "https://cdn.example/6.jpg");
    assert_eq!(public_groom(&app).await, "Chiến");

    let saved = TestRequest::post(&admin_path("content/save"))
        .session(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(saved["dirty"], false);
    assert_eq!(public_groom(&app).await, "Minh");
}

#[test_log::test(tokio::test)]
async fn invalid_batch_leaves_draft_untouched() {
    let app = TestApp::new().await;
    let token = app.login().await;

    apply(
        &app,
        &token,
        json!([{ "op": "set_detail", "field": "groom_name", "value": "Minh" }]),
    )
    .await
    .assert_status(StatusCode::OK);

    apply(
        &app,
        &token,
        json!([
            { "op": "set_detail", "field": "groom_name", "value": "Khoa" },
            { "op": "set_detail", "field": "event_date", "value": "mùa xuân" },
        ]),
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST);

    apply(
        &app,
        &token,
        json!([{ "op": "remove_milestone", "id": uuid::Uuid::new_v4() }]),
    )
    .await
    .assert_status(StatusCode::NOT_FOUND);

    let draft = TestRequest::get(&admin_path("content/draft"))
        .session(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(draft["content"]["details"]["groom_name"], "Minh");
    assert_eq!(draft["revision"], 1);
}

#[test_log::test(tokio::test)]
async fn milestones_are_edited_by_id() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let draft = apply(&app, &token, json!([{ "op": "add_milestone" }]))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let milestones = draft["content"]["details"]["milestones"]
        .as_array()
        .expect("milestones")
        .clone();
    assert_eq!(milestones.len(), 4);
    let added = milestones[3]["id"].as_str().expect("id").to_string();
    let first = milestones[0]["id"].as_str().expect("id").to_string();

    let draft = apply(
        &app,
        &token,
        json!([
            { "op": "set_milestone_field", "id": added, "field": "title", "value": "Cầu hôn" },
            { "op": "remove_milestone", "id": first },
        ]),
    )
    .await
    .assert_status(StatusCode::OK)
    .json();

    let milestones = draft["content"]["details"]["milestones"]
        .as_array()
        .expect("milestones");
    assert_eq!(milestones.len(), 3);
    assert_eq!(milestones[2]["id"], added.as_str());
    assert_eq!(milestones[2]["title"], "Cầu hôn");
}

#[test_log::test(tokio::test)]
async fn discarding_drops_unsaved_edits() {
    let app = TestApp::new().await;
    let token = app.login().await;

    apply(
        &app,
        &token,
        json!([{ "op": "set_detail", "field": "groom_name", "value": "Minh" }]),
    )
    .await
    .assert_status(StatusCode::OK);

    TestRequest::delete(&admin_path("content/draft"))
        .session(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let draft = TestRequest::get(&admin_path("content/draft"))
        .session(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(draft["dirty"], false);
    assert_eq!(draft["content"]["details"]["groom_name"], "Chiến");
}

#[test_log::test(tokio::test)]
async fn saving_without_stored_wedding_fails() {
    let app = TestApp::unseeded().await;
    let token = app.login().await;

    apply(
        &app,
        &token,
        json!([{ "op": "set_detail", "field": "groom_name", "value": "Minh" }]),
    )
    .await
    .assert_status(StatusCode::OK);

    TestRequest::post(&admin_path("content/save"))
        .session(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn logout_drops_the_draft() {
    let app = TestApp::new().await;
    let token = app.login().await;
    apply(
        &app,
        &token,
        json!([{ "op": "set_detail", "field": "groom_name", "value": "Minh" }]),
    )
    .await
    .assert_status(StatusCode::OK);

    TestRequest::post(&admin_path("logout"))
        .session(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let session = uuid::Uuid::parse_str(&token).expect("token is a UUID");
    assert!(!app.services.editor.discard(session).await);
    assert_eq!(app.services.editor.prune().await, 0);
}
