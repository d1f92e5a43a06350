//! Admin guest list management and live statistics.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn admin_endpoints_need_a_session() {
    let app = TestApp::new().await;

    TestRequest::get(&admin_path("guests"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    TestRequest::post(&admin_path("guests"))
        .json(&json!({ "name": "Anh Tuan" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    TestRequest::get(&admin_path("stats"))
        .session(&uuid::Uuid::new_v4().to_string())
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert!(app.guests().await.is_empty());
}

#[test_log::test(tokio::test)]
async fn invitation_lifecycle() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let created = TestRequest::post(&admin_path("guests"))
        .session(&token)
        .json(&json!({ "name": "  Anh   Tuan ", "group": "colleagues" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(created["guest_name"], "Anh Tuan");
    assert_eq!(created["guest_group"], "colleagues");
    assert_eq!(created["invite_link"], format!("{PUBLIC_ORIGIN}/?to=Anh_Tuan"));
    assert_eq!(created["attendance_status"], serde_json::Value::Null);
    let id = created["id"].as_str().expect("id").to_string();

    let renamed = TestRequest::patch(&admin_path(&format!("guests/{id}")))
        .session(&token)
        .json(&json!({ "guest_name": "Anh Tuấn", "guest_group": null }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(renamed["guest_name"], "Anh Tuấn");
    assert_eq!(renamed["guest_group"], serde_json::Value::Null);
    assert_ne!(renamed["invite_link"], created["invite_link"]);

    TestRequest::delete(&admin_path(&format!("guests/{id}")))
        .session(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    TestRequest::delete(&admin_path(&format!("guests/{id}")))
        .session(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    assert!(app.guests().await.is_empty());
}

#[test_log::test(tokio::test)]
async fn invalid_guest_requests_are_rejected() {
    let app = TestApp::new().await;
    let token = app.login().await;

    TestRequest::post(&admin_path("guests"))
        .session(&token)
        .json(&json!({ "name": "   " }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::post(&admin_path("guests"))
        .session(&token)
        .json(&json!({ "name": "Anh Tuan", "group": "strangers" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::patch(&admin_path("guests/not-a-uuid"))
        .session(&token)
        .json(&json!({ "guest_name": "Anh Tuan" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::patch(&admin_path(&format!("guests/{}", uuid::Uuid::new_v4())))
        .session(&token)
        .json(&json!({ "guest_name": "Anh Tuan" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn list_is_newest_first_and_searchable() {
    let app = TestApp::new().await;
    let token = app.login().await;

    for name in ["Anh Tuan", "Cô Ba", "Chị Lan"] {
        TestRequest::post(&admin_path("guests"))
            .session(&token)
            .json(&json!({ "name": name }))
            .send(&app.service)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let all = TestRequest::get(&admin_path("guests"))
        .session(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    let names: Vec<_> = all
        .as_array()
        .expect("guest list")
        .iter()
        .map(|g| g["guest_name"].as_str().expect("name").to_string())
        .collect();
    assert_eq!(names, ["Chị Lan", "Cô Ba", "Anh Tuan"]);

    let found = TestRequest::get(&format!("{}?q=TUAN", admin_path("guests")))
        .session(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(found.as_array().expect("guest list").len(), 1);
    assert_eq!(found[0]["guest_name"], "Anh Tuan");
}

#[test_log::test(tokio::test)]
async fn stats_count_invitations_and_responses() {
    let app = TestApp::new().await;
    let token = app.login().await;

    TestRequest::post(&admin_path("guests"))
        .session(&token)
        .json(&json!({ "name": "Cô Ba" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::CREATED);
    for body in [
        rsvp_body("Anh Tuan", true, 3, Some("Chúc mừng!")),
        rsvp_body("Chị Lan", true, 1, None),
        rsvp_body("Bác Hai", false, 1, Some("Tiếc quá")),
    ] {
        TestRequest::post(RSVP_ROUTE_PREFIX)
            .json(&body)
            .send(&app.service)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let snapshot = TestRequest::get(&admin_path("stats"))
        .session(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(snapshot["state"]["state"], "ready");
    assert_eq!(snapshot["guests"].as_array().expect("guests").len(), 4);
    assert_eq!(
        snapshot["stats"],
        json!({
            "invited": 4,
            "responded": 3,
            "confirmed_headcount": 4,
            "declined": 1,
            "wish_count": 2,
        })
    );
}
