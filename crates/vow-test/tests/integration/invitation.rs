//! Public invitation endpoint: guest greeting, capabilities and content.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn healthcheck_is_ok() {
    let app = TestApp::unseeded().await;
    let response = TestRequest::get("/api/app/healthcheck")
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(response.body_string(), "OK");
}

#[test_log::test(tokio::test)]
async fn anonymous_visitor_gets_fallback_greeting() {
    let app = TestApp::new().await;
    let body = TestRequest::get(INVITATION_ROUTE_PREFIX)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["guest_name"], "Bạn");
    assert_eq!(body["can_edit"], false);
    assert_eq!(body["show_dashboard"], false);
}

#[test_log::test(tokio::test)]
async fn guest_name_comes_from_link() {
    let app = TestApp::new().await;

    let cases = [
        ("?to=Anh_Tuan", "Anh Tuan"),
        ("?to=Anh%20Tu%E1%BA%A5n", "Anh Tuấn"),
        ("?Ten=C%C3%B4_Ba", "Cô Ba"),
        ("?name=Lan&to=Minh", "Minh"),
        ("?to=&name=Lan", "Lan"),
    ];

    for (query, expected) in cases {
        let body = TestRequest::get(&format!("{INVITATION_ROUTE_PREFIX}{query}"))
            .send(&app.service)
            .await
            .assert_status(StatusCode::OK)
            .json();
        assert_eq!(body["guest_name"], expected, "query {query}");
    }
}

#[test_log::test(tokio::test)]
async fn edit_and_dashboard_flags_need_a_session() {
    let app = TestApp::new().await;
    let path = format!("{INVITATION_ROUTE_PREFIX}?mode=edit&dashboard=true");

    let anonymous = TestRequest::get(&path).send(&app.service).await.json();
    assert_eq!(anonymous["can_edit"], false);
    assert_eq!(anonymous["show_dashboard"], false);

    let token = app.login().await;
    let admin = TestRequest::get(&path)
        .session(&token)
        .send(&app.service)
        .await
        .json();
    assert_eq!(admin["can_edit"], true);
    assert_eq!(admin["show_dashboard"], true);

    let plain = TestRequest::get(INVITATION_ROUTE_PREFIX)
        .session(&token)
        .send(&app.service)
        .await
        .json();
    assert_eq!(plain["can_edit"], false);
    assert_eq!(plain["show_dashboard"], false);
}

#[test_log::test(tokio::test)]
async fn unstored_wedding_serves_defaults() {
    let app = TestApp::unseeded().await;
    let body = TestRequest::get(INVITATION_ROUTE_PREFIX)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["source"], "defaults");
    assert_eq!(body["content"]["id"], serde_json::Value::Null);
    assert_eq!(body["content"]["details"]["groom_name"], "Chiến");
    assert_eq!(body["content"]["details"]["event_date"], "30 . 01 . 2026");
}

#[test_log::test(tokio::test)]
async fn stored_wedding_is_served() {
    let app = TestApp::new().await;
    let body = TestRequest::get(INVITATION_ROUTE_PREFIX)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["source"], "remote");
    assert!(body["content"]["id"].is_string());
    assert_eq!(body["content"]["slug"], WEDDING_SLUG);
    assert_eq!(
        body["content"]["details"]["milestones"]
            .as_array()
            .expect("milestones")
            .len(),
        3
    );
}
