//! RSVP intake and the public guestbook.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn rsvp_is_recorded() {
    let app = TestApp::new().await;

    let body = TestRequest::post(RSVP_ROUTE_PREFIX)
        .json(&rsvp_body("Anh Tuấn", true, 2, Some("Trăm năm hạnh phúc!")))
        .send(&app.service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(body["matched_invitation"], false);
    assert_eq!(body["guest"]["guest_name"], "Anh Tuấn");
    assert_eq!(body["guest"]["attendance_status"], true);
    assert_eq!(body["guest"]["guest_count"], 2);
    assert_eq!(body["guest"]["status"], "confirmed");

    let guests = app.guests().await;
    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0].wish_message.as_deref(), Some("Trăm năm hạnh phúc!"));
}

#[test_log::test(tokio::test)]
async fn repeated_rsvp_creates_separate_rows() {
    let app = TestApp::new().await;

    for attending in [true, false] {
        TestRequest::post(RSVP_ROUTE_PREFIX)
            .json(&rsvp_body("Cô Ba", attending, 1, None))
            .send(&app.service)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let guests = app.guests().await;
    assert_eq!(guests.len(), 2);
    assert!(guests.iter().all(|g| g.guest_name == "Cô Ba"));
}

#[test_log::test(tokio::test)]
async fn invalid_rsvp_is_rejected() {
    let app = TestApp::new().await;

    TestRequest::post(RSVP_ROUTE_PREFIX)
        .json(&rsvp_body("   ", true, 1, None))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::post(RSVP_ROUTE_PREFIX)
        .json(&rsvp_body("Anh Tuan", true, 0, None))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::post(RSVP_ROUTE_PREFIX)
        .header("Content-Type", "application/json")
        .body("{not json")
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert!(app.guests().await.is_empty());
}

#[test_log::test(tokio::test)]
async fn rsvp_without_stored_wedding_is_not_found() {
    let app = TestApp::unseeded().await;
    let body = TestRequest::post(RSVP_ROUTE_PREFIX)
        .json(&rsvp_body("Anh Tuan", true, 1, None))
        .send(&app.service)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert!(body["error"].is_string());
}

#[test_log::test(tokio::test)]
async fn guestbook_shows_latest_six_wishes() {
    let app = TestApp::new().await;

    for i in 0..8 {
        TestRequest::post(RSVP_ROUTE_PREFIX)
            .json(&rsvp_body(&format!("Khách {i}"), true, 1, Some(&format!("Lời chúc {i}"))))
            .send(&app.service)
            .await
            .assert_status(StatusCode::CREATED);
    }
    TestRequest::post(RSVP_ROUTE_PREFIX)
        .json(&rsvp_body("Im lặng", true, 1, Some("   ")))
        .send(&app.service)
        .await
        .assert_status(StatusCode::CREATED);

    let body = TestRequest::get(WISHES_ROUTE_PREFIX)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    let wishes = body.as_array().expect("wish list");

    assert_eq!(wishes.len(), 6);
    assert_eq!(wishes[0]["guest_name"], "Khách 7");
    assert_eq!(wishes[0]["wish_message"], "Lời chúc 7");
    assert_eq!(wishes[5]["guest_name"], "Khách 2");
}

#[test_log::test(tokio::test)]
async fn guestbook_of_unstored_wedding_is_empty() {
    let app = TestApp::unseeded().await;
    let body = TestRequest::get(WISHES_ROUTE_PREFIX)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body, serde_json::json!([]));
}
