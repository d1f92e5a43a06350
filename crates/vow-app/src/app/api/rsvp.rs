use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};
use vow_service::guest::{RsvpReceipt, RsvpSubmission};

use super::RSVP_ROUTE_COMPONENT;
use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult, render_result};
use crate::services_handler::get_services_from_depot;

/// ## Summary
/// POST /api/rsvp - records a guest's attendance answer and wish.
///
/// ## Side Effects
/// Inserts a guest row (or answers an invitation, depending on configuration).
///
/// ## Errors
/// Returns HTTP 400 for a malformed or invalid submission.
/// Returns HTTP 404 if the wedding has not been stored yet.
#[handler]
async fn submit(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = match req.parse_json::<RsvpSubmission>().await {
        Ok(submission) => record(depot, submission).await,
        Err(e) => Err(AppError::BadRequest(e.to_string())),
    };
    render_result(res, StatusCode::CREATED, result);
}

async fn record(depot: &Depot, submission: RsvpSubmission) -> AppResult<RsvpReceipt> {
    let config = get_config_from_depot(depot)?;
    let services = get_services_from_depot(depot)?;

    Ok(services.rsvp.submit(&config.wedding.slug, submission).await?)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(RSVP_ROUTE_COMPONENT).post(submit)
}
