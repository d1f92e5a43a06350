use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Deserialize;
use vow_core::content::ContentEdit;
use vow_service::auth::depot::require_admin_session;
use vow_service::content::Draft;

use crate::error::{AppError, AppResult, render_result};
use crate::services_handler::get_services_from_depot;

/// ## Summary
/// Edit batch payload; edits are applied in order, all or nothing.
#[derive(Debug, Deserialize)]
pub struct EditBatch {
    pub edits: Vec<ContentEdit>,
}

/// ## Summary
/// GET /api/{admin}/content/draft - the caller's draft, opened on first use.
#[handler]
async fn get_draft(depot: &mut Depot, res: &mut Response) {
    render_result(res, StatusCode::OK, open_draft(depot).await);
}

async fn open_draft(depot: &Depot) -> AppResult<Draft> {
    let (token, _) = require_admin_session(depot)?;
    let services = get_services_from_depot(depot)?;
    Ok(services.editor.draft(token).await?)
}

/// ## Summary
/// DELETE /api/{admin}/content/draft - drops unsaved edits.
#[handler]
async fn discard_draft(depot: &mut Depot, res: &mut Response) {
    match discard(depot).await {
        Ok(discarded) => {
            tracing::debug!(discarded, "Draft discarded");
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => e.render(res),
    }
}

async fn discard(depot: &Depot) -> AppResult<bool> {
    let (token, _) = require_admin_session(depot)?;
    let services = get_services_from_depot(depot)?;
    Ok(services.editor.discard(token).await)
}

/// ## Summary
/// POST /api/{admin}/content/edits - applies a batch of edits to the draft.
///
/// ## Errors
/// Returns HTTP 400 for an invalid edit and HTTP 404 for an unknown milestone;
/// the draft is then unchanged.
#[handler]
async fn apply_edits(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = match req.parse_json::<EditBatch>().await {
        Ok(batch) => apply(depot, &batch.edits).await,
        Err(e) => Err(AppError::BadRequest(e.to_string())),
    };
    render_result(res, StatusCode::OK, result);
}

async fn apply(depot: &Depot, edits: &[ContentEdit]) -> AppResult<Draft> {
    let (token, _) = require_admin_session(depot)?;
    let services = get_services_from_depot(depot)?;
    Ok(services.editor.apply(token, edits).await?)
}

/// ## Summary
/// POST /api/{admin}/content/save - persists the draft.
///
/// ## Side Effects
/// Overwrites the stored content of the wedding.
#[handler]
async fn save(depot: &mut Depot, res: &mut Response) {
    render_result(res, StatusCode::OK, save_draft(depot).await);
}

async fn save_draft(depot: &Depot) -> AppResult<Draft> {
    let (token, _) = require_admin_session(depot)?;
    let services = get_services_from_depot(depot)?;
    Ok(services.editor.save(token).await?)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("content")
        .push(Router::with_path("draft").get(get_draft).delete(discard_draft))
        .push(Router::with_path("edits").post(apply_edits))
        .push(Router::with_path("save").post(save))
}
