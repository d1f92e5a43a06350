use salvo::http::StatusCode;
use salvo::{Depot, Response, Router, handler};
use vow_service::guest::LiveSnapshot;

use crate::error::{AppResult, render_result};
use crate::services_handler::get_services_from_depot;

/// ## Summary
/// GET /api/{admin}/stats - the live guest list with its statistics.
///
/// Issues a refetch first, so the snapshot is at least as fresh as the request.
#[handler]
async fn stats(depot: &mut Depot, res: &mut Response) {
    render_result(res, StatusCode::OK, snapshot(depot).await);
}

async fn snapshot(depot: &Depot) -> AppResult<LiveSnapshot> {
    let services = get_services_from_depot(depot)?;
    services.live.refresh().await;
    Ok(services.live.snapshot())
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("stats").get(stats)
}
