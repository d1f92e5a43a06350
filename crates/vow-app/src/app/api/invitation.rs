use salvo::caching_headers::CachingHeaders;
use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Serialize;
use vow_core::content::ContentRecord;
use vow_core::guest::{GuestView, QueryParams};
use vow_service::auth::get_session_from_depot;
use vow_service::content::ContentSource;

use super::INVITATION_ROUTE_COMPONENT;
use crate::config::get_config_from_depot;
use crate::error::{AppResult, render_result};
use crate::services_handler::get_services_from_depot;

/// Everything the page needs to render for one visitor.
#[derive(Debug, Serialize)]
struct InvitationResponse {
    #[serde(flatten)]
    guest: GuestView,
    source: ContentSource,
    content: ContentRecord,
}

/// ## Summary
/// GET /api/invitation - render model for the visitor's URL query.
///
/// Always succeeds with complete content; stored content that cannot be
/// fetched in time is replaced by the built-in defaults.
#[handler]
async fn invitation(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let query = QueryParams::parse(req.uri().query().unwrap_or_default());
    render_result(res, StatusCode::OK, build(depot, &query).await);
}

async fn build(depot: &Depot, query: &QueryParams) -> AppResult<InvitationResponse> {
    let config = get_config_from_depot(depot)?;
    let services = get_services_from_depot(depot)?;

    let guest = GuestView::new(&get_session_from_depot(depot), query);
    let loaded = services.loader.load(&config.wedding.slug).await;

    tracing::debug!(guest_name = %guest.guest_name, source = ?loaded.source, "Invitation rendered");

    Ok(InvitationResponse {
        guest,
        source: loaded.source,
        content: loaded.content,
    })
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(INVITATION_ROUTE_COMPONENT)
        .hoop(CachingHeaders::new())
        .get(invitation)
}
