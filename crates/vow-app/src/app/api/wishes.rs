use chrono::{DateTime, Utc};
use salvo::http::StatusCode;
use salvo::{Depot, Response, Router, handler};
use serde::Serialize;
use vow_core::constants::GUESTBOOK_LIMIT;

use super::WISHES_ROUTE_COMPONENT;
use crate::config::get_config_from_depot;
use crate::error::{AppResult, render_result};
use crate::services_handler::get_services_from_depot;

#[derive(Debug, Serialize)]
struct WishEntry {
    guest_name: String,
    wish_message: String,
    created_at: DateTime<Utc>,
}

/// ## Summary
/// GET /api/wishes - the newest wishes for the guestbook.
#[handler]
async fn wishes(depot: &mut Depot, res: &mut Response) {
    render_result(res, StatusCode::OK, latest(depot).await);
}

async fn latest(depot: &Depot) -> AppResult<Vec<WishEntry>> {
    let config = get_config_from_depot(depot)?;
    let services = get_services_from_depot(depot)?;

    let Some(wedding) = services
        .stores
        .weddings
        .find_by_slug(&config.wedding.slug)
        .await?
    else {
        return Ok(Vec::new());
    };

    let guests = services
        .stores
        .guests
        .latest_wishes(wedding.id, GUESTBOOK_LIMIT)
        .await?;

    Ok(guests
        .into_iter()
        .filter_map(|guest| {
            let wish_message = guest.wish()?.to_string();
            Some(WishEntry {
                guest_name: guest.guest_name,
                wish_message,
                created_at: guest.created_at,
            })
        })
        .collect())
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(WISHES_ROUTE_COMPONENT).get(wishes)
}
