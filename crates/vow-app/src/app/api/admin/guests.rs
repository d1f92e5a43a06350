use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Deserialize;
use vow_db::db::enums::GuestGroup;
use vow_db::model::Guest;
use vow_service::guest::GuestUpdate;

use crate::error::{AppError, AppResult, render_result};
use crate::services_handler::get_services_from_depot;

/// ## Summary
/// Invitation creation payload
#[derive(Debug, Deserialize)]
pub struct CreateGuestRequest {
    pub name: String,
    #[serde(default)]
    pub group: Option<GuestGroup>,
}

fn guest_id(req: &Request) -> AppResult<uuid::Uuid> {
    req.param::<String>("id")
        .and_then(|raw| uuid::Uuid::parse_str(&raw).ok())
        .ok_or_else(|| AppError::BadRequest("guest id must be a UUID".to_string()))
}

/// ## Summary
/// GET /api/{admin}/guests?q= - newest first, optionally filtered by name.
#[handler]
async fn list(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let search = req.query::<String>("q");
    render_result(res, StatusCode::OK, list_guests(depot, search.as_deref()).await);
}

async fn list_guests(depot: &Depot, search: Option<&str>) -> AppResult<Vec<Guest>> {
    let services = get_services_from_depot(depot)?;
    Ok(services.registry.list(search).await?)
}

/// ## Summary
/// POST /api/{admin}/guests - creates an invitation and its personal link.
///
/// ## Errors
/// Returns HTTP 400 for a blank name or unknown group.
#[handler]
async fn create(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = match req.parse_json::<CreateGuestRequest>().await {
        Ok(body) => create_guest(depot, body).await,
        Err(e) => Err(AppError::BadRequest(e.to_string())),
    };
    render_result(res, StatusCode::CREATED, result);
}

async fn create_guest(depot: &Depot, body: CreateGuestRequest) -> AppResult<Guest> {
    let services = get_services_from_depot(depot)?;
    Ok(services.registry.create(&body.name, body.group).await?)
}

/// ## Summary
/// PATCH /api/{admin}/guests/{id} - renames and/or regroups a guest.
///
/// ## Errors
/// Returns HTTP 404 for an unknown guest.
#[handler]
async fn update(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = match (guest_id(req), req.parse_json::<GuestUpdate>().await) {
        (Ok(id), Ok(changes)) => update_guest(depot, id, changes).await,
        (Err(e), _) => Err(e),
        (_, Err(e)) => Err(AppError::BadRequest(e.to_string())),
    };
    render_result(res, StatusCode::OK, result);
}

async fn update_guest(depot: &Depot, id: uuid::Uuid, changes: GuestUpdate) -> AppResult<Guest> {
    let services = get_services_from_depot(depot)?;
    Ok(services.registry.update(id, changes).await?)
}

/// ## Summary
/// DELETE /api/{admin}/guests/{id} - permanently removes a guest.
#[handler]
async fn delete(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = match guest_id(req) {
        Ok(id) => delete_guest(depot, id).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => e.render(res),
    }
}

async fn delete_guest(depot: &Depot, id: uuid::Uuid) -> AppResult<()> {
    let services = get_services_from_depot(depot)?;
    Ok(services.registry.delete(id).await?)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("guests")
        .get(list)
        .post(create)
        .push(Router::with_path("{id}").patch(update).delete(delete))
}
