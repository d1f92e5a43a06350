pub mod api;

use std::sync::Arc;

use salvo::Router;
use vow_core::config::Settings;

use crate::config::ConfigHandler;
use crate::services_handler::{Services, ServicesHandler};

/// ## Summary
/// The complete application router with configuration and services injected.
#[must_use]
pub fn router(settings: Arc<Settings>, services: Arc<Services>) -> Router {
    let admin_path = settings.auth.admin_path.clone();
    Router::new()
        .hoop(ConfigHandler { settings })
        .hoop(ServicesHandler { services })
        .push(api::routes(&admin_path))
}
