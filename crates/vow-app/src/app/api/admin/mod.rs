//! Admin API, mounted under the configured `auth.admin_path`.

use salvo::Router;

use crate::middleware::require_admin::RequireAdmin;

mod auth;
mod content;
mod guests;
mod stats;

#[must_use]
pub fn routes(admin_path: &str) -> Router {
    Router::with_path(admin_path.trim_matches('/'))
        .push(auth::login_routes())
        .push(
            Router::new()
                .hoop(RequireAdmin)
                .push(auth::logout_routes())
                .push(guests::routes())
                .push(stats::routes())
                .push(content::routes()),
        )
}
