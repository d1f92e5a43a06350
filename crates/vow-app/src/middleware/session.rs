use salvo::Depot;
use vow_core::constants::SESSION_COOKIE;
use vow_service::auth::depot::depot_keys;

use crate::services_handler::get_services_from_depot;

/// ## Summary
/// Resolves the session cookie into a `Session` for downstream handlers.
/// Requests without a valid cookie continue as anonymous.
///
/// ## Side Effects
/// Inserts the session under `depot_keys::SESSION`, and the presented token
/// under `depot_keys::SESSION_TOKEN` when the cookie held one.
pub struct SessionMiddleware;

#[salvo::async_trait]
impl salvo::Handler for SessionMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let services = match get_services_from_depot(depot) {
            Ok(services) => services,
            Err(e) => {
                e.render(res);
                ctrl.skip_rest();
                return;
            }
        };

        let token = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| uuid::Uuid::parse_str(cookie.value()).ok());

        let Some(token) = token else {
            tracing::trace!("No session cookie, treating as anonymous");
            depot.insert(depot_keys::SESSION, vow_core::guest::Session::anonymous());
            return;
        };

        let session = services.sessions.resolve(token).await;
        tracing::trace!(authenticated = session.is_authenticated(), "Session resolved");
        depot.insert(depot_keys::SESSION, session);
        depot.insert(depot_keys::SESSION_TOKEN, token);
    }
}
