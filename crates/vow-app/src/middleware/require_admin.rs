use salvo::Depot;
use vow_service::auth::depot::require_admin_session;

use crate::error::AppError;

/// ## Summary
/// Rejects requests without an authenticated admin session.
///
/// ## Errors
/// Responds 401 and stops the chain when the session is anonymous or expired.
pub struct RequireAdmin;

#[salvo::async_trait]
impl salvo::Handler for RequireAdmin {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(path = %req.uri().path()))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        if let Err(e) = require_admin_session(depot) {
            AppError::from(e).render(res);
            ctrl.skip_rest();
        }
    }
}
