use std::sync::Arc;

use salvo::async_trait;
use vow_core::config::Settings;
use vow_core::content::default_content;
use vow_core::error::CoreError;
use vow_db::model::NewWedding;
use vow_db::store::Stores;
use vow_service::auth::SessionStore;
use vow_service::content::{ContentEditor, ContentLoader};
use vow_service::guest::{GuestRegistry, LiveGuestList, RsvpService};

use crate::error::AppResult;

/// Everything a request handler works with, built once at startup.
pub struct Services {
    pub stores: Stores,
    pub sessions: Arc<SessionStore>,
    pub loader: ContentLoader,
    pub editor: ContentEditor,
    pub registry: GuestRegistry,
    pub rsvp: RsvpService,
    pub live: LiveGuestList,
}

impl Services {
    /// ## Summary
    /// Wires the services for the configured wedding on top of `stores`.
    ///
    /// Spawns the live guest list watcher, so it must run inside a Tokio runtime.
    #[must_use]
    pub fn new(settings: &Settings, stores: Stores) -> Self {
        let slug = settings.wedding.slug.clone();
        let loader = ContentLoader::new(stores.weddings.clone(), settings.content.fetch_timeout());
        let registry = GuestRegistry::new(
            stores.guests.clone(),
            stores.weddings.clone(),
            slug.clone(),
            settings.server.origin(),
        );

        let sessions = Arc::new(SessionStore::with_ttl_minutes(
            settings.auth.session_ttl_minutes,
        ));

        Self {
            editor: ContentEditor::new(
                loader.clone(),
                stores.weddings.clone(),
                Arc::clone(&sessions),
                slug,
            ),
            rsvp: RsvpService::new(
                stores.guests.clone(),
                stores.weddings.clone(),
                settings.rsvp.reconciliation,
            ),
            live: LiveGuestList::spawn(Arc::new(registry.clone())),
            sessions,
            loader,
            registry,
            stores,
        }
    }
}

/// ## Summary
/// Stores the default content under `slug` unless a row already exists.
///
/// ## Errors
/// Returns persistence errors from the lookup or insert.
pub async fn seed_default_wedding(stores: &Stores, slug: &str) -> AppResult<bool> {
    if stores.weddings.find_by_slug(slug).await?.is_some() {
        return Ok(false);
    }

    let wedding = stores
        .weddings
        .create(NewWedding::from_record(&default_content(slug))?)
        .await?;
    tracing::info!(%slug, wedding_id = %wedding.id, "Seeded wedding with default content");

    Ok(true)
}

pub struct ServicesHandler {
    pub services: Arc<Services>,
}

#[async_trait]
impl salvo::Handler for ServicesHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.services));
    }
}

/// ## Summary
/// Retrieves the services from the depot.
///
/// ## Errors
/// Returns an error if the services are not found in the depot.
pub fn get_services_from_depot(depot: &salvo::Depot) -> AppResult<Arc<Services>> {
    depot
        .obtain::<Arc<Services>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Services not found in depot").into())
}
