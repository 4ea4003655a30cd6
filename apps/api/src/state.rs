use std::sync::Arc;

use crate::admin::dashboards::Dashboards;
use crate::admin::store::AdminStore;
use crate::auth::SessionVerifier;
use crate::llm_client::LanguageModel;
use crate::notify::Notifier;
use crate::payments::PaymentVerifier;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every client is built once at startup; handlers never construct their own.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LanguageModel>,
    pub store: Arc<dyn AdminStore>,
    pub sessions: Arc<SessionVerifier>,
    pub payments: Arc<dyn PaymentVerifier>,
    /// Outbound email stub. Records only.
    pub notifier: Arc<dyn Notifier>,
    /// Admin panel sources. Default: fixed sample data.
    pub dashboards: Dashboards,
}
