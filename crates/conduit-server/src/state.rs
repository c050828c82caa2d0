//! Shared application state.

use std::sync::Arc;

use conduit_config::ConduitConfig;
use conduit_proxy::{CaseWorkflow, DocumentFetcher, Forwarder, HttpUpstream, Upstream};
use conduit_schema::SchemaRegistry;
use conduit_session::{ChatService, SessionStore};

/// Everything a handler needs. Cheap to clone; nothing inside is mutable
/// except the session store, which guards itself.
#[derive(Clone, Debug)]
pub struct AppState {
    pub hris: Forwarder,
    pub investigation: Forwarder,
    pub documents: DocumentFetcher,
    pub cases: CaseWorkflow,
    pub chat: ChatService,
    pub schemas: Arc<SchemaRegistry>,
}

impl AppState {
    /// Build the state over one shared upstream transport and session store.
    ///
    /// # Errors
    ///
    /// Fails if the schema registry cannot be compiled.
    pub fn new(
        config: &ConduitConfig,
        upstream: Arc<dyn Upstream>,
        sessions: Arc<dyn SessionStore>,
    ) -> anyhow::Result<Self> {
        let hris = Forwarder::new(&config.hris, upstream.clone());
        let investigation = Forwarder::new(&config.investigation, upstream.clone());
        Ok(Self {
            documents: DocumentFetcher::new(config.documents.clone(), upstream),
            cases: CaseWorkflow::new(investigation.clone()),
            chat: ChatService::new(sessions, investigation.clone()),
            schemas: Arc::new(SchemaRegistry::new()?),
            hris,
            investigation,
        })
    }

    /// The production state: real HTTP upstreams and the configured store.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client, the session store or the schema registry
    /// cannot be initialized.
    pub async fn from_config(config: &ConduitConfig) -> anyhow::Result<Self> {
        let upstream: Arc<dyn Upstream> = Arc::new(HttpUpstream::new()?);
        let sessions = conduit_session::open_store(&config.sessions).await?;
        Self::new(config, upstream, sessions)
    }
}
