use std::sync::Arc;

use crate::adapters::{ConsoleAlert, HttpService, InMemoryService};
use crate::app::editor_session::EditorSession;
use crate::config::Settings;
use crate::error::EditorResult;
use crate::ports::{AlertPort, ProcessingService};

pub trait AppContainer: Send + Sync {
    fn service(&self) -> Arc<dyn ProcessingService>;
    fn alerts(&self) -> Arc<dyn AlertPort>;
    fn settings(&self) -> &Settings;

    /// Fresh session wired to this container's ports
    fn editor_session(&self) -> EditorSession {
        EditorSession::new(self.service(), self.alerts(), self.settings())
    }
}

pub struct DefaultAppContainer {
    service: Arc<dyn ProcessingService>,
    alerts: Arc<dyn AlertPort>,
    settings: Settings,
}

impl DefaultAppContainer {
    /// Wire the HTTP service, or the in-memory one for dry runs
    pub fn new(settings: Settings, dry_run: bool) -> EditorResult<Self> {
        let service: Arc<dyn ProcessingService> = if dry_run {
            Arc::new(InMemoryService::new())
        } else {
            Arc::new(HttpService::new(&settings.server)?)
        };

        Ok(Self::with_ports(service, Arc::new(ConsoleAlert::new()), settings))
    }

    pub fn with_ports(
        service: Arc<dyn ProcessingService>,
        alerts: Arc<dyn AlertPort>,
        settings: Settings,
    ) -> Self {
        Self {
            service,
            alerts,
            settings,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn service(&self) -> Arc<dyn ProcessingService> {
        Arc::clone(&self.service)
    }

    fn alerts(&self) -> Arc<dyn AlertPort> {
        Arc::clone(&self.alerts)
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}
