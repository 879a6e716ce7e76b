use std::sync::Arc;
use std::time::Duration;

use taskboard_core::{AppConfig, BoardResult, TimingConfig};
use taskboard_domain::{FilterState, FilterStore, SettingsStore};
use taskboard_engine::{
    BoardEngine, BoardServices, MockGateway, Notification, QueryCache, QueryClient,
};
use taskboard_persistence::{BoardStorage, JsonFileStore};
use tokio::sync::mpsc;

use crate::cli::{Cli, FilterArgs};

/// Everything a command needs, wired from config and flags.
pub struct CliContext {
    pub engine: BoardEngine,
    pub services: BoardServices,
    pub gateway: Arc<MockGateway>,
    pub filters: FilterStore,
    settle_delay: Duration,
    notifications: mpsc::UnboundedReceiver<Notification>,
}

impl CliContext {
    pub fn load(cli: &Cli) -> Self {
        let mut config = AppConfig::load();
        if let Some(dir) = &cli.data_dir {
            config.data_dir = Some(dir.clone());
        }
        let timing = if cli.fast {
            TimingConfig {
                settle_delay_ms: config.timing.settle_delay_ms,
                ..TimingConfig::instant()
            }
        } else {
            config.timing.clone()
        };

        let data_dir = config.effective_data_dir();
        tracing::debug!("Using data directory {}", data_dir.display());

        let storage = BoardStorage::new(Arc::new(JsonFileStore::new(&data_dir)));
        let gateway = Arc::new(MockGateway::new(timing.clone()).backed_by(storage.clone()));
        let client = QueryClient::new(gateway.clone(), storage, QueryCache::new());

        let (engine, notifications) =
            BoardEngine::new(client.clone(), SettingsStore::default(), timing.settle_delay());
        let services = BoardServices::new(client, engine.notifier());

        Self {
            engine,
            services,
            gateway,
            filters: FilterStore::default(),
            settle_delay: timing.settle_delay(),
            notifications,
        }
    }

    pub fn client(&self) -> &QueryClient {
        self.engine.client()
    }

    pub async fn load_board(&self) -> BoardResult<()> {
        self.client().load_board().await?;
        Ok(())
    }

    /// Apply the filter flags to the shared filter store.
    pub fn apply_filters(&self, args: FilterArgs) -> FilterState {
        if let Some(status) = args.status {
            self.filters.set_status(status);
        }
        if let Some(responsible) = args.responsible {
            self.filters.set_responsible(responsible);
        }
        if let Some(search) = args.search {
            self.filters.set_search(search);
        }
        if let Some(direction) = args.sort {
            self.filters.set_sort_direction(direction);
        }
        self.filters.snapshot()
    }

    /// Let in-flight commits finish and the overlay settle.
    pub async fn settle(&self) {
        self.engine.wait_for_commits().await;
        tokio::time::sleep(self.settle_delay).await;
        self.engine.settle_now();
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        let mut drained = Vec::new();
        while let Ok(notification) = self.notifications.try_recv() {
            drained.push(notification);
        }
        drained
    }
}
