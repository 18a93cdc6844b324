//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use rocket_cart::{CartStore, ChannelNotifier, Notice};
use rocket_inventory::{HttpInventoryClient, InventoryClient, StaticInventory};
use rocket_storage::FileStorage;
use tokio::sync::mpsc;

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["cart.toml", ".cart.toml", "cart.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

/// A store opened for one command, with the notices it raises.
pub struct Session {
    pub store: CartStore,
    pub notices: mpsc::UnboundedReceiver<Notice>,
}

impl Session {
    /// Notices raised since the last drain.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(notice) = self.notices.try_recv() {
            notices.push(notice);
        }
        notices
    }
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = match config_path {
            Some(path) => CliConfig::load(path)?,
            None => match find_config(&cwd) {
                Some(path) => {
                    output.debug(&format!("using config {}", path.display()));
                    CliConfig::load(&path.to_string_lossy())?
                }
                None => CliConfig::default(),
            },
        };

        Ok(Self { config, output, cwd })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Open the cart storage directory.
    pub fn storage(&self) -> Result<FileStorage> {
        let dir = self.resolve_path(&self.config.storage.dir);
        FileStorage::open(&dir)
            .with_context(|| format!("Failed to open storage directory: {}", dir.display()))
    }

    /// Build the inventory client described by the config.
    pub fn inventory(&self) -> Result<Arc<dyn InventoryClient>> {
        let inventory = &self.config.inventory;

        if let Some(fixture) = &inventory.fixture {
            let path = self.resolve_path(fixture);
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read inventory fixture: {}", path.display()))?;
            let snapshot = StaticInventory::from_json(&json)
                .with_context(|| format!("Invalid inventory fixture: {}", path.display()))?;
            self.output
                .debug(&format!("inventory from fixture {}", path.display()));
            return Ok(Arc::new(snapshot));
        }

        let mut client = HttpInventoryClient::new(&inventory.base_url);
        for (name, value) in &inventory.headers {
            client = client.with_default_header(name, value);
        }
        if let Some(ms) = inventory.timeout_ms {
            client = client.with_timeout(Duration::from_millis(ms));
        }
        self.output
            .debug(&format!("inventory at {}", client.base_url()));
        Ok(Arc::new(client))
    }

    /// Open the cart store, collecting notices on a channel.
    pub fn open_session(&self) -> Result<Session> {
        let (notifier, notices) = ChannelNotifier::new();
        let store = CartStore::builder(self.storage()?, self.inventory()?)
            .with_config(self.config.store.clone())
            .with_notifier(notifier)
            .open()
            .context("Failed to open cart")?;

        Ok(Session { store, notices })
    }
}

/// Find a config file in the directory tree, starting at `start`.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
