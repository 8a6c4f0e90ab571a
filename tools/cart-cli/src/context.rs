//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use cart_core::{CartStore, HttpInventory};
use cart_fetch::{FetchClient, ReqwestTransport};
use cart_kv::{Cache, FileStore};

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

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = match config_path {
            Some(path) => CliConfig::load(path)?,
            None => find_config(&cwd)?.unwrap_or_default(),
        }
        .with_env();
        tracing::debug!(base_url = %config.api.base_url, "loaded configuration");

        Ok(Self {
            config,
            output,
            cwd,
        })
    }

    /// Open the cart store described by the configuration.
    pub fn open_store(&self) -> Result<CartStore<HttpInventory>> {
        let api = &self.config.api;

        let client = match api.timeout_secs {
            Some(secs) => FetchClient::with_transport(
                ReqwestTransport::with_timeout(Duration::from_secs(secs))
                    .context("Failed to build HTTP client")?,
            ),
            None => FetchClient::new(),
        };
        let mut client = client.with_base_url(&api.base_url);
        if let Some(token) = &api.token {
            client = client.with_default_header("Authorization", format!("Bearer {}", token));
        }

        let storage_path = self.resolve_path(&self.config.storage.path);
        let store = FileStore::open(&storage_path)
            .with_context(|| format!("Failed to open cart storage: {}", storage_path.display()))?;

        self.output.debug(&format!(
            "api={} storage={} key={}",
            api.base_url,
            storage_path.display(),
            self.config.storage.key
        ));

        Ok(CartStore::open(
            HttpInventory::new(client),
            Cache::new(store),
            self.config.storage.key.clone(),
        ))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find the nearest config file in `start` or its ancestors.
fn find_config(start: &Path) -> Result<Option<CliConfig>> {
    for dir in start.ancestors() {
        for name in CONFIG_NAMES {
            let path = dir.join(name);
            if path.is_file() {
                let path = path.to_string_lossy();
                return CliConfig::load(&path).map(Some);
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join("cart.toml"),
            "[api]\nbase_url = \"http://found\"\n",
        )
        .unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = find_config(&nested).unwrap().unwrap();
        assert_eq!(config.api.base_url, "http://found");
    }

    #[test]
    fn test_find_config_surfaces_parse_errors() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join(".cart.toml"), "[api\n").unwrap();

        assert!(find_config(root.path()).is_err());
    }

    #[test]
    fn test_resolve_path() {
        let ctx = Context {
            config: CliConfig::default(),
            output: Output::new(false, true),
            cwd: PathBuf::from("/work"),
        };
        assert_eq!(ctx.resolve_path("/abs/store.json"), PathBuf::from("/abs/store.json"));
        assert_eq!(
            ctx.resolve_path(".cart/storage.json"),
            PathBuf::from("/work/.cart/storage.json")
        );
    }
}
