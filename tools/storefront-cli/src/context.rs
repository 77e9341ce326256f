//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_discovery::engine::DiscoveryEngine;
use storefront_discovery::ids::UserId;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;
use crate::store::FileStore;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the config was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(&config_path) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a configured path.
    ///
    /// Relative paths are taken from the directory of the loaded config file,
    /// or from the working directory when running on defaults.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir().join(path)
        }
    }

    fn base_dir(&self) -> PathBuf {
        match self.config_path.as_deref().and_then(Path::parent) {
            Some(dir) if dir.is_absolute() => dir.to_path_buf(),
            Some(dir) => self.cwd.join(dir),
            None => self.cwd.clone(),
        }
    }

    /// The configured viewer, if signed in.
    pub fn viewer(&self) -> Option<UserId> {
        self.config.data.user_id.clone().map(UserId::new)
    }

    /// File-backed stores for the configured snapshot files.
    pub fn store(&self) -> FileStore {
        let data = &self.config.data;
        FileStore::new(
            self.resolve_path(&data.products),
            self.resolve_path(&data.categories),
            self.resolve_path(&data.reviews),
            self.resolve_path(&data.vouchers),
            self.config.discovery.currency,
        )
    }

    /// Load a snapshot and build an engine for the configured viewer.
    ///
    /// Collections that fail to load are reported as warnings, not errors.
    pub async fn engine(&self) -> Result<DiscoveryEngine> {
        self.config
            .discovery
            .validate()
            .context("Invalid [discovery] configuration")?;

        let store = self.store();
        let mut engine =
            DiscoveryEngine::load(&store, &store, &store, self.config.discovery.clone()).await;
        engine.set_viewer(self.viewer());

        for notice in &engine.snapshot().notices {
            self.output.warn(&notice.to_string());
        }
        self.output.debug(&format!(
            "Loaded {} products, {} reviews, {} vouchers",
            engine.snapshot().products.len(),
            engine.snapshot().reviews.len(),
            engine.snapshot().vouchers.len()
        ));
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(cwd: PathBuf, config_path: Option<PathBuf>) -> Context {
        Context {
            config: CliConfig::default(),
            config_path,
            output: Output::new(false, true),
            cwd,
        }
    }

    #[test]
    fn test_data_paths_follow_config_file() {
        let root = std::env::temp_dir().join(format!("storefront-ctx-{}", std::process::id()));
        let sub = root.join("sub");
        std::fs::create_dir_all(&sub).unwrap();
        std::fs::write(root.join("storefront.toml"), "[data]\n").unwrap();

        let (_, found) = Context::find_config(&sub).unwrap();
        assert_eq!(found, root.join("storefront.toml"));

        let ctx = context(sub.clone(), Some(found));
        assert_eq!(
            ctx.resolve_path("data/products.json"),
            root.join("data/products.json")
        );

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_relative_config_flag_and_defaults() {
        let cwd = PathBuf::from("/work");

        let ctx = context(cwd.clone(), Some(PathBuf::from("shop/storefront.toml")));
        assert_eq!(ctx.resolve_path("data/a.json"), cwd.join("shop/data/a.json"));

        let ctx = context(cwd.clone(), Some(PathBuf::from("storefront.toml")));
        assert_eq!(ctx.resolve_path("data/a.json"), cwd.join("data/a.json"));

        let ctx = context(cwd.clone(), None);
        assert_eq!(ctx.resolve_path("data/a.json"), cwd.join("data/a.json"));
        assert_eq!(ctx.resolve_path("/abs/a.json"), PathBuf::from("/abs/a.json"));
    }
}
