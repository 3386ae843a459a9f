//! Initialize the docverify data directory

use std::fs;

use anyhow::Context as _;

use super::Context;
use docverify::adapters::JsonFileStore;
use docverify::config::{self, AppConfig, StorageBackend};
use docverify::output::{OperationResult, Render};
use docverify::paths;

/// Write the default config and an empty store
pub fn init(force: bool, ctx: &Context) -> anyhow::Result<()> {
    let dir = paths::data_dir();
    let config_path = paths::config_file();

    if config_path.exists() && !force {
        OperationResult::ok(format!(
            "Already initialized ({} exists).\nUse --force to reinitialize.",
            config_path.display()
        ))
        .render(ctx.mode);
        return Ok(());
    }

    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    fs::write(&config_path, config::default_config_toml())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    let mut lines = vec![format!("Created {}", config_path.display())];

    let config = AppConfig::load_from(&config_path)?;
    if config.storage.backend == StorageBackend::File {
        let store = JsonFileStore::open(config.storage.store_path());
        if store.initialize(force)? {
            lines.push(format!("Created {}", store.path().display()));
        } else {
            lines.push(format!("Kept existing {}", store.path().display()));
        }
    }

    lines.push(String::new());
    lines.push("docverify initialized!".to_string());
    lines.push("\nNext steps:".to_string());
    lines.push("  docverify --role platform_admin institution add <id> <name>".to_string());
    lines.push("  docverify --role regulator_admin request create --from <id> --to <id> ...".to_string());

    OperationResult::ok(lines.join("\n")).render(ctx.mode);
    Ok(())
}
