use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path, config.database.pool_size)?;

    db.migrate()?;

    for (version, applied_at) in db.applied_migrations()? {
        tracing::info!("Migration {:03} applied at {}", version, applied_at);
    }
    tracing::info!("Migrations complete");

    Ok(())
}
