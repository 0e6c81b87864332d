use crate::Config;
use anyhow::Result;
use std::path::PathBuf;

pub async fn run(path: PathBuf, name: Option<String>) -> Result<()> {
    let site_name = name.unwrap_or_else(|| "Blogly".to_string());

    std::fs::create_dir_all(&path)?;
    std::fs::create_dir_all(path.join("data"))?;

    let config_path = path.join("blogly.toml");
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }
    std::fs::write(&config_path, Config::default_toml(&site_name))?;

    tracing::info!("Created new Blogly site at {:?}", path);
    tracing::info!("Run 'blogly migrate' to set up the database");
    tracing::info!("Run 'blogly serve' to start the server");

    Ok(())
}
