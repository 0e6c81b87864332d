use crate::models::CreateUser;
use crate::services::users;
use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

const SAMPLE_USERS: [(&str, &str, Option<&str>); 5] = [
    ("Bob", "Beltcher", None),
    (
        "Rick",
        "Sanchez",
        Some("https://cdn.dribbble.com/users/5592443/screenshots/14279501/media/03a05059cbfbc4ed313162fff2476111.png?compress=1&resize=800x600"),
    ),
    (
        "Stewie",
        "Griffin",
        Some("https://www.thefactsite.com/wp-content/uploads/2012/11/stewie-griffin-facts.webp"),
    ),
    (
        "Michael",
        "Scott",
        Some("https://miro.medium.com/max/500/1*xDIevNE7HEMiJQVTYg0qDQ.png"),
    ),
    ("Jim", "Halpert", None),
];

pub async fn run(config_path: &Path, reset: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path, config.database.pool_size)?;

    let count = seed(&db, reset)?;
    tracing::info!("Seeded {} users", count);

    Ok(())
}

pub fn seed(db: &Database, reset: bool) -> Result<usize> {
    if reset {
        db.reset()?;
    }
    db.migrate()?;

    for (first_name, last_name, img_url) in SAMPLE_USERS {
        users::create_user(
            db,
            CreateUser {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                img_url: img_url.map(String::from),
            },
        )?;
    }

    Ok(SAMPLE_USERS.len())
}
