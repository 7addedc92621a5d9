use crate::config::Config;
use crate::db::Store;

pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    println!("Checking database: {}", config.database.url);

    let store = Store::new(&config.database.url).await?;
    store.ping().await?;

    let version = store.sqlite_version().await?;
    let counts = store.table_counts().await?;

    println!("✓ Connected (SQLite {version})");
    println!("{:-<40}", "");
    println!("users:            {}", counts.users);
    println!("projects:         {}", counts.projects);
    println!("contact_messages: {}", counts.contact_messages);
    Ok(())
}
