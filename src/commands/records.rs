//! `plantscan records` - print stored records as JSON.

use anyhow::{Context, Result};

use plantscan::config::Config;
use plantscan::store::RecordStore;

use crate::RecordsArgs;

/// Open the store read-side and print every record, newest first.
///
/// Unlike the server, a store that cannot be opened is a hard error here.
pub async fn execute(args: RecordsArgs) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(url) = args.database_url {
        config.database_url = url;
    }

    let store = RecordStore::open_url(&config.database_url)
        .with_context(|| format!("Failed to open record store: {}", config.database_url))?;
    let records = store.find_all_sorted_by_date_desc().await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&records).context("Failed to serialize records")?
    );
    Ok(())
}
