//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `salesdesk_core` linkage without a view layer.
//! - Optionally open a store file, seed it, and print dashboard counters
//!   and which collection entries exist.
//!
//! Usage: `salesdesk_cli [STORE_DB_PATH]`. Set `SALESDESK_LOG_DIR` to an
//! absolute directory to enable file logging.

use salesdesk_core::db::open_db;
use salesdesk_core::store::SESSION_KEY;
use salesdesk_core::{
    core_version, default_log_level, format_currency, init_logging, ping, seed_defaults,
    Collection, DashboardStats, SqliteKeyValueStore,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("SALESDESK_LOG_DIR") {
        init_logging(default_log_level(), &log_dir)?;
    }

    println!("salesdesk_core ping={}", ping());
    println!("salesdesk_core version={}", core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return Ok(());
    };

    let conn = open_db(&db_path)?;
    let store = SqliteKeyValueStore::try_new(&conn)?;
    let seeded = seed_defaults(&store)?;
    log::info!(
        "event=cli_seed module=cli status=ok seeded_count={}",
        seeded.seeded.len()
    );

    let stats = DashboardStats::collect(&store)?;
    println!("clients={}", stats.client_count);
    println!("sellers={}", stats.seller_count);
    println!("concepts={}", stats.concept_count);
    println!("sales={}", stats.sale_count);
    println!("total_sales={}", format_currency(stats.total_sales));

    let keys = store.keys()?;
    for collection in Collection::ALL {
        let stored = keys.iter().any(|key| key == collection.storage_key());
        println!("collection.{collection}.stored={stored}");
    }
    let unknown = keys
        .iter()
        .filter(|key| key.as_str() != SESSION_KEY && Collection::from_storage_key(key).is_none())
        .count();
    println!("unknown_keys={unknown}");
    Ok(())
}
