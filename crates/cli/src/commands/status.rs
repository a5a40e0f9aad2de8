//! `liftcheck status` — Show configuration and table status.

use liftcheck_config::AppConfig;
use liftcheck_data::TableStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("LiftCheck Status");
    println!("================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Data dir:     {}", config.data.dir.display());
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "  Entry fields: {} → {} → {}",
        config.schema.category_column,
        config.schema.panel_model_column,
        config.schema.slope_column
    );

    let store = TableStore::load(&config.data);
    println!("\n  Tables:");
    for status in store.statuses() {
        if status.available {
            println!(
                "    ✅ {:<10} {} rows × {} columns  ({})",
                status.name, status.rows, status.columns, status.origin
            );
        } else {
            println!("    ❌ {:<10} unavailable  ({})", status.name, status.origin);
        }
    }
    println!("  Registered units: {}", store.registry().len());

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `liftcheck onboard` first");
    }

    Ok(())
}
