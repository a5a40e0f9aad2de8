//! `liftcheck doctor` — Diagnose config and data files.

use liftcheck_config::AppConfig;
use liftcheck_data::TableStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("LiftCheck Doctor — Diagnostics");
    println!("==============================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if !config_path.exists() {
        println!("  ⚠️  No config file — using defaults (run `liftcheck onboard`)");
        issues += 1;
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Configuration valid");
            config
        }
        Err(e) => {
            println!("  ❌ Configuration invalid: {e}");
            println!("\n  ⚠️  Fix the configuration before checking data files.");
            return Ok(());
        }
    };

    if config.data.dir.is_dir() {
        println!("  ✅ Data directory exists: {}", config.data.dir.display());
    } else {
        println!("  ❌ Data directory missing: {}", config.data.dir.display());
        issues += 1;
    }

    let store = TableStore::load(&config.data);
    for status in store.statuses() {
        match (&status.error, status.available) {
            (_, true) if status.rows == 0 => {
                println!("  ⚠️  {} has a header but no rows", status.name);
                issues += 1;
            }
            (_, true) => println!("  ✅ {} readable ({} rows)", status.name, status.rows),
            (Some(reason), false) => {
                println!("  ❌ {}: {reason}", status.name);
                issues += 1;
            }
            (None, false) => {
                println!("  ❌ {} unavailable", status.name);
                issues += 1;
            }
        }
    }

    if let Some(primary) = store.primary.table() {
        let schema = &config.schema;
        for column in [
            &schema.category_column,
            &schema.panel_model_column,
            &schema.slope_column,
            &schema.backup_presence_column,
        ] {
            if !primary.has_column(column) {
                println!("  ⚠️  primary table has no column {column}");
                issues += 1;
            }
        }
    }
    if let Some(secondary) = store.secondary.table() {
        if !secondary.has_column(&config.schema.derived_field) {
            println!(
                "  ⚠️  secondary table has no column {}",
                config.schema.derived_field
            );
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
