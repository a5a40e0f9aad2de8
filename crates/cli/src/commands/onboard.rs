//! `liftcheck onboard` — First-time setup.

use liftcheck_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("LiftCheck — First-Time Setup");
    println!("============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
    }

    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let data = &config.data;
    for table in [&data.elevator_list, &data.primary_table, &data.secondary_table] {
        let path = data.resolve(table);
        if let Some(parent) = path.parent().filter(|p| !p.exists()) {
            std::fs::create_dir_all(parent)?;
            println!("✅ Created data directory: {}", parent.display());
        }
    }

    println!("\n📝 Next steps:");
    println!("   1. Place the CSV tables under {}", data.dir.display());
    for table in [&data.elevator_list, &data.primary_table, &data.secondary_table] {
        println!("        {}", table.path);
    }
    println!("   2. Run: liftcheck doctor");
    println!("   3. Run: liftcheck serve\n");

    Ok(())
}
