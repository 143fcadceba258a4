//! `civiclens onboard` — write a default config file if one is absent.

use civiclens_config::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    std::fs::create_dir_all(&config_dir)?;
    std::fs::write(&config_path, AppConfig::default_toml())?;

    println!("Wrote default config to {}", config_path.display());
    println!("Set CIVICLENS_API_KEY (or OPENAI_API_KEY / DEEPSEEK_API_KEY) to enable queries.");
    Ok(())
}
