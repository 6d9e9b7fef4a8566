use clap::Subcommand;
use pomocycle_core::{Config, ConfiguredDurations, DurationProvider, Phase};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "schedule.focus_minutes", "notifications.enabled")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }
    Ok(())
}

/// Effective seconds per phase after default substitution.
pub fn durations() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let provider = ConfiguredDurations::new(config.schedule);
    let json = serde_json::json!({
        "focusing": provider.seconds_for(Phase::Focusing),
        "short_break": provider.seconds_for(Phase::ShortBreak),
        "long_break": provider.seconds_for(Phase::LongBreak),
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
