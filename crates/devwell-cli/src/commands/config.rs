use clap::Subcommand;
use devwell_core::{store::data_dir, Config};

use crate::common;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the full configuration as JSON
    Show,
    /// Print the config file path
    Path,
    /// Set a config value
    Set {
        /// Config key, e.g. "engine.tick_period_secs" or "remote.base_url"
        key: String,
        /// New value
        value: String,
    },
    /// Reset config to defaults
    Reset,
}

fn set_key(config: &mut Config, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    match key {
        "engine.tick_period_secs" => config.engine.tick_period_secs = value.parse()?,
        "engine.motion_threshold_g" => config.engine.motion_threshold_g = value.parse()?,
        "engine.idle_threshold_min" => config.engine.idle_threshold_min = value.parse()?,
        "engine.tick_increment_hours" => config.engine.tick_increment_hours = value.parse()?,
        "remote.base_url" => config.remote.base_url = Some(value.to_string()),
        "remote.api_key" => config.remote.api_key = Some(value.to_string()),
        "remote.request_timeout_secs" => config.remote.request_timeout_secs = value.parse()?,
        other => return Err(format!("unknown key: {other}").into()),
    }
    Ok(())
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            common::print_json(&config)?;
        }
        ConfigAction::Path => {
            println!("{}", data_dir()?.join("config.toml").display());
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            set_key(&mut config, &key, &value)?;
            config.save()?;
            println!("ok");
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
