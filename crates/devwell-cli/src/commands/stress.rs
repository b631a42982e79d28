use clap::Subcommand;
use devwell_core::Config;

use crate::common;

#[derive(Subcommand)]
pub enum StressAction {
    /// Record the self-reported stress level, 0-10
    Set { level: u8 },
}

pub fn run(action: StressAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut engine = common::open_engine(&config)?;

    match action {
        StressAction::Set { level } => {
            let event = engine.update_stress_level(level);
            common::print_json(&event)?;
        }
    }
    Ok(())
}
