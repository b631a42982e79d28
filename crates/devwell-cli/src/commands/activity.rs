use clap::Subcommand;
use devwell_core::{Config, MotionSample};

use crate::common;

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Add a pedometer step delta
    Steps {
        /// Steps to add to today's count
        count: u32,
    },
    /// Feed one accelerometer sample (acceleration in g)
    Motion {
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        #[arg(long)]
        z: f64,
    },
    /// Apply one periodic tick
    Tick,
    /// Zero the focus and sedentary accumulators
    Reset,
}

pub fn run(action: ActivityAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut engine = common::open_engine(&config)?;

    match action {
        ActivityAction::Steps { count } => {
            let event = engine.on_step_delta(count);
            engine.save_snapshot()?;
            common::print_json(&event)?;
        }
        ActivityAction::Motion { x, y, z } => {
            let sample = MotionSample::new(x, y, z);
            let moved = sample.magnitude() > config.engine.motion_threshold_g;
            engine.on_motion_sample(sample);
            engine.save_snapshot()?;
            println!("{}", if moved { "motion" } else { "below threshold" });
        }
        ActivityAction::Tick => {
            let event = engine.tick();
            common::print_json(&event)?;
        }
        ActivityAction::Reset => {
            let event = engine.reset_activity();
            engine.save_snapshot()?;
            common::print_json(&event)?;
        }
    }
    Ok(())
}
