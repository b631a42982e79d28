use clap::Subcommand;
use devwell_core::{BreakKind, Config};
use serde_json::json;

use crate::common;

#[derive(Subcommand)]
pub enum BreakAction {
    /// List the break catalog
    Types,
    /// Start a break
    Start {
        /// Break kind, e.g. "walk" or "eye_rest" (see `break types`)
        kind: BreakKind,
        /// Planned minutes; defaults to the catalog duration
        #[arg(long)]
        duration: Option<u32>,
    },
    /// Complete the in-flight break
    Complete {
        /// Mood after the break, 1-10
        #[arg(long)]
        mood: u8,
    },
    /// Completed breaks, oldest first
    History,
}

pub fn run(action: BreakAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        BreakAction::Types => {
            let catalog: Vec<_> = BreakKind::ALL
                .iter()
                .map(|kind| {
                    json!({
                        "kind": kind,
                        "name": kind.display_name(),
                        "default_duration_min": kind.default_duration_min(),
                        "description": kind.description(),
                    })
                })
                .collect();
            common::print_json(&catalog)
        }
        BreakAction::Start { kind, duration } => {
            let config = Config::load()?;
            let mut engine = common::open_engine(&config)?;
            let event = engine.start_break(kind, duration)?;
            common::save_current_break(engine.state().current_break.as_ref())?;
            common::print_json(&event)
        }
        BreakAction::Complete { mood } => {
            let config = Config::load()?;
            let mut engine = common::open_engine(&config)?;
            let break_id = engine
                .state()
                .current_break
                .as_ref()
                .map(|b| b.id.clone())
                .ok_or("no break in progress")?;
            let event = engine.complete_break(&break_id, mood)?;
            common::save_current_break(None)?;
            common::print_json(&event)
        }
        BreakAction::History => {
            let config = Config::load()?;
            let engine = common::open_engine(&config)?;
            common::print_json(&engine.state().breaks)
        }
    }
}
