use clap::Subcommand;
use devwell_core::{AuthGate, Config, WellnessGoals};
use serde_json::json;

use crate::common;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the session
    Logout,
    /// Request a password-reset message
    ResetPassword {
        #[arg(long)]
        email: String,
    },
    /// Complete onboarding with wellness goals
    Onboard {
        #[arg(long)]
        developer_type: Option<String>,
        #[arg(long)]
        step_goal: Option<u32>,
        #[arg(long)]
        break_preference: Option<String>,
    },
    /// Current auth phase
    Status,
}

fn print_notices(gate: &mut AuthGate) {
    for notice in gate.drain_notices() {
        eprintln!("notice: {notice:?}");
    }
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut gate = AuthGate::new();

    match action {
        AuthAction::Signup {
            email,
            password,
            name,
        } => {
            let (mut provider, mut documents) = common::remote_clients(&config)?;
            let identity = gate.signup(&mut provider, &mut documents, &email, &password, &name)?;
            common::save_identity(Some(&identity))?;
            print_notices(&mut gate);
            println!("signed up as {} ({:?})", identity.email, gate.phase());
        }
        AuthAction::Login { email, password } => {
            let (mut provider, documents) = common::remote_clients(&config)?;
            let identity = gate.login(&mut provider, &documents, &email, &password)?;
            common::save_identity(Some(&identity))?;
            print_notices(&mut gate);
            println!("signed in as {} ({:?})", identity.email, gate.phase());
        }
        AuthAction::Logout => {
            let (mut provider, _) = common::remote_clients(&config)?;
            gate.logout(&mut provider)?;
            common::save_identity(None)?;
            println!("signed out");
        }
        AuthAction::ResetPassword { email } => {
            let (mut provider, _) = common::remote_clients(&config)?;
            gate.reset_password(&mut provider, &email)?;
            println!("password reset requested for {email}");
        }
        AuthAction::Onboard {
            developer_type,
            step_goal,
            break_preference,
        } => {
            let identity = common::load_identity()?.ok_or("not signed in")?;
            let (_, mut documents) = common::remote_clients(&config)?;
            gate.observe_identity(Some(identity), &documents);

            let mut goals = WellnessGoals::default();
            if let Some(developer_type) = developer_type {
                goals.developer_type = developer_type;
            }
            if let Some(step_goal) = step_goal {
                goals.daily_step_goal = step_goal;
            }
            if let Some(break_preference) = break_preference {
                goals.break_preference = break_preference;
            }

            let outcome = gate.complete_onboarding(&mut documents, &goals)?;
            print_notices(&mut gate);
            println!("onboarding complete ({outcome:?}, phase {:?})", gate.phase());
        }
        AuthAction::Status => {
            let identity = common::load_identity()?;
            match common::remote_clients(&config) {
                Ok((_, documents)) => {
                    let phase = gate.observe_identity(identity.clone(), &documents);
                    print_notices(&mut gate);
                    common::print_json(&json!({
                        "phase": phase,
                        "email": identity.map(|i| i.email),
                        "onboarding_completed": gate.onboarding_completed(),
                        "offline": gate.is_offline(),
                        "pending_remote_sync": gate.pending_remote_sync(),
                    }))?;
                }
                // No backend configured: report the stored identity only.
                Err(_) => {
                    common::print_json(&json!({
                        "email": identity.map(|i| i.email),
                        "remote": "not configured",
                    }))?;
                }
            }
        }
    }
    Ok(())
}
