use clap::Subcommand;
use hunterlog_core::{Domain, GrowthEngine};

use super::resolve_habit;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a habit
    Add {
        name: String,
        /// Owning life domain (physical, mental, emotional, social,
        /// financial, spiritual)
        domain: Domain,
        /// XP awarded on completion
        #[arg(long, default_value_t = 10)]
        xp: u32,
    },
    /// List habits, optionally filtered by domain
    List {
        #[arg(long)]
        domain: Option<Domain>,
        #[arg(long)]
        json: bool,
    },
    /// Toggle today's completion for a habit (by name or id)
    Toggle { habit: String },
    /// Remove a habit (by name or id)
    Remove { habit: String },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = GrowthEngine::open()?;

    match action {
        HabitAction::Add { name, domain, xp } => {
            let id = engine.add_habit(&name, domain, xp)?;
            println!("Habit created: {id}");
        }
        HabitAction::List { domain, json } => {
            let habits = match domain {
                Some(domain) => engine.habits_in_domain(domain),
                None => engine.habits(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&habits)?);
            } else {
                let today = engine.today();
                for habit in habits {
                    let mark = if habit.completed_on(today) { "x" } else { " " };
                    println!(
                        "[{mark}] {}  {} ({}, {} XP, streak {})",
                        habit.id, habit.name, habit.domain, habit.xp_reward, habit.streak
                    );
                }
            }
        }
        HabitAction::Toggle { habit } => {
            let id = resolve_habit(&engine, &habit)?;
            let result = engine.toggle_completion(id)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        HabitAction::Remove { habit } => {
            let id = resolve_habit(&engine, &habit)?;
            engine.remove_habit(id)?;
            println!("Habit removed: {id}");
        }
    }
    Ok(())
}
