use ampel::prelude::*;
use ampel::{ENGINE_NAME, VERSION as LIB_VERSION};
use anyhow::Result;
use colored::Colorize;
use std::env;
use tracing::info;

const SHELL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging for the shell application.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_target(false)
        .init();

    // 2. Load a config file if one was given, otherwise use defaults.
    let config = match env::args().nth(1) {
        Some(path) => CyclerConfig::from_file(&path)?,
        None => CyclerConfig::default(),
    };
    let light = TrafficLight::new(config)?;

    // 3. Spawn a task that echoes every transition for feedback.
    let mut phase_rx = light.subscribe_phases();
    tokio::spawn(async move {
        while let Ok(event) = phase_rx.recv().await {
            let label = colorize_phase(event.phase);
            // User-facing feedback, not just a log.
            println!("\n<-- light switched to {} (cycle #{})\n>> ", label, event.cycle);
        }
    });

    // 4. Start the light in the background.
    info!("starting the traffic light cycle loop...");
    light.simulate().await?;

    // 5. Start the interactive command loop (REPL).
    let mut rl = rustyline::DefaultEditor::new()?;
    println!("--- {} shell v{} (lib v{}) ---", ENGINE_NAME, SHELL_VERSION, LIB_VERSION);
    println!("The light is cycling. Type 'help' for commands or 'exit' to quit.");

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                let args = line.trim().split_whitespace().collect::<Vec<_>>();

                match args.as_slice() {
                    ["phase"] | ["status"] => {
                        println!("--> current phase: {}", colorize_phase(light.current_phase()));
                    }
                    ["wait", which] => match parse_phase(which) {
                        Some(target) => {
                            println!("--> waiting for {}...", colorize_phase(target));
                            light.wait_for_phase(target).await;
                            println!("--> the light is {}", colorize_phase(target));
                        }
                        None => println!("Unknown phase '{}'. Try 'wait red' or 'wait green'.", which),
                    },
                    ["help"] => {
                        println!("Available commands:");
                        println!("  phase | status    - Prints the phase the light currently shows.");
                        println!("  wait red|green    - Blocks until the light reaches that phase.");
                        println!("  exit              - Quits the shell.");
                    }
                    ["exit"] => break,
                    [] => {} // Ignore empty input
                    _ => println!("Unknown command: '{}'. Type 'help'.", line),
                }
            }
            Err(_) => {
                // This handles Ctrl+C or Ctrl+D in the prompt.
                println!("Exiting ampel shell...");
                break;
            }
        }
    }

    // 6. Stop the cycle loop before the process exits.
    light.shutdown().await?;
    Ok(())
}

fn parse_phase(word: &str) -> Option<Phase> {
    match word {
        "red" => Some(Phase::Red),
        "green" => Some(Phase::Green),
        _ => None,
    }
}

fn colorize_phase(phase: Phase) -> colored::ColoredString {
    match phase {
        Phase::Red => "red".red().bold(),
        Phase::Green => "green".green().bold(),
    }
}
