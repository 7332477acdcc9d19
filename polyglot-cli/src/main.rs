mod commands;
mod view;

use anyhow::Context;
use commands::Command;
use polyglot_engine::controller::SessionController;
use polyglot_engine::session::ActionOutcome;
use polyglot_runtime::config_store::ConfigStore;
use polyglot_runtime::env::EnvOverrides;
use polyglot_runtime::runtime_controller::build_controller_from_config;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let env = EnvOverrides::from_env();
    let store = ConfigStore::at_path(env.config_path());
    let mut cfg = store.load_or_default()?;
    env.apply(&mut cfg);

    let controller = build_controller_from_config(&cfg, env.api_key())?;
    spawn_progress_printer(&controller);

    println!("{}", commands::HELP);
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("read stdin")? {
        let cmd = match commands::parse(&line) {
            Ok(cmd) => cmd,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };

        let outcome = match cmd {
            Command::Quit => break,
            Command::Help => {
                println!("{}", commands::HELP);
                continue;
            }
            Command::State => None,
            Command::SaveTarget => {
                let target = controller.snapshot().target_language;
                match store.update(|c| c.default_target_language = target) {
                    Ok(_) => println!(
                        "default target language saved to {}",
                        store.path().display()
                    ),
                    Err(e) => {
                        log::error!("save config: {e:#}");
                        println!("could not save the config: {e:#}");
                    }
                }
                continue;
            }
            Command::Target(target) => {
                controller.set_target_language(target);
                println!("target language: {} ({})", target.label(), target.code());
                None
            }
            Command::Send(text) => {
                controller.set_input(text);
                Some(controller.send().await)
            }
            Command::Summarize => Some(controller.summarize().await),
            Command::Translate => Some(controller.translate().await),
        };

        match outcome {
            Some(ActionOutcome::Skipped) => println!("(nothing to do for that right now)"),
            Some(ActionOutcome::Busy) => println!("(still working on the previous request)"),
            _ => {}
        }
        print!(
            "{}",
            view::render(&controller.snapshot(), &controller.affordances())
        );
        println!();
    }

    log::debug!("stdin closed; exiting");
    Ok(())
}

/// Print a progress line whenever an action starts.
fn spawn_progress_printer(controller: &SessionController) {
    let mut updates = controller.subscribe();
    tokio::spawn(async move {
        let mut last = None;
        while updates.changed().await.is_ok() {
            let in_flight = updates.borrow_and_update().in_flight;
            if in_flight != last {
                if let Some(action) = in_flight {
                    eprintln!("{}", view::progress_line(action));
                }
                last = in_flight;
            }
        }
    });
}
