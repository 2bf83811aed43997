//! Strictly Turns - Unified CLI
//!
//! Plays m,n,k-games in the terminal, one board with human seats or several
//! boards of computer agents side by side.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, multi_defaults};
use std::io::BufRead;
use std::sync::Arc;
use strictly_turns::{
    CancelToken, ConsoleInput, Delivery, GameConfig, ScheduleReport, TextFrameView, run_boards,
    run_schedule,
};
use tracing::{error, info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Frames go to stdout; keep logs out of the way.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play { game } => {
            let config = game.resolve(GameConfig::default())?;
            run_play(config, game.json).await
        }
        Command::Multi { game } => {
            let config = game.resolve(multi_defaults())?;
            run_multi(config, game.json).await
        }
    }
}

/// Cancels the token on Ctrl-C.
fn cancel_on_ctrl_c(cancel: &CancelToken) {
    let cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, stopping");
            cancel.cancel();
        }
    });
}

/// Prints every frame the view publishes.
fn spawn_printer(view: &Arc<TextFrameView>) {
    let mut frames = view.frames();
    tokio::spawn(async move {
        while frames.changed().await.is_ok() {
            let text = frames.borrow_and_update().text.clone();
            println!("{text}");
        }
    });
}

/// Feeds stdin lines to the human seats.
///
/// Runs on a plain thread: a blocking stdin read must not hold up runtime
/// shutdown.
fn spawn_stdin_reader(console: ConsoleInput) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match console.handle_line(&line) {
                Ok(Delivery::Accepted { .. }) => {}
                Ok(Delivery::NotWaiting) => warn!("Not your turn"),
                Err(err) => warn!(error = %err, "Try `row column`, for example `2 3`"),
            }
        }
    });
}

fn print_report(report: &ScheduleReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

/// Play on one board
#[instrument(skip_all)]
async fn run_play(config: GameConfig, json: bool) -> Result<()> {
    let (mut engine, inputs) = config.build_engine()?;
    let view = TextFrameView::new(None);
    engine.game_mut().subscribe(view.clone());
    spawn_printer(&view);

    let console = ConsoleInput::new(inputs);
    if console.has_humans() {
        info!("Enter moves as `row column`, counting from 1");
        spawn_stdin_reader(console);
    }

    let cancel = CancelToken::new();
    cancel_on_ctrl_c(&cancel);

    let report = run_schedule(&mut engine, &config.schedule(), &cancel).await?;
    print_report(&report, json)
}

/// Play several boards side by side
#[instrument(skip_all, fields(boards = *config.boards()))]
async fn run_multi(config: GameConfig, json: bool) -> Result<()> {
    let mut engines = Vec::with_capacity(*config.boards());
    for board in 0..*config.boards() {
        let (mut engine, _inputs) = config.build_engine()?;
        let view = TextFrameView::new(Some(format!("Board {}", board + 1)));
        engine.game_mut().subscribe(view.clone());
        spawn_printer(&view);
        engines.push(engine);
    }

    let cancel = CancelToken::new();
    cancel_on_ctrl_c(&cancel);

    let mut failed = None;
    for (board, result) in run_boards(engines, config.schedule(), cancel).await.into_iter().enumerate() {
        match result {
            Ok(report) => {
                println!("Board {}:", board + 1);
                print_report(&report, json)?;
            }
            Err(err) => {
                error!(board = board + 1, error = %err, "Board failed");
                failed.get_or_insert(err);
            }
        }
    }

    match failed {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
