//! Kanboard CLI - drive a Kanban board with drag-and-drop results.

use clap::Parser;
use colored::*;
use kanboard::{
    Board, ColumnEligibility, Config, DragKind, DragResult, DragStart, DraggableLocation, Outcome, SeedFormat, Session,
    default_board, export_board, load_board,
};
use eyre::{Context, Result};
use log::info;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

mod cli;

use cli::{Cli, Command};

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kanboard")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("kanboard.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    }
}

fn open_session(cli: &Cli) -> Result<Session> {
    let config = load_config(cli).context("Failed to load config")?;
    let policy = cli.policy.unwrap_or(config.drop_policy);

    let board = match cli.board.as_ref().or(config.seed.as_ref()) {
        Some(path) => load_board(path)?,
        None => default_board().context("Failed to build default board")?,
    };

    info!("Session started with {} policy", policy);
    Ok(Session::new(board, policy))
}

fn print_board(board: &Board, eligibility: Option<&[ColumnEligibility]>) {
    for (position, column) in board.columns().enumerate() {
        let disabled = eligibility
            .and_then(|flags| flags.get(position))
            .map(|f| f.is_drop_disabled);
        let marker = match disabled {
            Some(true) => format!(" {}", "⊘ drop disabled".red()),
            Some(false) => format!(" {}", "✓ accepts drop".green()),
            None => String::new(),
        };

        println!("{} {}{}", column.title.bold(), format!("({})", column.id).dimmed(), marker);

        let tasks = board.tasks_in(column);
        if tasks.is_empty() {
            println!("  {}", "(empty)".dimmed());
        }
        for (index, task) in tasks.iter().enumerate() {
            println!("  {} {} {}", index, task.id.cyan(), task.content);
        }
    }
}

/// Locate a task as the gesture source would report it.
fn task_location(board: &Board, task_id: &str) -> Result<DraggableLocation> {
    let column = board
        .column_of_task(task_id)
        .ok_or_else(|| eyre::eyre!("Task not found: {}", task_id))?;
    let index = column
        .position_of(task_id)
        .ok_or_else(|| eyre::eyre!("Task not found: {}", task_id))?;
    Ok(DraggableLocation::new(column.id.clone(), index))
}

fn run(cli: Cli) -> Result<()> {
    let mut session = open_session(&cli)?;

    match cli.command {
        Command::Show => {
            print_board(session.board(), None);
        }

        Command::Eligibility { task_id } => {
            let source = task_location(session.board(), &task_id)?;
            session.on_drag_start(DragStart {
                draggable_id: task_id.clone(),
                kind: DragKind::Task,
                source,
            });

            println!(
                "{} Dragging {} ({} policy)",
                "→".blue(),
                task_id.cyan(),
                session.policy()
            );
            let flags = session.drop_eligibility();
            print_board(session.board(), Some(flags.as_slice()));
        }

        Command::MoveTask {
            task_id,
            column_id,
            index,
        } => {
            let source = task_location(session.board(), &task_id)?;
            let result = DragResult::task(&task_id, source.droppable_id, source.index, &column_id, index);

            session.on_drag_start(result.start());
            session.on_drag_end(result).context("Failed to move task")?;

            println!("{} Moved: {} to {}[{}]", "✓".green(), task_id.cyan(), column_id, index);
            print_board(session.board(), None);
        }

        Command::MoveColumn { column_id, index } => {
            let from = session
                .board()
                .column_index(&column_id)
                .ok_or_else(|| eyre::eyre!("Column not found: {}", column_id))?;
            let result = DragResult::column(&column_id, from, index);

            session.on_drag_start(result.start());
            session.on_drag_end(result).context("Failed to move column")?;

            println!("{} Moved column {} to position {}", "✓".green(), column_id.cyan(), index);
            print_board(session.board(), None);
        }

        Command::Replay { events, history } => {
            let file = File::open(&events).with_context(|| format!("Failed to open {}", events.display()))?;
            let summary = session.replay(BufReader::new(file)).context("Failed to replay events")?;

            println!(
                "{} {} moved, {} unchanged, {} rejected, {} skipped",
                "✓".green(),
                summary.moved,
                summary.unchanged,
                summary.rejected,
                summary.skipped
            );

            if history {
                for record in session.history() {
                    let outcome = match &record.outcome {
                        Outcome::Moved => "moved".green(),
                        Outcome::Unchanged => "unchanged".dimmed(),
                        Outcome::Rejected(reason) => format!("rejected: {}", reason).red(),
                    };
                    println!("  {} {:?} {} {}", record.at, record.kind, record.draggable_id.cyan(), outcome);
                }
            }

            print_board(session.board(), None);
        }

        Command::Export { format } => {
            let format = match format.as_str() {
                "json" => SeedFormat::Json,
                "yaml" | "yml" => SeedFormat::Yaml,
                other => eyre::bail!("Unknown export format: {}", other),
            };
            print!("{}", export_board(session.board(), format)?);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
