mod domain;
mod logging;
mod paths;
mod storage;
mod theme;
mod ui;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::LogBook;
use crate::paths::resolve_state_dir;
use crate::storage::FilePreferenceStore;
use crate::theme::ThemePreference;
use crate::ui::run_dashboard;

#[derive(Debug, Parser)]
#[command(name = "hours-logger", about = "Log hours spent on tasks from the terminal")]
struct Cli {
	/// Directory holding preferences and the log file.
	#[arg(long, global = true)]
	state_dir: Option<PathBuf>,
	/// Write debug-level logs.
	#[arg(long, global = true)]
	debug: bool,
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
	Dashboard,
	Theme {
		#[command(subcommand)]
		action: ThemeAction,
	},
}

#[derive(Debug, Subcommand)]
enum ThemeAction {
	Show,
	Toggle,
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> Result<(), Box<dyn Error>> {
	let cli = Cli::parse();

	let state_dir = resolve_state_dir(cli.state_dir);
	logging::init(&state_dir, cli.debug);

	let store = FilePreferenceStore::in_dir(&state_dir);
	tracing::debug!(preferences = %store.path().display(), "using preference store");
	let mut theme = ThemePreference::initialize(Box::new(store));
	theme.subscribe(|mode| tracing::info!(%mode, "theme changed"));

	match cli.command.unwrap_or(Command::Dashboard) {
		Command::Dashboard => {
			let mut book = LogBook::new();
			run_dashboard(&mut book, &mut theme)?;
		}
		Command::Theme { action } => match action {
			ThemeAction::Show => println!("theme: {} (darkMode = {})", theme.mode(), theme.is_dark()),
			ThemeAction::Toggle => {
				let mode = theme.toggle();
				println!("theme: {mode}");
			}
		},
	}

	Ok(())
}
