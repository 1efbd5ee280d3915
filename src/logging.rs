use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::paths::LOG_FILE;

/// Routes `tracing` output to a file in the state directory, since the
/// dashboard owns the terminal. Priority: `RUST_LOG` > `--debug` > info.
///
/// Failing to open the log file disables logging instead of aborting.
pub fn init(state_dir: &Path, debug: bool) {
	let filter = if std::env::var("RUST_LOG").is_ok() {
		EnvFilter::from_default_env()
	} else if debug {
		EnvFilter::new("debug")
	} else {
		EnvFilter::new("info")
	};

	let path = state_dir.join(LOG_FILE);
	let file = fs::create_dir_all(state_dir)
		.and_then(|()| OpenOptions::new().create(true).append(true).open(&path));
	let file = match file {
		Ok(file) => file,
		Err(err) => {
			eprintln!("warning: logging disabled, cannot open {}: {err}", path.display());
			return;
		}
	};

	let installed = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(Mutex::new(file))
		.with_ansi(false)
		.with_target(true)
		.compact()
		.try_init();

	if installed.is_ok() {
		tracing::debug!(
			version = env!("CARGO_PKG_VERSION"),
			log_file = %path.display(),
			"logging initialised"
		);
	}
}
