use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "hours_logger";
pub const LOG_FILE: &str = "hours_logger.log";

pub fn resolve_state_dir(cli_dir: Option<PathBuf>) -> PathBuf {
	if let Some(path) = cli_dir {
		return absolutize(path);
	}

	if let Some(path) = env::var_os("HOURS_LOGGER_STATE_DIR") {
		let path = PathBuf::from(path);
		if !path.as_os_str().is_empty() {
			return absolutize(path);
		}
	}

	default_state_dir()
}

fn default_state_dir() -> PathBuf {
	#[cfg(target_os = "windows")]
	{
		if let Some(path) = env::var_os("LOCALAPPDATA") {
			return PathBuf::from(path).join(APP_DIR);
		}
	}

	if let Some(path) = env::var_os("XDG_STATE_HOME") {
		return PathBuf::from(path).join(APP_DIR);
	}

	if let Some(path) = env::var_os("HOME") {
		return PathBuf::from(path)
			.join(".local")
			.join("state")
			.join(APP_DIR);
	}

	PathBuf::from(format!(".{APP_DIR}"))
}

fn absolutize(path: PathBuf) -> PathBuf {
	if path.is_absolute() {
		path
	} else if let Ok(cwd) = env::current_dir() {
		cwd.join(path)
	} else {
		path
	}
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use super::resolve_state_dir;

	#[test]
	fn cli_dir_wins_and_is_made_absolute() {
		let resolved = resolve_state_dir(Some(PathBuf::from("relative_state")));
		assert!(resolved.is_absolute());
		assert!(resolved.ends_with("relative_state"));

		let absolute = std::env::temp_dir().join("hours_logger_state");
		assert_eq!(resolve_state_dir(Some(absolute.clone())), absolute);
	}
}
