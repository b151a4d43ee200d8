//=========================================================================
// Logging
//=========================================================================
//
// File-backed `log` backend.
//
// The terminal belongs to the Display while a game runs, so records
// cannot go to stderr. `init_file_logger` installs env_logger with an
// append-mode file as its target instead. `RUST_LOG` still controls the
// filter; the default level is `info`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::env;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target, WriteStyle};

/// Log file name used when none is configured.
pub const DEFAULT_LOG_FILE: &str = "terminus.log";

//=== Path Resolution =====================================================

/// Resolves a relative log path against the executable's directory.
///
/// Absolute paths are returned unchanged. If the executable's location
/// is unknown the path is left relative to the working directory.
pub fn resolve_log_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .map_or_else(|| path.to_path_buf(), |dir| dir.join(path))
}

//=== init_file_logger() ==================================================

/// Installs a logger appending to `path`.
///
/// Returns `Ok(false)` if a logger was already installed; the file is
/// still created but stays empty.
pub fn init_file_logger(path: impl AsRef<Path>) -> io::Result<bool> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;

    let installed = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .format_timestamp_millis()
        .try_init()
        .is_ok();

    Ok(installed)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_are_kept() {
        let path = env::temp_dir().join("terminus-test.log");
        assert_eq!(resolve_log_path(&path), path);
    }

    #[test]
    fn relative_paths_land_next_to_executable() {
        let resolved = resolve_log_path(Path::new(DEFAULT_LOG_FILE));

        assert!(resolved.ends_with(DEFAULT_LOG_FILE));
        if let Some(dir) = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
            assert_eq!(resolved.parent(), Some(dir.as_path()));
        }
    }

    #[test]
    fn unopenable_file_is_an_error() {
        let dir = env::temp_dir().join("terminus-missing-dir").join("nested");
        let result = init_file_logger(dir.join("game.log"));
        assert!(result.is_err());
    }
}
