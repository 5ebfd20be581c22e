//! Storage location resolution.
//!
//! This module decides where the registry keeps its on-disk state (the JSON
//! artifact store and the trace file). Resolution order: explicit override via
//! the `HOSTDOCK_DATA_DIR` environment variable, then the platform data
//! directory reported by the `dirs` crate, then the current directory as a
//! last resort for stripped-down environments.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "HOSTDOCK_DATA_DIR";

/// Returns the data directory for registry storage.
///
/// Typical results: `~/.local/share/hostdock` on Linux,
/// `~/Library/Application Support/hostdock` on macOS. The directory is not
/// created here; storage backends create it on first write.
///
/// # Examples
///
/// ```
/// use hostdock::infrastructure::data_dir;
///
/// let dir = data_dir();
/// assert!(dir.ends_with("hostdock") || std::env::var_os("HOSTDOCK_DATA_DIR").is_some());
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hostdock")
}

/// Resolves the data directory with an explicit override taking precedence.
///
/// This is how a configured `data_dir` reaches the storage and trace
/// layers: the override is threaded through as a value, never written back
/// into the process environment. Without an override, resolution falls
/// through to [`data_dir`].
#[must_use]
pub fn resolve_data_dir(override_dir: Option<&str>) -> PathBuf {
    override_dir.map_or_else(data_dir, PathBuf::from)
}

/// Default file name of the JSON artifact store inside the data directory.
#[must_use]
pub fn store_file() -> PathBuf {
    data_dir().join("registry.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_wins_over_environment() {
        let dir = resolve_data_dir(Some("/srv/hostdock"));
        assert_eq!(dir, PathBuf::from("/srv/hostdock"));
    }

    #[test]
    fn no_override_falls_back_to_data_dir() {
        assert_eq!(resolve_data_dir(None), data_dir());
    }
}
