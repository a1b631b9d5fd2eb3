//! Path utilities for locating cinefile's data directory.

use std::path::PathBuf;

/// Directory name used under the platform data directory.
const APP_DIR_NAME: &str = "cinefile";

/// Returns the default data directory for cinefile storage.
///
/// Resolves to the platform data directory joined with `cinefile`, for example
/// `~/.local/share/cinefile` on Linux. Falls back to the system temp directory
/// when no data directory is known for the platform.
///
/// # Examples
///
/// ```
/// use cinefile::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert!(data_dir.ends_with("cinefile"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and all paths when the home directory is
/// unknown, are returned unchanged.
///
/// # Examples
///
/// ```
/// use cinefile::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// assert_eq!(expand_tilde("relative/path"), PathBuf::from("relative/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
