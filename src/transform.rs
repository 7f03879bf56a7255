//! Ready-made path and content transforms for
//! [`WalkOptions::transform_path`](crate::WalkOptions::transform_path) and
//! [`WalkOptions::transform_content`](crate::WalkOptions::transform_content).

use std::path::{Path, PathBuf};

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and all paths on systems without a home
/// directory, are returned unchanged.
pub fn expand_home(path: &str) -> String {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return path.to_string(),
    };
    let Some(user) = directories::UserDirs::new() else {
        return path.to_string();
    };

    let home = user.home_dir();
    match rest.trim_start_matches('/') {
        "" => home.display().to_string(),
        rest => home.join(rest).display().to_string(),
    }
}

/// Resolve relative references against `base`. Absolute paths pass through.
///
/// Useful when references in a config file are written relative to the
/// file itself:
///
/// ```ignore
/// let options = WalkOptions::new().transform_path(relative_to("/etc/myapp"));
/// ```
pub fn relative_to(base: impl Into<PathBuf>) -> impl Fn(&str) -> String + Send + Sync + 'static {
    let base = base.into();
    move |path: &str| {
        if Path::new(path).is_absolute() {
            path.to_string()
        } else {
            base.join(path).display().to_string()
        }
    }
}

/// Remove every line break from file contents.
pub fn strip_newlines(content: &str) -> String {
    content.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}
