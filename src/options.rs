//! Walk options: the prefix marker, read and depth limits, the root name
//! and optional path and content transforms.

use std::fmt;
use std::sync::Arc;

use crate::error::WalkError;
use crate::shape::Walkable;
use crate::walker::Walker;
use crate::FileMap;

/// Marks a string as a file reference.
pub const DEFAULT_PREFIX: &str = "filepath:";
/// Most bytes read from one referenced file.
pub const DEFAULT_MAX_BYTES: usize = 1024;
/// How deep nested records, references and containers are followed.
pub const DEFAULT_MAX_DEPTH: usize = 200;
/// Name of the root value in locations.
pub const DEFAULT_ROOT_NAME: &str = "Config";

/// A path or content rewrite applied during substitution.
pub type Transform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Options for one or more walks.
///
/// Empty strings and zero limits mean "use the default", so a partially
/// filled value never disables a limit by accident:
///
/// ```ignore
/// let files = WalkOptions::new()
///     .prefix("secret:")
///     .max_bytes(4096)
///     .transform_path(fileref::transform::expand_home)
///     .walk(&mut config)?;
/// ```
///
/// Options are cheap to clone and can be shared between threads; each walk
/// takes its own resolved copy.
#[derive(Clone)]
pub struct WalkOptions {
    pub(crate) prefix: String,
    pub(crate) max_bytes: usize,
    pub(crate) max_depth: usize,
    pub(crate) root_name: String,
    pub(crate) trim: bool,
    pub(crate) path_transform: Option<Transform>,
    pub(crate) content_transform: Option<Transform>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            max_bytes: DEFAULT_MAX_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
            root_name: DEFAULT_ROOT_NAME.to_string(),
            trim: true,
            path_transform: None,
            content_transform: None,
        }
    }
}

impl fmt::Debug for WalkOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalkOptions")
            .field("prefix", &self.prefix)
            .field("max_bytes", &self.max_bytes)
            .field("max_depth", &self.max_depth)
            .field("root_name", &self.root_name)
            .field("trim", &self.trim)
            .field("path_transform", &self.path_transform.is_some())
            .field("content_transform", &self.content_transform.is_some())
            .finish()
    }
}

impl WalkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the string that marks a file reference (default: `"filepath:"`).
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Cap on bytes read per file (default: 1024). Longer files are
    /// truncated silently.
    pub fn max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Cap on nesting depth (default: 200). Values below the cap are left
    /// alone without an error.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Name of the root in locations and errors (default: `"Config"`).
    pub fn root_name(mut self, name: &str) -> Self {
        self.root_name = name.to_string();
        self
    }

    /// Trim surrounding whitespace from file contents (default: `true`).
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Rewrite each referenced path before it is opened. The file map and
    /// errors keep the path as written.
    pub fn transform_path<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.path_transform = Some(Arc::new(transform));
        self
    }

    /// Rewrite file contents before they replace the reference.
    pub fn transform_content<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.content_transform = Some(Arc::new(transform));
        self
    }

    /// Walk `root`, replacing every file reference with the file contents.
    /// Returns each substituted location mapped to the path as written.
    pub fn walk<T: Walkable>(&self, root: &mut T) -> Result<FileMap, WalkError> {
        Walker::new(self).run(root)
    }

    /// Copy with zero and empty values replaced by defaults.
    pub(crate) fn resolved(&self) -> Self {
        let defaults = Self::default();
        Self {
            prefix: pick(&self.prefix, defaults.prefix),
            max_bytes: if self.max_bytes == 0 {
                defaults.max_bytes
            } else {
                self.max_bytes
            },
            max_depth: if self.max_depth == 0 {
                defaults.max_depth
            } else {
                self.max_depth
            },
            root_name: pick(&self.root_name, defaults.root_name),
            trim: self.trim,
            path_transform: self.path_transform.clone(),
            content_transform: self.content_transform.clone(),
        }
    }
}

fn pick(value: &str, default: String) -> String {
    if value.is_empty() {
        default
    } else {
        value.to_string()
    }
}
