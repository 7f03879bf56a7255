//! Replace file references inside config values with the files' contents.
//! Decode your config, walk it, and every `"filepath:/run/secrets/db"` has
//! become the secret it points at.
//!
//! Fileref visits nested values (structs, options, lists, maps, untyped
//! TOML and JSON documents) and rewrites every string that starts with a
//! prefix marker. It hands back a map from each rewritten location to the
//! path it came from, so callers can log or audit where secrets were read.
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct Config {
//!     url: String,
//!     password: String,
//!     tokens: Vec<String>,
//! }
//!
//! fileref::walkable!(Config { url, password, tokens });
//!
//! let mut config: Config = toml::from_str(&text)?;
//! let files = fileref::walk(&mut config, None)?;
//! // files: {"Config.password": "/run/secrets/db"}
//! ```
//!
//! # Why fileref
//!
//! Secrets rarely belong in config files. Container platforms mount them as
//! files instead, and applications end up with a second, hand-written pass
//! that knows which fields may hold a path. Fileref makes that pass generic:
//! any string field can hold either a literal value or a reference, and the
//! application does not have to say which fields are allowed.
//!
//! # Shapes
//!
//! The walker knows nothing about concrete types. Every value reports a
//! [`Shape`] (text, record, reference, sequence, map, read-only or opaque)
//! and the walker dispatches on that. Implementations ship for:
//!
//! - `String` (text), `&str` (read-only), numbers, `bool`, `PathBuf` and
//!   friends (opaque).
//! - `Option`, `Box`, `Rc`, `Arc`, `RefCell`, `Mutex` (looked through).
//! - `Vec`, `VecDeque`, arrays (sequences); `HashMap`, `BTreeMap` with
//!   `Display` keys (maps).
//! - `toml::Value`, `toml::Table`, `serde_json::Value`, `serde_json::Map`.
//! - [`Duration`], a config-friendly duration (opaque).
//!
//! Structs opt in through [`walkable!`], which lists the fields to visit
//! and, optionally, the name each one uses in locations. Anything else can
//! implement [`Walkable`] by hand.
//!
//! # Locations
//!
//! Every visited value has a location name built from the root name
//! (`Config` unless changed):
//!
//! | Step | Form | Example |
//! |------|------|---------|
//! | Field | `parent.field` | `Config.database.password` |
//! | Map entry | `parent[key]` | `Config.tokens[github]` |
//! | Sequence element | `parent[n/len]`, 1-based | `Config.keys[2/3]` |
//! | Option, box | same as parent | `Config.password` |
//!
//! The same names appear in the returned [`FileMap`] and in errors.
//!
//! # Walk order and failures
//!
//! Record fields are visited in the order listed, sequences from the last
//! element to the first, maps in their own iteration order. The first
//! failure ends the walk. Substitutions already made stay in place, and the
//! error carries every mapping recorded so far, including the one that
//! failed:
//!
//! ```text
//! element failure: Config.password (/run/secrets/db): opening file: No such file or directory (os error 2)
//! ```
//!
//! # Limits
//!
//! Each file is read up to [`WalkOptions::max_bytes`] bytes (1024 by
//! default); the rest is dropped silently. Nesting is followed up to
//! [`WalkOptions::max_depth`] levels (200 by default); deeper values are left
//! alone without an error. Contents are trimmed of surrounding whitespace
//! unless [`trim(false)`](WalkOptions::trim) is set.
//!
//! # Transforms
//!
//! [`transform_path`](WalkOptions::transform_path) rewrites a reference
//! before it is opened (expand `~`, resolve against a base directory), and
//! [`transform_content`](WalkOptions::transform_content) rewrites the
//! contents before they are stored. The [`transform`] module has the common
//! ones. The file map and errors always show the path as written.
//!
//! # Settings
//!
//! [`WalkSettings`] carries the same options as a confique config, loadable
//! from TOML and `FILEREF_*` environment variables and nestable inside an
//! application's own config. Convert it with `WalkOptions::from`.
//!
//! # Logging
//!
//! Walks emit `tracing` events: start, finish and each substitution at
//! `debug`, skipped values at `trace`, recovered panics at `warn`. Install
//! a subscriber to see them.
//!
//! # Error handling
//!
//! Walks return [`WalkError`]. Enable the `rich-errors` feature for
//! `miette::Diagnostic` implementations. See the [`error`] module.

use std::collections::BTreeMap;

pub mod error;
pub mod transform;

mod duration;
mod dynamic;
mod file;
mod impls;
mod location;
mod options;
mod settings;
mod shape;
mod walker;

#[cfg(test)]
mod fixtures;

pub use duration::{Duration, ParseDurationError};
pub use error::{Cause, LocatedError, WalkError};
pub use file::read_bounded;
pub use options::{
    DEFAULT_MAX_BYTES, DEFAULT_MAX_DEPTH, DEFAULT_PREFIX, DEFAULT_ROOT_NAME, Transform,
    WalkOptions,
};
pub use settings::WalkSettings;
pub use shape::{EntryVisitor, KeyedMap, Record, Sequence, Shape, Walkable};

/// Location name to file path as written, for every substitution made.
pub type FileMap = BTreeMap<String, String>;

/// Walk `root` and replace every file reference with the file contents.
///
/// `None` uses [`WalkOptions::default`]. Returns the locations that were
/// substituted, each mapped to the referenced path.
pub fn walk<T: Walkable>(
    root: &mut T,
    options: Option<&WalkOptions>,
) -> Result<FileMap, WalkError> {
    match options {
        Some(options) => options.walk(root),
        None => WalkOptions::default().walk(root),
    }
}
