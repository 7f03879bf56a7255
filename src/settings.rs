//! Walk settings loadable from config files and the environment.
//!
//! [`WalkSettings`] is a confique config, so it can be loaded on its own or
//! nested inside an application's config:
//!
//! ```ignore
//! #[derive(Config)]
//! struct AppConfig {
//!     #[config(nested)]
//!     secrets: fileref::WalkSettings,
//! }
//!
//! let app = AppConfig::builder().env().file("app.toml").load()?;
//! let options = WalkOptions::from(app.secrets);
//! ```
//!
//! Every field can also be set through a `FILEREF_*` environment variable.

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::options::WalkOptions;

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WalkSettings {
    /// String that marks a value as a file reference.
    #[config(default = "filepath:", env = "FILEREF_PREFIX")]
    pub prefix: String,

    /// Most bytes read from one referenced file.
    #[config(default = 1024, env = "FILEREF_MAX_BYTES")]
    pub max_bytes: usize,

    /// How deep nested values are followed.
    #[config(default = 200, env = "FILEREF_MAX_DEPTH")]
    pub max_depth: usize,

    /// Name of the root value in locations and errors.
    #[config(default = "Config", env = "FILEREF_ROOT_NAME")]
    pub root_name: String,

    /// Trim whitespace around file contents.
    #[config(default = true, env = "FILEREF_TRIM")]
    pub trim: bool,
}

impl From<WalkSettings> for WalkOptions {
    fn from(settings: WalkSettings) -> Self {
        WalkOptions::new()
            .prefix(&settings.prefix)
            .max_bytes(settings.max_bytes)
            .max_depth(settings.max_depth)
            .root_name(&settings.root_name)
            .trim(settings.trim)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::options::{DEFAULT_MAX_BYTES, DEFAULT_MAX_DEPTH, DEFAULT_PREFIX, DEFAULT_ROOT_NAME};

    #[derive(Config, Debug)]
    struct AppConfig {
        #[config(default = "app")]
        name: String,

        #[config(nested)]
        secrets: WalkSettings,
    }

    #[test]
    fn defaults_match_options() {
        let settings = WalkSettings::builder().load().unwrap();
        assert_eq!(settings.prefix, DEFAULT_PREFIX);
        assert_eq!(settings.max_bytes, DEFAULT_MAX_BYTES);
        assert_eq!(settings.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(settings.root_name, DEFAULT_ROOT_NAME);
        assert!(settings.trim);
    }

    #[test]
    fn loads_from_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("walk.toml");
        fs::write(&path, "prefix = \"secret:\"\nmax_bytes = 64\ntrim = false\n").unwrap();

        let settings = WalkSettings::builder().file(&path).load().unwrap();

        assert_eq!(settings.prefix, "secret:");
        assert_eq!(settings.max_bytes, 64);
        assert!(!settings.trim);
        assert_eq!(settings.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn nests_inside_an_app_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.toml");
        fs::write(&path, "[secrets]\nroot_name = \"App\"\n").unwrap();

        let app = AppConfig::builder().file(&path).load().unwrap();

        assert_eq!(app.name, "app");
        assert_eq!(app.secrets.root_name, "App");
        assert_eq!(app.secrets.prefix, DEFAULT_PREFIX);
    }

    #[test]
    fn converts_into_options() {
        let settings = WalkSettings {
            prefix: "super:".into(),
            max_bytes: 8,
            max_depth: 3,
            root_name: "MyThing".into(),
            trim: false,
        };

        let options = WalkOptions::from(settings);

        assert_eq!(options.prefix, "super:");
        assert_eq!(options.max_bytes, 8);
        assert_eq!(options.max_depth, 3);
        assert_eq!(options.root_name, "MyThing");
        assert!(!options.trim);
    }

    #[test]
    fn loaded_settings_drive_a_walk() {
        let dir = TempDir::new().unwrap();
        let secret = dir.path().join("secret");
        fs::write(&secret, "hunter2\n").unwrap();
        let path = dir.path().join("walk.toml");
        fs::write(&path, "prefix = \"secret:\"\nroot_name = \"App\"\n").unwrap();

        let settings = WalkSettings::builder().file(&path).load().unwrap();
        let mut value = format!("secret:{}", secret.display());
        let files = WalkOptions::from(settings).walk(&mut value).unwrap();

        assert_eq!(value, "hunter2");
        assert!(files.contains_key("App"));
    }

    #[test]
    fn template_documents_env_vars() {
        let template =
            confique::toml::template::<WalkSettings>(confique::toml::FormatOptions::default());
        assert!(template.contains("max_bytes"));
        assert!(template.contains("FILEREF_MAX_BYTES"));
        assert!(template.contains("file reference"));
    }
}
