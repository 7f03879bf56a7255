//! Untyped documents: `toml::Value` and `serde_json::Value`.
//!
//! Decoding a config file into one of these and walking it works the same as
//! walking a typed struct. Strings are text, arrays are sequences, tables and
//! objects are maps keyed by their string keys. Entries are visited in place,
//! so document order is kept.
//!
//! Any other value is a reference to an opaque scalar rather than opaque
//! itself. A document mixes types freely, so a number that happens to come
//! first must not make the probe skip the rest of its table or array.

use std::fmt::Display;

use crate::error::LocatedError;
use crate::shape::{EntryVisitor, KeyedMap, Shape, Walkable};

impl Walkable for toml::Value {
    fn shape(&mut self) -> Shape<'_> {
        match self {
            toml::Value::String(text) => Shape::Text(text),
            toml::Value::Array(items) => Shape::Sequence(items),
            toml::Value::Table(table) => Shape::Map(table),
            toml::Value::Integer(value) => Shape::Reference(Some(value)),
            toml::Value::Float(value) => Shape::Reference(Some(value)),
            toml::Value::Boolean(value) => Shape::Reference(Some(value)),
            toml::Value::Datetime(value) => Shape::Reference(Some(value)),
        }
    }
}

impl Walkable for toml::value::Datetime {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Opaque
    }
}

impl Walkable for toml::Table {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Map(self)
    }
}

impl KeyedMap for toml::Table {
    fn len(&self) -> usize {
        toml::Table::len(self)
    }

    fn sample(&mut self) -> Option<&mut dyn Walkable> {
        self.iter_mut()
            .next()
            .map(|(_, value)| value as &mut dyn Walkable)
    }

    fn visit_entries(&mut self, visit: &mut EntryVisitor<'_>) -> Result<(), LocatedError> {
        for (key, value) in self.iter_mut() {
            visit(key as &dyn Display, value as &mut dyn Walkable)?;
        }
        Ok(())
    }
}

impl Walkable for serde_json::Value {
    fn shape(&mut self) -> Shape<'_> {
        match self {
            serde_json::Value::String(text) => Shape::Text(text),
            serde_json::Value::Array(items) => Shape::Sequence(items),
            serde_json::Value::Object(object) => Shape::Map(object),
            serde_json::Value::Number(value) => Shape::Reference(Some(value)),
            serde_json::Value::Bool(value) => Shape::Reference(Some(value)),
            serde_json::Value::Null => Shape::Reference(None),
        }
    }
}

impl Walkable for serde_json::Number {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Opaque
    }
}

impl Walkable for serde_json::Map<String, serde_json::Value> {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Map(self)
    }
}

impl KeyedMap for serde_json::Map<String, serde_json::Value> {
    fn len(&self) -> usize {
        serde_json::Map::len(self)
    }

    fn sample(&mut self) -> Option<&mut dyn Walkable> {
        self.iter_mut()
            .next()
            .map(|(_, value)| value as &mut dyn Walkable)
    }

    fn visit_entries(&mut self, visit: &mut EntryVisitor<'_>) -> Result<(), LocatedError> {
        for (key, value) in self.iter_mut() {
            visit(key as &dyn Display, value as &mut dyn Walkable)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::error::Cause;
    use crate::{WalkOptions, walk};

    fn secret_file(dir: &TempDir) -> String {
        let path = dir.path().join("secret");
        fs::write(&path, "hunter2\n").unwrap();
        path.display().to_string()
    }

    #[test]
    fn toml_document_is_walked() {
        let dir = TempDir::new().unwrap();
        let secret = secret_file(&dir);
        let mut doc: toml::Value = toml::from_str(&format!(
            r#"
            host = "localhost"
            port = 8080

            [database]
            url = "postgres://db"
            password = "filepath:{secret}"
            "#
        ))
        .unwrap();

        let files = walk(&mut doc, None).unwrap();

        assert_eq!(doc["database"]["password"].as_str().unwrap(), "hunter2");
        assert_eq!(doc["host"].as_str().unwrap(), "localhost");
        assert_eq!(files.len(), 1);
        assert_eq!(files["Config[database][password]"], secret);
    }

    #[test]
    fn json_document_is_walked() {
        let dir = TempDir::new().unwrap();
        let secret = secret_file(&dir);
        let mut doc = serde_json::json!({
            "tokens": ["plain", format!("filepath:{secret}")],
            "nested": { "key": format!("filepath:{secret}") },
            "count": 3,
        });

        let files = WalkOptions::new().root_name("App").walk(&mut doc).unwrap();

        assert_eq!(doc["tokens"][1], "hunter2");
        assert_eq!(doc["tokens"][0], "plain");
        assert_eq!(doc["nested"]["key"], "hunter2");
        assert_eq!(files.len(), 2);
        assert_eq!(files["App[tokens][2/2]"], secret);
        assert_eq!(files["App[nested][key]"], secret);
    }

    #[test]
    fn array_starting_with_a_number_is_visited() {
        let mut doc = serde_json::json!({ "mixed": [1, "filepath:/does/not/exist"] });
        let err = walk(&mut doc, None).unwrap_err();
        let located = err.located().unwrap();
        assert_eq!(located.location, "Config[mixed][2/2]");
        assert!(matches!(located.cause, Cause::OpenFailed(_)));
    }

    #[test]
    fn json_object_with_a_number_first_is_walked() {
        let dir = TempDir::new().unwrap();
        let secret = secret_file(&dir);
        let mut doc = serde_json::json!({
            "count": 3,
            "enabled": true,
            "missing": null,
            "token": format!("filepath:{secret}"),
        });

        let files = walk(&mut doc, None).unwrap();

        assert_eq!(doc["token"], "hunter2");
        assert_eq!(doc["count"], 3);
        assert_eq!(doc["enabled"], true);
        assert!(doc["missing"].is_null());
        assert_eq!(files.len(), 1);
        assert_eq!(files["Config[token]"], secret);
    }

    #[test]
    fn json_mixed_array_is_walked() {
        let dir = TempDir::new().unwrap();
        let secret = secret_file(&dir);
        let mut doc = serde_json::json!([false, 2.5, null, format!("filepath:{secret}")]);

        let files = walk(&mut doc, None).unwrap();

        assert_eq!(doc[3], "hunter2");
        assert_eq!(doc[0], false);
        assert_eq!(files["Config[4/4]"], secret);
    }

    #[test]
    fn toml_table_with_scalars_first_is_walked() {
        let dir = TempDir::new().unwrap();
        let secret = secret_file(&dir);
        let mut table: toml::Table = toml::from_str(&format!(
            r#"
            a_port = 8080
            b_debug = false
            c_ratio = 0.5
            d_started = 1979-05-27T07:32:00Z
            password = "filepath:{secret}"
            "#
        ))
        .unwrap();

        let files = walk(&mut table, None).unwrap();

        assert_eq!(table["password"].as_str().unwrap(), "hunter2");
        assert_eq!(table["a_port"].as_integer(), Some(8080));
        assert_eq!(files.len(), 1);
        assert_eq!(files["Config[password]"], secret);
    }

    #[test]
    fn toml_mixed_array_is_walked() {
        let dir = TempDir::new().unwrap();
        let secret = secret_file(&dir);
        let mut doc: toml::Value =
            toml::from_str(&format!("keys = [1, true, \"filepath:{secret}\"]")).unwrap();

        let files = walk(&mut doc, None).unwrap();

        assert_eq!(doc["keys"][2].as_str().unwrap(), "hunter2");
        assert_eq!(doc["keys"][0].as_integer(), Some(1));
        assert_eq!(files["Config[keys][3/3]"], secret);
    }

    #[test]
    fn scalar_root_is_a_no_op() {
        let mut number = serde_json::json!(42);
        assert!(walk(&mut number, None).unwrap().is_empty());
        let mut flag = toml::Value::Boolean(true);
        assert!(walk(&mut flag, None).unwrap().is_empty());
    }

    #[test]
    fn array_starting_with_a_string_is_visited() {
        let mut doc = serde_json::json!({ "mixed": ["x", 1, "filepath:/does/not/exist"] });
        let err = walk(&mut doc, None).unwrap_err();
        let located = err.located().unwrap();
        assert_eq!(located.location, "Config[mixed][3/3]");
        assert!(matches!(located.cause, Cause::OpenFailed(_)));
    }

    #[test]
    fn toml_table_root() {
        let dir = TempDir::new().unwrap();
        let secret = secret_file(&dir);
        let mut table: toml::Table =
            toml::from_str(&format!("key = \"filepath:{secret}\"")).unwrap();
        let files = walk(&mut table, None).unwrap();
        assert_eq!(table["key"].as_str().unwrap(), "hunter2");
        assert_eq!(files["Config[key]"], secret);
    }
}
