//! The traversal engine and the substitution step.
//!
//! A [`Walker`] is one walk session. It owns resolved options, the file map
//! being built, the current depth, and the last location visited. It visits
//! values depth-first:
//!
//! 1. Stop quietly once `max_depth` levels are open.
//! 2. Ask the value for its [`Shape`] and dispatch:
//!    text is substituted, records recurse per field, references recurse
//!    under the same name, sequences recurse from the last element to the
//!    first, maps recurse per entry, everything else is left alone.
//! 3. Containers whose probed element is opaque are skipped whole.
//!
//! The first failure ends the walk. Nothing recorded so far is removed.

use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::FileMap;
use crate::error::{LocatedError, WalkError};
use crate::file::read_bounded;
use crate::location;
use crate::options::WalkOptions;
use crate::shape::{KeyedMap, Record, Sequence, Shape, Walkable};

pub(crate) struct Walker {
    options: WalkOptions,
    files: FileMap,
    depth: usize,
    /// Last location visited; reported if user code panics mid-walk.
    current: String,
}

impl Walker {
    pub(crate) fn new(options: &WalkOptions) -> Self {
        let options = options.resolved();
        let current = options.root_name.clone();
        Self {
            options,
            files: FileMap::new(),
            depth: 0,
            current,
        }
    }

    /// Walk `root` and hand back the file map, or the first failure together
    /// with the partial map.
    pub(crate) fn run(mut self, root: &mut dyn Walkable) -> Result<FileMap, WalkError> {
        if matches!(root.shape(), Shape::ReadOnly) {
            return Err(WalkError::NotAReference);
        }

        let root_name = self.options.root_name.clone();
        tracing::debug!(
            root = %root_name,
            prefix = %self.options.prefix,
            max_depth = self.options.max_depth,
            "walking value for file references"
        );

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.visit(root, &root_name)));
        let result = match outcome {
            Ok(result) => result,
            Err(payload) => {
                let reason = panic_message(&*payload);
                tracing::warn!(location = %self.current, %reason, "panic while walking value");
                self.depth = 0;
                Err(LocatedError::internal(&self.current, format!("panic: {reason}")))
            }
        };

        match result {
            Ok(()) => {
                tracing::debug!(substituted = self.files.len(), "walk finished");
                Ok(self.files)
            }
            Err(source) => Err(WalkError::Element {
                source,
                files: self.files,
            }),
        }
    }

    fn visit(&mut self, value: &mut dyn Walkable, name: &str) -> Result<(), LocatedError> {
        if self.depth >= self.options.max_depth {
            tracing::trace!(
                location = name,
                max_depth = self.options.max_depth,
                "depth limit reached, not descending"
            );
            return Ok(());
        }

        self.depth += 1;
        let result = self.dispatch(value, name);
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, value: &mut dyn Walkable, name: &str) -> Result<(), LocatedError> {
        match value.shape() {
            Shape::Text(text) => self.substitute(text, name),
            Shape::Record(record) => self.visit_record(record, name),
            Shape::Reference(Some(inner)) => self.visit(inner, name),
            Shape::Reference(None) => Ok(()),
            Shape::Sequence(sequence) => self.visit_sequence(sequence, name),
            Shape::Map(map) => self.visit_map(map, name),
            Shape::ReadOnly => {
                tracing::trace!(location = name, "read-only value skipped");
                Ok(())
            }
            Shape::Opaque => Ok(()),
        }
    }

    fn visit_record(&mut self, record: &mut dyn Record, name: &str) -> Result<(), LocatedError> {
        for (field, value) in record.fields() {
            let location = location::field(name, field);
            self.current.clone_from(&location);
            self.visit(value, &location)?;
        }
        Ok(())
    }

    fn visit_sequence(
        &mut self,
        sequence: &mut dyn Sequence,
        name: &str,
    ) -> Result<(), LocatedError> {
        let len = sequence.len();
        if len == 0 || !sequence.element(0).is_some_and(|first| first.shape().is_relevant()) {
            return Ok(());
        }

        for index in (0..len).rev() {
            let location = location::element(name, index, len);
            self.current.clone_from(&location);
            let Some(element) = sequence.element(index) else {
                return Err(LocatedError::internal(
                    &location,
                    format!("sequence reported {len} elements but has no element {index}"),
                ));
            };
            self.visit(element, &location)?;
        }
        Ok(())
    }

    fn visit_map(&mut self, map: &mut dyn KeyedMap, name: &str) -> Result<(), LocatedError> {
        if map.is_empty() || !map.sample().is_some_and(|value| value.shape().is_relevant()) {
            return Ok(());
        }

        map.visit_entries(
            &mut |key: &dyn Display, value: &mut dyn Walkable| -> Result<(), LocatedError> {
                let location = location::entry(name, key);
                self.current.clone_from(&location);
                self.visit(value, &location)
            },
        )
    }

    /// Replace `text` with the referenced file's contents if it carries the
    /// prefix. The mapping is recorded before the read so a failed location
    /// still shows up in the file map.
    fn substitute(&mut self, text: &mut String, name: &str) -> Result<(), LocatedError> {
        let Some(reference) = text.strip_prefix(self.options.prefix.as_str()) else {
            return Ok(());
        };

        let file = reference.trim().to_string();
        self.files.insert(name.to_string(), file.clone());

        let target = match &self.options.path_transform {
            Some(transform) => transform(file.as_str()),
            None => file.clone(),
        };
        tracing::debug!(
            location = name,
            file = %file,
            path = %target,
            "substituting file reference"
        );

        let content = read_bounded(Path::new(&target), self.options.max_bytes, self.options.trim)
            .map_err(|cause| LocatedError::new(name, &file, cause))?;

        *text = match &self.options.content_transform {
            Some(transform) => transform(content.as_str()),
            None => content,
        };
        Ok(())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
