//! The shape model: how a value tells the walker what it is.
//!
//! The walker knows nothing about concrete types. Every visited value hands
//! back a [`Shape`], one of a small closed set of categories, and the walker
//! dispatches on that:
//!
//! - [`Shape::Text`]: a string that may hold a file reference.
//! - [`Shape::Record`]: named fields, visited in declaration order.
//! - [`Shape::Reference`]: an optional value, visited under the same name.
//! - [`Shape::Sequence`]: indexed elements, visited last to first.
//! - [`Shape::Map`]: keyed entries, visited in the map's own order.
//! - [`Shape::ReadOnly`]: something that cannot be changed in place.
//! - [`Shape::Opaque`]: anything else (numbers, flags, bytes).
//!
//! Standard library types, `toml::Value` and `serde_json::Value` implement
//! [`Walkable`] out of the box. For plain structs use the
//! [`walkable!`](crate::walkable) macro:
//!
//! ```ignore
//! struct Database {
//!     url: String,
//!     password: String,
//!     pool_size: usize,
//! }
//!
//! fileref::walkable!(Database { url, password => "Password", pool_size });
//! ```
//!
//! Fields left out of the macro are never visited. A `=> "Label"` suffix
//! changes the name used in locations.

use std::fmt::Display;

use crate::error::LocatedError;

/// A value the walker can visit.
pub trait Walkable {
    /// Expose this value's shape for one visit.
    fn shape(&mut self) -> Shape<'_>;
}

/// What a visited value looks like.
pub enum Shape<'a> {
    Text(&'a mut String),
    Record(&'a mut dyn Record),
    /// `None` is a no-op; `Some` is visited under the parent's location.
    Reference(Option<&'a mut dyn Walkable>),
    Sequence(&'a mut dyn Sequence),
    Map(&'a mut dyn KeyedMap),
    ReadOnly,
    Opaque,
}

impl Shape<'_> {
    /// Whether a value of this shape can contain a file reference.
    ///
    /// Containers probe one element with this before visiting the rest, so
    /// a `Vec<u8>` or a list of numbers is skipped in one step.
    pub fn is_relevant(&self) -> bool {
        !matches!(self, Shape::Opaque)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Text(_) => "text",
            Shape::Record(_) => "record",
            Shape::Reference(_) => "reference",
            Shape::Sequence(_) => "sequence",
            Shape::Map(_) => "map",
            Shape::ReadOnly => "read-only",
            Shape::Opaque => "opaque",
        }
    }
}

/// A value with named fields.
pub trait Record {
    /// Fields to visit, in declaration order, with the names used in
    /// locations.
    fn fields(&mut self) -> Vec<(&'static str, &mut dyn Walkable)>;
}

/// A value with indexed elements.
pub trait Sequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`. Returning `None` for an index below `len()` is
    /// reported as an internal fault.
    fn element(&mut self, index: usize) -> Option<&mut dyn Walkable>;
}

/// Callback handed to [`KeyedMap::visit_entries`].
pub type EntryVisitor<'v> =
    dyn FnMut(&dyn Display, &mut dyn Walkable) -> Result<(), LocatedError> + 'v;

/// A value with keyed entries.
///
/// `visit_entries` owns the write-back step. Maps that hand out `&mut V`
/// pass the stored value straight to `visit`. Maps whose values are not
/// addressable must copy each value out, call `visit` on the copy, and store
/// the copy back under the same key before returning, so that a substitution
/// made during the visit is not lost.
pub trait KeyedMap {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Any one value, used to decide whether the map is worth visiting.
    fn sample(&mut self) -> Option<&mut dyn Walkable>;

    /// Call `visit` once per entry, stopping at the first error.
    fn visit_entries(&mut self, visit: &mut EntryVisitor<'_>) -> Result<(), LocatedError>;
}

/// Implement [`Walkable`] and [`Record`] for plain structs.
///
/// ```ignore
/// fileref::walkable!(
///     Server { host, tls_key => "TlsKey" }
///     Tls { cert, key }
/// );
/// ```
#[macro_export]
macro_rules! walkable {
    (@label $field:ident) => {
        ::std::stringify!($field)
    };
    (@label $field:ident $label:literal) => {
        $label
    };
    ($($ty:ty { $($field:ident $(=> $label:literal)?),* $(,)? })+) => {
        $(
            impl $crate::Record for $ty {
                fn fields(&mut self) -> ::std::vec::Vec<(&'static str, &mut dyn $crate::Walkable)> {
                    ::std::vec![
                        $((
                            $crate::walkable!(@label $field $($label)?),
                            &mut self.$field as &mut dyn $crate::Walkable,
                        )),*
                    ]
                }
            }

            impl $crate::Walkable for $ty {
                fn shape(&mut self) -> $crate::Shape<'_> {
                    $crate::Shape::Record(self)
                }
            }
        )+
    };
}
