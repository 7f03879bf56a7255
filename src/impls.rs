//! [`Walkable`] for standard library types.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::ffi::OsString;
use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::LocatedError;
use crate::shape::{EntryVisitor, KeyedMap, Sequence, Shape, Walkable};

impl Walkable for String {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Text(self)
    }
}

// Borrowed strings cannot be replaced in place.
impl Walkable for str {
    fn shape(&mut self) -> Shape<'_> {
        Shape::ReadOnly
    }
}

impl Walkable for &str {
    fn shape(&mut self) -> Shape<'_> {
        Shape::ReadOnly
    }
}

macro_rules! opaque {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Walkable for $ty {
                fn shape(&mut self) -> Shape<'_> {
                    Shape::Opaque
                }
            }
        )*
    };
}

opaque!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    PathBuf,
    OsString,
    IpAddr,
    SocketAddr,
    std::time::Duration,
);

impl<T: Walkable> Walkable for Option<T> {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Reference(self.as_mut().map(|value| value as &mut dyn Walkable))
    }
}

impl<T: Walkable + ?Sized> Walkable for Box<T> {
    fn shape(&mut self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Walkable + ?Sized> Walkable for &mut T {
    fn shape(&mut self) -> Shape<'_> {
        (**self).shape()
    }
}

/// Only a uniquely owned `Rc` can be changed; a shared one is read-only.
impl<T: Walkable + ?Sized> Walkable for Rc<T> {
    fn shape(&mut self) -> Shape<'_> {
        match Rc::get_mut(self) {
            Some(inner) => inner.shape(),
            None => Shape::ReadOnly,
        }
    }
}

impl<T: Walkable + ?Sized> Walkable for Arc<T> {
    fn shape(&mut self) -> Shape<'_> {
        match Arc::get_mut(self) {
            Some(inner) => inner.shape(),
            None => Shape::ReadOnly,
        }
    }
}

impl<T: Walkable + ?Sized> Walkable for RefCell<T> {
    fn shape(&mut self) -> Shape<'_> {
        self.get_mut().shape()
    }
}

impl<T: Walkable + ?Sized> Walkable for Mutex<T> {
    fn shape(&mut self) -> Shape<'_> {
        self.get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .shape()
    }
}

impl<T: Walkable> Walkable for Vec<T> {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Sequence(self)
    }
}

impl<T: Walkable> Sequence for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn element(&mut self, index: usize) -> Option<&mut dyn Walkable> {
        self.get_mut(index).map(|value| value as &mut dyn Walkable)
    }
}

impl<T: Walkable> Walkable for VecDeque<T> {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Sequence(self)
    }
}

impl<T: Walkable> Sequence for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn element(&mut self, index: usize) -> Option<&mut dyn Walkable> {
        self.get_mut(index).map(|value| value as &mut dyn Walkable)
    }
}

impl<T: Walkable, const N: usize> Walkable for [T; N] {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Sequence(self)
    }
}

impl<T: Walkable, const N: usize> Sequence for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn element(&mut self, index: usize) -> Option<&mut dyn Walkable> {
        self.get_mut(index).map(|value| value as &mut dyn Walkable)
    }
}

impl<K: Display, V: Walkable, S> Walkable for HashMap<K, V, S> {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Map(self)
    }
}

impl<K: Display, V: Walkable, S> KeyedMap for HashMap<K, V, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn sample(&mut self) -> Option<&mut dyn Walkable> {
        self.values_mut().next().map(|value| value as &mut dyn Walkable)
    }

    fn visit_entries(&mut self, visit: &mut EntryVisitor<'_>) -> Result<(), LocatedError> {
        for (key, value) in self.iter_mut() {
            visit(key as &dyn Display, value as &mut dyn Walkable)?;
        }
        Ok(())
    }
}

impl<K: Display, V: Walkable> Walkable for BTreeMap<K, V> {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Map(self)
    }
}

impl<K: Display, V: Walkable> KeyedMap for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn sample(&mut self) -> Option<&mut dyn Walkable> {
        self.values_mut().next().map(|value| value as &mut dyn Walkable)
    }

    fn visit_entries(&mut self, visit: &mut EntryVisitor<'_>) -> Result<(), LocatedError> {
        for (key, value) in self.iter_mut() {
            visit(key as &dyn Display, value as &mut dyn Walkable)?;
        }
        Ok(())
    }
}
