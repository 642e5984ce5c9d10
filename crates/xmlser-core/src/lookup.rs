//! The lookup capability consumed from host objects.
//!
//! Templates never assume a concrete data structure. Everything they read goes
//! through [`Lookup`], whose [`capabilities`](Lookup::capabilities) flags tell
//! the evaluator which access methods are meaningful for a given object. An
//! accessor segment is resolved by trying, in this fixed order:
//!
//! 1. attribute access, if the object exposes attributes;
//! 2. key access, if the object exposes keys;
//! 3. positional indexing, if the segment is numeric and the object is a
//!    sequence.
//!
//! Implementations are provided for [`xmlser_model::Value`],
//! [`serde_json::Value`], strings, numbers, booleans, vectors, slices, string
//! keyed maps and `Option`. Host types implement the trait directly:
//!
//! ```
//! use std::borrow::Cow;
//! use xmlser_core::{Capabilities, Lookup};
//!
//! struct River {
//!     name: String,
//!     length_km: u32,
//! }
//!
//! impl Lookup for River {
//!     fn capabilities(&self) -> Capabilities {
//!         Capabilities::RECORD
//!     }
//!
//!     fn attr(&self, name: &str) -> Option<&dyn Lookup> {
//!         match name {
//!             "name" => Some(&self.name),
//!             "length_km" => Some(&self.length_km),
//!             _ => None,
//!         }
//!     }
//!
//!     fn text(&self) -> Cow<'_, str> {
//!         Cow::Borrowed(&self.name)
//!     }
//! }
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::iter;

use indexmap::IndexMap;
use xmlser_model::Value;

/// Iterator over the elements of a sequence-like object.
pub type Elements<'a> = Box<dyn Iterator<Item = &'a dyn Lookup> + 'a>;

/// Iterator over the key/value pairs of a mapping-like object.
pub type Pairs<'a> = Box<dyn Iterator<Item = (&'a dyn Lookup, &'a dyn Lookup)> + 'a>;

/// Which access methods an object supports.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Attribute-by-name access via [`Lookup::attr`].
    pub attributes: bool,
    /// Key-by-name access via [`Lookup::key`].
    pub keys: bool,
    /// Positional access via [`Lookup::index`] and iteration via
    /// [`Lookup::elements`].
    pub sequence: bool,
    /// Key/value enumeration via [`Lookup::pairs`].
    pub pairs: bool,
}

impl Capabilities {
    /// Scalars: text only.
    pub const NONE: Self = Self {
        attributes: false,
        keys: false,
        sequence: false,
        pairs: false,
    };

    /// Struct-like objects: named attributes, enumerable as pairs.
    pub const RECORD: Self = Self {
        attributes: true,
        keys: false,
        sequence: false,
        pairs: true,
    };

    /// Mappings: key access, enumerable as pairs.
    pub const MAPPING: Self = Self {
        attributes: false,
        keys: true,
        sequence: false,
        pairs: true,
    };

    /// Ordered sequences.
    pub const SEQUENCE: Self = Self {
        attributes: false,
        keys: false,
        sequence: true,
        pairs: false,
    };

    /// Returns `true` if no access method is supported.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

/// Uniform read-only access to host objects.
///
/// Only [`text`](Lookup::text) is mandatory. The evaluator calls the other
/// methods only when the matching [`Capabilities`] flag is set, so the
/// defaults returning nothing are never observed for a correctly declared
/// object.
pub trait Lookup {
    /// Access methods this object supports.
    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    /// Attribute-style access (struct fields, object properties).
    fn attr(&self, _name: &str) -> Option<&dyn Lookup> {
        None
    }

    /// Key-style access (mapping entries).
    fn key(&self, _key: &str) -> Option<&dyn Lookup> {
        None
    }

    /// Positional access into an ordered sequence.
    fn index(&self, _index: usize) -> Option<&dyn Lookup> {
        None
    }

    /// Elements of an ordered sequence, in order.
    fn elements(&self) -> Elements<'_> {
        Box::new(iter::empty())
    }

    /// Key/value pairs in the collection's natural iteration order.
    fn pairs(&self) -> Pairs<'_> {
        Box::new(iter::empty())
    }

    /// The object as a repetition count, if it is a non-negative integer.
    fn count(&self) -> Option<usize> {
        None
    }

    /// Natural text form, used wherever the object lands in a textual
    /// position.
    fn text(&self) -> Cow<'_, str>;
}

// ---------------------------------------------------------------------------
// Pair
// ---------------------------------------------------------------------------

/// A borrowed key/value pair, exposed as a two-element sequence.
///
/// List repetition over a mapping binds each pair as the current object, so
/// `.0` reads the key and `.1` the value.
#[derive(Clone, Copy)]
pub struct Pair<'a> {
    /// The key.
    pub key: &'a dyn Lookup,
    /// The value.
    pub value: &'a dyn Lookup,
}

impl std::fmt::Debug for Pair<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pair")
            .field("key", &self.key.text())
            .field("value", &self.value.text())
            .finish()
    }
}

impl Lookup for Pair<'_> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::SEQUENCE
    }

    fn index(&self, index: usize) -> Option<&dyn Lookup> {
        match index {
            0 => Some(self.key),
            1 => Some(self.value),
            _ => None,
        }
    }

    fn elements(&self) -> Elements<'_> {
        Box::new([self.key, self.value].into_iter())
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{}={}", self.key.text(), self.value.text()))
    }
}

// ---------------------------------------------------------------------------
// Host model adapters
// ---------------------------------------------------------------------------

impl Lookup for Value {
    fn capabilities(&self) -> Capabilities {
        match self {
            Self::Record(_) => Capabilities::RECORD,
            Self::Map(_) => Capabilities::MAPPING,
            Self::List(_) => Capabilities::SEQUENCE,
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => Capabilities::NONE,
        }
    }

    fn attr(&self, name: &str) -> Option<&dyn Lookup> {
        self.as_record()?.get(name).map(|v| v as &dyn Lookup)
    }

    fn key(&self, key: &str) -> Option<&dyn Lookup> {
        self.as_map()?.get(key).map(|v| v as &dyn Lookup)
    }

    fn index(&self, index: usize) -> Option<&dyn Lookup> {
        self.as_list()?.get(index).map(|v| v as &dyn Lookup)
    }

    fn elements(&self) -> Elements<'_> {
        match self {
            Self::List(items) => Box::new(items.iter().map(|v| v as &dyn Lookup)),
            _ => Box::new(iter::empty()),
        }
    }

    fn pairs(&self) -> Pairs<'_> {
        match self {
            Self::Map(entries) | Self::Record(entries) => Box::new(
                entries
                    .iter()
                    .map(|(k, v)| (k as &dyn Lookup, v as &dyn Lookup)),
            ),
            _ => Box::new(iter::empty()),
        }
    }

    fn count(&self) -> Option<usize> {
        self.as_usize()
    }

    fn text(&self) -> Cow<'_, str> {
        match self {
            Self::String(s) | Self::Number(s) => Cow::Borrowed(s),
            Self::Null => Cow::Borrowed(""),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl Lookup for serde_json::Value {
    fn capabilities(&self) -> Capabilities {
        match self {
            Self::Object(_) => Capabilities::MAPPING,
            Self::Array(_) => Capabilities::SEQUENCE,
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => Capabilities::NONE,
        }
    }

    fn key(&self, key: &str) -> Option<&dyn Lookup> {
        self.as_object()?.get(key).map(|v| v as &dyn Lookup)
    }

    fn index(&self, index: usize) -> Option<&dyn Lookup> {
        self.as_array()?.get(index).map(|v| v as &dyn Lookup)
    }

    fn elements(&self) -> Elements<'_> {
        match self {
            Self::Array(items) => Box::new(items.iter().map(|v| v as &dyn Lookup)),
            _ => Box::new(iter::empty()),
        }
    }

    fn pairs(&self) -> Pairs<'_> {
        match self {
            Self::Object(entries) => Box::new(
                entries
                    .iter()
                    .map(|(k, v)| (k as &dyn Lookup, v as &dyn Lookup)),
            ),
            _ => Box::new(iter::empty()),
        }
    }

    fn count(&self) -> Option<usize> {
        self.as_u64().and_then(|n| usize::try_from(n).ok())
    }

    fn text(&self) -> Cow<'_, str> {
        match self {
            Self::String(s) => Cow::Borrowed(s),
            Self::Null => Cow::Borrowed(""),
            Self::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            other => Cow::Owned(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Standard library adapters
// ---------------------------------------------------------------------------

impl<T: Lookup + ?Sized> Lookup for &T {
    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn attr(&self, name: &str) -> Option<&dyn Lookup> {
        (**self).attr(name)
    }

    fn key(&self, key: &str) -> Option<&dyn Lookup> {
        (**self).key(key)
    }

    fn index(&self, index: usize) -> Option<&dyn Lookup> {
        (**self).index(index)
    }

    fn elements(&self) -> Elements<'_> {
        (**self).elements()
    }

    fn pairs(&self) -> Pairs<'_> {
        (**self).pairs()
    }

    fn count(&self) -> Option<usize> {
        (**self).count()
    }

    fn text(&self) -> Cow<'_, str> {
        (**self).text()
    }
}

impl Lookup for str {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Lookup for String {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Lookup for bool {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "true" } else { "false" })
    }
}

macro_rules! impl_lookup_integer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Lookup for $ty {
                fn count(&self) -> Option<usize> {
                    usize::try_from(*self).ok()
                }

                fn text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )+
    };
}

impl_lookup_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Lookup for f32 {
    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl Lookup for f64 {
    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl<T: Lookup> Lookup for Option<T> {
    fn capabilities(&self) -> Capabilities {
        self.as_ref().map_or(Capabilities::NONE, Lookup::capabilities)
    }

    fn attr(&self, name: &str) -> Option<&dyn Lookup> {
        self.as_ref()?.attr(name)
    }

    fn key(&self, key: &str) -> Option<&dyn Lookup> {
        self.as_ref()?.key(key)
    }

    fn index(&self, index: usize) -> Option<&dyn Lookup> {
        self.as_ref()?.index(index)
    }

    fn elements(&self) -> Elements<'_> {
        match self {
            Some(inner) => inner.elements(),
            None => Box::new(iter::empty()),
        }
    }

    fn pairs(&self) -> Pairs<'_> {
        match self {
            Some(inner) => inner.pairs(),
            None => Box::new(iter::empty()),
        }
    }

    fn count(&self) -> Option<usize> {
        self.as_ref()?.count()
    }

    fn text(&self) -> Cow<'_, str> {
        self.as_ref().map_or(Cow::Borrowed(""), Lookup::text)
    }
}

impl<T: Lookup> Lookup for [T] {
    fn capabilities(&self) -> Capabilities {
        Capabilities::SEQUENCE
    }

    fn index(&self, index: usize) -> Option<&dyn Lookup> {
        self.get(index).map(|v| v as &dyn Lookup)
    }

    fn elements(&self) -> Elements<'_> {
        Box::new(self.iter().map(|v| v as &dyn Lookup))
    }

    fn text(&self) -> Cow<'_, str> {
        let parts: Vec<Cow<'_, str>> = self.iter().map(Lookup::text).collect();
        Cow::Owned(parts.join(","))
    }
}

impl<T: Lookup> Lookup for Vec<T> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::SEQUENCE
    }

    fn index(&self, index: usize) -> Option<&dyn Lookup> {
        self.as_slice().index(index)
    }

    fn elements(&self) -> Elements<'_> {
        self.as_slice().elements()
    }

    fn text(&self) -> Cow<'_, str> {
        self.as_slice().text()
    }
}

impl<T: Lookup, const N: usize> Lookup for [T; N] {
    fn capabilities(&self) -> Capabilities {
        Capabilities::SEQUENCE
    }

    fn index(&self, index: usize) -> Option<&dyn Lookup> {
        self.as_slice().index(index)
    }

    fn elements(&self) -> Elements<'_> {
        self.as_slice().elements()
    }

    fn text(&self) -> Cow<'_, str> {
        self.as_slice().text()
    }
}

macro_rules! impl_lookup_map {
    ($map:ident $(, $s:ident: $bound:path)?) => {
        impl<V: Lookup $(, $s: $bound)?> Lookup for $map<String, V $(, $s)?> {
            fn capabilities(&self) -> Capabilities {
                Capabilities::MAPPING
            }

            fn key(&self, key: &str) -> Option<&dyn Lookup> {
                self.get(key).map(|v| v as &dyn Lookup)
            }

            fn pairs(&self) -> Pairs<'_> {
                Box::new(self.iter().map(|(k, v)| (k as &dyn Lookup, v as &dyn Lookup)))
            }

            fn text(&self) -> Cow<'_, str> {
                let parts: Vec<String> =
                    self.iter().map(|(k, v)| format!("{k}={}", v.text())).collect();
                Cow::Owned(parts.join(","))
            }
        }
    };
}

impl_lookup_map!(HashMap, S: BuildHasher);
impl_lookup_map!(IndexMap, S: BuildHasher);
impl_lookup_map!(BTreeMap);
