//! Dynamic value model for intercepted calls.
//!
//! Arguments and return values cross the interception boundary as `Value`
//! trees. Cloning a value is a deep copy, and equality is deep structural
//! equality, so captured arguments cannot be retroactively changed by the
//! caller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A dynamically-typed argument or return value.
///
/// Floats compare and hash by bit pattern so values can serve as registry
/// keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// The absence-of-value marker.
    Absent,

    /// The nothing value, produced by operations that return nothing.
    Unit,

    /// A truth value.
    Bool(bool),

    /// A 64-bit signed integer.
    Int(i64),

    /// A 64-bit IEEE 754 floating-point number.
    Float(f64),

    /// A single character.
    Char(char),

    /// A UTF-8 text string.
    Text(String),

    /// A binary blob.
    Bytes(Vec<u8>),

    /// An ordered sequence of values.
    List(Vec<Value>),

    /// A named-field record with deterministic field order.
    Record(BTreeMap<String, Value>),
}

/// The kind of a value, used for parameter typing in contract descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValueKind {
    /// Absence of a value
    Absent,
    /// The nothing kind
    Unit,
    /// Truth value
    Bool,
    /// Signed integer
    Int,
    /// Floating-point number
    Float,
    /// Single character
    Char,
    /// Text string
    Text,
    /// Binary blob
    Bytes,
    /// Sequence of values
    List,
    /// Named-field record
    Record,
}

impl ValueKind {
    /// Get a string representation of the kind
    #[must_use]
    pub const fn kind_name(self) -> &'static str {
        match self {
            Self::Absent => "Absent",
            Self::Unit => "Unit",
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Char => "Char",
            Self::Text => "Text",
            Self::Bytes => "Bytes",
            Self::List => "List",
            Self::Record => "Record",
        }
    }

    /// Check if this kind is a reference kind (its values live behind an
    /// absence-of-value marker rather than a primitive default)
    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::Text | Self::Bytes | Self::List | Self::Record)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind_name())
    }
}

impl Value {
    /// Create a text value
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create a list value
    #[must_use]
    pub fn list(items: Vec<Value>) -> Self {
        Self::List(items)
    }

    /// Create a record value from named fields
    #[must_use]
    pub fn record(fields: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self::Record(fields.into_iter().collect())
    }

    /// The kind of this value
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Absent => ValueKind::Absent,
            Self::Unit => ValueKind::Unit,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Char(_) => ValueKind::Char,
            Self::Text(_) => ValueKind::Text,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::List(_) => ValueKind::List,
            Self::Record(_) => ValueKind::Record,
        }
    }

    /// Check if a value of this shape can fill a parameter of the given
    /// kind. The absence marker conforms to any reference kind.
    #[must_use]
    pub fn conforms_to(&self, kind: ValueKind) -> bool {
        if self.is_absent() {
            return kind.is_reference() || kind == ValueKind::Absent;
        }
        self.kind() == kind
    }

    /// Returns true if this is the absence-of-value marker.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns true if this is the nothing value.
    #[must_use]
    pub const fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }

    /// Try to extract a truth value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Try to extract a character.
    #[must_use]
    pub const fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Try to extract a text reference.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to extract a blob reference.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to extract a list reference.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to extract a record reference.
    #[must_use]
    pub fn as_record(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Record(fields) => Some(fields),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) | (Self::Unit, Self::Unit) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            // Bit equality keeps NaN stubs matchable and equality reflexive
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Absent | Self::Unit => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(i) => i.hash(state),
            Self::Float(x) => x.to_bits().hash(state),
            Self::Char(c) => c.hash(state),
            Self::Text(s) => s.hash(state),
            Self::Bytes(b) => b.hash(state),
            Self::List(items) => items.hash(state),
            Self::Record(fields) => fields.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Unit => write!(f, "()"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Char(c) => write!(f, "'{}'", c),
            Self::Text(s) => write!(f, "\"{}\"", s),
            Self::Bytes(b) => {
                write!(f, "0x")?;
                for byte in b {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Self::Record(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
