use alloc::boxed::Box;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::hash::value_hasher;
use crate::inspect::Inspect;

// -----------------------------------------------------------------------------
// ScalarKind

/// The closed set of scalar value kinds the engine understands.
///
/// Scalars are copied by value and never routed through field population.
/// [`Void`](ScalarKind::Void) is the unit scalar; it carries no payload but
/// participates in constructor parameter matching like any other kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Void,
    Bool,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

const SCALAR_KINDS: [ScalarKind; 9] = [
    ScalarKind::Void,
    ScalarKind::Bool,
    ScalarKind::Byte,
    ScalarKind::Char,
    ScalarKind::Short,
    ScalarKind::Int,
    ScalarKind::Long,
    ScalarKind::Float,
    ScalarKind::Double,
];

/// Returns every scalar kind, in declaration order.
pub const fn scalar_kinds() -> &'static [ScalarKind] {
    &SCALAR_KINDS
}

impl ScalarKind {
    /// Returns the zero value of this kind, used to seed synthesized
    /// constructor arguments.
    #[inline]
    pub const fn zero(self) -> ScalarValue {
        match self {
            Self::Void => ScalarValue::Void(()),
            Self::Bool => ScalarValue::Bool(false),
            Self::Byte => ScalarValue::Byte(0),
            Self::Char => ScalarValue::Char('\0'),
            Self::Short => ScalarValue::Short(0),
            Self::Int => ScalarValue::Int(0),
            Self::Long => ScalarValue::Long(0),
            Self::Float => ScalarValue::Float(0.0),
            Self::Double => ScalarValue::Double(0.0),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        };
        f.write_str(name)
    }
}

// -----------------------------------------------------------------------------
// ScalarValue

/// A scalar value detached from its owner.
///
/// The copier moves scalars around as `ScalarValue` rather than boxed trait
/// objects, and converts back with [`into_inspect`](ScalarValue::into_inspect)
/// only at the graph boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalarValue {
    Void(()),
    Bool(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl ScalarValue {
    /// Returns the kind of this value.
    #[inline]
    pub const fn kind(self) -> ScalarKind {
        match self {
            Self::Void(_) => ScalarKind::Void,
            Self::Bool(_) => ScalarKind::Bool,
            Self::Byte(_) => ScalarKind::Byte,
            Self::Char(_) => ScalarKind::Char,
            Self::Short(_) => ScalarKind::Short,
            Self::Int(_) => ScalarKind::Int,
            Self::Long(_) => ScalarKind::Long,
            Self::Float(_) => ScalarKind::Float,
            Self::Double(_) => ScalarKind::Double,
        }
    }

    /// Boxes this value back into the graph representation.
    pub fn into_inspect(self) -> Box<dyn Inspect> {
        match self {
            Self::Void(value) => Box::new(value),
            Self::Bool(value) => Box::new(value),
            Self::Byte(value) => Box::new(value),
            Self::Char(value) => Box::new(value),
            Self::Short(value) => Box::new(value),
            Self::Int(value) => Box::new(value),
            Self::Long(value) => Box::new(value),
            Self::Float(value) => Box::new(value),
            Self::Double(value) => Box::new(value),
        }
    }

    /// Returns the payload if this is a [`Bool`](ScalarValue::Bool).
    #[inline]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the payload if this is a [`Byte`](ScalarValue::Byte).
    #[inline]
    pub const fn as_byte(self) -> Option<i8> {
        match self {
            Self::Byte(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the payload if this is a [`Char`](ScalarValue::Char).
    #[inline]
    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::Char(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the payload if this is a [`Short`](ScalarValue::Short).
    #[inline]
    pub const fn as_short(self) -> Option<i16> {
        match self {
            Self::Short(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the payload if this is an [`Int`](ScalarValue::Int).
    #[inline]
    pub const fn as_int(self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the payload if this is a [`Long`](ScalarValue::Long).
    #[inline]
    pub const fn as_long(self) -> Option<i64> {
        match self {
            Self::Long(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the payload if this is a [`Float`](ScalarValue::Float).
    #[inline]
    pub const fn as_float(self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the payload if this is a [`Double`](ScalarValue::Double).
    #[inline]
    pub const fn as_double(self) -> Option<f64> {
        match self {
            Self::Double(value) => Some(value),
            _ => None,
        }
    }

    /// Hashes the value with the fixed-seed hasher.
    ///
    /// Floats hash by bit pattern, so `0.0` and `-0.0` hash differently.
    pub fn stable_hash(self) -> u64 {
        let mut hasher = value_hasher();
        core::mem::discriminant(&self).hash(&mut hasher);
        match self {
            Self::Void(()) => {}
            Self::Bool(value) => value.hash(&mut hasher),
            Self::Byte(value) => value.hash(&mut hasher),
            Self::Char(value) => value.hash(&mut hasher),
            Self::Short(value) => value.hash(&mut hasher),
            Self::Int(value) => value.hash(&mut hasher),
            Self::Long(value) => value.hash(&mut hasher),
            Self::Float(value) => value.to_bits().hash(&mut hasher),
            Self::Double(value) => value.to_bits().hash(&mut hasher),
        }
        hasher.finish()
    }

    /// Writes the bare payload, as `Debug` output would.
    pub fn fmt_value(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void(()) => f.write_str("()"),
            Self::Bool(value) => fmt::Debug::fmt(&value, f),
            Self::Byte(value) => fmt::Debug::fmt(&value, f),
            Self::Char(value) => fmt::Debug::fmt(&value, f),
            Self::Short(value) => fmt::Debug::fmt(&value, f),
            Self::Int(value) => fmt::Debug::fmt(&value, f),
            Self::Long(value) => fmt::Debug::fmt(&value, f),
            Self::Float(value) => fmt::Debug::fmt(&value, f),
            Self::Double(value) => fmt::Debug::fmt(&value, f),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
