//! Dynamically typed scalar values
//!
//! `Variant` carries pedigree ids into the id index and the default fill
//! value into typed arrays. It has a total order so it can key a `BTreeMap`:
//! values of different kinds never compare equal, so an integer id `1`
//! does not match a float id `1.0` or a string id `"1"`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar of any array element type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Variant {
    Int(i64),
    Float(f64),
    String(String),
}

impl Variant {
    fn rank(&self) -> u8 {
        match self {
            Variant::Int(_) => 0,
            Variant::Float(_) => 1,
            Variant::String(_) => 2,
        }
    }

    /// Name of the value kind
    pub fn kind_name(&self) -> &'static str {
        match self {
            Variant::Int(_) => "int",
            Variant::Float(_) => "float",
            Variant::String(_) => "string",
        }
    }

    /// Numeric and below zero; strings are never negative
    pub fn is_negative(&self) -> bool {
        match self {
            Variant::Int(v) => *v < 0,
            Variant::Float(v) => *v < 0.0,
            Variant::String(_) => false,
        }
    }

    /// Convert to f64; strings must parse as a number
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Variant::Int(v) => Some(*v as f64),
            Variant::Float(v) => Some(*v),
            Variant::String(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Convert to i64, truncating floats; non-finite floats fail
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Variant::Int(v) => Some(*v),
            Variant::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            Variant::Float(_) => None,
            Variant::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| Variant::Float(s.parse::<f64>().ok()?).to_i64())
            }
        }
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Variant {}

impl PartialOrd for Variant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variant {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Variant::Int(a), Variant::Int(b)) => a.cmp(b),
            (Variant::Float(a), Variant::Float(b)) => a.total_cmp(b),
            (Variant::String(a), Variant::String(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Int(v) => write!(f, "{}", v),
            Variant::Float(v) => write!(f, "{}", v),
            Variant::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Int(0)
    }
}

impl From<i64> for Variant {
    fn from(v: i64) -> Self {
        Variant::Int(v)
    }
}

impl From<i32> for Variant {
    fn from(v: i32) -> Self {
        Variant::Int(v as i64)
    }
}

impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Variant::Float(v)
    }
}

impl From<f32> for Variant {
    fn from(v: f32) -> Self {
        Variant::Float(v as f64)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Variant::String(v.to_string())
    }
}

impl From<String> for Variant {
    fn from(v: String) -> Self {
        Variant::String(v)
    }
}
