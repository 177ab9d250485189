//! Typed, multi-component attribute arrays
//!
//! An array stores `num_tuples * num_components` values in one flat vector.
//! Tuple `i` occupies values `i * components .. (i + 1) * components`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TransferError, TransferResult};
use crate::variant::Variant;

/// Array element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum ArrayType {
    Float32,
    Float64,
    Int32,
    Int64,
    String,
}

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArrayType::Float32 => "float32",
            ArrayType::Float64 => "float64",
            ArrayType::Int32 => "int32",
            ArrayType::Int64 => "int64",
            ArrayType::String => "string",
        };
        f.write_str(name)
    }
}

/// Flat typed storage
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    String(Vec<String>),
}

impl ArrayData {
    /// Zero-initialized (or empty-string) storage of `len` values
    pub fn zeroed(dtype: ArrayType, len: usize) -> Self {
        match dtype {
            ArrayType::Float32 => ArrayData::Float32(vec![0.0; len]),
            ArrayType::Float64 => ArrayData::Float64(vec![0.0; len]),
            ArrayType::Int32 => ArrayData::Int32(vec![0; len]),
            ArrayType::Int64 => ArrayData::Int64(vec![0; len]),
            ArrayType::String => ArrayData::String(vec![String::new(); len]),
        }
    }

    pub fn dtype(&self) -> ArrayType {
        match self {
            ArrayData::Float32(_) => ArrayType::Float32,
            ArrayData::Float64(_) => ArrayType::Float64,
            ArrayData::Int32(_) => ArrayType::Int32,
            ArrayData::Int64(_) => ArrayType::Int64,
            ArrayData::String(_) => ArrayType::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayData::Float32(v) => v.len(),
            ArrayData::Float64(v) => v.len(),
            ArrayData::Int32(v) => v.len(),
            ArrayData::Int64(v) => v.len(),
            ArrayData::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<Variant> {
        match self {
            ArrayData::Float32(v) => v.get(index).map(|&x| Variant::from(x)),
            ArrayData::Float64(v) => v.get(index).map(|&x| Variant::from(x)),
            ArrayData::Int32(v) => v.get(index).map(|&x| Variant::from(x)),
            ArrayData::Int64(v) => v.get(index).map(|&x| Variant::from(x)),
            ArrayData::String(v) => v.get(index).map(|x| Variant::from(x.as_str())),
        }
    }

    fn is_negative_at(&self, index: usize) -> bool {
        match self {
            ArrayData::Float32(v) => v.get(index).is_some_and(|&x| x < 0.0),
            ArrayData::Float64(v) => v.get(index).is_some_and(|&x| x < 0.0),
            ArrayData::Int32(v) => v.get(index).is_some_and(|&x| x < 0),
            ArrayData::Int64(v) => v.get(index).is_some_and(|&x| x < 0),
            ArrayData::String(_) => false,
        }
    }
}

/// A scalar already converted to an array's element type
enum Converted {
    Float32(f32),
    Float64(f64),
    Int32(i32),
    Int64(i64),
    String(String),
}

impl Converted {
    fn from_variant(value: &Variant, dtype: ArrayType) -> TransferResult<Self> {
        let fail = || TransferError::ValueConversion {
            value: format!("{} {}", value.kind_name(), value),
            dtype,
        };
        Ok(match dtype {
            ArrayType::Float32 => Converted::Float32(value.to_f64().ok_or_else(fail)? as f32),
            ArrayType::Float64 => Converted::Float64(value.to_f64().ok_or_else(fail)?),
            ArrayType::Int32 => {
                let wide = value.to_i64().ok_or_else(fail)?;
                Converted::Int32(i32::try_from(wide).map_err(|_| fail())?)
            }
            ArrayType::Int64 => Converted::Int64(value.to_i64().ok_or_else(fail)?),
            ArrayType::String => Converted::String(match value {
                Variant::String(s) => s.clone(),
                other => other.to_string(),
            }),
        })
    }

    fn store(&self, data: &mut ArrayData, range: std::ops::Range<usize>) {
        match (data, self) {
            (ArrayData::Float32(v), Converted::Float32(x)) => v[range].fill(*x),
            (ArrayData::Float64(v), Converted::Float64(x)) => v[range].fill(*x),
            (ArrayData::Int32(v), Converted::Int32(x)) => v[range].fill(*x),
            (ArrayData::Int64(v), Converted::Int64(x)) => v[range].fill(*x),
            (ArrayData::String(v), Converted::String(x)) => v[range].fill(x.clone()),
            // from_variant always converts to the array's own type
            _ => {}
        }
    }
}

/// A named attribute array
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeArray {
    name: String,
    components: usize,
    data: ArrayData,
}

impl AttributeArray {
    /// Single-component array
    pub fn new(name: impl Into<String>, data: ArrayData) -> Self {
        Self {
            name: name.into(),
            components: 1,
            data,
        }
    }

    /// Multi-component array; `data.len()` must be a multiple of `components`
    pub fn with_components(
        name: impl Into<String>,
        components: usize,
        data: ArrayData,
    ) -> TransferResult<Self> {
        if components == 0 || data.len() % components != 0 {
            return Err(TransferError::InvalidComponents {
                len: data.len(),
                components,
            });
        }
        Ok(Self {
            name: name.into(),
            components,
            data,
        })
    }

    /// Allocate `tuples` zeroed tuples
    pub fn allocate(
        name: impl Into<String>,
        dtype: ArrayType,
        components: usize,
        tuples: usize,
    ) -> Self {
        let components = components.max(1);
        Self {
            name: name.into(),
            components,
            data: ArrayData::zeroed(dtype, components * tuples),
        }
    }

    pub fn from_f64(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, ArrayData::Float64(values))
    }

    pub fn from_i32(name: impl Into<String>, values: Vec<i32>) -> Self {
        Self::new(name, ArrayData::Int32(values))
    }

    pub fn from_i64(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(name, ArrayData::Int64(values))
    }

    pub fn from_strings<S: Into<String>>(name: impl Into<String>, values: Vec<S>) -> Self {
        Self::new(
            name,
            ArrayData::String(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> ArrayType {
        self.data.dtype()
    }

    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    pub fn num_components(&self) -> usize {
        self.components
    }

    pub fn num_tuples(&self) -> usize {
        self.data.len() / self.components
    }

    pub fn num_values(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at a flat index
    pub fn value(&self, index: usize) -> Option<Variant> {
        self.data.get(index)
    }

    /// First component of a tuple
    pub fn tuple_value(&self, tuple: usize) -> Option<Variant> {
        self.data.get(tuple * self.components)
    }

    /// All components of a tuple
    pub fn tuple(&self, tuple: usize) -> Option<Vec<Variant>> {
        if tuple >= self.num_tuples() {
            return None;
        }
        let start = tuple * self.components;
        (start..start + self.components)
            .map(|i| self.data.get(i))
            .collect()
    }

    /// Whether any component of a tuple is negative
    pub fn tuple_has_negative(&self, tuple: usize) -> bool {
        let start = tuple * self.components;
        (start..start + self.components).any(|i| self.data.is_negative_at(i))
    }

    /// Store a value at a flat index, converting it to the element type
    pub fn set_value(&mut self, index: usize, value: &Variant) -> TransferResult<()> {
        let size = self.data.len();
        if index >= size {
            return Err(TransferError::OutOfBounds { index, size });
        }
        Converted::from_variant(value, self.dtype())?.store(&mut self.data, index..index + 1);
        Ok(())
    }

    /// Set every value of every tuple to `value`
    pub fn fill(&mut self, value: &Variant) -> TransferResult<()> {
        let len = self.data.len();
        Converted::from_variant(value, self.dtype())?.store(&mut self.data, 0..len);
        Ok(())
    }

    /// Copy tuple `src_tuple` of `source` into tuple `dst_tuple` of `self`
    pub fn set_tuple_from(
        &mut self,
        dst_tuple: usize,
        src_tuple: usize,
        source: &AttributeArray,
    ) -> TransferResult<()> {
        if source.dtype() != self.dtype() || source.components != self.components {
            return Err(TransferError::TypeMismatch {
                expected: format!("{} x{}", self.dtype(), self.components),
                actual: format!("{} x{}", source.dtype(), source.components),
            });
        }
        if dst_tuple >= self.num_tuples() {
            return Err(TransferError::OutOfBounds {
                index: dst_tuple,
                size: self.num_tuples(),
            });
        }
        if src_tuple >= source.num_tuples() {
            return Err(TransferError::OutOfBounds {
                index: src_tuple,
                size: source.num_tuples(),
            });
        }

        let n = self.components;
        let dst = dst_tuple * n..(dst_tuple + 1) * n;
        let src = src_tuple * n..(src_tuple + 1) * n;
        match (&mut self.data, &source.data) {
            (ArrayData::Float32(d), ArrayData::Float32(s)) => d[dst].copy_from_slice(&s[src]),
            (ArrayData::Float64(d), ArrayData::Float64(s)) => d[dst].copy_from_slice(&s[src]),
            (ArrayData::Int32(d), ArrayData::Int32(s)) => d[dst].copy_from_slice(&s[src]),
            (ArrayData::Int64(d), ArrayData::Int64(s)) => d[dst].copy_from_slice(&s[src]),
            (ArrayData::String(d), ArrayData::String(s)) => d[dst].clone_from_slice(&s[src]),
            // dtype equality was checked above
            _ => {}
        }
        Ok(())
    }

    /// Convert to f64 (for numeric types)
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match &self.data {
            ArrayData::Float32(v) => Some(v.iter().map(|&x| x as f64).collect()),
            ArrayData::Float64(v) => Some(v.clone()),
            ArrayData::Int32(v) => Some(v.iter().map(|&x| x as f64).collect()),
            ArrayData::Int64(v) => Some(v.iter().map(|&x| x as f64).collect()),
            ArrayData::String(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_layout() {
        let array =
            AttributeArray::with_components("v", 3, ArrayData::Float64(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]))
                .unwrap();
        assert_eq!(array.num_tuples(), 2);
        assert_eq!(array.num_values(), 6);
        assert_eq!(
            array.tuple(1),
            Some(vec![Variant::Float(4.0), Variant::Float(5.0), Variant::Float(6.0)])
        );
        assert_eq!(array.tuple_value(1), Some(Variant::Float(4.0)));
        assert_eq!(array.tuple(2), None);
    }

    #[test]
    fn test_invalid_components() {
        let result = AttributeArray::with_components("v", 2, ArrayData::Int32(vec![1, 2, 3]));
        assert!(matches!(result, Err(TransferError::InvalidComponents { .. })));
    }

    #[test]
    fn test_fill_converts_default() {
        let mut array = AttributeArray::allocate("out", ArrayType::Int32, 2, 3);
        array.fill(&Variant::Float(-1.0)).unwrap();
        assert_eq!(array.data(), &ArrayData::Int32(vec![-1; 6]));

        let mut names = AttributeArray::allocate("names", ArrayType::String, 1, 2);
        names.fill(&Variant::Int(7)).unwrap();
        assert_eq!(names.data(), &ArrayData::String(vec!["7".to_string(), "7".to_string()]));
    }

    #[test]
    fn test_fill_rejects_unconvertible() {
        let mut array = AttributeArray::allocate("out", ArrayType::Float64, 1, 2);
        let result = array.fill(&Variant::from("not a number"));
        assert!(matches!(result, Err(TransferError::ValueConversion { .. })));

        assert_eq!(
            result.unwrap_err().to_string(),
            "Cannot convert string \"not a number\" to float64"
        );

        let mut narrow = AttributeArray::allocate("out", ArrayType::Int32, 1, 1);
        assert!(narrow.fill(&Variant::Int(i64::MAX)).is_err());
    }

    #[test]
    fn test_set_value_bounds() {
        let mut array = AttributeArray::from_i64("ids", vec![0, 0]);
        array.set_value(1, &Variant::Int(9)).unwrap();
        assert_eq!(array.value(1), Some(Variant::Int(9)));
        assert!(matches!(
            array.set_value(2, &Variant::Int(1)),
            Err(TransferError::OutOfBounds { index: 2, size: 2 })
        ));
    }

    #[test]
    fn test_set_tuple_from() {
        let source =
            AttributeArray::with_components("src", 2, ArrayData::Float32(vec![1.0, 2.0, 3.0, 4.0]))
                .unwrap();
        let mut target = AttributeArray::allocate("dst", ArrayType::Float32, 2, 3);
        target.set_tuple_from(2, 1, &source).unwrap();
        assert_eq!(
            target.data(),
            &ArrayData::Float32(vec![0.0, 0.0, 0.0, 0.0, 3.0, 4.0])
        );

        let mismatched = AttributeArray::from_f64("other", vec![1.0]);
        assert!(matches!(
            target.set_tuple_from(0, 0, &mismatched),
            Err(TransferError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_tuple_has_negative() {
        let array =
            AttributeArray::with_components("v", 2, ArrayData::Int32(vec![1, 2, 3, -4])).unwrap();
        assert!(!array.tuple_has_negative(0));
        assert!(array.tuple_has_negative(1));

        let names = AttributeArray::from_strings("s", vec!["-1"]);
        assert!(!names.tuple_has_negative(0));
    }
}
