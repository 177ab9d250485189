//! vantage-transfer - Attribute transfer between data objects
//!
//! Copies a named attribute array from a source data object onto a target
//! data object. Elements are joined on their pedigree ids, or by position
//! when direct mapping is enabled.
//!
//! # Key Components
//!
//! - **TransferAttributes**: filter configuration and execution
//! - **DataObject**: mesh, graph or table with per-association attributes
//! - **AttributeArray**: typed, multi-component arrays
//! - **Variant**: ids and fill values of any element type
//!
//! # Example
//!
//! ```
//! use vantage_transfer::{AttributeArray, DataObject, FieldAssociation, Table, TransferAttributes};
//!
//! let mut source = Table::new();
//! source.row_data.set_pedigree_ids(AttributeArray::from_strings("id", vec!["A", "B", "C"]));
//! source.row_data.add_array(AttributeArray::from_i32("score", vec![10, 20, 30]));
//!
//! let mut target = Table::new();
//! target.row_data.set_pedigree_ids(AttributeArray::from_strings("id", vec!["C", "A", "D"]));
//!
//! let filter = TransferAttributes::new()
//!     .with_source_array_name("score")
//!     .with_target_array_name("score")
//!     .with_source_field(FieldAssociation::Rows)
//!     .with_target_field(FieldAssociation::Rows)
//!     .with_default_value(-1);
//!
//! let output = filter
//!     .execute(&DataObject::from(target), &DataObject::from(source))
//!     .unwrap();
//! let scores = output.attributes(FieldAssociation::Rows).unwrap().array("score").unwrap();
//! assert_eq!(scores.to_f64(), Some(vec![30.0, 10.0, -1.0]));
//! ```

pub mod array;
pub mod attributes;
pub mod data_object;
pub mod error;
pub mod filter;
pub mod index;
pub mod variant;

pub use array::{ArrayData, ArrayType, AttributeArray};
pub use attributes::Attributes;
pub use data_object::{DataObject, FieldAssociation, Graph, Mesh, Table};
pub use error::{Side, TransferError, TransferResult};
pub use filter::TransferAttributes;
pub use index::TransferIndex;
pub use variant::Variant;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
