//! The attribute transfer filter
//!
//! Copies a named array from one data object onto another. Elements are
//! matched by pedigree id, or positionally with direct mapping. Target
//! elements without a match keep the default value.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::array::AttributeArray;
use crate::attributes::Attributes;
use crate::data_object::{DataObject, FieldAssociation};
use crate::error::{Side, TransferError, TransferResult};
use crate::index::{self, TransferIndex};
use crate::variant::Variant;

fn default_fill() -> Variant {
    Variant::Int(1)
}

/// Filter configuration
///
/// The filter holds no state between executions, so one configuration can
/// be executed any number of times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferAttributes {
    /// Array read from the source attributes
    pub source_array_name: Option<String>,

    /// Name of the array added to the target attributes
    pub target_array_name: Option<String>,

    /// Match elements by position instead of by pedigree id
    pub direct_mapping: bool,

    /// Value for target elements with no matching source element
    #[serde(default = "default_fill")]
    pub default_value: Variant,

    pub source_field: FieldAssociation,
    pub target_field: FieldAssociation,
}

impl Default for TransferAttributes {
    fn default() -> Self {
        Self {
            source_array_name: None,
            target_array_name: None,
            direct_mapping: false,
            default_value: default_fill(),
            source_field: FieldAssociation::Points,
            target_field: FieldAssociation::Points,
        }
    }
}

impl TransferAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_array_name(mut self, name: impl Into<String>) -> Self {
        self.source_array_name = Some(name.into());
        self
    }

    pub fn with_target_array_name(mut self, name: impl Into<String>) -> Self {
        self.target_array_name = Some(name.into());
        self
    }

    pub fn with_direct_mapping(mut self, direct: bool) -> Self {
        self.direct_mapping = direct;
        self
    }

    pub fn with_default_value(mut self, value: impl Into<Variant>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn with_source_field(mut self, field: FieldAssociation) -> Self {
        self.source_field = field;
        self
    }

    pub fn with_target_field(mut self, field: FieldAssociation) -> Self {
        self.target_field = field;
        self
    }

    /// Load configuration from a TOML string
    #[cfg(feature = "toml-config")]
    pub fn from_toml(toml_str: &str) -> TransferResult<Self> {
        toml::from_str(toml_str).map_err(|e| TransferError::Config(e.to_string()))
    }

    /// Serialize configuration to TOML
    #[cfg(feature = "toml-config")]
    pub fn to_toml(&self) -> TransferResult<String> {
        toml::to_string_pretty(self).map_err(|e| TransferError::Config(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> TransferResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> TransferResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> TransferResult<()> {
        self.array_names().map(|_| ())
    }

    fn array_names(&self) -> TransferResult<(&str, &str)> {
        fn present(name: &Option<String>) -> Option<&str> {
            name.as_deref().filter(|n| !n.is_empty())
        }
        match (present(&self.source_array_name), present(&self.target_array_name)) {
            (Some(source), Some(target)) => Ok((source, target)),
            _ => Err(TransferError::MissingArrayName),
        }
    }

    /// Run the transfer
    ///
    /// Returns a shallow copy of `target` whose attributes for
    /// `target_field` gain the transferred array. The inputs are never
    /// modified; on failure nothing is produced.
    pub fn execute(&self, target: &DataObject, source: &DataObject) -> TransferResult<DataObject> {
        self.transfer(target, source).map_err(|err| {
            error!("Attribute transfer failed: {}", err);
            err
        })
    }

    fn transfer(&self, target: &DataObject, source: &DataObject) -> TransferResult<DataObject> {
        let source_attrs = resolve(source, self.source_field, Side::Source)?;
        let target_attrs = resolve(target, self.target_field, Side::Target)?;

        let (source_name, target_name) = self.array_names()?;

        let source_ids = source_attrs
            .pedigree_ids()
            .ok_or(TransferError::MissingPedigreeIds { side: Side::Source })?;
        let target_ids = target_attrs
            .pedigree_ids()
            .ok_or(TransferError::MissingPedigreeIds { side: Side::Target })?;

        let source_array =
            source_attrs
                .array(source_name)
                .ok_or_else(|| TransferError::ArrayNotFound {
                    side: Side::Source,
                    name: source_name.to_string(),
                })?;

        let index = if self.direct_mapping {
            index::direct(source_ids.num_tuples(), target_ids.num_tuples())?
        } else {
            index::by_pedigree_id(source_ids, target_ids)
        };
        debug!(
            "Transferring '{}' -> '{}': {} of {} target elements matched",
            source_name,
            target_name,
            index.len(),
            target_ids.num_tuples()
        );

        let output = self.copy_mapped(source_array, target_name, target_ids.num_tuples(), &index)?;

        let mut result = target.clone();
        result
            .attributes_mut(self.target_field)
            .ok_or(TransferError::UnsupportedAssociation {
                side: Side::Target,
                kind: target.kind_name(),
                association: self.target_field,
            })?
            .add_array(output);
        Ok(result)
    }

    fn copy_mapped(
        &self,
        source_array: &AttributeArray,
        target_name: &str,
        target_len: usize,
        index: &TransferIndex,
    ) -> TransferResult<AttributeArray> {
        let mut output = AttributeArray::allocate(
            target_name,
            source_array.dtype(),
            source_array.num_components(),
            target_len,
        );
        output.fill(&self.default_value)?;

        for (&src, &dst) in index {
            if src >= source_array.num_tuples() || dst >= output.num_tuples() {
                warn!(
                    "Skipping mapping {} -> {}: '{}' has {} tuples, output has {}",
                    src,
                    dst,
                    source_array.name(),
                    source_array.num_tuples(),
                    output.num_tuples()
                );
                continue;
            }
            if source_array.tuple_has_negative(src) {
                warn!(
                    "Skipping negative value in '{}' at source position {}",
                    source_array.name(),
                    src
                );
                continue;
            }
            output.set_tuple_from(dst, src, source_array)?;
        }

        Ok(output)
    }
}

fn resolve(data: &DataObject, association: FieldAssociation, side: Side) -> TransferResult<&Attributes> {
    data.attributes(association)
        .ok_or(TransferError::UnsupportedAssociation {
            side,
            kind: data.kind_name(),
            association,
        })
}
