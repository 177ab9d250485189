//! Source-position to target-position index construction

use std::collections::BTreeMap;

use crate::array::AttributeArray;
use crate::error::{TransferError, TransferResult};
use crate::variant::Variant;

/// Sparse map from source tuple position to target tuple position
pub type TransferIndex = BTreeMap<usize, usize>;

/// Identity map over the source positions
///
/// Fails when the source has more elements than the target.
pub fn direct(source_len: usize, target_len: usize) -> TransferResult<TransferIndex> {
    if source_len > target_len {
        return Err(TransferError::DirectMappingSize {
            source_len,
            target_len,
        });
    }
    Ok((0..source_len).map(|i| (i, i)).collect())
}

/// Join source and target positions on matching pedigree ids
///
/// The first component of each tuple is the id. A duplicated source id maps
/// to its last position; a source position matched by several target ids
/// maps to the last of them. Unmatched target ids are absent from the index.
pub fn by_pedigree_id(source_ids: &AttributeArray, target_ids: &AttributeArray) -> TransferIndex {
    let mut positions: BTreeMap<Variant, usize> = BTreeMap::new();
    for i in 0..source_ids.num_tuples() {
        if let Some(id) = source_ids.tuple_value(i) {
            positions.insert(id, i);
        }
    }

    let mut index = TransferIndex::new();
    for i in 0..target_ids.num_tuples() {
        if let Some(&source_pos) = target_ids.tuple_value(i).and_then(|id| positions.get(&id)) {
            index.insert(source_pos, i);
        }
    }
    index
}
