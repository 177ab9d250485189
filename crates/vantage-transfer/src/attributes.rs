//! Named array collections attached to one element kind of a data object

use std::sync::Arc;

use crate::array::AttributeArray;

/// The arrays attached to one association (points, cells, rows, ...)
///
/// Arrays are reference counted so shallow copies of a data object share
/// their storage. At most one array is designated as the pedigree ids.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    arrays: Vec<Arc<AttributeArray>>,
    pedigree_ids: Option<String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an array, replacing any array with the same name
    pub fn add_array(&mut self, array: AttributeArray) {
        self.add_shared(Arc::new(array));
    }

    /// Add an already shared array, replacing any array with the same name
    pub fn add_shared(&mut self, array: Arc<AttributeArray>) {
        match self.arrays.iter_mut().find(|a| a.name() == array.name()) {
            Some(slot) => *slot = array,
            None => self.arrays.push(array),
        }
    }

    /// Look up an array by name
    pub fn array(&self, name: &str) -> Option<&Arc<AttributeArray>> {
        self.arrays.iter().find(|a| a.name() == name)
    }

    /// Remove an array by name, returning it
    pub fn remove_array(&mut self, name: &str) -> Option<Arc<AttributeArray>> {
        let pos = self.arrays.iter().position(|a| a.name() == name)?;
        if self.pedigree_ids.as_deref() == Some(name) {
            self.pedigree_ids = None;
        }
        Some(self.arrays.remove(pos))
    }

    /// Add an array and designate it as the pedigree ids
    pub fn set_pedigree_ids(&mut self, array: AttributeArray) {
        self.pedigree_ids = Some(array.name().to_string());
        self.add_array(array);
    }

    /// The designated pedigree id array, if present
    pub fn pedigree_ids(&self) -> Option<&Arc<AttributeArray>> {
        self.pedigree_ids.as_deref().and_then(|name| self.array(name))
    }

    pub fn names(&self) -> Vec<&str> {
        self.arrays.iter().map(|a| a.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<AttributeArray>> {
        self.arrays.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_replaces_same_name() {
        let mut attrs = Attributes::new();
        attrs.add_array(AttributeArray::from_f64("t", vec![1.0]));
        attrs.add_array(AttributeArray::from_i32("p", vec![1]));
        attrs.add_array(AttributeArray::from_f64("t", vec![2.0, 3.0]));

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.names(), vec!["t", "p"]);
        assert_eq!(attrs.array("t").unwrap().num_tuples(), 2);
    }

    #[test]
    fn test_pedigree_ids() {
        let mut attrs = Attributes::new();
        assert!(attrs.pedigree_ids().is_none());

        attrs.set_pedigree_ids(AttributeArray::from_strings("ids", vec!["a", "b"]));
        assert_eq!(attrs.pedigree_ids().unwrap().name(), "ids");

        attrs.remove_array("ids");
        assert!(attrs.pedigree_ids().is_none());
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_clone_shares_storage() {
        let mut attrs = Attributes::new();
        attrs.add_array(AttributeArray::from_f64("t", vec![1.0]));
        let copy = attrs.clone();
        assert!(Arc::ptr_eq(attrs.array("t").unwrap(), copy.array("t").unwrap()));
    }
}
