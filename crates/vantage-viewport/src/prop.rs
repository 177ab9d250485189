//! Props: renderable entities shared between a registry and viewports
//!
//! Props are reference counted (`Arc`). A viewport that holds a prop
//! registers itself as one of the prop's consumers and deregisters exactly
//! once when it lets go, so the registry can tell which viewports still
//! draw a given prop.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::surface::RenderSurface;

/// Identity of a prop consumer (one per viewport)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsumerId(Uuid);

impl ConsumerId {
    /// Create a fresh, unique consumer id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConsumerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConsumerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Shared handle to a prop
pub type PropHandle = Arc<dyn Prop>;

/// External prop collaborator
pub trait Prop: Send + Sync + fmt::Debug {
    /// Release any graphics resources held for `surface`
    fn release_graphics_resources(&self, surface: Option<&dyn RenderSurface>);

    /// Record that `consumer` now draws this prop
    fn add_consumer(&self, consumer: ConsumerId);

    /// Forget `consumer`
    fn remove_consumer(&self, consumer: ConsumerId);

    /// Contribute this prop's 2D-overlay sub-entities to `out`
    ///
    /// `this` is the handle the viewport holds for `self`, so a prop that is
    /// itself an overlay can add itself. Props without overlays keep the
    /// default, which contributes nothing.
    fn collect_actors_2d(&self, this: &PropHandle, out: &mut Actor2DCollection) {
        let _ = (this, out);
    }
}

/// Identity comparison of two prop handles
pub fn same_prop(a: &PropHandle, b: &PropHandle) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Ordered set of prop handles, compared by identity
#[derive(Debug, Default, Clone)]
pub struct PropCollection {
    items: Vec<PropHandle>,
}

impl PropCollection {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append `prop`; returns false when it is already present
    pub fn add(&mut self, prop: PropHandle) -> bool {
        if self.contains(&prop) {
            return false;
        }
        self.items.push(prop);
        true
    }

    /// Remove `prop`; returns the removed handle when it was present
    pub fn remove(&mut self, prop: &PropHandle) -> Option<PropHandle> {
        let index = self.items.iter().position(|p| same_prop(p, prop))?;
        Some(self.items.remove(index))
    }

    pub fn contains(&self, prop: &PropHandle) -> bool {
        self.items.iter().any(|p| same_prop(p, prop))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Take every handle out, leaving the collection empty
    pub fn drain(&mut self) -> Vec<PropHandle> {
        std::mem::take(&mut self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropHandle> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[PropHandle] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a PropCollection {
    type Item = &'a PropHandle;
    type IntoIter = std::slice::Iter<'a, PropHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<PropHandle> for PropCollection {
    fn from_iter<I: IntoIterator<Item = PropHandle>>(iter: I) -> Self {
        let mut collection = PropCollection::new();
        for prop in iter {
            collection.add(prop);
        }
        collection
    }
}

/// 2D-overlay entities gathered from a viewport's props
pub type Actor2DCollection = PropCollection;
