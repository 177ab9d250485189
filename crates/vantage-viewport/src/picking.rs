//! Picking entry point types
//!
//! The viewport does not traverse props itself. It stages a candidate pool
//! and hands a [`PickRequest`] to an external [`PropPicker`], which returns
//! the path through the prop hierarchy that was hit.

use std::fmt;

use crate::prop::{same_prop, PropHandle};
use crate::viewport::Viewport;

/// 4x4 transform matrix (row-major)
pub type Mat4 = [[f64; 4]; 4];

/// One step of an assembly path
#[derive(Clone)]
pub struct AssemblyNode {
    /// Prop at this level of the hierarchy
    pub prop: PropHandle,

    /// Accumulated transform down to this prop, if any
    pub matrix: Option<Mat4>,
}

impl AssemblyNode {
    pub fn new(prop: PropHandle) -> Self {
        Self { prop, matrix: None }
    }

    pub fn with_matrix(mut self, matrix: Mat4) -> Self {
        self.matrix = Some(matrix);
        self
    }
}

impl fmt::Debug for AssemblyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssemblyNode")
            .field("prop", &self.prop)
            .field("has_matrix", &self.matrix.is_some())
            .finish()
    }
}

/// Path from a top-level prop down to the picked leaf
#[derive(Clone, Debug, Default)]
pub struct AssemblyPath {
    nodes: Vec<AssemblyNode>,
}

impl AssemblyPath {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Single-node path for a prop with no hierarchy
    pub fn single(prop: PropHandle) -> Self {
        Self {
            nodes: vec![AssemblyNode::new(prop)],
        }
    }

    pub fn push(&mut self, node: AssemblyNode) {
        self.nodes.push(node);
    }

    /// Top-level prop
    pub fn first(&self) -> Option<&AssemblyNode> {
        self.nodes.first()
    }

    /// Picked leaf
    pub fn last(&self) -> Option<&AssemblyNode> {
        self.nodes.last()
    }

    pub fn nodes(&self) -> &[AssemblyNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `prop` appears anywhere along the path
    pub fn contains(&self, prop: &PropHandle) -> bool {
        self.nodes.iter().any(|n| same_prop(&n.prop, prop))
    }
}

/// Everything a picker needs for one pick
pub struct PickRequest<'a> {
    /// Selection point in display coordinates
    pub selection: [f64; 2],

    /// Props eligible for this pick
    pub candidates: &'a [PropHandle],

    /// Viewport being picked, for coordinate conversion
    pub viewport: &'a Viewport,

    /// Monotonic id of this pick on the viewport
    pub pick_id: u64,
}

/// External pick traversal collaborator
pub trait PropPicker {
    /// Find the prop under the selection point, if any
    fn pick(&mut self, request: &PickRequest<'_>) -> Option<AssemblyPath>;
}

impl<F> PropPicker for F
where
    F: FnMut(&PickRequest<'_>) -> Option<AssemblyPath>,
{
    fn pick(&mut self, request: &PickRequest<'_>) -> Option<AssemblyPath> {
        self(request)
    }
}
