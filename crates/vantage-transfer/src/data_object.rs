//! Data objects the filter reads and writes
//!
//! A `DataObject` is one of three kinds, each exposing attribute sets for the
//! element kinds it has. Structure (coordinates, connectivity, edges) is held
//! behind `Arc` so cloning a data object is a shallow copy.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;

/// Which element kind an attribute set describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FieldAssociation {
    Points,
    Cells,
    Vertices,
    Edges,
    Rows,
}

impl Default for FieldAssociation {
    fn default() -> Self {
        FieldAssociation::Points
    }
}

impl fmt::Display for FieldAssociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldAssociation::Points => "points",
            FieldAssociation::Cells => "cells",
            FieldAssociation::Vertices => "vertices",
            FieldAssociation::Edges => "edges",
            FieldAssociation::Rows => "rows",
        };
        f.write_str(name)
    }
}

/// Points with cell connectivity
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub coordinates: Arc<Vec<[f64; 3]>>,
    /// Point indices per cell
    pub cells: Arc<Vec<Vec<usize>>>,
    pub point_data: Attributes,
    pub cell_data: Attributes,
}

impl Mesh {
    pub fn new(coordinates: Vec<[f64; 3]>, cells: Vec<Vec<usize>>) -> Self {
        Self {
            coordinates: Arc::new(coordinates),
            cells: Arc::new(cells),
            ..Default::default()
        }
    }

    pub fn num_points(&self) -> usize {
        self.coordinates.len()
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }
}

/// Vertices joined by directed edges
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub num_vertices: usize,
    pub edges: Arc<Vec<(usize, usize)>>,
    pub vertex_data: Attributes,
    pub edge_data: Attributes,
}

impl Graph {
    pub fn new(num_vertices: usize, edges: Vec<(usize, usize)>) -> Self {
        Self {
            num_vertices,
            edges: Arc::new(edges),
            ..Default::default()
        }
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}

/// Columns of rows
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub row_data: Attributes,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Any input or output of the transfer filter
#[derive(Debug, Clone)]
pub enum DataObject {
    Mesh(Mesh),
    Graph(Graph),
    Table(Table),
}

impl DataObject {
    /// Short name of the kind, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            DataObject::Mesh(_) => "mesh",
            DataObject::Graph(_) => "graph",
            DataObject::Table(_) => "table",
        }
    }

    /// Associations this kind offers
    pub fn supported_associations(&self) -> &'static [FieldAssociation] {
        match self {
            DataObject::Mesh(_) => &[FieldAssociation::Points, FieldAssociation::Cells],
            DataObject::Graph(_) => &[FieldAssociation::Vertices, FieldAssociation::Edges],
            DataObject::Table(_) => &[FieldAssociation::Rows],
        }
    }

    pub fn supports(&self, association: FieldAssociation) -> bool {
        self.supported_associations().contains(&association)
    }

    /// The attribute set for an association, if this kind has it
    pub fn attributes(&self, association: FieldAssociation) -> Option<&Attributes> {
        match (self, association) {
            (DataObject::Mesh(m), FieldAssociation::Points) => Some(&m.point_data),
            (DataObject::Mesh(m), FieldAssociation::Cells) => Some(&m.cell_data),
            (DataObject::Graph(g), FieldAssociation::Vertices) => Some(&g.vertex_data),
            (DataObject::Graph(g), FieldAssociation::Edges) => Some(&g.edge_data),
            (DataObject::Table(t), FieldAssociation::Rows) => Some(&t.row_data),
            _ => None,
        }
    }

    pub fn attributes_mut(&mut self, association: FieldAssociation) -> Option<&mut Attributes> {
        match (self, association) {
            (DataObject::Mesh(m), FieldAssociation::Points) => Some(&mut m.point_data),
            (DataObject::Mesh(m), FieldAssociation::Cells) => Some(&mut m.cell_data),
            (DataObject::Graph(g), FieldAssociation::Vertices) => Some(&mut g.vertex_data),
            (DataObject::Graph(g), FieldAssociation::Edges) => Some(&mut g.edge_data),
            (DataObject::Table(t), FieldAssociation::Rows) => Some(&mut t.row_data),
            _ => None,
        }
    }
}

impl From<Mesh> for DataObject {
    fn from(mesh: Mesh) -> Self {
        DataObject::Mesh(mesh)
    }
}

impl From<Graph> for DataObject {
    fn from(graph: Graph) -> Self {
        DataObject::Graph(graph)
    }
}

impl From<Table> for DataObject {
    fn from(table: Table) -> Self {
        DataObject::Table(table)
    }
}
