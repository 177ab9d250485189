//! Shared fixtures and logging setup

use vantage_transfer::{AttributeArray, DataObject, Graph, Mesh, Table};

/// Route tracing output through the test harness
#[allow(dead_code)]
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Mesh with one point per id and an optional point array
#[allow(dead_code)]
pub fn mesh_with_ids(ids: AttributeArray, values: Option<AttributeArray>) -> DataObject {
    let points = ids.num_tuples();
    let mut mesh = Mesh::new(vec![[0.0; 3]; points], Vec::new());
    mesh.point_data.set_pedigree_ids(ids);
    if let Some(values) = values {
        mesh.point_data.add_array(values);
    }
    DataObject::from(mesh)
}

/// Graph with one vertex per id and an optional vertex array
#[allow(dead_code)]
pub fn graph_with_ids(ids: AttributeArray, values: Option<AttributeArray>) -> DataObject {
    let mut graph = Graph::new(ids.num_tuples(), Vec::new());
    graph.vertex_data.set_pedigree_ids(ids);
    if let Some(values) = values {
        graph.vertex_data.add_array(values);
    }
    DataObject::from(graph)
}

/// Table with one row per id and an optional column
#[allow(dead_code)]
pub fn table_with_ids(ids: AttributeArray, values: Option<AttributeArray>) -> DataObject {
    let mut table = Table::new();
    table.row_data.set_pedigree_ids(ids);
    if let Some(values) = values {
        table.row_data.add_array(values);
    }
    DataObject::from(table)
}
