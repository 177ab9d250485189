//! vantage-viewport - Coordinate transform engine for rendering viewports
//!
//! A viewport is a rectangular region of a render surface. This crate maps
//! points between the spaces a rendering pipeline passes through, and back
//! again for picking.
//!
//! # Key Components
//!
//! - **Viewport**: rectangle, background, aspect, working registers, props
//! - **SpaceTransform**: pure conversions between adjacent spaces
//! - **RenderSurface**: the window a viewport draws into (held weakly)
//! - **Prop**: renderable entities shared with an external registry
//! - **PropPicker**: external pick traversal driven by the viewport
//!
//! # Coordinate Spaces
//!
//! ```text
//! world ⇄ view ⇄ normalized viewport ⇄ viewport ⇄ normalized display ⇄ display ⇄ local display
//! ```

pub mod config;
pub mod coordinates;
pub mod error;
pub mod picking;
pub mod prop;
pub mod surface;
pub mod types;
pub mod viewport;

pub use config::ViewportConfig;
pub use coordinates::SpaceTransform;
pub use error::{ViewportError, ViewportResult};
pub use picking::{AssemblyNode, AssemblyPath, PickRequest, PropPicker};
pub use prop::{same_prop, Actor2DCollection, ConsumerId, Prop, PropCollection, PropHandle};
pub use surface::{surface_handle, RenderSurface, SurfaceHandle, WindowSurface};
pub use types::*;
pub use viewport::Viewport;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
