//! The viewport: a rectangular region of a render surface
//!
//! A `Viewport` owns:
//! - the viewport rectangle, background and aspect settings
//! - the display/view/world working registers
//! - the props it draws, registered as their consumer
//! - picking state for the last pick
//!
//! It holds only a weak handle to its render surface. Without a live surface
//! the surface-dependent conversions leave their input unchanged and the
//! pixel queries report zero.

use std::sync::{Arc, Weak};

use tracing::{debug, trace, warn};

use crate::config::ViewportConfig;
use crate::coordinates::{self, SpaceTransform};
use crate::picking::{AssemblyPath, PickRequest, PropPicker};
use crate::prop::{same_prop, Actor2DCollection, ConsumerId, Prop, PropCollection, PropHandle};
use crate::surface::{RenderSurface, SurfaceHandle};
use crate::types::{ColorRgb, PixelSize, Point2, Point3, Point4, ViewportRect};

/// Viewport coordinate engine and prop registry
#[derive(Debug)]
pub struct Viewport {
    id: ConsumerId,
    surface: Option<SurfaceHandle>,

    background: ColorRgb,
    viewport: ViewportRect,
    aspect: [f64; 2],
    pixel_aspect: [f64; 2],

    display_point: Point3,
    view_point: Point3,
    world_point: Point4,

    props: PropCollection,
    actors_2d: Actor2DCollection,

    picked_prop: Option<Weak<dyn Prop>>,
    is_picking: bool,
    current_pick_id: u64,
    pick_x: f64,
    pick_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create a viewport with a black background covering the full surface
    pub fn new() -> Self {
        Self {
            id: ConsumerId::new(),
            surface: None,
            background: ColorRgb::black(),
            viewport: ViewportRect::FULL,
            aspect: [1.0, 1.0],
            pixel_aspect: [1.0, 1.0],
            display_point: [0.0; 3],
            view_point: [0.0; 3],
            world_point: [0.0; 4],
            props: PropCollection::new(),
            actors_2d: Actor2DCollection::new(),
            picked_prop: None,
            is_picking: false,
            current_pick_id: 0,
            pick_x: -1.0,
            pick_y: -1.0,
        }
    }

    /// Create a viewport from stored settings
    pub fn from_config(config: &ViewportConfig) -> Self {
        let mut viewport = Self::new();
        viewport.apply_config(config);
        viewport
    }

    /// Apply stored settings to this viewport
    pub fn apply_config(&mut self, config: &ViewportConfig) {
        self.background = config.background;
        self.viewport = config.viewport;
        self.pixel_aspect = config.pixel_aspect;
    }

    /// Current settings as a config record
    pub fn to_config(&self) -> ViewportConfig {
        ViewportConfig {
            background: self.background,
            viewport: self.viewport,
            pixel_aspect: self.pixel_aspect,
        }
    }

    /// Consumer identity this viewport registers with its props
    pub fn consumer_id(&self) -> ConsumerId {
        self.id
    }

    // === Render surface ===

    /// Attach a render surface without taking ownership of it
    pub fn set_surface(&mut self, surface: SurfaceHandle) {
        self.surface = Some(surface);
    }

    /// Attach a shared render surface without taking ownership of it
    pub fn attach_surface<S: RenderSurface + 'static>(&mut self, surface: &Arc<S>) {
        self.surface = Some(crate::surface::surface_handle(surface));
    }

    pub fn clear_surface(&mut self) {
        self.surface = None;
    }

    /// The surface, if one is attached and still alive
    pub fn surface(&self) -> Option<Arc<dyn RenderSurface>> {
        let handle = self.surface.as_ref()?;
        let surface = handle.upgrade();
        if surface.is_none() {
            warn!(viewport = %self.id, "render surface was dropped while attached");
        }
        surface
    }

    pub fn has_surface(&self) -> bool {
        self.surface().is_some()
    }

    /// Snapshot of everything the surface-dependent conversions need
    pub fn space_transform(&self) -> Option<SpaceTransform> {
        let surface = self.surface()?;
        Some(SpaceTransform::new(surface.size(), self.viewport, self.aspect))
    }

    // === Settings ===

    pub fn background(&self) -> ColorRgb {
        self.background
    }

    pub fn set_background(&mut self, background: ColorRgb) {
        self.background = background;
    }

    pub fn viewport(&self) -> ViewportRect {
        self.viewport
    }

    /// Set the viewport rectangle; bounds are not validated
    pub fn set_viewport(&mut self, viewport: ViewportRect) {
        self.viewport = viewport;
    }

    pub fn aspect(&self) -> [f64; 2] {
        self.aspect
    }

    /// Override the aspect; normally derived by [`Viewport::compute_aspect`]
    pub fn set_aspect(&mut self, aspect: [f64; 2]) {
        self.aspect = aspect;
    }

    pub fn pixel_aspect(&self) -> [f64; 2] {
        self.pixel_aspect
    }

    pub fn set_pixel_aspect(&mut self, pixel_aspect: [f64; 2]) {
        self.pixel_aspect = pixel_aspect;
    }

    // === Working registers ===

    pub fn display_point(&self) -> Point3 {
        self.display_point
    }

    pub fn set_display_point(&mut self, point: Point3) {
        self.display_point = point;
    }

    pub fn view_point(&self) -> Point3 {
        self.view_point
    }

    pub fn set_view_point(&mut self, point: Point3) {
        self.view_point = point;
    }

    pub fn world_point(&self) -> Point4 {
        self.world_point
    }

    pub fn set_world_point(&mut self, point: Point4) {
        self.world_point = point;
    }

    /// Display register to view register
    pub fn display_to_view(&mut self) {
        if let Some(t) = self.space_transform() {
            self.view_point = t.display_to_view(self.display_point);
            trace!(display = ?self.display_point, view = ?self.view_point, "display_to_view");
        }
    }

    /// View register to display register
    pub fn view_to_display(&mut self) {
        if let Some(t) = self.space_transform() {
            self.display_point = t.view_to_display(self.view_point);
            trace!(view = ?self.view_point, display = ?self.display_point, "view_to_display");
        }
    }

    /// View register to world register
    pub fn view_to_world(&mut self) {
        self.world_point = coordinates::view_to_world(self.view_point);
    }

    /// World register to view register
    pub fn world_to_view(&mut self) {
        self.view_point = coordinates::world_to_view(self.world_point);
    }

    /// Display register through view to world register
    pub fn display_to_world(&mut self) {
        self.display_to_view();
        self.view_to_world();
    }

    /// World register through view to display register
    pub fn world_to_display(&mut self) {
        self.world_to_view();
        self.view_to_display();
    }

    // === Point conversions ===

    fn with_transform<P>(&self, p: P, f: impl FnOnce(&SpaceTransform, P) -> P) -> P {
        match self.space_transform() {
            Some(t) => f(&t, p),
            None => p,
        }
    }

    pub fn normalized_display_to_display(&self, p: Point2) -> Point2 {
        self.with_transform(p, |t, p| t.normalized_display_to_display(p))
    }

    pub fn display_to_normalized_display(&self, p: Point2) -> Point2 {
        self.with_transform(p, |t, p| t.display_to_normalized_display(p))
    }

    pub fn normalized_display_to_viewport(&self, p: Point2) -> Point2 {
        self.with_transform(p, |t, p| t.normalized_display_to_viewport(p))
    }

    pub fn viewport_to_normalized_display(&self, p: Point2) -> Point2 {
        self.with_transform(p, |t, p| t.viewport_to_normalized_display(p))
    }

    pub fn viewport_to_normalized_viewport(&self, p: Point2) -> Point2 {
        self.with_transform(p, |t, p| t.viewport_to_normalized_viewport(p))
    }

    pub fn normalized_viewport_to_viewport(&self, p: Point2) -> Point2 {
        self.with_transform(p, |t, p| t.normalized_viewport_to_viewport(p))
    }

    /// Does not need a surface
    pub fn normalized_viewport_to_view(&self, p: Point3) -> Point3 {
        coordinates::normalized_viewport_to_view(p, self.aspect)
    }

    /// Does not need a surface
    pub fn view_to_normalized_viewport(&self, p: Point3) -> Point3 {
        coordinates::view_to_normalized_viewport(p, self.aspect)
    }

    pub fn local_display_to_display(&self, p: Point2) -> Point2 {
        self.with_transform(p, |t, p| t.flip_vertical(p))
    }

    pub fn display_to_local_display(&self, p: Point2) -> Point2 {
        self.with_transform(p, |t, p| t.flip_vertical(p))
    }

    // === Aggregate queries ===

    /// Viewport extent in pixels; `[0, 0]` without a surface
    pub fn get_size(&self) -> PixelSize {
        self.space_transform()
            .map(|t| t.viewport_size())
            .unwrap_or([0, 0])
    }

    /// Viewport extent within the surface's current tile
    pub fn get_tiled_size(&self) -> PixelSize {
        let Some(surface) = self.surface() else {
            return [0, 0];
        };
        let t = SpaceTransform::new(surface.size(), self.viewport, self.aspect);
        t.tiled_size(&surface.tile_viewport())
    }

    /// Lower-left corner of the viewport in display pixels
    pub fn get_origin(&self) -> PixelSize {
        self.space_transform().map(|t| t.origin()).unwrap_or([0, 0])
    }

    /// Center of the viewport in display coordinates
    pub fn get_center(&self) -> Point2 {
        self.space_transform()
            .map(|t| t.center())
            .unwrap_or([0.0, 0.0])
    }

    /// Whether a display pixel lies in the viewport, edges included
    pub fn is_in_viewport(&self, x: i32, y: i32) -> bool {
        self.space_transform()
            .map(|t| t.contains_pixel(x, y))
            .unwrap_or(false)
    }

    /// Derive the aspect from the viewport's pixel span and the pixel aspect
    pub fn compute_aspect(&mut self) {
        if let Some(t) = self.space_transform() {
            self.aspect = t.computed_aspect(self.pixel_aspect);
            debug!(viewport = %self.id, aspect = ?self.aspect, "computed aspect");
        }
    }

    // === Props ===

    pub fn has_prop(&self, prop: &PropHandle) -> bool {
        self.props.contains(prop)
    }

    /// Add a prop and register as its consumer; no-op if already present
    pub fn add_prop(&mut self, prop: PropHandle) {
        if self.props.contains(&prop) {
            return;
        }
        prop.add_consumer(self.id);
        debug!(viewport = %self.id, prop = ?prop, "added prop");
        self.props.add(prop);
    }

    /// Release, deregister and remove a prop; no-op if absent
    pub fn remove_prop(&mut self, prop: &PropHandle) {
        let Some(removed) = self.props.remove(prop) else {
            return;
        };
        let surface = self.surface();
        self.release(&removed, surface.as_deref());
        debug!(viewport = %self.id, prop = ?removed, "removed prop");
    }

    /// Release and deregister every prop, then clear the collection
    pub fn remove_all_props(&mut self) {
        let props = self.props.drain();
        if props.is_empty() {
            return;
        }
        let surface = self.surface();
        for prop in &props {
            self.release(prop, surface.as_deref());
        }
        debug!(viewport = %self.id, count = props.len(), "removed all props");
    }

    fn release(&self, prop: &PropHandle, surface: Option<&dyn RenderSurface>) {
        prop.release_graphics_resources(surface);
        prop.remove_consumer(self.id);
    }

    pub fn props(&self) -> &PropCollection {
        &self.props
    }

    /// Gather the 2D-overlay entities of every prop
    ///
    /// The collection is rebuilt from scratch on every call.
    pub fn actors_2d(&mut self) -> &Actor2DCollection {
        self.actors_2d.clear();
        for prop in &self.props {
            prop.collect_actors_2d(prop, &mut self.actors_2d);
        }
        &self.actors_2d
    }

    /// Remove an overlay entity from the overlay collection and the props
    pub fn remove_actor_2d(&mut self, prop: &PropHandle) {
        self.actors_2d.remove(prop);
        self.remove_prop(prop);
    }

    // === Picking ===

    /// Pick among this viewport's own props
    pub fn pick_prop(
        &mut self,
        selection_x: f64,
        selection_y: f64,
        picker: &mut dyn PropPicker,
    ) -> Option<AssemblyPath> {
        self.pick_prop_from(selection_x, selection_y, None, picker)
    }

    /// Stage a candidate pool and delegate the pick traversal to `picker`
    ///
    /// `candidates` defaults to the viewport's own props. The last node of a
    /// hit path becomes the picked prop; a miss clears it.
    pub fn pick_prop_from(
        &mut self,
        selection_x: f64,
        selection_y: f64,
        candidates: Option<&[PropHandle]>,
        picker: &mut dyn PropPicker,
    ) -> Option<AssemblyPath> {
        self.pick_x = selection_x;
        self.pick_y = selection_y;
        self.current_pick_id += 1;
        self.is_picking = true;

        let path = {
            let pool = candidates.unwrap_or(self.props.as_slice());
            debug!(
                viewport = %self.id,
                x = selection_x,
                y = selection_y,
                candidates = pool.len(),
                "picking"
            );
            let request = PickRequest {
                selection: [selection_x, selection_y],
                candidates: pool,
                viewport: self,
                pick_id: self.current_pick_id,
            };
            picker.pick(&request)
        };

        self.is_picking = false;
        self.picked_prop = path
            .as_ref()
            .and_then(|p| p.last())
            .map(|node| Arc::downgrade(&node.prop));
        path
    }

    /// The prop hit by the last pick, if the registry still holds it
    pub fn picked_prop(&self) -> Option<PropHandle> {
        self.picked_prop.as_ref()?.upgrade()
    }

    /// Whether `prop` is the prop hit by the last pick
    pub fn is_picked(&self, prop: &PropHandle) -> bool {
        self.picked_prop()
            .map(|picked| same_prop(&picked, prop))
            .unwrap_or(false)
    }

    pub fn is_picking(&self) -> bool {
        self.is_picking
    }

    pub fn current_pick_id(&self) -> u64 {
        self.current_pick_id
    }

    /// Display coordinates of the last pick; (-1, -1) before any pick
    pub fn pick_position(&self) -> Point2 {
        [self.pick_x, self.pick_y]
    }
}

impl Drop for Viewport {
    fn drop(&mut self) {
        self.actors_2d.clear();
        self.remove_all_props();
        self.picked_prop = None;
        // The surface handle is weak; dropping it never touches the surface.
        self.surface = None;
    }
}
