//! Render surface abstraction
//!
//! A render surface is the window (or offscreen target) a viewport draws
//! into. The viewport only needs its pixel size and, for multi-tile
//! composition, the normalized tile region it currently covers.
//!
//! Surfaces own their viewports, never the other way around: a viewport
//! holds a `Weak` handle so the surface's lifetime is never extended.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::types::{PixelSize, ViewportRect};

/// External render surface collaborator
pub trait RenderSurface: Send + Sync {
    /// Current size of the surface in pixels
    fn size(&self) -> PixelSize;

    /// Normalized region of the full display covered by this surface
    ///
    /// Single-tile surfaces cover everything.
    fn tile_viewport(&self) -> ViewportRect {
        ViewportRect::FULL
    }
}

/// Non-owning handle from a viewport to its surface
pub type SurfaceHandle = Weak<dyn RenderSurface>;

/// Downgrade a shared surface into the handle a viewport keeps
pub fn surface_handle<S: RenderSurface + 'static>(surface: &Arc<S>) -> SurfaceHandle {
    let surface: Arc<dyn RenderSurface> = surface.clone();
    Arc::downgrade(&surface)
}

/// A resizable surface with an optional tile region
///
/// Suitable for tests and for hosts that forward window resize events.
#[derive(Debug)]
pub struct WindowSurface {
    width: AtomicI32,
    height: AtomicI32,
    tile: Mutex<ViewportRect>,
}

impl WindowSurface {
    /// Create a surface covering the full display
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: AtomicI32::new(width),
            height: AtomicI32::new(height),
            tile: Mutex::new(ViewportRect::FULL),
        }
    }

    /// Create a surface that renders one tile of a larger display
    pub fn tiled(width: i32, height: i32, tile: ViewportRect) -> Self {
        Self {
            width: AtomicI32::new(width),
            height: AtomicI32::new(height),
            tile: Mutex::new(tile),
        }
    }

    /// Resize the surface
    pub fn resize(&self, width: i32, height: i32) {
        self.width.store(width, Ordering::Relaxed);
        self.height.store(height, Ordering::Relaxed);
    }

    /// Change the tile region
    pub fn set_tile_viewport(&self, tile: ViewportRect) {
        match self.tile.lock() {
            Ok(mut guard) => *guard = tile,
            Err(poisoned) => *poisoned.into_inner() = tile,
        }
    }
}

impl RenderSurface for WindowSurface {
    fn size(&self) -> PixelSize {
        [
            self.width.load(Ordering::Relaxed),
            self.height.load(Ordering::Relaxed),
        ]
    }

    fn tile_viewport(&self) -> ViewportRect {
        match self.tile.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_surface_resize() {
        let surface = WindowSurface::new(640, 480);
        assert_eq!(surface.size(), [640, 480]);

        surface.resize(800, 600);
        assert_eq!(surface.size(), [800, 600]);
    }

    #[test]
    fn test_default_tile_is_full() {
        let surface = WindowSurface::new(10, 10);
        assert_eq!(surface.tile_viewport(), ViewportRect::FULL);

        let tile = ViewportRect::new(0.5, 0.0, 1.0, 1.0);
        surface.set_tile_viewport(tile);
        assert_eq!(surface.tile_viewport(), tile);
    }

    #[test]
    fn test_handle_does_not_extend_lifetime() {
        let surface = Arc::new(WindowSurface::new(10, 10));
        let handle = surface_handle(&surface);
        assert!(handle.upgrade().is_some());

        drop(surface);
        assert!(handle.upgrade().is_none());
    }
}
