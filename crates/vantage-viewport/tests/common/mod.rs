//! Shared test props and logging setup

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use vantage_viewport::{Actor2DCollection, ConsumerId, Prop, PropHandle, RenderSurface};

/// Route tracing output through the test harness
#[allow(dead_code)]
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Prop that counts every call the viewport makes on it
#[derive(Debug, Default)]
pub struct CountingProp {
    pub name: String,
    pub overlay: bool,
    pub releases: AtomicUsize,
    pub released_with_surface: AtomicUsize,
    consumers: Mutex<Vec<ConsumerId>>,
    pub registrations: AtomicUsize,
    pub deregistrations: AtomicUsize,
}

#[allow(dead_code)]
impl CountingProp {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            ..Default::default()
        })
    }

    /// A prop that is itself a 2D overlay
    pub fn overlay(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            overlay: true,
            ..Default::default()
        })
    }

    pub fn consumers(&self) -> Vec<ConsumerId> {
        self.consumers.lock().unwrap().clone()
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    pub fn deregistrations(&self) -> usize {
        self.deregistrations.load(Ordering::SeqCst)
    }
}

impl Prop for CountingProp {
    fn release_graphics_resources(&self, surface: Option<&dyn RenderSurface>) {
        self.releases.fetch_add(1, Ordering::SeqCst);
        if surface.is_some() {
            self.released_with_surface.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn add_consumer(&self, consumer: ConsumerId) {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        self.consumers.lock().unwrap().push(consumer);
    }

    fn remove_consumer(&self, consumer: ConsumerId) {
        self.deregistrations.fetch_add(1, Ordering::SeqCst);
        self.consumers.lock().unwrap().retain(|c| *c != consumer);
    }

    fn collect_actors_2d(&self, this: &PropHandle, out: &mut Actor2DCollection) {
        if self.overlay {
            out.add(this.clone());
        }
    }
}

/// Erase a concrete prop into the handle type the viewport stores
#[allow(dead_code)]
pub fn handle(prop: &Arc<CountingProp>) -> PropHandle {
    prop.clone()
}
