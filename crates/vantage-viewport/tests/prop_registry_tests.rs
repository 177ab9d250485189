//! Prop registry integration tests
//!
//! Consumer registration must pair exactly with deregistration, whether a
//! prop leaves through remove, remove-all or the viewport being dropped.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{handle, init_logging, CountingProp};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;
use vantage_viewport::{Viewport, WindowSurface};

/// Counts WARN events seen by the scoped subscriber
struct WarnCounter(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn test_add_registers_once() {
    init_logging();
    let prop = CountingProp::new("cube");
    let mut viewport = Viewport::new();

    viewport.add_prop(handle(&prop));
    viewport.add_prop(handle(&prop));

    assert_eq!(viewport.props().len(), 1);
    assert_eq!(prop.registrations(), 1);
    assert_eq!(prop.consumers(), vec![viewport.consumer_id()]);
    assert!(viewport.has_prop(&handle(&prop)));
}

#[test]
fn test_remove_releases_and_deregisters() {
    let surface = Arc::new(WindowSurface::new(64, 64));
    let prop = CountingProp::new("cube");
    let mut viewport = Viewport::new();
    viewport.attach_surface(&surface);

    viewport.add_prop(handle(&prop));
    viewport.remove_prop(&handle(&prop));

    assert!(!viewport.has_prop(&handle(&prop)));
    assert_eq!(prop.releases(), 1);
    assert_eq!(
        prop.released_with_surface
            .load(Ordering::SeqCst),
        1
    );
    assert_eq!(prop.deregistrations(), 1);
    assert!(prop.consumers().is_empty());
}

#[test]
fn test_remove_absent_prop_is_noop() {
    let prop = CountingProp::new("cube");
    let mut viewport = Viewport::new();

    viewport.remove_prop(&handle(&prop));

    assert_eq!(prop.releases(), 0);
    assert_eq!(prop.deregistrations(), 0);
}

#[test]
fn test_remove_all_props() {
    let props: Vec<_> = (0..3).map(|i| CountingProp::new(&format!("p{i}"))).collect();
    let mut viewport = Viewport::new();
    for prop in &props {
        viewport.add_prop(handle(prop));
    }

    viewport.remove_all_props();

    assert!(viewport.props().is_empty());
    for prop in &props {
        assert_eq!(prop.registrations(), 1);
        assert_eq!(prop.deregistrations(), 1);
        assert_eq!(prop.releases(), 1);
    }
}

#[test]
fn test_drop_releases_each_prop_once() {
    let kept = CountingProp::new("kept");
    let removed = CountingProp::new("removed");
    {
        let mut viewport = Viewport::new();
        viewport.add_prop(handle(&kept));
        viewport.add_prop(handle(&removed));
        viewport.remove_prop(&handle(&removed));
    }

    assert_eq!(kept.deregistrations(), 1);
    assert_eq!(kept.releases(), 1);
    assert_eq!(removed.deregistrations(), 1);
    assert_eq!(removed.releases(), 1);
    assert_eq!(Arc::strong_count(&kept), 1);
}

#[test]
fn test_prop_shared_between_viewports() {
    let prop = CountingProp::new("shared");
    let mut first = Viewport::new();
    let mut second = Viewport::new();

    first.add_prop(handle(&prop));
    second.add_prop(handle(&prop));
    assert_eq!(prop.consumers().len(), 2);

    first.remove_prop(&handle(&prop));
    assert_eq!(prop.consumers(), vec![second.consumer_id()]);
}

#[test]
fn test_viewport_does_not_keep_surface_alive() {
    let surface = Arc::new(WindowSurface::new(64, 64));
    let mut viewport = Viewport::new();
    viewport.attach_surface(&surface);

    assert_eq!(Arc::strong_count(&surface), 1);
    drop(viewport);
    assert_eq!(Arc::strong_count(&surface), 1);
}

#[test]
fn test_actors_2d_rebuilt_every_call() {
    let overlay = CountingProp::overlay("label");
    let solid = CountingProp::new("cube");
    let mut viewport = Viewport::new();
    viewport.add_prop(handle(&overlay));
    viewport.add_prop(handle(&solid));

    assert_eq!(viewport.actors_2d().len(), 1);
    assert_eq!(viewport.actors_2d().len(), 1);
    assert!(viewport.actors_2d().contains(&handle(&overlay)));

    viewport.remove_prop(&handle(&overlay));
    assert!(viewport.actors_2d().is_empty());
}

#[test]
fn test_remove_actor_2d() {
    let overlay = CountingProp::overlay("label");
    let mut viewport = Viewport::new();
    viewport.add_prop(handle(&overlay));
    assert_eq!(viewport.actors_2d().len(), 1);

    viewport.remove_actor_2d(&handle(&overlay));

    assert!(!viewport.has_prop(&handle(&overlay)));
    assert_eq!(overlay.deregistrations(), 1);
}

#[test]
fn test_drop_after_surface_gone_warns_once() {
    let warnings = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarnCounter(warnings.clone()));

    let props: Vec<_> = (0..3).map(|i| CountingProp::new(&format!("p{i}"))).collect();
    tracing::subscriber::with_default(subscriber, || {
        let surface = Arc::new(WindowSurface::new(64, 64));
        let mut viewport = Viewport::new();
        viewport.attach_surface(&surface);
        for prop in &props {
            viewport.add_prop(handle(prop));
        }

        drop(surface);
        drop(viewport);
    });

    assert_eq!(warnings.load(Ordering::SeqCst), 1);
    for prop in &props {
        assert_eq!(prop.releases(), 1);
        assert_eq!(prop.released_with_surface.load(Ordering::SeqCst), 0);
        assert_eq!(prop.deregistrations(), 1);
    }
}
