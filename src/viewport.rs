//! Container resize notifications.
//!
//! A [`Viewport`] models the host container whose width drives the surface.
//! Surfaces do not poll it: they acquire a [`ResizeSubscription`] on mount
//! and receive [`ContainerResize`] events through a channel. The subscription
//! unregisters itself when dropped, so every exit path of the surface
//! (explicit unmount, drop, early teardown during a pending decode)
//! releases the listener.

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::trace;

/// The container changed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerResize {
    pub width: u32,
}

struct ViewportInner {
    container_width: u32,
    next_listener_id: u64,
    listeners: Vec<(u64, UnboundedSender<ContainerResize>)>,
}

/// Shared handle to the host container. Clones observe the same container.
#[derive(Clone)]
pub struct Viewport {
    inner: Arc<Mutex<ViewportInner>>,
}

impl Viewport {
    pub fn new(container_width: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ViewportInner {
                container_width,
                next_listener_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn container_width(&self) -> u32 {
        self.inner.lock().container_width
    }

    /// Change the container width and notify every subscriber.
    ///
    /// Subscribers are notified even when the width is unchanged; filtering
    /// is the subscriber's business.
    pub fn set_container_width(&self, width: u32) {
        let mut inner = self.inner.lock();
        inner.container_width = width;
        inner
            .listeners
            .retain(|(_, sender)| sender.unbounded_send(ContainerResize { width }).is_ok());
        trace!(width, listeners = inner.listeners.len(), "Container resized");
    }

    /// Register for resize events.
    pub fn subscribe(&self) -> ResizeSubscription {
        let (sender, events) = mpsc::unbounded();
        let mut inner = self.inner.lock();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, sender));

        ResizeSubscription {
            id,
            viewport: Arc::downgrade(&self.inner),
            events,
        }
    }

    /// Number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Viewport")
            .field("container_width", &inner.container_width)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Scoped resize listener. Dropping it unregisters from the viewport.
pub struct ResizeSubscription {
    id: u64,
    viewport: Weak<Mutex<ViewportInner>>,
    events: UnboundedReceiver<ContainerResize>,
}

impl ResizeSubscription {
    /// Next queued resize event, if any.
    pub fn try_next(&mut self) -> Option<ContainerResize> {
        match self.events.try_next() {
            Ok(event) => event,
            Err(_) => None,
        }
    }

    /// Drain the queue and return only the most recent event.
    ///
    /// Intermediate widths are never observable once a later resize arrived.
    pub fn latest(&mut self) -> Option<ContainerResize> {
        let mut latest = None;
        while let Some(event) = self.try_next() {
            latest = Some(event);
        }
        latest
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.viewport.upgrade() {
            inner.lock().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
