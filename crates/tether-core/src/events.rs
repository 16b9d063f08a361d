//! Native events and the queue that carries them into the next frame.
//!
//! Hosts never touch the registry directly. Everything they report is queued
//! and applied by [`Ui::frame`](crate::Ui::frame) before the frame buffer is
//! rebuilt, so all declarative calls in a frame see the same snapshot.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::registry::Registry;
use crate::{ControlId, NativeHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeEvent {
    /// A control (button) was activated.
    ControlActivated(ControlId),
    /// The user asked to close a top-level window.
    WindowCloseRequested(NativeHandle),
}

#[derive(Default)]
pub struct EventQueue {
    pending: Arc<Mutex<VecDeque<NativeEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, ev: NativeEvent) {
        self.pending.lock().push_back(ev);
    }

    pub fn extend(&self, evs: impl IntoIterator<Item = NativeEvent>) {
        self.pending.lock().extend(evs);
    }

    /// Takes everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<NativeEvent> {
        self.pending.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    pub fn proxy(&self) -> EventProxy {
        EventProxy {
            pending: self.pending.clone(),
        }
    }
}

/// Cloneable, `Send` handle for posting events from other threads. The
/// events are still applied by the thread that owns the `Ui`.
#[derive(Clone)]
pub struct EventProxy {
    pending: Arc<Mutex<VecDeque<NativeEvent>>>,
}

impl EventProxy {
    pub fn post(&self, ev: NativeEvent) {
        self.pending.lock().push_back(ev);
    }
}

/// Records `ev` into the registry entry it targets.
///
/// Returns false when no live entry matches (the object was destroyed after
/// the event was queued, or the event is for a non-window handle).
pub fn apply(registry: &mut Registry, ev: NativeEvent) -> bool {
    match ev {
        NativeEvent::ControlActivated(cid) => match registry.find_by_control_id_mut(cid) {
            Some(entry) => {
                entry.pressed = true;
                true
            }
            None => {
                log::debug!("activation for unknown control {cid:?}; ignoring");
                false
            }
        },
        NativeEvent::WindowCloseRequested(handle) => match registry.find_by_handle_mut(handle) {
            Some(entry) if entry.kind.is_window() => {
                entry.closed = true;
                true
            }
            _ => {
                log::debug!("close request for {handle:?} matches no window; ignoring");
                false
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let q = EventQueue::new();
        q.push(NativeEvent::ControlActivated(ControlId(100)));
        q.push(NativeEvent::WindowCloseRequested(NativeHandle(1)));
        assert_eq!(
            q.drain(),
            vec![
                NativeEvent::ControlActivated(ControlId(100)),
                NativeEvent::WindowCloseRequested(NativeHandle(1)),
            ]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn test_proxy_posts_from_another_thread() {
        let q = EventQueue::new();
        let proxy = q.proxy();
        std::thread::spawn(move || proxy.post(NativeEvent::ControlActivated(ControlId(7))))
            .join()
            .unwrap();
        assert_eq!(q.len(), 1);
    }
}
