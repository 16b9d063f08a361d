use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::events::{self, EventProxy, EventQueue, NativeEvent};
use crate::frame::FrameBuffer;
use crate::host::NativeHost;
use crate::reconcile::{ReconcileStats, Reconciler};
use crate::registry::Registry;
use crate::{DeclaredWidget, UiConfig, WidgetKind};

/// Shared "please stop" flag. Set by [`FrameCtx::request_quit`], read by the
/// event pump between frames. Never reset.
#[derive(Clone, Default, Debug)]
pub struct QuitFlag(Arc<AtomicBool>);

impl QuitFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Frame — outcome of one `Ui::frame` pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Reconcile counter of this frame, starting at 1.
    pub index: u64,
    /// Events applied before the frame ran.
    pub events_applied: usize,
    pub declared: usize,
    pub dropped: usize,
    pub stats: ReconcileStats,
    pub quit_requested: bool,
}

/// Owns everything that persists between frames: the widget registry, the
/// pending event queue and the quit flag. One `Ui` per independent UI; it is
/// driven from a single thread.
pub struct Ui {
    config: UiConfig,
    buffer: FrameBuffer,
    registry: Registry,
    reconciler: Reconciler,
    events: EventQueue,
    quit: QuitFlag,
    scratch: Vec<NativeEvent>,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    pub fn new() -> Self {
        Self::with_config(UiConfig::default())
    }

    pub fn with_config(config: UiConfig) -> Self {
        Self {
            buffer: FrameBuffer::new(&config),
            registry: Registry::new(config.max_entries),
            reconciler: Reconciler::new(),
            events: EventQueue::new(),
            quit: QuitFlag::new(),
            scratch: Vec::new(),
            config,
        }
    }

    /// Runs one frame: applies pending events, rebuilds the widget list with
    /// `build`, lays it out and reconciles it against `host`.
    pub fn frame<H, F>(&mut self, host: &mut H, build: F) -> Frame
    where
        H: NativeHost + ?Sized,
        F: FnOnce(&mut FrameCtx<'_>),
    {
        host.poll_events(&mut self.scratch);
        self.events.extend(self.scratch.drain(..));
        let events_applied = self.apply_events();

        self.buffer.begin_frame();
        {
            let mut ctx = FrameCtx {
                buffer: &mut self.buffer,
                registry: &self.registry,
                quit: &self.quit,
                frame: self.reconciler.frame() + 1,
            };
            build(&mut ctx);
        }
        self.buffer.close_open_scopes();

        self.config.layout.apply(self.buffer.widgets_mut());
        let stats = self
            .reconciler
            .reconcile(self.buffer.widgets(), &mut self.registry, host);

        Frame {
            index: self.reconciler.frame(),
            events_applied,
            declared: self.buffer.len(),
            dropped: self.buffer.dropped(),
            stats,
            quit_requested: self.quit.is_set(),
        }
    }

    /// Applies every queued event to the registry; returns how many matched
    /// a live entry.
    pub fn apply_events(&mut self) -> usize {
        self.events
            .drain()
            .into_iter()
            .filter(|ev| events::apply(&mut self.registry, *ev))
            .count()
    }

    /// Queues an event for the next frame.
    pub fn post_event(&self, ev: NativeEvent) {
        self.events.push(ev);
    }

    pub fn event_proxy(&self) -> EventProxy {
        self.events.proxy()
    }

    pub fn quit_flag(&self) -> QuitFlag {
        self.quit.clone()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit.is_set()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Widgets declared by the most recent frame, with their layout rects.
    pub fn widgets(&self) -> &[DeclaredWidget] {
        self.buffer.widgets()
    }

    pub fn frame_index(&self) -> u64 {
        self.reconciler.frame()
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Destroys every native object this `Ui` created.
    pub fn shutdown<H: NativeHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let n = self.registry.destroy_all(host);
        log::info!("ui shut down; destroyed {n} native object(s)");
        n
    }
}

/// Handle given to the application while it declares a frame.
///
/// Every call appends to the frame's widget list and immediately reads the
/// state the registry holds for that identity from previous frames.
pub struct FrameCtx<'a> {
    buffer: &'a mut FrameBuffer,
    registry: &'a Registry,
    quit: &'a QuitFlag,
    frame: u64,
}

impl FrameCtx<'_> {
    /// Opens a window scope. Returns false once the user has asked to close
    /// the window; the caller should skip its contents (and usually quit).
    /// Always pair with [`end_window`](Self::end_window).
    pub fn begin_window(&mut self, title: &str) -> bool {
        self.begin_window_keyed(title, title)
    }

    pub fn begin_window_keyed(&mut self, key: &str, title: &str) -> bool {
        let d = self.buffer.declare(WidgetKind::Window, key, title);
        self.buffer.push_window_scope(d.id);
        self.registry.find(d.id).is_none_or(|e| !e.closed)
    }

    pub fn end_window(&mut self) {
        self.buffer.pop_window_scope();
    }

    /// `begin_window` + `end_window`, running `body` only while the window is
    /// open.
    pub fn window(&mut self, title: &str, body: impl FnOnce(&mut Self)) -> bool {
        let open = self.begin_window(title);
        if open {
            body(self);
        }
        self.end_window();
        open
    }

    /// True on the frame right after the button was activated.
    pub fn button(&mut self, label: &str) -> bool {
        self.button_keyed(label, label)
    }

    pub fn button_keyed(&mut self, key: &str, label: &str) -> bool {
        let d = self.buffer.declare(WidgetKind::Button, key, label);
        if !d.accepted {
            return false;
        }
        self.registry.find(d.id).is_some_and(|e| e.pressed)
    }

    pub fn text(&mut self, label: &str) {
        self.text_keyed(label, label);
    }

    /// Text whose identity comes from `key`, so changing `label` updates the
    /// native control instead of replacing it.
    pub fn text_keyed(&mut self, key: &str, label: &str) {
        self.buffer.declare(WidgetKind::Text, key, label);
    }

    pub fn request_quit(&mut self) {
        if !self.quit.is_set() {
            log::info!("quit requested");
        }
        self.quit.request();
    }

    pub fn quit_requested(&self) -> bool {
        self.quit.is_set()
    }

    /// Index the frame being declared will get once reconciled.
    pub fn frame_index(&self) -> u64 {
        self.frame
    }
}
