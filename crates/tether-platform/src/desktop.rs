//! Desktop host on winit.
//!
//! Window widgets become real top-level windows. Buttons and texts are child
//! controls the host tracks itself: they have a rect inside their window and
//! a left click released over a visible button reports
//! [`NativeEvent::ControlActivated`]. Controls are not painted.

use std::collections::HashMap;

use tether_core::*;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::{AppRunner, RunConfig, RunState};

struct DesktopWindow {
    window: Window,
    cursor: Vec2,
    // Button under the cursor when the left button went down.
    armed: Option<NativeHandle>,
}

#[derive(Clone, Debug)]
struct Control {
    parent: NativeHandle,
    kind: WidgetKind,
    text: String,
    rect: Rect,
    control_id: Option<ControlId>,
    visible: bool,
}

/// Native objects and queued events; outlives every [`DesktopHost`].
pub struct DesktopState {
    next_handle: u64,
    windows: HashMap<NativeHandle, DesktopWindow>,
    by_window_id: HashMap<WindowId, NativeHandle>,
    controls: HashMap<NativeHandle, Control>,
    pending: Vec<NativeEvent>,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopState {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            windows: HashMap::new(),
            by_window_id: HashMap::new(),
            controls: HashMap::new(),
            pending: Vec::new(),
        }
    }

    fn alloc_handle(&mut self) -> NativeHandle {
        let h = NativeHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    /// Translates a winit event into zero or more [`NativeEvent`]s.
    pub fn window_event(&mut self, id: WindowId, event: &WindowEvent) {
        let Some(handle) = self.by_window_id.get(&id).copied() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested");
                self.pending.push(NativeEvent::WindowCloseRequested(handle));
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(w) = self.windows.get_mut(&handle) {
                    w.cursor = logical_cursor(*position, w.window.scale_factor());
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let Some(cursor) = self.windows.get(&handle).map(|w| w.cursor) else {
                    return;
                };
                let hit = hit_button(&self.controls, handle, cursor);
                let Some(w) = self.windows.get_mut(&handle) else {
                    return;
                };
                match state {
                    ElementState::Pressed => w.armed = hit,
                    ElementState::Released => {
                        let armed = w.armed.take();
                        if let Some(h) = hit.filter(|h| Some(*h) == armed) {
                            if let Some(c) = self.controls.get(&h) {
                                if let Some(cid) = c.control_id {
                                    log::debug!("button '{}' activated", c.text);
                                    self.pending.push(NativeEvent::ControlActivated(cid));
                                }
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

// Control rects are in logical pixels, winit reports the cursor in physical.
fn logical_cursor(position: PhysicalPosition<f64>, scale_factor: f64) -> Vec2 {
    let p = position.to_logical::<f32>(scale_factor);
    Vec2 { x: p.x, y: p.y }
}

/// Topmost visible button of `window` containing `p`. Later controls are
/// drawn over earlier ones, so the highest handle wins.
fn hit_button(
    controls: &HashMap<NativeHandle, Control>,
    window: NativeHandle,
    p: Vec2,
) -> Option<NativeHandle> {
    controls
        .iter()
        .filter(|(_, c)| {
            c.parent == window && c.visible && c.kind == WidgetKind::Button && c.rect.contains(p)
        })
        .map(|(h, _)| *h)
        .max()
}

/// A [`NativeHost`] for the duration of one frame; window creation needs the
/// active event loop.
pub struct DesktopHost<'a> {
    el: &'a ActiveEventLoop,
    state: &'a mut DesktopState,
}

impl<'a> DesktopHost<'a> {
    pub fn new(el: &'a ActiveEventLoop, state: &'a mut DesktopState) -> Self {
        Self { el, state }
    }
}

impl NativeHost for DesktopHost<'_> {
    fn create(&mut self, params: &CreateParams<'_>) -> Result<NativeHandle, HostError> {
        match params.kind {
            WidgetKind::Window => {
                let attrs = Window::default_attributes()
                    .with_title(params.text)
                    .with_inner_size(LogicalSize::new(640.0, 480.0))
                    .with_visible(params.visible);
                let window = self
                    .el
                    .create_window(attrs)
                    .map_err(|e| HostError::new(e.to_string()))?;
                let handle = self.state.alloc_handle();
                self.state.by_window_id.insert(window.id(), handle);
                self.state.windows.insert(
                    handle,
                    DesktopWindow {
                        window,
                        cursor: Vec2::default(),
                        armed: None,
                    },
                );
                Ok(handle)
            }
            kind => {
                let parent = params
                    .parent
                    .filter(|p| self.state.windows.contains_key(p))
                    .ok_or_else(|| HostError::new(format!("{kind:?} needs a live parent window")))?;
                let handle = self.state.alloc_handle();
                self.state.controls.insert(
                    handle,
                    Control {
                        parent,
                        kind,
                        text: params.text.to_owned(),
                        rect: params.rect,
                        control_id: params.control_id,
                        visible: params.visible,
                    },
                );
                Ok(handle)
            }
        }
    }

    fn destroy(&mut self, handle: NativeHandle) {
        if let Some(w) = self.state.windows.remove(&handle) {
            self.state.by_window_id.remove(&w.window.id());
            self.state.controls.retain(|_, c| c.parent != handle);
            // Dropping the winit window closes it.
        } else {
            self.state.controls.remove(&handle);
        }
    }

    fn set_text(&mut self, handle: NativeHandle, text: &str) {
        if let Some(w) = self.state.windows.get(&handle) {
            w.window.set_title(text);
        } else if let Some(c) = self.state.controls.get_mut(&handle) {
            c.text = text.to_owned();
        }
    }

    fn set_rect(&mut self, handle: NativeHandle, rect: Rect) {
        if let Some(c) = self.state.controls.get_mut(&handle) {
            c.rect = rect;
        }
    }

    fn set_visible(&mut self, handle: NativeHandle, visible: bool) {
        if let Some(w) = self.state.windows.get(&handle) {
            w.window.set_visible(visible);
        } else if let Some(c) = self.state.controls.get_mut(&handle) {
            c.visible = visible;
        }
    }

    fn poll_events(&mut self, out: &mut Vec<NativeEvent>) {
        out.append(&mut self.state.pending);
    }
}

struct App {
    runner: AppRunner,
    state: DesktopState,
    resumed: bool,
    exiting: bool,
}

impl ApplicationHandler<()> for App {
    fn resumed(&mut self, el: &ActiveEventLoop) {
        el.set_control_flow(ControlFlow::Wait);
        self.resumed = true;
    }

    fn window_event(&mut self, _el: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        self.state.window_event(id, &event);
    }

    // One frame per dispatched batch of events.
    fn about_to_wait(&mut self, el: &ActiveEventLoop) {
        if !self.resumed || self.exiting {
            return;
        }
        let mut host = DesktopHost::new(el, &mut self.state);
        if self.runner.step(&mut host) == RunState::Exit {
            self.exiting = true;
            self.runner.shutdown(&mut host);
            el.exit();
        }
    }
}

pub fn run_desktop_app(app: impl FnMut(&mut FrameCtx<'_>) + 'static) -> anyhow::Result<()> {
    run_desktop_app_with(RunConfig::from_env(), app)
}

pub fn run_desktop_app_with(
    config: RunConfig,
    app: impl FnMut(&mut FrameCtx<'_>) + 'static,
) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App {
        runner: AppRunner::new(config, app),
        state: DesktopState::new(),
        resumed: false,
        exiting: false,
    };
    event_loop.run_app(&mut app)?;
    log::info!("event loop finished");
    Ok(())
}
