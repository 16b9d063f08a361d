//! Platform runners (desktop via winit) and the glue that pumps frames.
//!
//! [`AppRunner`] owns a [`Ui`] plus the application's frame function and runs
//! one frame per call to [`AppRunner::step`]. Platform loops call `step` once
//! per dispatched batch of native events and stop when it returns
//! [`RunState::Exit`].

use tether_core::*;
use tether_devtools::{Inspector, Metrics};
use web_time::Instant;

#[cfg(feature = "desktop")]
pub mod desktop;
#[cfg(feature = "desktop")]
pub use desktop::{run_desktop_app, run_desktop_app_with};

/// Environment variable that turns the frame inspector on (`1`/`true`).
pub const INSPECTOR_ENV: &str = "TETHER_INSPECTOR";

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    pub ui: UiConfig,
    /// Log a reconcile summary for every frame that touched native objects.
    pub inspector: bool,
}

impl RunConfig {
    /// Defaults, with the inspector switched by [`INSPECTOR_ENV`].
    pub fn from_env() -> Self {
        let inspector = std::env::var(INSPECTOR_ENV)
            .map(|v| matches!(v.trim(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);
        Self {
            inspector,
            ..Self::default()
        }
    }

    pub fn with_ui(mut self, ui: UiConfig) -> Self {
        self.ui = ui;
        self
    }

    pub fn with_inspector(mut self, on: bool) -> Self {
        self.inspector = on;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Continue,
    Exit,
}

pub struct AppRunner {
    ui: Ui,
    app: Box<dyn FnMut(&mut FrameCtx<'_>)>,
    inspector: Inspector,
}

impl AppRunner {
    pub fn new(config: RunConfig, app: impl FnMut(&mut FrameCtx<'_>) + 'static) -> Self {
        Self {
            ui: Ui::with_config(config.ui),
            app: Box::new(app),
            inspector: Inspector::new().enabled(config.inspector),
        }
    }

    /// Runs one frame against `host`. Returns `Exit` once the application
    /// has requested quit (no further frames are run after that).
    pub fn step<H: NativeHost + ?Sized>(&mut self, host: &mut H) -> RunState {
        if self.ui.quit_requested() {
            return RunState::Exit;
        }
        let t0 = Instant::now();
        let app = &mut self.app;
        let frame = self.ui.frame(host, |ctx| app(ctx));
        let metrics = Metrics {
            frame_ms: t0.elapsed().as_secs_f32() * 1000.0,
            live_objects: self.ui.registry().len(),
        };
        self.inspector.frame(&frame, metrics);

        if frame.quit_requested {
            log::info!("quit requested on frame {}", frame.index);
            RunState::Exit
        } else {
            RunState::Continue
        }
    }

    /// Steps up to `max_frames` times, stopping early on quit. Returns the
    /// state after the last frame.
    pub fn run_frames<H: NativeHost + ?Sized>(&mut self, host: &mut H, max_frames: usize) -> RunState {
        for _ in 0..max_frames {
            if self.step(host) == RunState::Exit {
                return RunState::Exit;
            }
        }
        RunState::Continue
    }

    /// Tears down every native object the UI created.
    pub fn shutdown<H: NativeHost + ?Sized>(&mut self, host: &mut H) -> usize {
        self.ui.shutdown(host)
    }

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    pub fn quit_flag(&self) -> QuitFlag {
        self.ui.quit_flag()
    }

    pub fn event_proxy(&self) -> EventProxy {
        self.ui.event_proxy()
    }

    pub fn inspector(&self) -> &Inspector {
        &self.inspector
    }
}
