use web_time::Instant;

use tether_core::{Frame, ReconcileStats};

pub struct Hud {
    pub inspector_enabled: bool,
    frame_count: u64,
    last_frame: Option<Instant>,
    fps_smooth: f32,
    /// Native traffic summed over every recorded frame.
    pub totals: ReconcileStats,
    pub dropped_total: usize,
    pub last: Option<Frame>,
    pub metrics: Option<Metrics>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            inspector_enabled: false,
            frame_count: 0,
            last_frame: None,
            fps_smooth: 0.0,
            totals: ReconcileStats::default(),
            dropped_total: 0,
            last: None,
            metrics: None,
        }
    }
    pub fn toggle_inspector(&mut self) {
        self.inspector_enabled = !self.inspector_enabled;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn fps(&self) -> f32 {
        self.fps_smooth
    }

    pub fn record(&mut self, frame: &Frame) {
        self.frame_count += 1;
        // FPS
        let now = Instant::now();
        if let Some(prev) = self.last_frame.replace(now) {
            let dt = (now - prev).as_secs_f32();
            if dt > 0.0 {
                let fps = 1.0 / dt;
                // simple EMA
                let a = 0.2;
                self.fps_smooth = if self.fps_smooth == 0.0 {
                    fps
                } else {
                    (1.0 - a) * self.fps_smooth + a * fps
                };
            }
        }
        self.totals.accumulate(&frame.stats);
        self.dropped_total += frame.dropped;
        self.last = Some(frame.clone());
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("frame: {}", self.frame_count),
            format!("fps: {:.1}", self.fps_smooth),
        ];
        if let Some(f) = &self.last {
            let s = &f.stats;
            lines.push(format!("widgets: {} (+{} dropped)", f.declared, f.dropped));
            lines.push(format!(
                "native: +{} ~{} ~{} -{} show {}",
                s.created,
                s.rect_updates,
                s.text_updates,
                s.destroyed,
                s.revealed
            ));
        }
        if let Some(m) = &self.metrics {
            lines.push(format!("frame pass: {:.2} ms", m.frame_ms));
            lines.push(format!("live: {}", m.live_objects));
        }
        lines.join("  |  ")
    }
}

#[derive(Clone, Debug, Default)]
pub struct Metrics {
    pub frame_ms: f32,
    pub live_objects: usize,
}

pub struct Inspector {
    pub hud: Hud,
}
impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    pub fn new() -> Self {
        Self { hud: Hud::new() }
    }

    pub fn enabled(mut self, on: bool) -> Self {
        self.hud.inspector_enabled = on;
        self
    }

    pub fn frame(&mut self, frame: &Frame, metrics: Metrics) {
        if self.hud.inspector_enabled {
            self.hud.metrics = Some(metrics);
            self.hud.record(frame);
            // Quiet frames are the common case; only log when something moved.
            if !frame.stats.is_quiet() || frame.dropped > 0 {
                log::info!("{}", self.hud.summary());
            }
        }
    }
}
