//! Diffs a frame's declared widgets against the registry and pushes the
//! minimal set of native calls.

use crate::error::CreateError;
use crate::host::NativeHost;
use crate::registry::Registry;
use crate::DeclaredWidget;

/// Native traffic produced by one reconcile pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub created: usize,
    pub rect_updates: usize,
    pub text_updates: usize,
    pub destroyed: usize,
    pub revealed: usize,
    /// Declared widgets left without a native object this frame.
    pub skipped: usize,
}

impl ReconcileStats {
    /// True when the pass issued no native calls at all.
    pub fn is_quiet(&self) -> bool {
        self.created + self.rect_updates + self.text_updates + self.destroyed + self.revealed == 0
    }

    pub fn accumulate(&mut self, other: &ReconcileStats) {
        self.created += other.created;
        self.rect_updates += other.rect_updates;
        self.text_updates += other.text_updates;
        self.destroyed += other.destroyed;
        self.revealed += other.revealed;
        self.skipped += other.skipped;
    }
}

#[derive(Default)]
pub struct Reconciler {
    frame: u64,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter of the last reconcile pass (0 before the first one).
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn reconcile<H: NativeHost + ?Sized>(
        &mut self,
        widgets: &[DeclaredWidget],
        registry: &mut Registry,
        host: &mut H,
    ) -> ReconcileStats {
        self.frame += 1;
        let frame = self.frame;
        let mut stats = ReconcileStats::default();

        for w in widgets {
            let existing = match registry.key_of(w.id) {
                // Same identity, different kind: the native object can't be
                // reused, so replace it.
                Some(k) if registry.get(k).is_some_and(|e| e.kind != w.kind) => {
                    log::debug!("{} changed kind to {:?}, replacing", w.id, w.kind);
                    registry.destroy(k, host);
                    stats.destroyed += 1;
                    None
                }
                found => found,
            };
            let key = match existing {
                Some(k) => k,
                None => match registry.create(w, host) {
                    Ok(k) => {
                        stats.created += 1;
                        k
                    }
                    Err(e) => {
                        match e {
                            CreateError::MissingParent => {
                                log::debug!("skipping {:?} '{}': {e}", w.kind, w.label)
                            }
                            _ => log::warn!("skipping {:?} '{}': {e}", w.kind, w.label),
                        }
                        stats.skipped += 1;
                        continue;
                    }
                },
            };
            let Some(entry) = registry.get_mut(key) else {
                continue;
            };

            entry.last_seen_frame = frame;
            entry.pressed = false;

            if !w.kind.is_window() && entry.cached_rect != w.rect {
                host.set_rect(entry.handle, w.rect);
                entry.cached_rect = w.rect;
                stats.rect_updates += 1;
            }

            if entry.cached_text != w.label {
                host.set_text(entry.handle, &w.label);
                entry.cached_text.clone_from(&w.label);
                stats.text_updates += 1;
            }
        }

        // Only after every declared widget has been matched, so an entry that
        // is still declared is never torn down and rebuilt in the same frame.
        for key in registry.keys() {
            let Some(entry) = registry.get_mut(key) else {
                continue;
            };
            if entry.last_seen_frame != frame {
                registry.destroy(key, host);
                stats.destroyed += 1;
            } else if !entry.visible {
                host.set_visible(entry.handle, true);
                entry.visible = true;
                stats.revealed += 1;
            }
        }

        log::trace!("reconcile #{frame}: {stats:?}");
        stats
    }
}
