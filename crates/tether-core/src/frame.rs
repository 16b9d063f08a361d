//! Per-frame widget list and identity assignment.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::widget::bounded_label;
use crate::{DeclaredWidget, Rect, UiConfig, WidgetId, WidgetKind};

// Fixed seeds: identities only have to be stable for a given call sequence,
// but tests and logs are easier to follow when they don't change per run.
const ID_SEEDS: [u64; 4] = [
    0x7465_7468_6572_0001,
    0x9e37_79b9_7f4a_7c15,
    0xc2b2_ae3d_27d4_eb4f,
    0x1656_67b1_9e37_79f9,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub id: WidgetId,
    /// False when the buffer was full and the widget was dropped this frame.
    pub accepted: bool,
}

pub struct FrameBuffer {
    widgets: Vec<DeclaredWidget>,
    scopes: SmallVec<[WidgetId; 16]>,
    // (parent, key) hash -> times seen this frame
    occurrences: HashMap<u64, u32>,
    hasher: ahash::RandomState,
    max_widgets: usize,
    max_depth: usize,
    max_label_len: usize,
    dropped: usize,
}

impl FrameBuffer {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            widgets: Vec::with_capacity(config.max_widgets),
            scopes: SmallVec::new(),
            occurrences: HashMap::new(),
            hasher: ahash::RandomState::with_seeds(ID_SEEDS[0], ID_SEEDS[1], ID_SEEDS[2], ID_SEEDS[3]),
            max_widgets: config.max_widgets,
            max_depth: config.max_window_depth,
            max_label_len: config.max_label_len,
            dropped: 0,
        }
    }

    pub fn begin_frame(&mut self) {
        self.widgets.clear();
        self.scopes.clear();
        self.occurrences.clear();
        self.dropped = 0;
    }

    /// Identity for `key` under the current window scope.
    ///
    /// Repeating the same key under the same parent within one frame yields
    /// distinct ids (the occurrence index is part of the hash), and the same
    /// sequence of calls yields the same ids every frame.
    fn identity(&mut self, key: &str) -> WidgetId {
        let parent = self.current_parent().map(|p| p.0);
        let base = self.hasher.hash_one((parent, key));
        let n = self.occurrences.entry(base).or_insert(0);
        let occurrence = *n;
        *n += 1;
        WidgetId(self.hasher.hash_one((base, occurrence)))
    }

    pub fn declare(&mut self, kind: WidgetKind, key: &str, label: &str) -> Declaration {
        let id = self.identity(key);
        if self.widgets.len() >= self.max_widgets {
            if self.dropped == 0 {
                log::warn!(
                    "frame buffer full ({} widgets); dropping {:?} '{}' and any later widgets",
                    self.max_widgets,
                    kind,
                    label
                );
            }
            self.dropped += 1;
            return Declaration {
                id,
                accepted: false,
            };
        }
        self.widgets.push(DeclaredWidget {
            id,
            parent: self.current_parent(),
            kind,
            label: bounded_label(label, self.max_label_len),
            rect: Rect::ZERO,
        });
        Declaration { id, accepted: true }
    }

    /// Panics when nesting exceeds the configured depth.
    pub fn push_window_scope(&mut self, id: WidgetId) {
        assert!(
            self.scopes.len() < self.max_depth,
            "window scope overflow: more than {} nested begin_window calls",
            self.max_depth
        );
        self.scopes.push(id);
    }

    /// Panics on underflow (end_window without begin_window).
    pub fn pop_window_scope(&mut self) -> WidgetId {
        match self.scopes.pop() {
            Some(id) => id,
            None => panic!("end_window called without a matching begin_window"),
        }
    }

    /// Closes scopes left open at the end of a frame; returns how many.
    pub fn close_open_scopes(&mut self) -> usize {
        let open = self.scopes.len();
        if open > 0 {
            log::warn!("{open} window scope(s) still open at end of frame; closing");
            self.scopes.clear();
        }
        open
    }

    pub fn current_parent(&self) -> Option<WidgetId> {
        self.scopes.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn widgets(&self) -> &[DeclaredWidget] {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut [DeclaredWidget] {
        &mut self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Widgets rejected this frame because the buffer was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
