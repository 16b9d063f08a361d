//! Fixed vertical stacking.
//!
//! This is a placeholder policy, not a layout engine: every widget in the
//! frame gets the same size and is placed one slot below the previous one,
//! regardless of which window it belongs to. Windows take a slot too, but the
//! reconciler never pushes their rect (the native host places top-level
//! windows).

use crate::{DeclaredWidget, Rect, Size, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackLayout {
    pub origin: Vec2,
    pub size: Size,
    pub gap: f32,
}

impl Default for StackLayout {
    fn default() -> Self {
        Self {
            origin: Vec2 { x: 5.0, y: 5.0 },
            size: Size {
                width: 100.0,
                height: 30.0,
            },
            gap: 5.0,
        }
    }
}

impl StackLayout {
    /// Rect of the `index`-th slot.
    pub fn slot(&self, index: usize) -> Rect {
        let step = self.size.height + self.gap;
        Rect {
            x: self.origin.x,
            y: self.origin.y + step * index as f32,
            w: self.size.width,
            h: self.size.height,
        }
    }

    pub fn apply(&self, widgets: &mut [DeclaredWidget]) {
        let mut rect = self.slot(0);
        for w in widgets.iter_mut() {
            w.rect = rect;
            rect.y += rect.h;
            rect.y += self.gap;
        }
    }
}
