use crate::layout::StackLayout;

/// Sizing and layout knobs for a [`Ui`](crate::Ui).
///
/// Defaults mirror the classic fixed-array sizing: 128 widgets per frame,
/// 128 live native objects, 16 nested window scopes, 127-byte labels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UiConfig {
    /// Widgets accepted per frame; the rest are dropped for that frame.
    pub max_widgets: usize,
    /// Live registry entries (native objects).
    pub max_entries: usize,
    /// Depth of the open-window stack. Exceeding it is a caller bug.
    pub max_window_depth: usize,
    /// Labels longer than this (in bytes) are truncated.
    pub max_label_len: usize,
    pub layout: StackLayout,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_widgets: 128,
            max_entries: 128,
            max_window_depth: 16,
            max_label_len: 127,
            layout: StackLayout::default(),
        }
    }
}

impl UiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_widgets(mut self, n: usize) -> Self {
        self.max_widgets = n;
        self
    }

    pub fn with_max_entries(mut self, n: usize) -> Self {
        self.max_entries = n;
        self
    }

    pub fn with_max_window_depth(mut self, n: usize) -> Self {
        self.max_window_depth = n;
        self
    }

    pub fn with_max_label_len(mut self, n: usize) -> Self {
        self.max_label_len = n;
        self
    }

    pub fn with_layout(mut self, layout: StackLayout) -> Self {
        self.layout = layout;
        self
    }
}
