use crate::Rect;

/// Stable identity linking a declared widget to its native counterpart
/// across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:016x}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Window,
    Button,
    Text,
}

impl WidgetKind {
    /// Kinds that produce activation events and therefore get a control id.
    pub fn is_interactive(self) -> bool {
        matches!(self, WidgetKind::Button)
    }

    pub fn is_window(self) -> bool {
        matches!(self, WidgetKind::Window)
    }
}

/// One widget as described by the application in the current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DeclaredWidget {
    pub id: WidgetId,
    pub parent: Option<WidgetId>,
    pub kind: WidgetKind,
    pub label: String,
    /// Zero until the layout pass runs.
    pub rect: Rect,
}

/// Truncates `label` to at most `max_len` bytes without splitting a char.
pub(crate) fn bounded_label(label: &str, max_len: usize) -> String {
    if label.len() <= max_len {
        return label.to_owned();
    }
    let mut end = max_len;
    while !label.is_char_boundary(end) {
        end -= 1;
    }
    label[..end].to_owned()
}
