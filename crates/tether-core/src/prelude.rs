pub use crate::{
    ControlId, Frame, FrameCtx, NativeEvent, NativeHandle, NativeHost, QuitFlag, Rect, Ui,
    UiConfig, WidgetId, WidgetKind,
};
