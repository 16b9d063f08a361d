//! The seam between the reconciler and a native windowing system.

use crate::error::HostError;
use crate::events::NativeEvent;
use crate::{Rect, WidgetKind};

/// Opaque handle to a native object, minted by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeHandle(pub u64);

/// Command identifier the host reports back in
/// [`NativeEvent::ControlActivated`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub struct CreateParams<'a> {
    pub kind: WidgetKind,
    /// Always `None` for windows; hosts place top-level windows themselves.
    pub parent: Option<NativeHandle>,
    pub text: &'a str,
    pub rect: Rect,
    pub control_id: Option<ControlId>,
    /// Windows start hidden and are revealed once the frame has been
    /// reconciled; child controls start visible.
    pub visible: bool,
}

pub trait NativeHost {
    fn create(&mut self, params: &CreateParams<'_>) -> Result<NativeHandle, HostError>;
    /// Must tolerate handles that were already torn down along with a parent.
    fn destroy(&mut self, handle: NativeHandle);
    fn set_text(&mut self, handle: NativeHandle, text: &str);
    fn set_rect(&mut self, handle: NativeHandle, rect: Rect);
    fn set_visible(&mut self, handle: NativeHandle, visible: bool);
    /// Move every event received since the last call into `out`.
    fn poll_events(&mut self, out: &mut Vec<NativeEvent>);
}

impl<H: NativeHost + ?Sized> NativeHost for &mut H {
    fn create(&mut self, params: &CreateParams<'_>) -> Result<NativeHandle, HostError> {
        (**self).create(params)
    }
    fn destroy(&mut self, handle: NativeHandle) {
        (**self).destroy(handle)
    }
    fn set_text(&mut self, handle: NativeHandle, text: &str) {
        (**self).set_text(handle, text)
    }
    fn set_rect(&mut self, handle: NativeHandle, rect: Rect) {
        (**self).set_rect(handle, rect)
    }
    fn set_visible(&mut self, handle: NativeHandle, visible: bool) {
        (**self).set_visible(handle, visible)
    }
    fn poll_events(&mut self, out: &mut Vec<NativeEvent>) {
        (**self).poll_events(out)
    }
}
