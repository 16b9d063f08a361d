//! In-memory [`NativeHost`] that records every call.
//!
//! Used by the test suites and by tooling that wants to drive a `Ui` without
//! a windowing system. Events are injected with [`RecordingHost::push_event`]
//! (or the `activate`/`request_close` shorthands) and handed to the `Ui` on
//! the next frame, exactly like a native message pump would.

use std::collections::BTreeMap;

use crate::error::HostError;
use crate::events::NativeEvent;
use crate::host::{ControlId, CreateParams, NativeHandle, NativeHost};
use crate::{Rect, WidgetKind};

#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    Create {
        handle: NativeHandle,
        kind: WidgetKind,
        parent: Option<NativeHandle>,
        text: String,
        rect: Rect,
        control_id: Option<ControlId>,
    },
    Destroy(NativeHandle),
    SetText(NativeHandle, String),
    SetRect(NativeHandle, Rect),
    SetVisible(NativeHandle, bool),
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessObject {
    pub kind: WidgetKind,
    pub parent: Option<NativeHandle>,
    pub text: String,
    pub rect: Rect,
    pub control_id: Option<ControlId>,
    pub visible: bool,
}

#[derive(Default)]
pub struct RecordingHost {
    objects: BTreeMap<NativeHandle, HeadlessObject>,
    calls: Vec<HostCall>,
    pending: Vec<NativeEvent>,
    next_handle: u64,
    failing_creates: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            ..Default::default()
        }
    }

    /// Make the next `n` create requests fail.
    pub fn fail_creates(&mut self, n: usize) {
        self.failing_creates = n;
    }

    pub fn push_event(&mut self, ev: NativeEvent) {
        self.pending.push(ev);
    }

    pub fn activate(&mut self, cid: ControlId) {
        self.push_event(NativeEvent::ControlActivated(cid));
    }

    pub fn request_close(&mut self, handle: NativeHandle) {
        self.push_event(NativeEvent::WindowCloseRequested(handle));
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn create_count(&self) -> usize {
        self.count(|c| matches!(c, HostCall::Create { .. }))
    }

    pub fn destroy_count(&self) -> usize {
        self.count(|c| matches!(c, HostCall::Destroy(_)))
    }

    pub fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn object(&self, handle: NativeHandle) -> Option<&HeadlessObject> {
        self.objects.get(&handle)
    }

    pub fn is_live(&self, handle: NativeHandle) -> bool {
        self.objects.contains_key(&handle)
    }

    pub fn live_count(&self) -> usize {
        self.objects.len()
    }

    pub fn parent_of(&self, handle: NativeHandle) -> Option<NativeHandle> {
        self.objects.get(&handle).and_then(|o| o.parent)
    }

    /// First live object of `kind` showing `text`.
    pub fn find(&self, kind: WidgetKind, text: &str) -> Option<NativeHandle> {
        self.objects
            .iter()
            .find(|(_, o)| o.kind == kind && o.text == text)
            .map(|(h, _)| *h)
    }

    pub fn control_id_of(&self, handle: NativeHandle) -> Option<ControlId> {
        self.objects.get(&handle).and_then(|o| o.control_id)
    }
}

impl NativeHost for RecordingHost {
    fn create(&mut self, params: &CreateParams<'_>) -> Result<NativeHandle, HostError> {
        if self.failing_creates > 0 {
            self.failing_creates -= 1;
            return Err(HostError::new(format!(
                "injected failure creating {:?} '{}'",
                params.kind, params.text
            )));
        }
        if let Some(p) = params.parent {
            if !self.objects.contains_key(&p) {
                return Err(HostError::new(format!("parent {p:?} does not exist")));
            }
        }
        let handle = NativeHandle(self.next_handle);
        self.next_handle += 1;
        self.objects.insert(
            handle,
            HeadlessObject {
                kind: params.kind,
                parent: params.parent,
                text: params.text.to_owned(),
                rect: params.rect,
                control_id: params.control_id,
                visible: params.visible,
            },
        );
        self.calls.push(HostCall::Create {
            handle,
            kind: params.kind,
            parent: params.parent,
            text: params.text.to_owned(),
            rect: params.rect,
            control_id: params.control_id,
        });
        Ok(handle)
    }

    fn destroy(&mut self, handle: NativeHandle) {
        self.calls.push(HostCall::Destroy(handle));
        if self.objects.remove(&handle).is_some() {
            // Children go down with their parent.
            self.objects.retain(|_, o| o.parent != Some(handle));
        }
    }

    fn set_text(&mut self, handle: NativeHandle, text: &str) {
        self.calls.push(HostCall::SetText(handle, text.to_owned()));
        if let Some(o) = self.objects.get_mut(&handle) {
            o.text = text.to_owned();
        }
    }

    fn set_rect(&mut self, handle: NativeHandle, rect: Rect) {
        self.calls.push(HostCall::SetRect(handle, rect));
        if let Some(o) = self.objects.get_mut(&handle) {
            o.rect = rect;
        }
    }

    fn set_visible(&mut self, handle: NativeHandle, visible: bool) {
        self.calls.push(HostCall::SetVisible(handle, visible));
        if let Some(o) = self.objects.get_mut(&handle) {
            o.visible = visible;
        }
    }

    fn poll_events(&mut self, out: &mut Vec<NativeEvent>) {
        out.append(&mut self.pending);
    }
}
