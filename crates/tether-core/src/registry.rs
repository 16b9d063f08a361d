//! Persistent table of native objects keyed by widget identity.
//!
//! Entries live in a slot map: removing a dead entry frees its slot for reuse,
//! while a live entry keeps the same slot for as long as its widget keeps
//! being declared.

use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};

use crate::error::CreateError;
use crate::host::{ControlId, CreateParams, NativeHandle, NativeHost};
use crate::{DeclaredWidget, Rect, WidgetId, WidgetKind};

new_key_type! {
    pub struct EntryKey;
}

/// First id handed to interactive controls; lower values are commonly
/// reserved by native toolkits.
pub const FIRST_CONTROL_ID: u32 = 100;

#[derive(Clone, Debug)]
pub struct RegistryEntry {
    pub id: WidgetId,
    pub kind: WidgetKind,
    pub handle: NativeHandle,
    pub last_seen_frame: u64,
    pub control_id: Option<ControlId>,
    /// Read-once: set by an activation event, cleared by the next reconcile.
    pub pressed: bool,
    /// Sticky: set by a close request, never cleared.
    pub closed: bool,
    pub cached_text: String,
    pub cached_rect: Rect,
    pub visible: bool,
}

pub struct Registry {
    entries: SlotMap<EntryKey, RegistryEntry>,
    by_id: HashMap<WidgetId, EntryKey>,
    by_handle: HashMap<NativeHandle, EntryKey>,
    by_control: HashMap<ControlId, EntryKey>,
    next_control_id: u32,
    max_entries: usize,
}

impl Registry {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: SlotMap::with_key(),
            by_id: HashMap::new(),
            by_handle: HashMap::new(),
            by_control: HashMap::new(),
            next_control_id: FIRST_CONTROL_ID,
            max_entries,
        }
    }

    pub fn key_of(&self, id: WidgetId) -> Option<EntryKey> {
        self.by_id.get(&id).copied()
    }

    pub fn find(&self, id: WidgetId) -> Option<&RegistryEntry> {
        self.by_id.get(&id).and_then(|k| self.entries.get(*k))
    }

    pub fn find_mut(&mut self, id: WidgetId) -> Option<&mut RegistryEntry> {
        let k = *self.by_id.get(&id)?;
        self.entries.get_mut(k)
    }

    pub fn find_by_handle(&self, handle: NativeHandle) -> Option<&RegistryEntry> {
        self.by_handle.get(&handle).and_then(|k| self.entries.get(*k))
    }

    pub fn find_by_handle_mut(&mut self, handle: NativeHandle) -> Option<&mut RegistryEntry> {
        let k = *self.by_handle.get(&handle)?;
        self.entries.get_mut(k)
    }

    pub fn find_by_control_id(&self, cid: ControlId) -> Option<&RegistryEntry> {
        self.by_control.get(&cid).and_then(|k| self.entries.get(*k))
    }

    pub fn find_by_control_id_mut(&mut self, cid: ControlId) -> Option<&mut RegistryEntry> {
        let k = *self.by_control.get(&cid)?;
        self.entries.get_mut(k)
    }

    pub fn get(&self, key: EntryKey) -> Option<&RegistryEntry> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: EntryKey) -> Option<&mut RegistryEntry> {
        self.entries.get_mut(key)
    }

    /// Creates the native object for `widget` and registers it.
    pub fn create<H: NativeHost + ?Sized>(
        &mut self,
        widget: &DeclaredWidget,
        host: &mut H,
    ) -> Result<EntryKey, CreateError> {
        debug_assert!(!self.by_id.contains_key(&widget.id));
        if self.entries.len() >= self.max_entries {
            return Err(CreateError::Capacity {
                limit: self.max_entries,
            });
        }

        let parent = if widget.kind.is_window() {
            None
        } else {
            let parent = widget
                .parent
                .and_then(|p| self.find(p))
                .filter(|p| p.kind.is_window())
                .map(|p| p.handle);
            match parent {
                Some(h) => Some(h),
                None => return Err(CreateError::MissingParent),
            }
        };

        let control_id = if widget.kind.is_interactive() {
            Some(self.peek_control_id())
        } else {
            None
        };
        let visible = !widget.kind.is_window();

        let handle = host.create(&CreateParams {
            kind: widget.kind,
            parent,
            text: &widget.label,
            rect: widget.rect,
            control_id,
            visible,
        })?;

        // Only consume the id once the host accepted it.
        if control_id.is_some() {
            self.next_control_id += 1;
        }

        let key = self.entries.insert(RegistryEntry {
            id: widget.id,
            kind: widget.kind,
            handle,
            last_seen_frame: 0,
            control_id,
            pressed: false,
            closed: false,
            cached_text: widget.label.clone(),
            cached_rect: widget.rect,
            visible,
        });
        self.by_id.insert(widget.id, key);
        self.by_handle.insert(handle, key);
        if let Some(cid) = control_id {
            self.by_control.insert(cid, key);
        }
        log::debug!(
            "created {:?} {} '{}' as {:?}",
            widget.kind,
            widget.id,
            widget.label,
            handle
        );
        Ok(key)
    }

    fn peek_control_id(&self) -> ControlId {
        ControlId(self.next_control_id)
    }

    /// Destroys the native object and frees the entry's slot.
    pub fn destroy<H: NativeHost + ?Sized>(
        &mut self,
        key: EntryKey,
        host: &mut H,
    ) -> Option<RegistryEntry> {
        let entry = self.entries.remove(key)?;
        host.destroy(entry.handle);
        self.by_id.remove(&entry.id);
        self.by_handle.remove(&entry.handle);
        if let Some(cid) = entry.control_id {
            self.by_control.remove(&cid);
        }
        log::debug!("destroyed {:?} {} ({:?})", entry.kind, entry.id, entry.handle);
        Some(entry)
    }

    /// Destroys every live entry; children before their windows.
    pub fn destroy_all<H: NativeHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let mut keys: Vec<EntryKey> = self.entries.keys().collect();
        keys.sort_by_key(|k| self.entries[*k].kind.is_window());
        let n = keys.len();
        for k in keys {
            self.destroy(k, host);
        }
        n
    }

    pub fn keys(&self) -> Vec<EntryKey> {
        self.entries.keys().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
