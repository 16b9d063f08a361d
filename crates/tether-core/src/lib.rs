//! # Frames, Identity, and Reconciliation
//!
//! Tether maps immediate-mode widget calls onto persistent native objects.
//! The application re-declares its whole UI every frame; Tether keeps the
//! native windows and controls that back those declarations alive across
//! frames and feeds native events back into the next frame's calls.
//!
//! ```rust
//! use tether_core::*;
//! use tether_core::headless::RecordingHost;
//!
//! let mut ui = Ui::new();
//! let mut host = RecordingHost::new();
//!
//! let frame = ui.frame(&mut host, |ui| {
//!     ui.window("Counter", |ui| {
//!         if ui.button("Increment") {
//!             // runs on the frame after the native button was clicked
//!         }
//!         ui.text("Count: 0");
//!     });
//! });
//! assert_eq!(frame.stats.created, 3);
//! ```
//!
//! ## One frame
//!
//! `Ui::frame` runs, in order:
//!
//! 1. poll the host and apply all pending `NativeEvent`s to the registry;
//! 2. clear the frame buffer and run the build closure;
//! 3. lay the widgets out (`StackLayout`);
//! 4. reconcile against the registry: create what is new, update changed
//!    text/rects, destroy what was not declared, reveal new windows.
//!
//! ## Identity
//!
//! A widget's identity is a hash of its parent window, its key (the label by
//! default, or an explicit key via the `*_keyed` calls) and how many times
//! that key already appeared under the same parent this frame. The same
//! sequence of calls produces the same identities every frame.
//!
//! ## Event feedback
//!
//! - `button` returns true for exactly one frame after an activation.
//! - `begin_window` returns false forever once a close was requested.

pub mod config;
pub mod error;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod headless;
pub mod host;
pub mod layout;
pub mod prelude;
pub mod reconcile;
pub mod registry;
pub mod runtime;
pub mod tests;
pub mod widget;

pub use config::*;
pub use error::*;
pub use events::{EventProxy, NativeEvent};
pub use geometry::*;
pub use host::*;
pub use layout::StackLayout;
pub use reconcile::ReconcileStats;
pub use runtime::*;
pub use widget::*;
