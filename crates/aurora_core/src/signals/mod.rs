//! # Input Signals
//!
//! Latest pointer, scroll and hover state, written by the host's event
//! stream and read by updaters as a copied [`InputSnapshot`].
//!
//! ## Ownership
//!
//! ```text
//!   host events ──► PointerWriter ─┐
//!                   ScrollWriter  ─┼──► SignalBus ──► snapshot() ──► updaters
//!                   HoverWriter   ─┘
//! ```
//!
//! - Each field has exactly one writer handle at a time.
//! - Readers never block writers for longer than one field copy.
//! - Updaters only ever see a snapshot, never the bus itself.

mod bus;
mod hover;
mod pointer;
mod scroll;

pub use bus::{HoverWriter, InputSnapshot, PointerWriter, ScrollWriter, SignalBus};
pub use hover::{HoverId, HoverMask, MAX_HOVER_TARGETS};
pub use pointer::{PointerState, Viewport};
pub use scroll::{ScrollDirection, ScrollState};
