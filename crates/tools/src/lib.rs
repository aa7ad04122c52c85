//! Developer tooling: chunk border overlay, stream inspector, pass timing.
//!
//! # Invariants
//! - Everything here reads streamer state through shared borrows and never
//!   feeds state back into it.

mod inspector;
mod overlay;
mod timer;

pub use inspector::{ChunkInfo, StreamInspector, StreamSummary};
pub use overlay::{
    BorderBox, BorderKind, BorderOverlay, LOOKAHEAD_COLOR, RESIDENT_COLOR, lookahead_ring,
};
pub use timer::PassTimer;

pub fn crate_info() -> &'static str {
    "chunkwell-tools v0.1.0"
}
