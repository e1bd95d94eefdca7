//! Host-side services around the core: formatting, listing, delivery.

pub mod emit;
pub mod format;
pub mod listing;

pub use emit::{emit, emit_with, Destination, DestinationKind, EmitHandler, Emitted};
pub use format::{combine, concat_emojis, join_sorted, preview_line, ConcatStyle};
pub use listing::{filter_listing, listing, EmojiListItem};
