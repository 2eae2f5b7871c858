//! A headless bidirectional infinite-scroll engine for image strips.
//!
//! For adapter-level utilities (commit-phase driver, lazy image loading, image source seams),
//! see the `filmstrip-adapter` crate.
//!
//! This crate owns the parts of an infinite carousel that carry real invariants: a bounded
//! sliding window of items fed one page at a time from either edge, single-flight fetching per
//! edge, debounced scroll evaluation with direction detection and prefetch thresholds, and the
//! scroll compensation that keeps prepends and prunes from visibly moving the viewport.
//!
//! It is UI-agnostic and performs no I/O. A UI layer is expected to provide:
//! - scroll events, timestamps, and the current/maximum scroll offset
//! - layout measurements through [`SpanMeasurer`]
//! - execution of [`FetchRequest`]s against an image source
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod debounce;
mod error;
mod options;
mod span;
mod strip;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use debounce::Debounce;
pub use error::{OptionsError, SourceError};
pub use options::StripOptions;
#[cfg(feature = "std")]
pub use span::snap_to_device_pixels;
pub use span::{Extent, FixedSpan, ItemRects, SpanMeasurer};
pub use strip::InfiniteStrip;
pub use types::{
    Compensation, Edge, FetchOutcome, FetchPurpose, FetchRequest, FetchTicket, ImageRecord, Item,
    LoadState, RenderKey, ScrollAdjustment, ScrollMetrics,
};
pub use window::Window;
