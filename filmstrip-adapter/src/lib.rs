//! Adapter utilities for the `filmstrip` crate.
//!
//! The `filmstrip` crate is UI-agnostic and performs no I/O. This crate provides the
//! framework-neutral pieces an adapter needs around it:
//!
//! - A commit-phase [`Controller`] that applies scroll compensation before paint
//! - Lazy image activation for mounted placeholders ([`VisibilityLoader`])
//! - The [`ImageSource`] seam, plus decoding for a curated photo feed (`json` feature)
//! - JSON configuration for [`filmstrip::StripOptions`] (`json` feature)
//!
//! No HTTP client or UI toolkit is bundled; hosts bring their own.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

#[cfg(feature = "json")]
mod config;
mod controller;
mod key;
mod source;
mod surface;
mod visibility;


#[cfg(feature = "json")]
pub use config::{ConfigError, options_from_json, options_to_json};
pub use controller::Controller;
#[cfg(feature = "json")]
pub use source::{curated_url, decode_curated};
pub use source::{ImageSource, check_status, resolve};
pub use surface::{ScrollSurface, SimulatedSurface};
pub use visibility::{Activation, VisibilityLoader};
