//! Adapter utilities for the `scrollspy` crate.
//!
//! The `scrollspy` crate is DOM-agnostic and focuses on the activation state machine. This
//! crate provides small, framework-neutral helpers commonly needed by hosts:
//!
//! - [`SimDom`]: an in-memory document (elements, class lists, selectors, extents) for tests,
//!   examples, and render trees without a real DOM
//! - [`Driver`]: glue that maps a host's frame/timer loop onto the engine's entry points
//!
//! This crate is intentionally framework-agnostic (no web-sys/ratatui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod driver;
mod sim;

#[cfg(test)]
mod tests;

pub use driver::Driver;
pub use sim::{SelectorError, SimDom, SimElement};
