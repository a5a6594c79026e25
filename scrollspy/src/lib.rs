//! A headless scrollspy engine inspired by Bootstrap's ScrollSpy.
//!
//! Given a set of page sections and the current scroll offset, the engine determines which
//! section sits under a configurable detection line and toggles CSS classes on that section
//! and any bound table-of-contents elements, with enter/leave/update callbacks along the way.
//!
//! It is DOM-agnostic. A browser or render-tree layer is expected to provide, via the [`Dom`]
//! trait:
//! - scroll offset and viewport height
//! - element bounding boxes, attributes and class lists
//! - selector queries
//!
//! For a simulated document and host-loop glue, see the `scrollspy-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod classes;
mod dom;
mod line;
mod options;
mod registry;
mod scheduler;
mod spy;
mod types;


pub use dom::Dom;
pub use options::{
    Offset, OptionsOverlay, SectionCallback, Sections, SpyOptions, resolve_options,
};
pub use registry::{Section, SectionSpec, TOC_ATTRIBUTE, TOC_CURRENT_CLASS, TargetRef};
pub use scheduler::{FrameScheduler, Schedule};
pub use spy::ScrollSpy;
pub use types::{ApplyTo, ClassTarget, EnterAt, ScrollDirection, SectionContext};
