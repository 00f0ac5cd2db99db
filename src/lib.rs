//! Coordinate mappers for displays built from chained LED panels (HUB75-style).
//!
//! # Glossary
//!
//! - **Panel:** one rectangular LED module. All panels on a display are the same size.
//! - **Chain:** panels wired in series on one connector. `chain` is how many.
//! - **Parallel:** independent chains driven side by side. `parallel` is how many.
//! - **Physical matrix:** the `(chain × panel width) × (parallel × panel height)`
//!   pixel space the driver actually scans.
//! - **Visible canvas:** the pixel space the application draws in.
//!
//! A [`PixelMapper`] turns visible coordinates into physical ones. Mappers are
//! looked up by name in a [`Registry`], can be stacked in a [`Pipeline`], and
//! plug into `embedded-graphics` through [`MappedTarget`].
//!
//! ```rust
//! use panel_mapper::{PixelMapper, Registry};
//!
//! // Six panels wired as three parallel chains of two, used as one long row.
//! let registry = Registry::new();
//! let row = registry.find("Row-mapper", 2, 3, "")?.into_mapper();
//! assert_eq!(row.visible_size(128, 96)?, (384, 32));
//! assert_eq!(row.to_physical(128, 96, 130, 5), (2, 37));
//! # Ok::<(), panel_mapper::Error>(())
//! ```
#![cfg_attr(not(feature = "host"), no_std)]

// Must come first: the logging macros are textually scoped.
mod fmt;

mod error;
pub mod mapped_target;
#[cfg(feature = "host")]
pub mod physical_frame;
pub mod pipeline;
pub mod pixel_mapper;
pub mod registry;
#[cfg(feature = "host")]
pub mod to_png;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, NAME_CAPACITY, NameText, Result};
pub use crate::mapped_target::MappedTarget;
pub use crate::pipeline::{MAX_PIPELINE, Pipeline};
pub use crate::pixel_mapper::{Configure, Configured, Mapper, PixelMapper, Topology};
pub use crate::registry::{Factory, MAX_MAPPERS, Registry};
