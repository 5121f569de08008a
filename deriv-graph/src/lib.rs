//! Plots and data files for a sampled derivative.
//!
//! A [`Graph`] holds the samples of a function and the [`GraphOptions`] to draw them with. With
//! the `png` feature, [`Graph::draw()`] renders the graph with [`cairo`]. Without it, the samples
//! can still be written as CSV with [`csv::write_samples`].
//!
//! Files are written through an [`ArtifactStore`], which owns the output directory and names
//! every file with an id from an [`IdGenerator`], so concurrent writers never pick the same name.
//!
//! # Features
//!
//! - `png`: Renders graphs to PNG images with [`cairo`].

pub mod artifact;
pub mod csv;
pub mod error;
pub mod graph;
#[cfg(feature = "png")]
mod text_align;

pub use artifact::{ArtifactStore, CounterIds, IdGenerator, TimestampIds};
pub use error::PlotError;
pub use graph::{Graph, GraphOptions};
