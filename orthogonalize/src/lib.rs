//! Orthogonalization of building footprints.
//!
//! The engine squares the corners of polygon rings, so that every wall runs along one of two
//! perpendicular axes, while keeping walls that were deliberately drawn at another angle (bay
//! windows, cut corners) as they are.
//!
//! Every ring of the input geometry goes through the same pipeline independently:
//!
//! 1. [`edges::analyze`] removes repeated vertices and measures the edges.
//! 2. [`axis::estimate`] finds the axis pair of the ring from the length-weighted edge directions.
//! 3. [`classify::classify`] assigns every edge to an axis or marks it as skewed.
//! 4. [`reconstruct::reconstruct`] rebuilds the vertices as intersections of the constrained lines.
//! 5. [`assemble::assemble`] validates the result.
//!
//! A ring that fails at any step is returned unchanged and reported in
//! [`Orthogonalized::diagnostics`]. The structure of the geometry (number of parts and holes) never
//! changes.
//!
//! ```ignore
//! use orthogonalize::{OrthogonalizeConfig, Orthogonalizer};
//!
//! let engine = Orthogonalizer::new(OrthogonalizeConfig::default().with_skew_tolerance(10.0))?;
//! let result = engine.orthogonalize_geo(&footprint)?;
//! ```
//!
//! # Features
//!
//! * `geo-types` (default): accept and return [`geo_types::Geometry`].
//! * `parallel`: process the parts and holes of a geometry on the `rayon` thread pool.

pub mod angle;
pub mod assemble;
pub mod axis;
pub mod classify;
pub mod config;
pub mod edges;
mod engine;
pub mod error;
pub mod reconstruct;

pub use assemble::{Orthogonalized, RingDiagnostic, RingOutcome, RingRole};
pub use axis::{Axis, AxisPair};
pub use classify::AxisAssignment;
pub use config::{AxisMethod, OrthogonalizeConfig};
pub use engine::{orthogonalize, Orthogonalizer, RingPoint};
pub use error::{OrthogonalizeError, RingError};
pub use orthogonalize_types;
