//! Geometry level entry points of the engine.

use maybe_sync::{MaybeSend, MaybeSync};
use orthogonalize_types::cartesian::NewCartesianPoint2d;
use orthogonalize_types::impls::{ClosedContour, MultiPolygon, Polygon};
use orthogonalize_types::Geom;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::assemble::{assemble, assemble_polygon, Orthogonalized, RingOutcome};
use crate::axis::{estimate, Axis};
use crate::classify::classify;
use crate::config::OrthogonalizeConfig;
use crate::edges::analyze;
use crate::error::{OrthogonalizeError, RingError};
use crate::reconstruct::reconstruct;

/// Point type the engine can process.
///
/// With the `parallel` feature the points must also be `Send + Sync`.
pub trait RingPoint: NewCartesianPoint2d<f64> + Clone + MaybeSend + MaybeSync {}
impl<T: NewCartesianPoint2d<f64> + Clone + MaybeSend + MaybeSync> RingPoint for T {}

/// Orthogonalization engine with a validated configuration.
///
/// ```ignore
/// let engine = Orthogonalizer::new(OrthogonalizeConfig::default())?;
/// let result = engine.orthogonalize(&geometry)?;
/// for diagnostic in &result.diagnostics {
///     eprintln!("part {}: {}", diagnostic.part, diagnostic.error);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Orthogonalizer {
    config: OrthogonalizeConfig,
}

impl Orthogonalizer {
    /// Creates a new engine. Fails if the configuration is invalid.
    pub fn new(config: OrthogonalizeConfig) -> Result<Self, OrthogonalizeError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration of the engine.
    pub fn config(&self) -> &OrthogonalizeConfig {
        &self.config
    }

    /// Orthogonalizes a polygon or a multipolygon.
    ///
    /// Points and lines are not supported and result in
    /// [`OrthogonalizeError::InvalidGeometryType`]. Rings that cannot be orthogonalized do not fail
    /// the call; they are returned unchanged and listed in [`Orthogonalized::diagnostics`].
    pub fn orthogonalize<P: RingPoint>(
        &self,
        geometry: &Geom<P>,
    ) -> Result<Orthogonalized<Geom<P>>, OrthogonalizeError> {
        match geometry {
            Geom::Polygon(polygon) => Ok(self.orthogonalize_polygon(polygon).map(Geom::Polygon)),
            Geom::MultiPolygon(multi_polygon) => Ok(self
                .orthogonalize_multi_polygon(multi_polygon)
                .map(Geom::MultiPolygon)),
            other => Err(OrthogonalizeError::InvalidGeometryType(
                other.geometry_kind(),
            )),
        }
    }

    /// Orthogonalizes the exterior and the holes of the polygon. Every ring gets its own axis pair.
    pub fn orthogonalize_polygon<P: RingPoint>(
        &self,
        polygon: &Polygon<P>,
    ) -> Orthogonalized<Polygon<P>> {
        self.orthogonalize_part(0, polygon)
    }

    /// Orthogonalizes every part of the multipolygon independently. Parts stay in the input order.
    pub fn orthogonalize_multi_polygon<P: RingPoint>(
        &self,
        multi_polygon: &MultiPolygon<P>,
    ) -> Orthogonalized<MultiPolygon<P>> {
        let results = map_ordered(&multi_polygon.parts, |part, polygon| {
            self.orthogonalize_part(part, polygon)
        });

        let mut parts = Vec::with_capacity(results.len());
        let mut diagnostics = vec![];
        for result in results {
            parts.push(result.geometry);
            diagnostics.extend(result.diagnostics);
        }

        Orthogonalized {
            geometry: MultiPolygon::from(parts),
            diagnostics,
        }
    }

    /// Runs a single ring through the pipeline. A ring that cannot be orthogonalized is returned as
    /// [`RingOutcome::Rejected`] with an unchanged copy of the input.
    pub fn orthogonalize_ring<P: RingPoint>(&self, ring: &ClosedContour<P>) -> RingOutcome<P> {
        match self.process_ring(ring) {
            Ok(result) => RingOutcome::Assembled(result),
            Err(error) => RingOutcome::Rejected {
                original: ring.clone(),
                error,
            },
        }
    }

    /// Orthogonalizes a `geo-types` geometry. Only `Polygon`, `MultiPolygon`, `Rect` and `Triangle`
    /// are accepted; the last two are returned as polygons.
    #[cfg(feature = "geo-types")]
    pub fn orthogonalize_geo(
        &self,
        geometry: &geo_types::Geometry<f64>,
    ) -> Result<Orthogonalized<geo_types::Geometry<f64>>, OrthogonalizeError> {
        let kind = orthogonalize_types::geo_types::geometry_kind(geometry);
        let geom = Geom::<geo_types::Coord<f64>>::try_from(geometry)
            .map_err(|_| OrthogonalizeError::InvalidGeometryType(kind))?;

        Ok(self.orthogonalize(&geom)?.map(geo_types::Geometry::from))
    }

    fn orthogonalize_part<P: RingPoint>(
        &self,
        part: usize,
        polygon: &Polygon<P>,
    ) -> Orthogonalized<Polygon<P>> {
        let exterior = self.orthogonalize_ring(&polygon.outer_contour);
        let interior = map_ordered(&polygon.inner_contours, |_, ring| self.orthogonalize_ring(ring));

        let mut diagnostics = vec![];
        let geometry = assemble_polygon(part, exterior, interior, &mut diagnostics);

        Orthogonalized {
            geometry,
            diagnostics,
        }
    }

    fn process_ring<P: RingPoint>(
        &self,
        ring: &ClosedContour<P>,
    ) -> Result<ClosedContour<P>, RingError> {
        let analyzed = analyze(ring, &self.config)?;
        let axes = estimate(&analyzed, &self.config);
        let classified = classify(analyzed, axes, &self.config);

        log::debug!(
            "Orthogonalizing ring of {} vertices: axis at {:.3}°, {} skewed edges",
            classified.ring().vertices().len(),
            axes.angle(Axis::A).to_degrees(),
            classified.skewed_count()
        );

        let reconstructed = reconstruct(classified, &self.config)?;
        let result = assemble(&reconstructed, &self.config)?;

        log::debug!("Ring reconstructed with {} vertices", result.len());
        Ok(result)
    }
}

/// Orthogonalizes a polygon or a multipolygon with the given configuration.
///
/// Shortcut for [`Orthogonalizer::new`] followed by [`Orthogonalizer::orthogonalize`].
pub fn orthogonalize<P: RingPoint>(
    geometry: &Geom<P>,
    config: &OrthogonalizeConfig,
) -> Result<Orthogonalized<Geom<P>>, OrthogonalizeError> {
    Orthogonalizer::new(config.clone())?.orthogonalize(geometry)
}

/// Maps the items keeping their order, in parallel if the `parallel` feature is enabled.
fn map_ordered<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: MaybeSync,
    R: MaybeSend,
    F: Fn(usize, &T) -> R + MaybeSend + MaybeSync,
{
    #[cfg(feature = "parallel")]
    {
        items
            .par_iter()
            .enumerate()
            .map(|(index, item)| f(index, item))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| f(index, item))
            .collect()
    }
}
