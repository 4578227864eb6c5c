//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::OrthogonalizeError;

/// Method used to estimate the orientation of a ring's axis pair.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisMethod {
    /// Circular mean of edge angles (modulo 90°) weighted by edge length. Long walls dominate the
    /// result.
    #[default]
    WeightedMean,
    /// Median of the edges' signed deviations from the nearest cardinal direction. Every edge counts
    /// the same regardless of its length.
    Median,
}

/// Tolerances and switches of the orthogonalization engine.
///
/// All angles are in degrees. The structure can be deserialized from any `serde` format; missing
/// fields take their default values:
///
/// ```json
/// { "skew_tolerance_degrees": 10.0, "turn_range_degrees": [60.0, 120.0] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthogonalizeConfig {
    /// Maximum deviation of an edge from the nearest axis. Edges deviating more are considered
    /// deliberately skewed and are kept unmodified.
    pub skew_tolerance_degrees: f64,
    /// Window of turning angles between two consecutive edges that is treated as a true corner.
    /// Turning angles outside of the window mean that both edges belong to one straight wall.
    pub turn_range_degrees: (f64, f64),
    /// Minimum number of distinct vertices a ring must have to be processed, and to be accepted after
    /// reconstruction.
    pub min_ring_vertices: usize,
    /// Distance under which two vertices are considered the same point.
    pub vertex_epsilon: f64,
    /// Method used to estimate the axis pair of a ring.
    pub axis_method: AxisMethod,
    /// If the estimated axis is within this angle from the world axes, the world axes are used
    /// instead. `0` disables snapping.
    pub cardinal_snap_degrees: f64,
    /// Remove vertices that end up in the middle of a straight wall after reconstruction.
    pub remove_collinear_vertices: bool,
}

impl Default for OrthogonalizeConfig {
    fn default() -> Self {
        Self {
            skew_tolerance_degrees: 15.0,
            turn_range_degrees: (45.0, 135.0),
            min_ring_vertices: 3,
            vertex_epsilon: 1e-9,
            axis_method: AxisMethod::WeightedMean,
            cardinal_snap_degrees: 0.0,
            remove_collinear_vertices: false,
        }
    }
}

impl OrthogonalizeConfig {
    /// Sets the skew tolerance in degrees.
    pub fn with_skew_tolerance(mut self, degrees: f64) -> Self {
        self.skew_tolerance_degrees = degrees;
        self
    }

    /// Sets the turn angle range in degrees.
    pub fn with_turn_range(mut self, min_degrees: f64, max_degrees: f64) -> Self {
        self.turn_range_degrees = (min_degrees, max_degrees);
        self
    }

    /// Sets the minimum number of distinct ring vertices.
    pub fn with_min_ring_vertices(mut self, count: usize) -> Self {
        self.min_ring_vertices = count;
        self
    }

    /// Sets the vertex coincidence distance.
    pub fn with_vertex_epsilon(mut self, epsilon: f64) -> Self {
        self.vertex_epsilon = epsilon;
        self
    }

    /// Sets the axis estimation method.
    pub fn with_axis_method(mut self, method: AxisMethod) -> Self {
        self.axis_method = method;
        self
    }

    /// Sets the cardinal snap angle in degrees.
    pub fn with_cardinal_snap(mut self, degrees: f64) -> Self {
        self.cardinal_snap_degrees = degrees;
        self
    }

    /// Enables or disables removal of collinear vertices.
    pub fn with_collinear_removal(mut self, remove: bool) -> Self {
        self.remove_collinear_vertices = remove;
        self
    }

    /// Checks that all the values are usable.
    pub fn validate(&self) -> Result<(), OrthogonalizeError> {
        let invalid = |msg: String| Err(OrthogonalizeError::InvalidConfig(msg));

        if !self.skew_tolerance_degrees.is_finite()
            || !(0.0..=45.0).contains(&self.skew_tolerance_degrees)
        {
            return invalid(format!(
                "skew_tolerance_degrees must be within [0, 45], got {}",
                self.skew_tolerance_degrees
            ));
        }

        let (min_turn, max_turn) = self.turn_range_degrees;
        if !min_turn.is_finite()
            || !max_turn.is_finite()
            || min_turn < 0.0
            || max_turn > 180.0
            || min_turn > max_turn
        {
            return invalid(format!(
                "turn_range_degrees must be an ordered range within [0, 180], got ({min_turn}, {max_turn})"
            ));
        }

        if self.min_ring_vertices < 3 {
            return invalid(format!(
                "min_ring_vertices must be at least 3, got {}",
                self.min_ring_vertices
            ));
        }

        if !self.vertex_epsilon.is_finite() || self.vertex_epsilon < 0.0 {
            return invalid(format!(
                "vertex_epsilon must be a non-negative number, got {}",
                self.vertex_epsilon
            ));
        }

        if !self.cardinal_snap_degrees.is_finite()
            || !(0.0..=45.0).contains(&self.cardinal_snap_degrees)
        {
            return invalid(format!(
                "cardinal_snap_degrees must be within [0, 45], got {}",
                self.cardinal_snap_degrees
            ));
        }

        Ok(())
    }

    pub(crate) fn skew_tolerance(&self) -> f64 {
        self.skew_tolerance_degrees.to_radians()
    }

    pub(crate) fn turn_range(&self) -> (f64, f64) {
        (
            self.turn_range_degrees.0.to_radians(),
            self.turn_range_degrees.1.to_radians(),
        )
    }

    pub(crate) fn cardinal_snap(&self) -> f64 {
        self.cardinal_snap_degrees.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = OrthogonalizeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.skew_tolerance_degrees, 15.0);
        assert_eq!(config.turn_range_degrees, (45.0, 135.0));
        assert_eq!(config.min_ring_vertices, 3);
    }

    #[test]
    fn deserialize_partial_config() {
        let config: OrthogonalizeConfig = serde_json::from_str(
            r#"{ "skew_tolerance_degrees": 10.0, "turn_range_degrees": [60.0, 120.0], "axis_method": "median" }"#,
        )
        .expect("valid json");

        assert_eq!(config.skew_tolerance_degrees, 10.0);
        assert_eq!(config.turn_range_degrees, (60.0, 120.0));
        assert_eq!(config.axis_method, AxisMethod::Median);
        assert_eq!(config.min_ring_vertices, 3);
        assert!(!config.remove_collinear_vertices);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let base = OrthogonalizeConfig::default();

        assert_matches!(
            base.clone().with_skew_tolerance(60.0).validate(),
            Err(OrthogonalizeError::InvalidConfig(_))
        );
        assert_matches!(
            base.clone().with_skew_tolerance(f64::NAN).validate(),
            Err(OrthogonalizeError::InvalidConfig(_))
        );
        assert_matches!(
            base.clone().with_turn_range(135.0, 45.0).validate(),
            Err(OrthogonalizeError::InvalidConfig(_))
        );
        assert_matches!(
            base.clone().with_turn_range(-1.0, 90.0).validate(),
            Err(OrthogonalizeError::InvalidConfig(_))
        );
        assert_matches!(
            base.clone().with_min_ring_vertices(2).validate(),
            Err(OrthogonalizeError::InvalidConfig(_))
        );
        assert_matches!(
            base.clone().with_vertex_epsilon(-1.0).validate(),
            Err(OrthogonalizeError::InvalidConfig(_))
        );
        assert_matches!(
            base.with_cardinal_snap(50.0).validate(),
            Err(OrthogonalizeError::InvalidConfig(_))
        );
    }
}
