use std::f64::consts::FRAC_PI_2;

use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;
use orthogonalize::angle::{line_angle, line_difference};
use orthogonalize::axis::estimate;
use orthogonalize::edges::analyze;
use orthogonalize::{
    Axis, OrthogonalizeConfig, OrthogonalizeError, Orthogonalizer, RingError, RingRole,
};
use orthogonalize_types::cartesian::{CartesianClosedContour, CartesianPoint2d, Point2, Winding};
use orthogonalize_types::impls::{ClosedContour, MultiPolygon, Polygon};
use orthogonalize_types::{Contour, Geom, GeometryKind};

const EPSILON: f64 = 1e-9;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ring(points: &[(f64, f64)]) -> ClosedContour<Point2> {
    ClosedContour::new(points.iter().map(|&p| Point2::from(p)).collect())
}

fn transform(points: &[(f64, f64)], degrees: f64, offset: (f64, f64)) -> Vec<(f64, f64)> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    points
        .iter()
        .map(|&(x, y)| (x * cos - y * sin + offset.0, x * sin + y * cos + offset.1))
        .collect()
}

fn polar(from: (f64, f64), length: f64, degrees: f64) -> (f64, f64) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (from.0 + length * cos, from.1 + length * sin)
}

/// Line angles of the edges of the ring, in `[0, π)`.
fn edge_angles(ring: &ClosedContour<Point2>) -> Vec<f64> {
    let points: Vec<&Point2> = ring.iter_points_closing().collect();
    points
        .windows(2)
        .map(|pair| line_angle(&pair[1].sub(pair[0])))
        .collect()
}

/// Deviation of a line angle from the nearest axis of the grid rotated by `axis`.
fn grid_deviation(angle: f64, axis: f64) -> f64 {
    let diff = line_difference(angle, axis);
    diff.min(FRAC_PI_2 - diff)
}

fn assert_aligned(angles: &[f64], axis: f64) {
    for (index, angle) in angles.iter().enumerate() {
        assert!(
            grid_deviation(*angle, axis) < EPSILON,
            "edge {index} at {}° is not aligned with the grid at {}°",
            angle.to_degrees(),
            axis.to_degrees()
        );
    }
}

fn assert_same_ring(a: &ClosedContour<Point2>, b: &ClosedContour<Point2>) {
    assert_eq!(a.len(), b.len());
    for (p, q) in a.points.iter().zip(&b.points) {
        assert_abs_diff_eq!(p, q, epsilon = EPSILON);
    }
}

fn polygon_result(geometry: Geom<Point2>) -> Polygon<Point2> {
    match geometry {
        Geom::Polygon(polygon) => polygon,
        other => panic!("expected polygon, got {:?}", other.geometry_kind()),
    }
}

fn rotated_square() -> ClosedContour<Point2> {
    ring(&transform(
        &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
        2.0,
        (100.0, 50.0),
    ))
}

/// L-shaped footprint with slightly noisy walls and a V-shaped bay cut into the bottom wall at 30°.
fn l_shape_with_bay() -> Vec<(f64, f64)> {
    let bay_start = (8.0, 0.1);
    let apex = polar(bay_start, 2.0 / f64::to_radians(30.0).cos(), 30.0);
    let bay_end = polar(apex, 2.0 / f64::to_radians(30.0).cos(), -30.0);
    vec![
        (0.0, 0.0),
        bay_start,
        apex,
        bay_end,
        (20.1, 0.0),
        (20.0, 10.1),
        (10.0, 10.0),
        (9.9, 20.0),
        (0.0, 20.1),
    ]
}

#[test]
fn scenario_a_rotated_square_keeps_its_own_axes() {
    init_logger();
    let engine = Orthogonalizer::default();
    let input = rotated_square();

    let outcome = engine.orthogonalize_ring(&input);
    assert!(outcome.is_assembled());
    let output = outcome.into_ring();

    assert_eq!(output.len(), 4);
    assert_aligned(&edge_angles(&output), f64::to_radians(2.0));
    assert_same_ring(&output, &input);
}

#[test]
fn scenario_a_rotated_square_snaps_to_world_axes() {
    init_logger();
    let engine = Orthogonalizer::new(OrthogonalizeConfig::default().with_cardinal_snap(3.0))
        .expect("valid config");
    let input = rotated_square();

    let output = engine.orthogonalize_ring(&input).into_ring();

    assert_eq!(output.len(), 4);
    assert_aligned(&edge_angles(&output), 0.0);
    assert_abs_diff_eq!(output.area_signed(), input.area_signed(), epsilon = 0.2);
}

#[test]
fn scenario_b_bay_window_keeps_its_angle() {
    init_logger();
    let config = OrthogonalizeConfig::default().with_skew_tolerance(15.0);
    let engine = Orthogonalizer::new(config.clone()).expect("valid config");
    let input = ring(&l_shape_with_bay());

    let output = engine.orthogonalize_ring(&input).into_ring();
    assert_eq!(output.len(), input.len());

    let input_angles = edge_angles(&input);
    let output_angles = edge_angles(&output);
    let axis = estimate(&analyze(&input, &config).expect("valid ring"), &config).angle(Axis::A);

    for (index, (before, after)) in input_angles.iter().zip(&output_angles).enumerate() {
        if index == 1 || index == 2 {
            assert_abs_diff_eq!(after, before, epsilon = EPSILON);
        } else {
            assert!(grid_deviation(*after, axis) < EPSILON, "edge {index} is not aligned");
        }
    }

    assert_abs_diff_eq!(output_angles[1].to_degrees(), 30.0, epsilon = 1e-6);
    assert_abs_diff_eq!(output_angles[2].to_degrees(), 150.0, epsilon = 1e-6);
}

#[test]
fn scenario_b_with_cardinal_snap() {
    init_logger();
    let engine = Orthogonalizer::new(OrthogonalizeConfig::default().with_cardinal_snap(3.0))
        .expect("valid config");
    let output = engine.orthogonalize_ring(&ring(&l_shape_with_bay())).into_ring();

    let angles = edge_angles(&output);
    let walls: Vec<f64> = angles
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != 1 && *index != 2)
        .map(|(_, angle)| *angle)
        .collect();
    assert_aligned(&walls, 0.0);
    assert_abs_diff_eq!(angles[1].to_degrees(), 30.0, epsilon = 1e-6);
}

#[test]
fn scenario_c_parts_get_their_own_axes() {
    init_logger();
    let rectangle = [(0.0, 0.0), (12.0, 0.1), (12.0, 6.0), (0.0, 6.1)];
    let multi_polygon = MultiPolygon::from(vec![
        Polygon::from(ring(&transform(&rectangle, 10.0, (0.0, 0.0)))),
        Polygon::from(ring(&transform(&rectangle, 35.0, (50.0, 0.0)))),
    ]);

    let result = Orthogonalizer::default().orthogonalize_multi_polygon(&multi_polygon);
    assert!(result.is_complete());
    assert_eq!(result.geometry.parts.len(), 2);

    let axes: Vec<f64> = result
        .geometry
        .parts
        .iter()
        .map(|part| {
            let angles = edge_angles(&part.outer_contour);
            assert_aligned(&angles, angles[0]);
            angles[0]
        })
        .collect();

    assert!(grid_deviation(axes[0], f64::to_radians(10.0)) < f64::to_radians(1.0));
    assert!(grid_deviation(axes[1], f64::to_radians(35.0)) < f64::to_radians(1.0));
    assert!(grid_deviation(axes[0], axes[1]) > f64::to_radians(20.0));
}

#[test]
fn orthogonalization_is_idempotent() {
    init_logger();
    let engine = Orthogonalizer::default();

    for input in [
        ring(&l_shape_with_bay()),
        ring(&transform(
            &[(0.0, 0.0), (10.0, 0.3), (10.2, 4.0), (16.0, 4.1), (16.0, 9.0), (0.1, 9.2)],
            27.0,
            (-40.0, 15.0),
        )),
    ] {
        let first = engine.orthogonalize_ring(&input).into_ring();
        let second = engine.orthogonalize_ring(&first);
        assert!(second.is_assembled());
        assert_same_ring(&second.into_ring(), &first);
    }

    let rectilinear = ring(&[(0.0, 0.0), (20.0, 0.0), (20.0, 10.0), (10.0, 10.0), (10.0, 20.0), (0.0, 20.0)]);
    assert_same_ring(&engine.orthogonalize_ring(&rectilinear).into_ring(), &rectilinear);
}

#[test]
fn vertex_count_never_grows() {
    init_logger();
    let inputs = [
        ring(&l_shape_with_bay()),
        ring(&[(0.0, 0.0), (5.0, 0.1), (10.0, 0.0), (10.0, 5.0), (10.1, 10.0), (0.0, 10.0), (0.0, 0.0)]),
        ring(&transform(&[(0.0, 0.0), (8.0, 0.0), (8.0, 3.0), (0.0, 3.0)], 60.0, (3.0, 3.0))),
    ];

    for remove_collinear in [false, true] {
        let engine = Orthogonalizer::new(
            OrthogonalizeConfig::default().with_collinear_removal(remove_collinear),
        )
        .expect("valid config");

        for input in &inputs {
            let output = engine.orthogonalize_ring(input).into_ring();
            assert!(output.len() <= input.len());
        }
    }
}

#[test]
fn holes_do_not_affect_exterior() {
    init_logger();
    let engine = Orthogonalizer::default();
    let exterior = ring(&[(0.0, 0.0), (30.0, 0.4), (30.2, 20.0), (-0.1, 19.8)]);
    let hole = [(-2.0, -2.0), (-2.0, 2.0), (2.0, 2.0), (2.0, -2.0)];

    let reference = engine
        .orthogonalize_polygon(&Polygon::from(exterior.clone()))
        .geometry
        .outer_contour;

    for degrees in [0.0, 17.0, 45.0, 71.0] {
        let polygon = Polygon::new(
            exterior.clone(),
            vec![ring(&transform(&hole, degrees, (15.0, 10.0)))],
        );
        let result = engine.orthogonalize_polygon(&polygon);

        assert!(result.is_complete());
        assert_eq!(result.geometry.outer_contour, reference);
        assert_eq!(result.geometry.inner_contours.len(), 1);
        assert_aligned(
            &edge_angles(&result.geometry.inner_contours[0]),
            f64::to_radians(degrees),
        );
    }
}

#[test]
fn rejected_rings_are_returned_unchanged() {
    init_logger();
    let valid = Polygon::from(ring(&[(0.0, 0.0), (10.0, 0.2), (10.0, 8.0), (0.0, 8.0)]));
    let flat = ring(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
    let multi_polygon = MultiPolygon::from(vec![valid, Polygon::from(flat.clone())]);

    let result = Orthogonalizer::default()
        .orthogonalize(&Geom::MultiPolygon(multi_polygon))
        .expect("multipolygon is supported");

    let Geom::MultiPolygon(output) = result.geometry else {
        panic!("expected multipolygon");
    };
    assert_eq!(output.parts.len(), 2);
    assert_eq!(output.parts[1].outer_contour, flat);

    assert_eq!(result.diagnostics.len(), 1);
    let diagnostic = &result.diagnostics[0];
    assert_eq!((diagnostic.part, diagnostic.role), (1, RingRole::Exterior));
    assert_matches!(diagnostic.error, RingError::Degenerate { vertices: 3, required: 3 });
}

#[test]
fn footprint_with_spike_is_left_unchanged() {
    init_logger();
    // A digitizing error: the top wall shoots up to (6.05, 15.0) and comes back.
    let spiked = ring(&[
        (0.0, 0.0),
        (10.0, 0.1),
        (10.0, 10.0),
        (6.0, 10.0),
        (6.05, 15.0),
        (5.95, 10.02),
        (0.0, 10.0),
    ]);

    let result = Orthogonalizer::default().orthogonalize_polygon(&Polygon::from(spiked.clone()));

    assert_eq!(result.geometry.outer_contour, spiked);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].role, RingRole::Exterior);
    assert_matches!(result.diagnostics[0].error, RingError::Spike { .. });
}

#[test]
fn polygon_structure_is_preserved() {
    init_logger();
    let polygon = Polygon::new(
        ring(&[(0.0, 0.0), (40.0, 0.5), (40.0, 30.0), (0.2, 30.0)]),
        vec![
            ring(&[(5.0, 5.0), (5.0, 10.0), (10.2, 10.0), (10.0, 5.0)]),
            ring(&[(20.0, 20.0), (20.0, 25.0), (25.0, 25.1), (25.0, 20.0)]),
        ],
    );

    let result = Orthogonalizer::default()
        .orthogonalize(&Geom::Polygon(polygon))
        .expect("polygon is supported");
    let output = polygon_result(result.geometry);

    assert_eq!(output.inner_contours.len(), 2);
    // Holes keep their clockwise winding.
    for hole in &output.inner_contours {
        assert_eq!(hole.winding(), Winding::Clockwise);
    }
    assert_eq!(output.outer_contour.winding(), Winding::CounterClockwise);
}

#[test]
fn non_polygonal_geometry_is_an_error() {
    let contour = orthogonalize_types::impls::Contour::closed(vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
    ]);
    assert!(contour.is_closed());

    let result = Orthogonalizer::default().orthogonalize(&Geom::Contour(contour));
    assert_matches!(
        result,
        Err(OrthogonalizeError::InvalidGeometryType(GeometryKind::Contour))
    );
}

#[test]
fn config_from_json() {
    let config: OrthogonalizeConfig = serde_json::from_str(
        r#"{ "skew_tolerance_degrees": 20.0, "cardinal_snap_degrees": 3.0, "remove_collinear_vertices": true }"#,
    )
    .expect("valid json");

    let engine = Orthogonalizer::new(config).expect("valid config");
    assert_eq!(engine.config().skew_tolerance_degrees, 20.0);
    assert_eq!(engine.config().turn_range_degrees, (45.0, 135.0));

    let output = engine.orthogonalize_ring(&rotated_square()).into_ring();
    assert_aligned(&edge_angles(&output), 0.0);
}

#[cfg(feature = "geo-types")]
mod geo {
    use geo_types::{Geometry, LineString, MultiPoint};

    use super::*;

    #[test]
    fn geo_types_polygon() {
        let exterior = LineString::from(vec![
            (0.0, 0.0),
            (10.0, 0.3),
            (10.1, 6.0),
            (0.0, 5.9),
            (0.0, 0.0),
        ]);
        let geometry = Geometry::Polygon(geo_types::Polygon::new(exterior, vec![]));

        let result = Orthogonalizer::default()
            .orthogonalize_geo(&geometry)
            .expect("polygon is supported");

        let Geometry::Polygon(polygon) = result.geometry else {
            panic!("expected polygon");
        };
        let coords = &polygon.exterior().0;
        assert_eq!(coords.len(), 5);
        assert_eq!(coords.first(), coords.last());
    }

    #[test]
    fn geo_types_unsupported_geometry() {
        let engine = Orthogonalizer::default();

        let line = Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]));
        assert_matches!(
            engine.orthogonalize_geo(&line),
            Err(OrthogonalizeError::InvalidGeometryType(GeometryKind::Contour))
        );

        let points = Geometry::MultiPoint(MultiPoint::from(vec![(0.0, 0.0), (1.0, 1.0)]));
        assert_matches!(
            engine.orthogonalize_geo(&points),
            Err(OrthogonalizeError::InvalidGeometryType(GeometryKind::Other))
        );
    }
}
