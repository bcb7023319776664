//! Unit tests for the polyline codec and geodesic measurement.

use nav_core::Coordinate;

fn coord(lon: f64, lat: f64) -> Coordinate {
    Coordinate::new(lon, lat)
}

#[cfg(test)]
mod polyline {
    use super::coord;
    use crate::polyline::{decode, encode, PRECISION_6};
    use crate::GeometryError;

    /// Classic interchange test vector, precision 5.
    const GOLDEN: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    #[test]
    fn decode_golden_vector() {
        let path = decode(GOLDEN, 5).unwrap();
        assert_eq!(
            path,
            vec![
                coord(-120.2, 38.5),
                coord(-120.95, 40.7),
                coord(-126.453, 43.252),
            ]
        );
    }

    #[test]
    fn encode_golden_vector() {
        let path = vec![
            coord(-120.2, 38.5),
            coord(-120.95, 40.7),
            coord(-126.453, 43.252),
        ];
        assert_eq!(encode(&path, 5), GOLDEN);
    }

    #[test]
    fn roundtrip_within_half_ulp_of_precision() {
        let path = vec![
            coord(-95.8427, 29.7757),
            coord(-95.3676974, 29.7589382),
            coord(-95.3676, 29.7589),
            coord(0.0, 0.0),
            coord(179.9999995, -89.9999995),
        ];
        for precision in [5u32, 6, 7] {
            let tolerance = 0.5 * 10f64.powi(-(precision as i32));
            let decoded = decode(&encode(&path, precision), precision).unwrap();
            assert_eq!(decoded.len(), path.len());
            for (orig, got) in path.iter().zip(&decoded) {
                assert!(
                    (orig.lon - got.lon).abs() <= tolerance,
                    "lon {} vs {} at precision {precision}",
                    orig.lon,
                    got.lon
                );
                assert!(
                    (orig.lat - got.lat).abs() <= tolerance,
                    "lat {} vs {} at precision {precision}",
                    orig.lat,
                    got.lat
                );
            }
        }
    }

    #[test]
    fn empty_input_is_empty_path() {
        assert!(decode("", PRECISION_6).unwrap().is_empty());
        assert_eq!(encode(&[], PRECISION_6), "");
    }

    #[test]
    fn truncated_mid_coordinate() {
        // A complete latitude delta with no longitude following it.
        let err = decode("_p~iF", 5).unwrap_err();
        assert!(matches!(err, GeometryError::Truncated(5)));
    }

    #[test]
    fn truncated_mid_varint() {
        // Continuation bit set on the final byte.
        let err = decode("_", 5).unwrap_err();
        assert!(matches!(err, GeometryError::Truncated(1)));
    }

    #[test]
    fn rejects_byte_below_question_mark() {
        let err = decode("* ", 5).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidByte { byte: b'*', offset: 0 }));
    }

    #[test]
    fn rejects_overlong_varint() {
        // 14 continuation chunks push the accumulator past 64 bits; the
        // decoder must refuse rather than shift out of range.
        let encoded = format!("{}?", "_".repeat(14));
        let err = decode(&encoded, 5).unwrap_err();
        assert!(matches!(err, GeometryError::OverlongVarint(_)));
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let bogus = encode(&[coord(0.0, 91.0)], PRECISION_6);
        let err = decode(&bogus, PRECISION_6).unwrap_err();
        assert!(matches!(err, GeometryError::OutOfRange { .. }));
    }
}

#[cfg(test)]
mod measure {
    use super::coord;
    use crate::measure::{
        bearing_deg, destination, distance_m, nearest_point_on_path, path_length_m,
    };

    #[test]
    fn distance_zero_for_identical_points() {
        let p = coord(-88.043, 30.694);
        assert_eq!(distance_m(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = coord(-95.8427, 29.7757);
        let b = coord(-95.3676974, 29.7589382);
        assert_eq!(distance_m(a, b), distance_m(b, a));
    }

    #[test]
    fn distance_houston_pair() {
        let a = coord(-95.3676974, 29.7589382);
        let b = coord(-95.8427, 29.7757);
        assert!((distance_m(a, b) - 45_900.73617999494).abs() < 1e-5);
    }

    #[test]
    fn distance_one_degree_of_latitude() {
        let d = distance_m(coord(-88.0, 30.0), coord(-88.0, 31.0));
        assert!((d - 111_229.83322959862).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn distance_finite_for_antipodes() {
        let d = distance_m(coord(0.0, 0.0), coord(180.0, 0.0));
        assert!(d.is_finite());
        assert!(d > 1.9e7); // half the circumference, ~20,000 km
    }

    #[test]
    fn bearing_cardinal_directions() {
        let origin = coord(0.0, 0.0);
        assert!((bearing_deg(origin, coord(0.0, 1.0)) - 0.0).abs() < 1e-9);
        assert!((bearing_deg(origin, coord(1.0, 0.0)) - 90.0).abs() < 1e-9);
        assert!((bearing_deg(origin, coord(0.0, -1.0)).abs() - 180.0).abs() < 1e-9);
        assert!((bearing_deg(origin, coord(-1.0, 0.0)) + 90.0).abs() < 1e-9);
    }

    #[test]
    fn destination_roundtrips_distance() {
        let origin = coord(-88.0, 30.0);
        let there = destination(origin, 1_000.0, 45.0);
        assert!((distance_m(origin, there) - 1_000.0).abs() < 1e-3);
    }

    #[test]
    fn destination_normalizes_bearing() {
        let origin = coord(-88.0, 30.0);
        assert_eq!(
            destination(origin, 1_000.0, 405.0),
            destination(origin, 1_000.0, 45.0)
        );
    }

    #[test]
    fn path_length_sums_segments() {
        let path = [coord(0.0, 0.0), coord(0.0, 1.0), coord(0.0, 2.0)];
        let total = path_length_m(&path);
        let per_degree = distance_m(path[0], path[1]);
        assert!((total - 2.0 * per_degree).abs() < 1e-6);
        assert_eq!(path_length_m(&path[..1]), 0.0);
        assert_eq!(path_length_m(&[]), 0.0);
    }

    #[test]
    fn nearest_none_for_empty_path() {
        assert!(nearest_point_on_path(coord(0.0, 0.0), &[]).is_none());
    }

    #[test]
    fn nearest_single_vertex_snaps_to_it() {
        let vertex = coord(-95.8427, 29.7757);
        let query = coord(-95.3676974, 29.7589382);
        let snapped = nearest_point_on_path(query, &[vertex]).unwrap();
        assert_eq!(snapped.point, vertex);
        assert_eq!(snapped.segment_index, 0);
        assert_eq!(snapped.distance_along_m, 0.0);
        assert!((snapped.distance_m - 45_900.73617999494).abs() < 1e-5);
    }

    #[test]
    fn nearest_projects_onto_segment_interior() {
        // Query hovering above the midpoint of an equatorial segment.
        let path = [coord(0.0, 0.0), coord(0.001, 0.0)];
        let query = coord(0.0005, 0.0001);
        let snapped = nearest_point_on_path(query, &path).unwrap();
        assert_eq!(snapped.segment_index, 0);
        assert!((snapped.point.lon - 0.0005).abs() < 1e-9);
        assert!(snapped.point.lat.abs() < 1e-12);
        assert!((snapped.distance_along_m - 55.61491661479931).abs() < 1e-6);
        assert!((snapped.distance_m - 11.122983322959858).abs() < 1e-6);
    }

    #[test]
    fn nearest_prefers_earliest_segment_on_ties() {
        // A path that doubles back over itself: both segments contain the
        // query's projection, the first must win.
        let path = [coord(0.0, 0.0), coord(0.001, 0.0), coord(0.0, 0.0)];
        let query = coord(0.0005, 0.0001);
        let snapped = nearest_point_on_path(query, &path).unwrap();
        assert_eq!(snapped.segment_index, 0);
    }

    #[test]
    fn nearest_degenerate_path_falls_back_to_first_vertex() {
        // No finite candidate ever wins, so the snap degrades to the path's
        // first vertex on segment 0 instead of reporting garbage indices.
        let path = [coord(f64::NAN, f64::NAN), coord(f64::NAN, f64::NAN)];
        let snapped = nearest_point_on_path(coord(0.0, 0.0), &path).unwrap();
        assert_eq!(snapped.segment_index, 0);
        assert!(snapped.point.lon.is_nan() && snapped.point.lat.is_nan());
    }

    #[test]
    fn nearest_endpoint_beyond_path_end() {
        let path = [coord(0.0, 0.0), coord(0.001, 0.0)];
        let query = coord(0.002, 0.0);
        let snapped = nearest_point_on_path(query, &path).unwrap();
        assert_eq!(snapped.point, path[1]);
        assert!((snapped.distance_along_m - distance_m(path[0], path[1])).abs() < 1e-9);
    }
}

#[cfg(test)]
mod user_distance {
    use super::coord;
    use crate::measure::user_true_distance_from_step;
    use crate::polyline::{encode, PRECISION_6};
    use nav_core::{Coordinate, Step};

    fn step_with_geometry(points: &[Coordinate]) -> Step {
        Step {
            geometry: encode(points, PRECISION_6),
            distance_m: 0.0,
            duration_s: 0.0,
            intersections: vec![],
        }
    }

    #[test]
    fn zero_for_empty_geometry() {
        let step = Step {
            geometry: String::new(),
            distance_m: 0.0,
            duration_s: 0.0,
            intersections: vec![],
        };
        let d = user_true_distance_from_step(coord(0.0, 0.0), &step, PRECISION_6).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn zero_when_point_equals_first_vertex() {
        // Precision-6-exact point so the decoded vertex compares equal.
        let point = coord(-95.367697, 29.758938);
        let step = step_with_geometry(&[point]);
        let d = user_true_distance_from_step(point, &step, PRECISION_6).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn single_vertex_measures_directly() {
        let point = coord(-95.3676974, 29.7589382);
        let step = step_with_geometry(&[coord(-95.8427, 29.7757)]);
        let d = user_true_distance_from_step(point, &step, PRECISION_6).unwrap();
        assert!((d - 45_900.73617999494).abs() < 1e-5, "got {d}");
    }

    #[test]
    fn two_vertex_geometry_reports_rounding_residual() {
        // The query point is the step's exact endpoint before encoding;
        // precision-6 rounding leaves a ~4.5 cm residual.
        let point = coord(-95.3676974, 29.7589382);
        let step = step_with_geometry(&[coord(-95.8427, 29.7757), point]);
        let d = user_true_distance_from_step(point, &step, PRECISION_6).unwrap();
        assert!((d - 0.04457271773629306).abs() < 1e-5, "got {d}");
    }

    #[test]
    fn non_finite_fix_reports_zero() {
        // A NaN position fix makes every measurement non-finite; the
        // caller-facing distance degrades to 0 rather than propagating NaN.
        let step = step_with_geometry(&[coord(-95.8427, 29.7757), coord(-95.3676974, 29.7589382)]);
        let d = user_true_distance_from_step(coord(f64::NAN, f64::NAN), &step, PRECISION_6)
            .unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn malformed_geometry_is_an_error() {
        let step = Step {
            geometry: "_p~iF".to_string(), // latitude with no longitude
            distance_m: 0.0,
            duration_s: 0.0,
            intersections: vec![],
        };
        assert!(user_true_distance_from_step(coord(0.0, 0.0), &step, 5).is_err());
    }
}
