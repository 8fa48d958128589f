//! Integration tests for radar chart validation and geometry.

use renderer::radar::{spoke_angles, RadarChart, MAX_SCALE_LENGTH, MAX_SNAPSHOTS};
use renderer::{GridLayout, SeriesRange};
use spider_common::{Color, FrameShape, Palette, SpiderError};
use test_utils::{
    assert_approx_eq, assert_slice_approx_eq, create_constant_series, create_pollutant_series,
    create_ramp_series, create_titles, BASECASE_CHART_JSON,
};

// ============================================================================
// Helper functions
// ============================================================================

fn chart_from(series: Vec<Vec<f64>>, snapshots: usize) -> RadarChart {
    let spokes = series.len();
    RadarChart {
        title: "Basecase".to_string(),
        series,
        scale_length: 4.0,
        snapshot_count: snapshots,
        snapshot_titles: create_titles("t", snapshots),
        spoke_labels: create_titles("k", spokes),
        line_colors: vec![Color::BLUE; snapshots],
        frame: FrameShape::Circle,
    }
}

fn valid_chart() -> RadarChart {
    chart_from(create_pollutant_series(4, 12), 6)
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn test_radius_is_min_max_normalized_per_series() {
    let chart = valid_chart();
    let snapshots = chart.snapshots().unwrap();

    for snapshot in &snapshots {
        for (k, values) in chart.series.iter().enumerate() {
            let range = SeriesRange::of(values).unwrap();
            let expected =
                chart.scale_length * (values[snapshot.index] - range.min) / (range.max - range.min);
            assert_approx_eq!(snapshot.radii[k], expected, 1e-9);
        }
    }
}

#[test]
fn test_radius_uses_whole_series_range() {
    // Values past snapshot_count still set min and max
    let chart = chart_from(vec![vec![2.0, 4.0, 0.0, 10.0], vec![1.0, 2.0, 3.0, 5.0]], 2);
    let snapshots = chart.snapshots().unwrap();
    assert_slice_approx_eq!(snapshots[0].radii, [0.8, 0.0], 1e-9);
    assert_slice_approx_eq!(snapshots[1].radii, [1.6, 1.0], 1e-9);
}

#[test]
fn test_series_normalized_independently() {
    let mut series = create_ramp_series(2, 5);
    for v in &mut series[1] {
        *v *= 1000.0;
    }
    let snapshots = chart_from(series, 5).snapshots().unwrap();
    for snapshot in snapshots {
        assert_approx_eq!(snapshot.radii[0], snapshot.radii[1], 1e-9);
    }
}

#[test]
fn test_unit_series_example() {
    let snapshots = chart_from(vec![vec![0.0, 1.0], vec![0.0, 1.0]], 2)
        .snapshots()
        .unwrap();
    assert_eq!(snapshots[0].radii, vec![0.0, 0.0]);
    assert_eq!(snapshots[1].radii, vec![4.0, 4.0]);
}

#[test]
fn test_degenerate_series_example() {
    let err = chart_from(vec![vec![0.0, 10.0], vec![5.0, 5.0]], 2)
        .snapshots()
        .unwrap_err();
    assert!(matches!(err, SpiderError::DegenerateSeries { series: 1, value } if value == 5.0));
    assert!(err.is_validation());
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_identical_inputs_identical_points() {
    let a = valid_chart().snapshots().unwrap();
    let b = valid_chart().snapshots().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_every_polygon_is_closed() {
    for snapshot in valid_chart().snapshots().unwrap() {
        assert!(snapshot.is_closed());
        assert_eq!(snapshot.points.len(), snapshot.radii.len() + 1);
        assert_eq!(snapshot.points.first(), snapshot.points.last());
    }
}

#[test]
fn test_points_sit_on_spoke_angles() {
    let chart = valid_chart();
    let angles = spoke_angles(chart.spoke_count());
    for snapshot in chart.snapshots().unwrap() {
        for (point, angle) in snapshot.points.iter().zip(&angles) {
            assert_eq!(point.angle, *angle);
        }
    }
}

#[test]
fn test_spoke_angles_identical_for_both_frames() {
    let mut circle = valid_chart();
    circle.frame = FrameShape::Circle;
    let mut polygon = valid_chart();
    polygon.frame = FrameShape::Polygon;
    assert_eq!(circle.snapshots().unwrap(), polygon.snapshots().unwrap());
}

#[test]
fn test_snapshot_order_and_metadata() {
    let mut chart = valid_chart();
    chart.line_colors = Palette::default().cycle(6);
    let snapshots = chart.snapshots().unwrap();
    for (i, snapshot) in snapshots.iter().enumerate() {
        assert_eq!(snapshot.index, i);
        assert_eq!(snapshot.title, format!("t{}", i + 1));
        assert_eq!(snapshot.color, chart.line_colors[i]);
    }
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_grid_layout_examples() {
    let six = GridLayout::for_snapshots(6);
    assert_eq!((six.rows, six.cols), (2, 3));
    let five = GridLayout::for_snapshots(5);
    assert_eq!((five.rows, five.cols), (1, 5));
    let one = GridLayout::for_snapshots(1);
    assert_eq!((one.rows, one.cols), (1, 1));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_rejects_no_series() {
    let err = chart_from(vec![], 1).validate().unwrap_err();
    assert!(matches!(err, SpiderError::NoSeries));
}

#[test]
fn test_rejects_spoke_label_mismatch() {
    let mut chart = valid_chart();
    chart.spoke_labels.pop();
    let err = chart.validate().unwrap_err();
    assert!(matches!(err, SpiderError::SpokeLabelMismatch { series: 4, labels: 3 }));
}

#[test]
fn test_rejects_scale_length_out_of_range() {
    for scale in [0.0, -1.0, MAX_SCALE_LENGTH + 0.5, f64::NAN] {
        let mut chart = valid_chart();
        chart.scale_length = scale;
        let err = chart.validate().unwrap_err();
        assert!(matches!(err, SpiderError::ScaleLengthOutOfRange(_)), "{}", scale);
    }

    let mut chart = valid_chart();
    chart.scale_length = MAX_SCALE_LENGTH;
    assert!(chart.validate().is_ok());
}

#[test]
fn test_rejects_snapshot_count_out_of_range() {
    let err = chart_from(create_ramp_series(3, 4), 0).validate().unwrap_err();
    assert!(matches!(err, SpiderError::SnapshotCountOutOfRange(0)));

    let too_many = MAX_SNAPSHOTS + 1;
    let err = chart_from(create_ramp_series(3, too_many), too_many)
        .validate()
        .unwrap_err();
    assert!(matches!(err, SpiderError::SnapshotCountOutOfRange(401)));

    assert!(chart_from(create_ramp_series(3, MAX_SNAPSHOTS), MAX_SNAPSHOTS)
        .validate()
        .is_ok());
}

#[test]
fn test_rejects_snapshot_title_mismatch() {
    let mut chart = valid_chart();
    chart.snapshot_titles.push("extra".into());
    let err = chart.validate().unwrap_err();
    assert!(matches!(err, SpiderError::SnapshotTitleMismatch { expected: 6, actual: 7 }));
}

#[test]
fn test_rejects_line_color_mismatch() {
    let mut chart = valid_chart();
    chart.line_colors.truncate(2);
    let err = chart.validate().unwrap_err();
    assert!(matches!(err, SpiderError::LineColorMismatch { expected: 6, actual: 2 }));
}

#[test]
fn test_rejects_unknown_frame_shape() {
    let json = BASECASE_CHART_JSON.replace("\"polygon\"", "\"hexagon\"");
    let err = RadarChart::from_json(&json).unwrap_err();
    assert!(matches!(err, SpiderError::InvalidFrameShape(ref name) if name == "hexagon"));
    assert!(err.is_validation());
    assert!("hexagon".parse::<FrameShape>().is_err());
}

#[test]
fn test_rejects_unknown_color_name() {
    let json = BASECASE_CHART_JSON.replace("\"b\"", "\"purple\"");
    let err = RadarChart::from_json(&json).unwrap_err();
    assert!(matches!(err, SpiderError::InvalidColor(_)));
    assert!(err.is_validation());
}

#[test]
fn test_malformed_json_is_not_a_validation_error() {
    let err = RadarChart::from_json("{\"title\": ").unwrap_err();
    assert!(!err.is_validation());
}

#[test]
fn test_rejects_short_series() {
    let chart = chart_from(vec![vec![0.0, 1.0, 2.0], vec![0.0, 1.0]], 3);
    let err = chart.validate().unwrap_err();
    assert!(matches!(
        err,
        SpiderError::SeriesTooShort { series: 1, len: 2, required: 3 }
    ));
}

#[test]
fn test_rejects_non_finite_values() {
    let chart = chart_from(vec![vec![0.0, f64::INFINITY, 2.0], vec![0.0, 1.0, 2.0]], 3);
    let err = chart.validate().unwrap_err();
    assert!(matches!(err, SpiderError::NonFiniteValue { series: 0, index: 1 }));
}

#[test]
fn test_rejects_series_whose_span_overflows() {
    let chart = chart_from(vec![vec![0.0, 1.0], vec![-1e308, 1e308]], 2);
    let err = chart.snapshots().unwrap_err();
    assert!(matches!(err, SpiderError::RangeOverflow { series: 1, .. }));
    assert!(err.is_validation());
}

#[test]
fn test_extreme_but_finite_span_gives_finite_radii() {
    let chart = chart_from(vec![vec![0.0, 1.0], vec![-1e307, 1e307]], 2);
    let snapshots = chart.snapshots().unwrap();
    for snapshot in &snapshots {
        assert!(snapshot.radii.iter().all(|r| r.is_finite()));
    }
    assert_approx_eq!(snapshots[1].radii[1], 4.0, 1e-9);
}

#[test]
fn test_rejects_constant_series() {
    let chart = chart_from(
        vec![create_ramp_series(1, 4).remove(0), create_constant_series(4, 7.0)],
        4,
    );
    assert!(matches!(
        chart.validate().unwrap_err(),
        SpiderError::DegenerateSeries { series: 1, .. }
    ));
}

// ============================================================================
// JSON requests
// ============================================================================

#[test]
fn test_basecase_json_request() {
    let chart = RadarChart::from_json(BASECASE_CHART_JSON).unwrap();
    assert_eq!(chart.title, "Basecase");
    assert_eq!(chart.frame, FrameShape::Polygon);
    assert_eq!(chart.line_colors[0], Color::BLUE);
    assert_eq!(chart.line_colors[3], Color::rgb(255, 0, 255));

    let snapshots = chart.snapshots().unwrap();
    assert_eq!(snapshots.len(), 4);
    assert_slice_approx_eq!(snapshots[0].radii, [0.0, 4.0, 4.0 / 3.0], 1e-9);
}

#[test]
fn test_json_rejects_bad_color() {
    let json = BASECASE_CHART_JSON.replace("\"#ff00ff\"", "\"purple\"");
    assert!(RadarChart::from_json(&json).is_err());
}
