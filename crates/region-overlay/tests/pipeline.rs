mod common;

use std::f64::consts::FRAC_PI_2;

use common::synthetic_image::{
    RIDGE, VALLEY, side_by_side_valleys, stacked_valleys, step_edge, valley_grid,
};
use region_overlay::{
    Connectivity, DegeneratePolicy, EdgeError, Image, PipelineConfig, PipelineError, Point2d,
    analyze, annotate, run,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn horizontal_neighbors_are_drawn() {
    init_logging();
    let img = side_by_side_valleys(21, 11, 10);

    let (out, report) = run(img.clone(), &PipelineConfig::default()).expect("pipeline");

    assert_eq!(report.region_count(), 2);
    assert_eq!(report.edge_count(), 1);

    let analysis = &report.analysis;
    let edge = analysis.graph.edges()[0];
    assert_eq!((edge.a, edge.b), (1, 2));
    assert_eq!(analysis.coordinates.get(1), Some(Point2d::new(4.5, 5.0)));
    assert_eq!(analysis.coordinates.get(2), Some(Point2d::new(15.5, 5.0)));

    let m = analysis.metrics[0];
    assert_eq!(m.squared_distance, 121.0);
    assert_eq!(m.angle, 0.0);
    assert_eq!(report.overlay.edges_drawn, 1);

    // Centers round to columns 5 and 16 on row 5.
    for x in 0..21 {
        let expected = if (5..=16).contains(&x) {
            1
        } else if x == 10 {
            RIDGE
        } else {
            VALLEY
        };
        assert_eq!(out.get(x, 5), Some(&expected), "x={x}");
    }
    assert_eq!(out.get(10, 0), Some(&RIDGE));
    assert_eq!(out.get(0, 0), Some(&VALLEY));

    let changed = out
        .data()
        .iter()
        .zip(img.data())
        .filter(|(a, b)| a != b)
        .count();
    assert_eq!(changed, 12);
}

#[test]
fn vertical_neighbors_are_left_alone() {
    init_logging();
    let img = stacked_valleys(11, 21, 10);

    let (out, report) = run(img.clone(), &PipelineConfig::default()).expect("pipeline");

    assert_eq!(report.region_count(), 2);
    assert_eq!(report.edge_count(), 1);
    assert_eq!(report.analysis.metrics[0].angle, FRAC_PI_2);
    assert_eq!(report.overlay.edges_drawn, 0);
    assert_eq!(out, img);
}

#[test]
fn vertical_neighbors_fail_under_reject_policy() {
    let img = stacked_valleys(11, 21, 10);
    let cfg = PipelineConfig {
        degenerate_policy: DegeneratePolicy::Reject,
        ..PipelineConfig::default()
    };

    let mut annotated = img.clone();
    let err = annotate(&mut annotated, &cfg).unwrap_err();
    assert_eq!(err, PipelineError::Edges(EdgeError::DegenerateEdge { edge: 0 }));
    assert_eq!(annotated, img);
}

#[test]
fn grid_overlay_keeps_only_row_edges() {
    init_logging();
    let img = valley_grid(3, 6);

    let (out, report) = run(img.clone(), &PipelineConfig::default()).expect("pipeline");

    assert_eq!(report.region_count(), 9);
    assert_eq!(report.edge_count(), 12);
    for (_, m) in report.analysis.metrics.iter() {
        assert!(m.angle == 0.0 || m.angle == FRAC_PI_2, "angle={}", m.angle);
    }
    assert_eq!(report.overlay.edges_drawn, 6);

    // Basin centers sit at 2.5 + 7k and round to rows 3, 10, 17.
    for y in 0..img.height() {
        for x in 0..img.width() {
            let before = img.get(x, y);
            let after = out.get(x, y);
            if ![3, 10, 17].contains(&y) {
                assert_eq!(after, before, "({x}, {y}) is off every drawn row");
            }
        }
    }
    for y in [3, 10, 17] {
        for x in [6, 13] {
            let v = *out.get(x, y).expect("in bounds");
            assert!(v != RIDGE && v != VALLEY && v > 0, "({x}, {y}) = {v}");
        }
    }
}

#[test]
fn eight_connectivity_adds_diagonal_edges_that_stay_hidden() {
    let img = valley_grid(3, 6);
    let cfg = PipelineConfig {
        connectivity: Connectivity::C8,
        ..PipelineConfig::default()
    };

    let (_, report) = run(img, &cfg).expect("pipeline");

    assert_eq!(report.region_count(), 9);
    assert_eq!(report.edge_count(), 20);
    assert_eq!(report.overlay.edges_drawn, 6);
}

#[test]
fn wide_threshold_draws_every_edge() {
    let img = valley_grid(3, 6);
    let cfg = PipelineConfig {
        angle_threshold: 2.0,
        ..PipelineConfig::default()
    };

    let (_, report) = run(img, &cfg).expect("pipeline");
    assert_eq!(report.overlay.edges_drawn, 12);
}

#[test]
fn flat_image_is_returned_unmodified() {
    let img = Image::new_fill(16, 9, 42u16);
    let (out, report) = run(img.clone(), &PipelineConfig::default()).expect("pipeline");

    assert_eq!(out, img);
    assert_eq!(report.region_count(), 1);
    assert!(report.analysis.metrics.is_empty());
}

#[test]
fn gradient_option_splits_a_step_edge() {
    let img = step_edge(21, 9, 10);

    let plain = analyze(&img.as_view(), &PipelineConfig::default()).expect("analysis");
    assert_eq!(plain.segmentation.region_count, 1);
    assert_eq!(plain.graph.num_edges(), 0);

    let cfg = PipelineConfig {
        apply_gradient: true,
        ..PipelineConfig::default()
    };
    let with_gradient = analyze(&img.as_view(), &cfg).expect("analysis");
    assert_eq!(with_gradient.segmentation.region_count, 2);
    assert_eq!(with_gradient.graph.num_edges(), 1);
    assert!(with_gradient.metrics[0].angle < cfg.angle_threshold);
}

#[test]
fn repeated_analysis_is_identical() {
    let img = valley_grid(4, 5);
    let cfg = PipelineConfig::default();

    let a = analyze(&img.as_view(), &cfg).expect("analysis");
    let b = analyze(&img.as_view(), &cfg).expect("analysis");

    assert_eq!(a.graph, b.graph);
    assert_eq!(a.metrics, b.metrics);
    assert_eq!(a.metrics.len(), a.graph.num_edges());
}

#[test]
fn config_deserializes_with_defaults() {
    let cfg: PipelineConfig = serde_json::from_str(
        r#"{ "angle_threshold": 0.3, "connectivity": "C8", "degenerate_policy": "reject" }"#,
    )
    .expect("valid config json");

    assert_eq!(cfg.angle_threshold, 0.3);
    assert_eq!(cfg.connectivity, Connectivity::C8);
    assert_eq!(cfg.degenerate_policy, DegeneratePolicy::Reject);
    assert_eq!(cfg.area_threshold, 20);
    assert!(!cfg.apply_gradient);
}

#[test]
fn invalid_threshold_is_reported_before_any_work() {
    let mut img = side_by_side_valleys(21, 11, 10);
    let before = img.clone();
    let cfg = PipelineConfig {
        angle_threshold: f64::INFINITY,
        ..PipelineConfig::default()
    };

    let err = annotate(&mut img, &cfg).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidConfig(_)));
    assert_eq!(img, before);
}

#[test]
fn sixteen_bit_images_take_stamps_above_255() {
    let grid = valley_grid(17, 5);
    let (w, h) = grid.dimensions();
    let wide = Image::from_vec(w, h, grid.data().iter().map(|&v| u16::from(v)).collect())
        .expect("valid image");

    let (out, report) = run(wide.clone(), &PipelineConfig::default()).expect("pipeline");

    assert_eq!(report.region_count(), 289);
    assert_eq!(report.edge_count(), 544);
    assert_eq!(report.overlay.edges_drawn, 272);
    let max_stamp = out
        .data()
        .iter()
        .zip(wide.data())
        .filter(|(a, b)| a != b)
        .map(|(&a, _)| a)
        .max()
        .expect("some pixels stamped");
    assert!(max_stamp > 255, "max stamp {max_stamp}");
}

#[test]
fn eight_bit_images_report_stamp_overflow() {
    let mut img = valley_grid(17, 5);
    let before = img.clone();

    let err = annotate(&mut img, &PipelineConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Edges(EdgeError::StampOverflow { stamp, .. }) if stamp > 255
    ));
    assert_eq!(img, before);
}
