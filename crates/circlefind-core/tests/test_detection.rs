#[allow(dead_code)]
mod common;

use ndarray::Array2;

use circlefind_core::detection::accumulator::circle_perimeter;
use circlefind_core::detection::peaks::suppress_close_detections;
use circlefind_core::detection::{
    extract_peaks, CannyEdgeDetector, CircleDetection, CircleTransform, EdgeDetector, EdgeMap,
    HoughAccumulator, HoughCircleTransform, PeakParams, RadiusRange,
};
use circlefind_core::filters::preprocess::preprocess;
use circlefind_core::frame::SourceImage;
use circlefind_core::pipeline::{CirclePipeline, RenderConfig};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn params(factor: f32, min_dx: u32, min_dy: u32) -> PeakParams {
    PeakParams {
        threshold_factor: factor,
        min_xdistance: min_dx,
        min_ydistance: min_dy,
        max_peaks: None,
    }
}

/// Single-radius accumulator with isolated peaks at `(row, col, value)`.
fn accumulator_with_peaks(radius: u32, peaks: &[(usize, usize, f32)]) -> HoughAccumulator {
    let mut plane = Array2::<f32>::zeros((64, 64));
    for &(row, col, v) in peaks {
        plane[[row, col]] = v;
    }
    HoughAccumulator::from_planes(vec![radius], vec![plane]).unwrap()
}

/// Edge map holding exactly the discrete circle of `radius` around (cy, cx).
fn ring_edges(h: usize, w: usize, cy: isize, cx: isize, radius: u32) -> EdgeMap {
    let mut data = Array2::from_elem((h, w), false);
    for (dy, dx) in circle_perimeter(radius) {
        data[[(cy + dy) as usize, (cx + dx) as usize]] = true;
    }
    EdgeMap::new(data)
}

fn det(x: usize, y: usize, radius: u32, score: f32) -> CircleDetection {
    CircleDetection {
        x,
        y,
        radius,
        score,
    }
}

// ---------------------------------------------------------------------------
// Edge extraction
// ---------------------------------------------------------------------------

#[test]
fn test_blank_image_gives_blank_edges() {
    let img = common::disk_image(64, 48, 0, 0, 0, 0);
    let pre = preprocess(&img, 11);
    let edges = CannyEdgeDetector::new(25.0, 150.0).detect(&pre.frame);
    assert_eq!(edges.width(), 64);
    assert_eq!(edges.height(), 48);
    assert!(edges.is_blank());
    assert_eq!(edges.edge_count(), 0);
}

#[test]
fn test_disk_edges_lie_on_boundary() {
    let img = common::disk_image(128, 128, 64, 64, 30, 220);
    let pre = preprocess(&img, 5);
    let edges = CannyEdgeDetector::new(25.0, 150.0).detect(&pre.frame);

    assert!(edges.edge_count() > 100);
    for (row, col) in edges.edge_points() {
        let dy = row as f64 - 64.0;
        let dx = col as f64 - 64.0;
        let d = (dx * dx + dy * dy).sqrt();
        assert!((d - 30.0).abs() < 4.0, "edge at ({row},{col}) is {d} from centre");
    }
}

#[test]
fn test_swapped_thresholds_match_ordered() {
    let img = common::disk_image(96, 96, 48, 48, 20, 180);
    let pre = preprocess(&img, 5);
    let a = CannyEdgeDetector::new(25.0, 150.0).detect(&pre.frame);
    let b = CannyEdgeDetector::new(150.0, 25.0).detect(&pre.frame);
    assert_eq!(a, b);
}

#[test]
fn test_edge_map_gray_conversion() {
    let mut data = Array2::from_elem((4, 5), false);
    data[[1, 3]] = true;
    let edges = EdgeMap::new(data);
    let gray = edges.to_gray_image();
    assert_eq!(gray.get_pixel(3, 1).0[0], 255);
    assert_eq!(gray.get_pixel(0, 0).0[0], 0);
    assert_eq!(EdgeMap::from_gray_image(&gray), edges);
}

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

#[test]
fn test_complete_ring_scores_one_at_centre() {
    let edges = ring_edges(50, 50, 25, 25, 10);
    let range = RadiusRange::new(8, 13, 2).unwrap();
    let acc = HoughAccumulator::compute(&edges, &range, true);

    assert_eq!(acc.radii(), &[8, 10, 12]);
    assert_eq!(acc.dim(), (50, 50));
    assert!((acc.planes()[1][[25, 25]] - 1.0).abs() < 1e-6);
    assert!((acc.max_vote() - 1.0).abs() < 1e-6);
}

#[test]
fn test_raw_votes_count_edge_pixels() {
    let edges = ring_edges(50, 50, 25, 25, 10);
    let range = RadiusRange::new(10, 11, 1).unwrap();
    let acc = HoughAccumulator::compute(&edges, &range, false);
    let expected = circle_perimeter(10).len() as f32;
    assert_eq!(acc.planes()[0][[25, 25]], expected);
}

#[test]
fn test_blank_edges_give_zero_accumulator() {
    let edges = EdgeMap::blank(30, 30);
    let range = RadiusRange::new(5, 10, 1).unwrap();
    let acc = HoughAccumulator::compute(&edges, &range, true);
    assert_eq!(acc.max_vote(), 0.0);
    assert!(extract_peaks(&acc, &params(0.45, 5, 5)).is_empty());
}

#[test]
fn test_from_planes_rejects_mismatch() {
    let plane = Array2::<f32>::zeros((4, 4));
    assert!(HoughAccumulator::from_planes(vec![1, 2], vec![plane.clone()]).is_err());
    let other = Array2::<f32>::zeros((5, 4));
    assert!(HoughAccumulator::from_planes(vec![1, 2], vec![plane, other]).is_err());
}

// ---------------------------------------------------------------------------
// Peak extraction and suppression
// ---------------------------------------------------------------------------

#[test]
fn test_close_peaks_keep_only_strongest() {
    let acc = accumulator_with_peaks(10, &[(20, 20, 1.0), (25, 23, 0.8), (40, 5, 0.7)]);
    let found = extract_peaks(&acc, &params(0.5, 10, 10));
    assert_eq!(found, vec![det(20, 20, 10, 1.0), det(5, 40, 10, 0.7)]);
}

#[test]
fn test_peaks_close_in_one_axis_both_survive() {
    let acc = accumulator_with_peaks(10, &[(20, 20, 1.0), (20, 45, 0.9)]);
    let found = extract_peaks(&acc, &params(0.5, 10, 10));
    assert_eq!(found.len(), 2);
}

#[test]
fn test_suppression_distance_is_inclusive() {
    let ranked = [det(10, 10, 5, 1.0), det(20, 20, 5, 0.9), det(21, 10, 5, 0.8)];
    let kept = suppress_close_detections(&ranked, &params(0.5, 10, 10));
    assert_eq!(kept, vec![det(10, 10, 5, 1.0), det(21, 10, 5, 0.8)]);
}

#[test]
fn test_suppression_across_radii() {
    let mut small = Array2::<f32>::zeros((64, 64));
    let mut large = Array2::<f32>::zeros((64, 64));
    small[[30, 30]] = 0.6;
    large[[32, 31]] = 0.9;
    let acc = HoughAccumulator::from_planes(vec![10, 12], vec![small, large]).unwrap();
    let found = extract_peaks(&acc, &params(0.5, 5, 5));
    assert_eq!(found, vec![det(31, 32, 12, 0.9)]);
}

#[test]
fn test_threshold_is_relative_to_max() {
    let acc = accumulator_with_peaks(10, &[(10, 10, 1.0), (50, 50, 0.45), (10, 50, 0.44)]);
    let found = extract_peaks(&acc, &params(0.45, 5, 5));
    let positions: Vec<(usize, usize)> = found.iter().map(|d| (d.x, d.y)).collect();
    assert_eq!(positions, vec![(10, 10), (50, 50)]);
}

#[test]
fn test_max_peaks_caps_output() {
    let acc = accumulator_with_peaks(10, &[(10, 10, 1.0), (50, 50, 0.9), (10, 50, 0.8)]);
    let mut p = params(0.5, 5, 5);
    p.max_peaks = Some(2);
    let found = extract_peaks(&acc, &p);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].score, 1.0);
    assert_eq!(found[1].score, 0.9);
}

#[test]
fn test_equal_scores_ordered_by_radius_then_row_then_col() {
    let mut r10 = Array2::<f32>::zeros((64, 64));
    let mut r12 = Array2::<f32>::zeros((64, 64));
    r12[[5, 5]] = 1.0;
    r10[[40, 40]] = 1.0;
    r10[[5, 40]] = 1.0;
    r10[[40, 5]] = 1.0;
    let acc = HoughAccumulator::from_planes(vec![10, 12], vec![r10, r12]).unwrap();
    let found = extract_peaks(&acc, &params(0.5, 3, 3));

    let order: Vec<(u32, usize, usize)> = found.iter().map(|d| (d.radius, d.y, d.x)).collect();
    assert_eq!(order, vec![(10, 5, 40), (10, 40, 5), (10, 40, 40), (12, 5, 5)]);
}

#[test]
fn test_accepted_detections_respect_separation() {
    let mut plane = Array2::<f32>::zeros((64, 64));
    for row in (2..62).step_by(3) {
        for col in (2..62).step_by(3) {
            plane[[row, col]] = 0.5 + ((row * 7 + col * 13) % 17) as f32 / 40.0;
        }
    }
    let acc = HoughAccumulator::from_planes(vec![8], vec![plane]).unwrap();
    let found = extract_peaks(&acc, &params(0.1, 9, 7));

    assert!(!found.is_empty());
    for (i, a) in found.iter().enumerate() {
        for b in &found[i + 1..] {
            assert!(a.x.abs_diff(b.x) > 9 || a.y.abs_diff(b.y) > 7);
            assert!(a.score >= b.score);
        }
    }
}

// ---------------------------------------------------------------------------
// Circle transform
// ---------------------------------------------------------------------------

#[test]
fn test_transform_finds_exact_ring() {
    let edges = ring_edges(60, 60, 30, 28, 12);
    let transform = HoughCircleTransform::new(RadiusRange::new(8, 17, 2).unwrap(), params(0.9, 5, 5));
    let found = transform.find_circles(&edges);
    assert!(!found.is_empty());
    assert_eq!((found[0].x, found[0].y, found[0].radius), (28, 30, 12));
}

#[test]
fn test_transform_blank_edges_no_circles() {
    let transform = HoughCircleTransform::new(RadiusRange::new(8, 17, 2).unwrap(), params(0.45, 5, 5));
    assert!(transform.find_circles(&EdgeMap::blank(40, 40)).is_empty());
}

// ---------------------------------------------------------------------------
// Full detection on synthetic images
// ---------------------------------------------------------------------------

#[test]
fn test_single_disk_detected_once() {
    let config = common::small_detection_config();
    let pipeline = CirclePipeline::new(&config, &RenderConfig::default()).unwrap();
    let img = common::disk_image(128, 128, 64, 64, 30, 220);
    let analysis = pipeline.analyze(SourceImage::new("disk.png", img));

    assert_eq!(analysis.blur_ksize, 5);
    assert_eq!(analysis.detections.len(), 1, "{:?}", analysis.detections);
    let d = analysis.detections[0];
    assert!(d.radius.abs_diff(30) <= config.radius_step, "radius {}", d.radius);
    assert!(d.x.abs_diff(64) <= 3, "x {}", d.x);
    assert!(d.y.abs_diff(64) <= 3, "y {}", d.y);
}

#[test]
fn test_blank_image_no_detections() {
    let config = common::small_detection_config();
    let pipeline = CirclePipeline::new(&config, &RenderConfig::default()).unwrap();
    let img = common::disk_image(96, 96, 0, 0, 0, 0);
    let analysis = pipeline.analyze(SourceImage::new("blank.png", img));

    assert!(analysis.edges.is_blank());
    assert!(analysis.detections.is_empty());
}

#[test]
fn test_two_separate_disks_detected() {
    let config = common::small_detection_config();
    let pipeline = CirclePipeline::new(&config, &RenderConfig::default()).unwrap();
    let mut img = common::disk_image(200, 100, 50, 50, 25, 220);
    let right = common::disk_image(200, 100, 150, 50, 25, 220);
    for (x, y, p) in right.enumerate_pixels() {
        if p.0[0] > 0 {
            img.put_pixel(x, y, *p);
        }
    }
    let analysis = pipeline.analyze(SourceImage::new("pair.png", img));

    assert_eq!(analysis.detections.len(), 2, "{:?}", analysis.detections);
    let mut xs: Vec<usize> = analysis.detections.iter().map(|d| d.x).collect();
    xs.sort();
    assert!(xs[0].abs_diff(50) <= 3);
    assert!(xs[1].abs_diff(150) <= 3);
}
