use approx::assert_abs_diff_eq;
use rct_chart::ChartError;
use rct_chart::core::LinearScale;
use rct_chart::marks::{KernelDensityEstimation, epanechnikov};
use rct_chart::render::SvgNode;

#[test]
fn single_sample_peaks_at_its_own_value() {
    let points = KernelDensityEstimation::new(vec![2.0])
        .with_bandwidth(1.0)
        .with_samples(vec![1.0, 1.5, 2.0, 2.5, 3.0])
        .estimate()
        .expect("estimate");

    let densities: Vec<f64> = points.iter().map(|p| p.density).collect();
    assert_abs_diff_eq!(densities[0], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(densities[1], 0.5625, epsilon = 1e-12);
    assert_abs_diff_eq!(densities[2], 0.75, epsilon = 1e-12);
    assert_abs_diff_eq!(densities[3], 0.5625, epsilon = 1e-12);
    assert_abs_diff_eq!(densities[4], 0.0, epsilon = 1e-12);
}

#[test]
fn density_is_the_mean_kernel_over_samples() {
    let data = vec![0.0, 1.0, 4.0];
    let points = KernelDensityEstimation::new(data.clone())
        .with_bandwidth(2.0)
        .with_samples(vec![0.5, 3.0])
        .estimate()
        .expect("estimate");

    for point in points {
        let expected: f64 =
            data.iter().map(|d| epanechnikov(2.0, point.x - d)).sum::<f64>() / 3.0;
        assert_abs_diff_eq!(point.density, expected, epsilon = 1e-12);
    }
}

#[test]
fn default_evaluation_spans_data_extent() {
    let points = KernelDensityEstimation::new(vec![10.0, -2.0, 4.0])
        .with_sample_count(4)
        .estimate()
        .expect("estimate");

    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![-2.0, 2.0, 6.0, 10.0]);
}

#[test]
fn invalid_inputs_are_rejected() {
    let empty = KernelDensityEstimation::new(Vec::new()).estimate();
    assert!(matches!(empty, Err(ChartError::InvalidData(_))));

    let zero_bandwidth = KernelDensityEstimation::new(vec![1.0])
        .with_bandwidth(0.0)
        .estimate();
    assert!(matches!(zero_bandwidth, Err(ChartError::InvalidData(_))));

    let nan = KernelDensityEstimation::new(vec![f64::NAN]).estimate();
    assert!(matches!(nan, Err(ChartError::InvalidData(_))));

    let one_point = KernelDensityEstimation::new(vec![1.0])
        .with_sample_count(1)
        .estimate();
    assert!(matches!(one_point, Err(ChartError::InvalidData(_))));
}

#[test]
fn render_projects_estimate_into_a_path() {
    let x_scale = LinearScale::new(0.0, 10.0)
        .and_then(|s| s.with_range(0.0, 100.0))
        .expect("x");
    let y_scale = LinearScale::new(0.0, 1.0)
        .and_then(|s| s.with_range(200.0, 0.0))
        .expect("y");

    let node = KernelDensityEstimation::new(vec![5.0])
        .with_bandwidth(1.0)
        .with_samples(vec![4.0, 5.0, 6.0])
        .render(&x_scale, &y_scale)
        .expect("render");

    let SvgNode::Path(path) = node else {
        panic!("expected path");
    };
    assert_eq!(path.class_name.as_deref(), Some("rct-chart-kde"));
    assert_eq!(path.points, vec![(40.0, 200.0), (50.0, 50.0), (60.0, 200.0)]);
    assert_eq!(path.path_data(), "M40,200 L50,50 L60,200");
}

#[test]
fn json_config_uses_defaults() {
    let kde = KernelDensityEstimation::from_json_str(r#"{"data": [1, 2, 3]}"#).expect("config");
    assert_eq!(kde.bandwidth, 0.5);
    assert_eq!(kde.sample_count, 50);
    assert_eq!(kde.estimate().expect("estimate").len(), 50);
}

#[test]
fn scale_ticks_become_evaluation_points() {
    let x_scale = LinearScale::new(0.0, 10.0)
        .and_then(|s| s.with_range(0.0, 100.0))
        .expect("x");

    let points = KernelDensityEstimation::new(vec![3.0, 7.0])
        .with_bandwidth(2.0)
        .with_scale_ticks(&x_scale, 5)
        .estimate()
        .expect("estimate");

    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    assert_abs_diff_eq!(points[0].density, 0.0, epsilon = 1e-12);
}

#[test]
fn extra_class_name_is_appended_to_the_path_class() {
    let x_scale = LinearScale::new(0.0, 10.0).expect("x");
    let y_scale = LinearScale::new(0.0, 1.0).expect("y");

    let node = KernelDensityEstimation::new(vec![5.0])
        .with_class_name("overlay")
        .render(&x_scale, &y_scale)
        .expect("render");

    let SvgNode::Path(path) = node else {
        panic!("expected path");
    };
    assert_eq!(path.class_name.as_deref(), Some("rct-chart-kde overlay"));
}
