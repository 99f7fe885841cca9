use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use approx::assert_abs_diff_eq;
use chrono::{TimeZone, Utc};
use rct_chart::core::{DomainValue, LinearScale, PointScale, TimeScale};
use rct_chart::interaction::{MouseEvent, MouseEventKind, MouseHandlers};
use rct_chart::marks::{Bar, BarOrientation, BarSpec};
use rct_chart::render::{Style, SvgNode, TextAnchor, node_to_svg};
use rct_chart::{BarOrientationError, ChartError};

fn times(factor: f64) -> impl Fn(&DomainValue) -> f64 {
    move |v: &DomainValue| v.as_number().expect("numeric value") * factor
}

#[test]
fn horizontal_bar_matches_reference_geometry() {
    let bar = Bar::horizontal(1.0, 5.0, 2.0).with_thickness(8.0);
    let geometry = bar.geometry(&times(10.0), &times(20.0)).expect("geometry");

    assert_abs_diff_eq!(geometry.rect_x, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.rect_y, 36.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.width, 40.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.height, 8.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.label_x, 74.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.label_y, 45.0, epsilon = 1e-9);
    assert_eq!(geometry.label_anchor, None);
    assert_eq!(geometry.label_text, "5");
}

#[test]
fn vertical_bar_matches_reference_geometry() {
    let bar = Bar::vertical(2.0, 1.0, 4.0);
    let geometry = bar.geometry(&times(10.0), &times(10.0)).expect("geometry");

    assert_abs_diff_eq!(geometry.rect_x, 16.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.rect_y, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.width, 8.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.height, 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.label_x, 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.label_y, -14.0, epsilon = 1e-9);
    assert_eq!(geometry.label_anchor, Some(TextAnchor::Middle));
}

#[test]
fn reversed_range_keeps_non_negative_size() {
    let forward = Bar::horizontal(1.0, 5.0, 2.0)
        .geometry(&times(10.0), &times(20.0))
        .expect("forward");
    let reversed = Bar::horizontal(5.0, 1.0, 2.0)
        .geometry(&times(10.0), &times(20.0))
        .expect("reversed");

    assert_eq!(forward.rect_x, reversed.rect_x);
    assert_eq!(forward.width, reversed.width);
    assert!(reversed.width >= 0.0);
    // the label follows the far pixel edge, not the end value
    assert_eq!(reversed.label_x, 74.0);
    assert_eq!(reversed.label_text, "1");
}

#[test]
fn inverted_y_range_keeps_vertical_bar_height_positive() {
    let y_scale = LinearScale::new(0.0, 100.0)
        .and_then(|s| s.with_range(400.0, 0.0))
        .expect("y scale");
    let x_scale = times(1.0);
    let geometry = Bar::vertical(50.0, 0.0, 25.0)
        .geometry(&x_scale, &y_scale)
        .expect("geometry");

    assert_abs_diff_eq!(geometry.rect_y, 300.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.height, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.label_y, 276.0, epsilon = 1e-9);
}

#[test]
fn orientation_follows_which_end_is_set() {
    let horizontal = BarOrientation::from_ends(Some(DomainValue::Number(3.0)), None).expect("x end only");
    assert!(horizontal.is_horizontal());
    assert_eq!(horizontal.name(), "horizontal");

    let vertical = BarOrientation::from_ends(None, Some(DomainValue::Number(3.0))).expect("y end only");
    assert!(!vertical.is_horizontal());
    assert_eq!(vertical.name(), "vertical");
}

#[test]
fn both_or_neither_end_is_an_orientation_error() {
    let both = BarOrientation::from_ends(Some(DomainValue::Number(1.0)), Some(DomainValue::Number(2.0)))
        .expect_err("both ends");
    assert_eq!(
        both,
        BarOrientationError {
            x_end_set: true,
            y_end_set: true
        }
    );

    let neither = Bar::from_optional_ends(0.0, 0.0, None, None).expect_err("no end");
    assert!(matches!(
        neither,
        ChartError::InvalidPropCombination(BarOrientationError {
            x_end_set: false,
            y_end_set: false
        })
    ));
    assert!(neither.to_string().contains("but not both"));
}

#[test]
fn hidden_label_renders_a_bare_rect() {
    let node = Bar::vertical(2.0, 1.0, 4.0)
        .render(&times(10.0), &times(10.0))
        .expect("render");

    assert!(matches!(node, SvgNode::Rect(_)));
    assert_eq!(node.text_count(), 0);
}

#[test]
fn shown_label_renders_group_with_one_text() {
    let node = Bar::vertical(2.0, 1.0, 4.0)
        .with_label(true)
        .render(&times(10.0), &times(10.0))
        .expect("render");

    assert_eq!(node.rect_count(), 1);
    assert_eq!(node.text_count(), 1);
    assert_eq!(
        node_to_svg(&node),
        concat!(
            r#"<g><rect x="16" y="10" width="8" height="30" class="rct-chart-bar rct-chart-bar-vertical "/>"#,
            r#"<text x="20" y="-14" text-anchor="middle" class="rct-chart-bar-label ">4</text></g>"#,
        )
    );
}

#[test]
fn label_format_is_applied_to_the_end_value() {
    let node = Bar::horizontal(1.0, 5.0, 2.0)
        .with_label(true)
        .with_label_format(|value: &DomainValue| format!("{value} units"))
        .with_label_class_name("emphasis")
        .render(&times(10.0), &times(20.0))
        .expect("render");

    let SvgNode::Group(group) = node else {
        panic!("expected a group");
    };
    let SvgNode::Text(label) = &group.children[1] else {
        panic!("expected label text");
    };
    assert_eq!(label.text, "5 units");
    assert_eq!(label.anchor, None);
    assert_eq!(label.class_name.as_deref(), Some("rct-chart-bar-label emphasis"));
}

#[test]
fn presentation_props_pass_through_to_rect() {
    let style = Style::new().with("fill", "steelblue");
    let node = Bar::horizontal(0.0, 3.0, 1.0)
        .with_class_name("highlight")
        .with_style(style.clone())
        .render(&times(10.0), &times(10.0))
        .expect("render");

    let SvgNode::Rect(rect) = node else {
        panic!("expected a rect");
    };
    assert_eq!(
        rect.class_name.as_deref(),
        Some("rct-chart-bar rct-chart-bar-horizontal highlight")
    );
    assert_eq!(rect.style, style);
}

#[test]
fn mouse_handlers_are_forwarded_untouched() {
    let entered = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&entered);
    let handlers = MouseHandlers::default().with_mouse_enter(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let node = Bar::vertical(1.0, 0.0, 2.0)
        .with_handlers(handlers.clone())
        .render(&times(10.0), &times(10.0))
        .expect("render");
    let SvgNode::Rect(rect) = node else {
        panic!("expected a rect");
    };

    assert_eq!(rect.handlers, handlers);
    assert_eq!(entered.load(Ordering::SeqCst), 0, "render must not fire handlers");
    assert!(rect.handlers.dispatch(&MouseEvent::new(MouseEventKind::Enter, 3.0, 4.0)));
    assert_eq!(entered.load(Ordering::SeqCst), 1);
}

#[test]
fn categorical_and_date_values_project_through_their_scales() {
    let x_scale = PointScale::new(["a", "b", "c"], 0.0, 300.0)
        .expect("point scale")
        .with_padding(0.5);
    let y_scale = TimeScale::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap(),
    )
    .and_then(|s| s.with_range(0.0, 100.0))
    .expect("time scale");

    let bar = Bar::vertical(
        "b",
        Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap(),
    )
    .with_thickness(20.0);
    let geometry = bar.geometry(&x_scale, &y_scale).expect("geometry");

    assert_abs_diff_eq!(geometry.rect_x, 140.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.rect_y, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.height, 40.0, epsilon = 1e-9);
    assert_eq!(geometry.label_text, "2024-01-06T00:00:00Z");
}

#[test]
fn scale_errors_propagate_from_geometry() {
    let x_scale = PointScale::new(["a"], 0.0, 100.0).expect("point scale");
    let err = Bar::vertical("missing", 0.0, 1.0)
        .geometry(&x_scale, &times(1.0))
        .expect_err("unknown category");
    assert!(matches!(err, ChartError::UnmappedValue { scale: "point", .. }));
}

#[test]
fn bar_spec_defaults_and_orientation_check() {
    let spec = BarSpec::from_json_str(r#"{"x": "a", "y_end": 12.5}"#).expect("spec");
    assert_eq!(spec.thickness, 8.0);
    assert_eq!(spec.label_distance, 24.0);
    assert_eq!(spec.y, DomainValue::Number(0.0));

    let bar = spec.into_bar().expect("bar");
    assert_eq!(bar.orientation, BarOrientation::Vertical { y_end: DomainValue::Number(12.5) });

    let both = BarSpec::from_json_str(r#"{"x_end": 1, "y_end": 2}"#)
        .expect("spec")
        .into_bar()
        .expect_err("both ends");
    assert!(matches!(both, ChartError::InvalidPropCombination(_)));

    let bad = BarSpec::from_json_str(r#"{"thickness": "wide"}"#).expect_err("bad json");
    assert!(matches!(bad, ChartError::InvalidConfig(_)));
}

#[test]
fn bar_spec_parses_dates_before_categories() {
    let spec = BarSpec::from_json_str(
        r#"{"x": "2024-03-01T00:00:00Z", "x_end": "2024-03-05T00:00:00Z", "y": "row-1"}"#,
    )
    .expect("spec");

    assert!(matches!(spec.x, DomainValue::Date(_)));
    assert!(matches!(spec.x_end, Some(DomainValue::Date(_))));
    assert_eq!(spec.y, DomainValue::Category("row-1".to_owned()));
}

#[test]
fn thickness_must_be_finite_and_non_negative() {
    let zero = Bar::vertical(2.0, 1.0, 4.0)
        .with_thickness(0.0)
        .geometry(&times(10.0), &times(10.0))
        .expect("zero thickness");
    assert_eq!(zero.width, 0.0);
    assert_eq!(zero.rect_x, 20.0);

    for thickness in [-8.0, f64::NAN, f64::INFINITY] {
        let err = Bar::horizontal(1.0, 5.0, 2.0)
            .with_thickness(thickness)
            .with_label(true)
            .render(&times(10.0), &times(20.0))
            .expect_err("bad thickness");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }
}
