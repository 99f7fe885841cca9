use rct_chart::core::{DomainValue, LinearScale};
use rct_chart::marks::{Bar, BarOrientation};
use rct_chart::render::SvgNode;
use proptest::prelude::*;

proptest! {
    #[test]
    fn bar_size_is_never_negative(
        start in -1_000.0f64..1_000.0,
        end in -1_000.0f64..1_000.0,
        center in -1_000.0f64..1_000.0,
        thickness in 0.0f64..64.0,
        flip_range in any::<bool>(),
        horizontal in any::<bool>()
    ) {
        let (r0, r1) = if flip_range { (800.0, 0.0) } else { (0.0, 800.0) };
        let scale = LinearScale::new(-1_000.0, 1_000.0)
            .and_then(|s| s.with_range(r0, r1))
            .expect("scale");

        let bar = if horizontal {
            Bar::horizontal(start, end, center)
        } else {
            Bar::vertical(center, start, end)
        }
        .with_thickness(thickness);
        let g = bar.geometry(&scale, &scale).expect("geometry");

        prop_assert!(g.width >= 0.0);
        prop_assert!(g.height >= 0.0);
        if horizontal {
            prop_assert!((g.height - thickness).abs() <= 1e-9);
        } else {
            prop_assert!((g.width - thickness).abs() <= 1e-9);
        }
    }

    #[test]
    fn exactly_one_end_decides_orientation(
        x_end in proptest::option::of(-100.0f64..100.0),
        y_end in proptest::option::of(-100.0f64..100.0)
    ) {
        let result = BarOrientation::from_ends(
            x_end.map(DomainValue::Number),
            y_end.map(DomainValue::Number),
        );
        match (x_end, y_end) {
            (Some(_), None) => {
                prop_assert_eq!(result.expect("horizontal").name(), "horizontal");
            }
            (None, Some(_)) => {
                prop_assert_eq!(result.expect("vertical").name(), "vertical");
            }
            _ => {
                prop_assert!(result.is_err());
            }
        }
    }

    #[test]
    fn label_visibility_controls_text_count(
        value in 0.0f64..100.0,
        show_label in any::<bool>()
    ) {
        let scale = |v: &DomainValue| v.as_number().unwrap_or_default() * 4.0;
        let node = Bar::vertical(1.0, 0.0, value)
            .with_label(show_label)
            .render(&scale, &scale)
            .expect("render");

        prop_assert_eq!(node.text_count(), usize::from(show_label));
        prop_assert_eq!(matches!(node, SvgNode::Group(_)), show_label);
    }
}
