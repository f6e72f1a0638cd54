use chart_geometry::core::{Interval, LinearScale, OrdinalScale};
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_scale_round_trip_property(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        range_start in -4_096.0f64..4_096.0,
        range_span in 1.0f64..4_096.0,
        inverted in any::<bool>(),
        value_factor in 0.0f64..1.0
    ) {
        let domain = Interval::new(domain_start, domain_start + domain_span);
        let range = if inverted {
            Interval::new(range_start + range_span, range_start)
        } else {
            Interval::new(range_start, range_start + range_span)
        };
        let value = domain_start + value_factor * domain_span;

        let scale = LinearScale::new(domain, range).expect("valid scale");
        let px = scale.forward(value);
        let recovered = scale.inverse(px);

        prop_assert!((recovered - value).abs() <= 1e-6 * domain_span.max(1.0));
    }

    #[test]
    fn degenerate_linear_scale_always_hits_midpoint(
        domain_value in -1_000_000.0f64..1_000_000.0,
        input in -1_000_000.0f64..1_000_000.0,
        range_start in -4_096.0f64..4_096.0,
        range_span in 0.0f64..4_096.0
    ) {
        let range = Interval::new(range_start, range_start + range_span);
        let scale = LinearScale::new(Interval::new(domain_value, domain_value), range)
            .expect("valid scale");

        prop_assert_eq!(scale.forward(input), range.midpoint());
        prop_assert_eq!(scale.inverse(input), domain_value);
    }

    #[test]
    fn ordinal_scale_inverts_its_own_band_centers(
        label_count in 1usize..64,
        range_span in 16.0f64..4_096.0,
        index_seed in any::<usize>()
    ) {
        let labels: Vec<usize> = (0..label_count).collect();
        let scale = OrdinalScale::new(labels, Interval::new(0.0, range_span))
            .expect("valid scale");
        let index = index_seed % label_count;

        let center = scale.forward_index(index as f64);
        prop_assert_eq!(scale.inverse_index(center), Some(index));
    }
}
