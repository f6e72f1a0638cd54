use chart_geometry::core::map_to_accessible_regions;
use proptest::prelude::*;

proptest! {
    #[test]
    fn regions_cover_input_exactly_once(
        len in 0usize..500,
        region_count in 0usize..40
    ) {
        let data: Vec<usize> = (0..len).collect();
        let regions = map_to_accessible_regions(&data, region_count);

        let flattened: Vec<usize> = regions.iter().flat_map(|r| r.data.iter().copied()).collect();
        prop_assert_eq!(flattened, data);

        let expected_regions = if len == 0 { 0 } else { len.min(region_count.max(1)) };
        prop_assert_eq!(regions.len(), expected_regions);
        prop_assert_eq!(
            regions.iter().map(|r| r.proportional_width).sum::<usize>(),
            len
        );
    }
}
