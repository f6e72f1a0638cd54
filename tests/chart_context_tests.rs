use chart_geometry::api::{AxisConfig, ChartContext, ChartContextConfig};
use chart_geometry::core::{
    AxisPosition, AxisRegistry, AxisType, ChartPadding, ContainerSize, DataPoint, Interval, Rect, Series,
};
use chart_geometry::ChartError;

fn revenue() -> Series {
    Series::from_values("revenue", &[Some(10.0), Some(55.0), Some(90.0), Some(40.0)])
}

fn end_to_end_config() -> ChartContextConfig {
    ChartContextConfig::new(ContainerSize::new(800.0, 400.0))
        .with_x_axis(AxisConfig::x().with_size(30.0))
        .with_y_axes(vec![
            AxisConfig::y()
                .with_numeric_domain(0.0, 100.0)
                .with_size(40.0),
        ])
        .with_series(vec![revenue()])
}

#[test]
fn end_to_end_layout_through_axis_configs() {
    let context = ChartContext::new(end_to_end_config()).expect("context init");

    assert_eq!(
        context.drawing_area().expect("active"),
        Some(Rect::new(40.0, 0.0, 760.0, 370.0))
    );
    let y = context.y_scale(None).expect("active").expect("y scale");
    assert_eq!(y.forward(0.0), 370.0);
    assert_eq!(y.forward(100.0), 0.0);

    let x = context.x_scale().expect("active").expect("x scale");
    assert_eq!(x.forward(0.0), 40.0);
    assert_eq!(x.forward(3.0), 800.0);
    assert_eq!(context.layout_revision().expect("active"), 1);
}

#[test]
fn end_to_end_layout_through_explicit_registration() {
    let config = ChartContextConfig::new(ContainerSize::new(800.0, 400.0))
        .with_y_axes(vec![AxisConfig::y().with_numeric_domain(0.0, 100.0)])
        .with_series(vec![revenue()]);
    let mut context = ChartContext::new(config).expect("context init");
    assert_eq!(
        context.drawing_area().expect("active"),
        Some(Rect::new(0.0, 0.0, 800.0, 400.0))
    );

    context
        .register_axis("y", AxisType::Y, AxisPosition::Start, 40.0)
        .expect("register y");
    context
        .register_axis("x", AxisType::X, AxisPosition::End, 30.0)
        .expect("register x");

    assert_eq!(
        context.drawing_area().expect("active"),
        Some(Rect::new(40.0, 0.0, 760.0, 370.0))
    );
    assert_eq!(
        context.axis_bounds("y").expect("active"),
        Some(Rect::new(0.0, 0.0, 40.0, 370.0))
    );
    assert_eq!(
        context.axis_bounds("x").expect("active"),
        Some(Rect::new(40.0, 370.0, 760.0, 30.0))
    );
    let y = context.y_scale(Some("y")).expect("active").expect("y scale");
    assert_eq!(y.forward(0.0), 370.0);
    assert_eq!(y.forward(100.0), 0.0);
    assert_eq!(context.layout_revision().expect("active"), 3);
}

#[test]
fn batch_commits_once_with_final_geometry() {
    let mut context = ChartContext::new(ChartContextConfig::new(ContainerSize::new(
        500.0, 300.0,
    )))
    .expect("context init");
    let before = context.layout_revision().expect("active");

    context
        .update(|batch| {
            batch.register_axis("left", AxisType::Y, AxisPosition::Start, 50.0)?;
            batch.register_axis("right", AxisType::Y, AxisPosition::End, 20.0)?;
            batch.register_axis("bottom", AxisType::X, AxisPosition::End, 24.0)?;
            batch.set_container_size(ContainerSize::new(600.0, 320.0))?;
            batch.set_series(vec![revenue()])
        })
        .expect("batch");

    assert_eq!(context.layout_revision().expect("active"), before + 1);
    assert_eq!(
        context.drawing_area().expect("active"),
        Some(Rect::new(50.0, 0.0, 530.0, 296.0))
    );
    assert_eq!(context.registry().expect("active").len(), 3);
}

#[test]
fn failed_batch_discards_every_queued_change() {
    let mut context = ChartContext::new(end_to_end_config()).expect("context init");
    let before_area = context.drawing_area().expect("active");

    let result = context.update(|batch| {
        batch.register_axis("extra", AxisType::Y, AxisPosition::End, 60.0)?;
        batch.set_container_size(ContainerSize::new(-5.0, 100.0))
    });

    assert!(matches!(result, Err(ChartError::InvalidContainer { .. })));
    assert_eq!(context.layout_revision().expect("active"), 1);
    assert_eq!(context.drawing_area().expect("active"), before_area);
    assert!(!context.registry().expect("active").contains("extra"));
}

#[test]
fn batch_and_registry_reject_the_same_axis_reservations() {
    let mut context = ChartContext::new(end_to_end_config()).expect("context init");
    let invalid = [("", 10.0), ("neg", -1.0), ("nan", f64::NAN)];

    for (id, size) in invalid {
        let queued =
            context.update(|batch| batch.register_axis(id, AxisType::Y, AxisPosition::End, size));
        let direct = AxisRegistry::new().register(id, AxisType::Y, AxisPosition::End, size);
        match (queued, direct) {
            (Err(ChartError::InvalidData(queued)), Err(ChartError::InvalidData(direct))) => {
                assert_eq!(queued, direct, "axis `{id}` size {size}");
            }
            other => panic!("axis `{id}` size {size} should be rejected: {other:?}"),
        }
    }
    assert_eq!(context.layout_revision().expect("active"), 1);
}

#[test]
fn empty_batch_does_not_bump_revision() {
    let mut context = ChartContext::new(end_to_end_config()).expect("context init");
    let value = context.update(|_batch| Ok(7)).expect("empty batch");
    assert_eq!(value, 7);
    assert_eq!(context.layout_revision().expect("active"), 1);
}

#[test]
fn nothing_is_published_before_container_is_measured() {
    let mut context =
        ChartContext::new(ChartContextConfig::<String>::default().with_series(vec![revenue()]))
            .expect("context init");

    assert_eq!(context.layout_revision().expect("active"), 0);
    assert_eq!(context.drawing_area().expect("active"), None);
    assert!(context.x_scale().expect("active").is_none());
    assert!(context.y_scale(None).expect("active").is_none());

    context
        .set_container_size(ContainerSize::new(200.0, 100.0))
        .expect("resize");
    assert_eq!(context.layout_revision().expect("active"), 1);
    assert!(context.x_scale().expect("active").is_some());
    let y = context.y_scale(None).expect("active").expect("y scale");
    assert_eq!(y.forward(10.0), 100.0);
    assert_eq!(y.forward(90.0), 0.0);
}

#[test]
fn invalid_container_on_init_is_rejected() {
    let config = ChartContextConfig::new(ContainerSize::new(f64::NAN, 10.0));
    assert!(matches!(
        ChartContext::new(config),
        Err(ChartError::InvalidContainer { .. })
    ));
}

#[test]
fn series_lookup_defaults_to_first_series() {
    let volume = Series::from_values("volume", &[Some(1.0), None]);
    let context = ChartContext::new(
        ChartContextConfig::new(ContainerSize::new(100.0, 100.0))
            .with_series(vec![revenue(), volume]),
    )
    .expect("context init");

    assert_eq!(
        context.series(None).expect("active").map(|s| s.id.as_str()),
        Some("revenue")
    );
    assert_eq!(
        context.series_data(Some("volume")).expect("active"),
        Some(&[Some(DataPoint::new(0.0, 1.0)), None][..])
    );
    assert!(context.series(Some("missing")).expect("active").is_none());
    assert_eq!(context.series_list().expect("active").len(), 2);
}

#[test]
fn duplicate_series_ids_are_rejected() {
    let mut context = ChartContext::new(end_to_end_config()).expect("context init");
    let result = context.set_series(vec![revenue(), revenue()]);
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
}

#[test]
fn y_scales_follow_series_binding() {
    let price = Series::from_values("price", &[Some(100.0), Some(120.0)]);
    let volume =
        Series::from_values("volume", &[Some(2_000.0), Some(8_000.0)]).with_y_axis("volume");
    let config = ChartContextConfig::new(ContainerSize::new(300.0, 200.0))
        .with_y_axes(vec![
            AxisConfig::new("price", AxisType::Y),
            AxisConfig::new("volume", AxisType::Y).with_position(AxisPosition::End),
        ])
        .with_series(vec![price, volume]);
    let context = ChartContext::new(config).expect("context init");

    let default_scale = context.y_scale(None).expect("active").expect("price");
    assert_eq!(default_scale.forward(100.0), 200.0);
    assert_eq!(default_scale.forward(120.0), 0.0);

    let volume_scale = context
        .y_scale(Some("volume"))
        .expect("active")
        .expect("volume");
    assert_eq!(volume_scale.forward(2_000.0), 200.0);
    assert_eq!(volume_scale.forward(8_000.0), 0.0);
    assert!(context.y_scale(Some("missing")).expect("active").is_none());
}

#[test]
fn flat_series_publishes_midpoint_scale() {
    let flat = Series::from_values("flat", &[Some(5.0), Some(5.0), Some(5.0)]);
    let context = ChartContext::new(
        ChartContextConfig::new(ContainerSize::new(100.0, 80.0)).with_series(vec![flat]),
    )
    .expect("context init");

    let y = context.y_scale(None).expect("active").expect("y scale");
    assert_eq!(y.forward(5.0), 40.0);
    assert_eq!(y.forward(-3.0), 40.0);
}

#[test]
fn auto_x_domain_covers_edge_gap_slots() {
    let gappy = Series::from_values("gappy", &[None, Some(2.0), Some(4.0), None, None]);
    let context = ChartContext::new(
        ChartContextConfig::new(ContainerSize::new(400.0, 100.0)).with_series(vec![gappy]),
    )
    .expect("context init");

    let x = context.x_scale().expect("active").expect("x scale");
    let linear = x.as_linear().expect("linear x scale");
    assert_eq!(linear.domain(), Interval::new(0.0, 4.0));
    assert_eq!(x.forward(0.0), 0.0);
    assert_eq!(x.forward(4.0), 400.0);
}

#[test]
fn auto_axes_without_series_publish_no_scale() {
    let context = ChartContext::new(ChartContextConfig::new(ContainerSize::new(100.0, 80.0)))
        .expect("context init");
    assert!(context.drawing_area().expect("active").is_some());
    assert!(context.x_scale().expect("active").is_none());
    assert!(context.y_scale(None).expect("active").is_none());
}

#[test]
fn removing_axis_size_releases_its_reservation() {
    let mut context = ChartContext::new(end_to_end_config()).expect("context init");
    context
        .set_y_axes(vec![AxisConfig::y().with_numeric_domain(0.0, 100.0)])
        .expect("replace y axes");

    assert!(!context.registry().expect("active").contains("y"));
    assert_eq!(
        context.drawing_area().expect("active"),
        Some(Rect::new(0.0, 0.0, 800.0, 370.0))
    );
}

#[test]
fn ordinal_x_axis_places_labels_in_bands() {
    let labels: Vec<String> = ["q1", "q2", "q3", "q4"].map(str::to_owned).to_vec();
    let mut context = ChartContext::new(
        ChartContextConfig::new(ContainerSize::new(400.0, 100.0)).with_series(vec![revenue()]),
    )
    .expect("context init");
    context
        .set_x_axis(AxisConfig::ordinal("x", AxisType::X, labels))
        .expect("ordinal x axis");

    let x = context.x_scale().expect("active").expect("x scale");
    let ordinal = x.as_ordinal().expect("ordinal");
    assert_eq!(ordinal.forward_label(&"q3".to_owned()), Some(250.0));
    assert_eq!(ordinal.inverse_label(60.0).map(String::as_str), Some("q1"));
}

#[test]
fn x_axis_with_wrong_orientation_is_rejected() {
    let mut context = ChartContext::new(end_to_end_config()).expect("context init");
    assert!(context.set_x_axis(AxisConfig::y()).is_err());
    assert_eq!(context.layout_revision().expect("active"), 1);
}

#[test]
fn padding_shrinks_published_drawing_area() {
    let mut context = ChartContext::new(end_to_end_config()).expect("context init");
    context
        .set_padding(ChartPadding::uniform(10.0))
        .expect("padding");
    assert_eq!(
        context.drawing_area().expect("active"),
        Some(Rect::new(50.0, 10.0, 740.0, 350.0))
    );
    assert!(context.set_padding(ChartPadding::uniform(-1.0)).is_err());
}

#[test]
fn unregister_axis_reports_whether_it_existed() {
    let mut context = ChartContext::new(end_to_end_config()).expect("context init");
    assert!(!context.unregister_axis("missing").expect("active"));
    assert_eq!(context.layout_revision().expect("active"), 1);

    assert!(context.unregister_axis("x").expect("active"));
    assert_eq!(context.layout_revision().expect("active"), 2);
    assert_eq!(
        context.drawing_area().expect("active"),
        Some(Rect::new(40.0, 0.0, 760.0, 400.0))
    );
}

#[test]
fn accessible_regions_use_configured_count() {
    let values: Vec<Option<f64>> = (0..25).map(|v| Some(f64::from(v))).collect();
    let context = ChartContext::new(
        ChartContextConfig::new(ContainerSize::new(100.0, 40.0))
            .with_series(vec![Series::from_values("spark", &values)])
            .with_accessible_region_count(4),
    )
    .expect("context init");

    let regions = context.accessible_regions(None).expect("active");
    let widths: Vec<usize> = regions.iter().map(|r| r.proportional_width).collect();
    assert_eq!(widths, vec![6, 6, 6, 7]);
    assert!(context
        .accessible_regions(Some("missing"))
        .expect("active")
        .is_empty());
}
