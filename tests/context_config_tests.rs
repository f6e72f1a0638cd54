use serde::{Deserialize, Serialize};

use chart_geometry::api::{AxisConfig, AxisDomain, ChartContext, ChartContextConfig};
use chart_geometry::core::{
    AxisPosition, AxisType, ChartPadding, ContainerSize, DEFAULT_REGION_COUNT, Rect, Series,
};

#[test]
fn chart_context_config_json_roundtrip() {
    let config = ChartContextConfig::new(ContainerSize::new(1024.0, 768.0))
        .with_padding(ChartPadding::uniform(4.5))
        .with_x_axis(AxisConfig::x().with_size(28.0).with_clamp(true))
        .with_y_axes(vec![
            AxisConfig::y().with_numeric_domain(10.5, 88.25).with_size(52.0),
            AxisConfig::new("volume", AxisType::Y).with_position(AxisPosition::End),
        ])
        .with_series(vec![
            Series::from_values("close", &[Some(12.0), None, Some(40.0)]).with_color("#2962ff"),
        ])
        .with_scrubbing_enabled(false)
        .with_accessible_region_count(6);

    let json = config
        .to_json_pretty()
        .expect("config should serialize to json");
    let restored = ChartContextConfig::from_json_str(&json).expect("config should deserialize");

    assert_eq!(restored, config);
}

#[test]
fn minimal_json_fills_defaults() {
    let config: ChartContextConfig =
        ChartContextConfig::from_json_str(r#"{ "container": { "width": 320.0, "height": 200.0 } }"#)
            .expect("config should deserialize");

    assert_eq!(config.container, Some(ContainerSize::new(320.0, 200.0)));
    assert_eq!(config.x_axis.id, "x");
    assert_eq!(config.x_axis.position, AxisPosition::End);
    assert_eq!(config.y_axes.len(), 1);
    assert_eq!(config.y_axes[0].position, AxisPosition::Start);
    assert_eq!(config.y_axes[0].domain, AxisDomain::Auto);
    assert!(config.scrubbing_enabled);
    assert_eq!(config.accessible_region_count, DEFAULT_REGION_COUNT);
}

#[test]
fn json_fixture_drives_context_layout() {
    let fixture = r#"{
        "container": { "width": 800.0, "height": 400.0 },
        "x_axis": { "id": "x", "orientation": "x", "position": "end", "size": 30.0 },
        "y_axes": [
            {
                "id": "y",
                "orientation": "y",
                "position": "start",
                "size": 40.0,
                "domain": { "numeric": { "min": 0.0, "max": 100.0 } }
            }
        ],
        "series": [
            { "id": "growth", "data": [ { "x": 0.0, "y": 12.0 }, null, { "x": 2.0, "y": 77.0 } ] }
        ]
    }"#;
    let config: ChartContextConfig =
        ChartContextConfig::from_json_str(fixture).expect("config should deserialize");
    let context = ChartContext::new(config).expect("context init");

    assert_eq!(
        context.drawing_area().expect("active"),
        Some(Rect::new(40.0, 0.0, 760.0, 370.0))
    );
    let y = context.y_scale(None).expect("active").expect("y scale");
    assert_eq!(y.forward(0.0), 370.0);
    assert_eq!(y.forward(100.0), 0.0);
}

#[test]
fn ordinal_domain_labels_roundtrip_with_custom_label_type() {
    let config = ChartContextConfig::<u32>::default()
        .with_x_axis(AxisConfig::ordinal("x", AxisType::X, vec![2023, 2024, 2025]));

    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"ordinal\""));
    let restored = ChartContextConfig::<u32>::from_json_str(&json).expect("deserialize");
    assert_eq!(restored.x_axis.domain, AxisDomain::Ordinal(vec![2023, 2024, 2025]));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Quarter(String);

#[test]
fn axis_configs_deserialize_with_label_type_lacking_default() {
    let json = r#"{
        "x_axis": { "id": "x", "orientation": "x", "position": "end" },
        "y_axes": [
            { "id": "q", "orientation": "y", "position": "start",
              "domain": { "ordinal": ["Q1", "Q2"] }, "size": 24.0 }
        ]
    }"#;
    let config = ChartContextConfig::<Quarter>::from_json_str(json).expect("deserialize");

    assert_eq!(config.x_axis.domain, AxisDomain::Auto);
    assert_eq!(config.x_axis.size, None);
    assert!(!config.x_axis.clamp);
    assert_eq!(
        config.y_axes[0].domain,
        AxisDomain::Ordinal(vec![Quarter("Q1".to_owned()), Quarter("Q2".to_owned())])
    );
    assert_eq!(config.y_axes[0].size, Some(24.0));
}

#[test]
fn malformed_json_is_reported_as_invalid_data() {
    let result = ChartContextConfig::<String>::from_json_str("{ \"container\": 5 }");
    assert!(result.is_err());
}
