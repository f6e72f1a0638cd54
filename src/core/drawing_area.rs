use crate::core::{AxisPosition, AxisRegistry, AxisType, ChartPadding, Rect};

/// Plot rectangle left after subtracting every registered axis inset.
#[must_use]
pub fn compute_drawing_area(
    container_width: f64,
    container_height: f64,
    registry: &AxisRegistry,
) -> Rect {
    compute_drawing_area_with_padding(
        container_width,
        container_height,
        registry,
        ChartPadding::default(),
    )
}

/// Same as [`compute_drawing_area`] with fixed padding added to each side.
#[must_use]
pub fn compute_drawing_area_with_padding(
    container_width: f64,
    container_height: f64,
    registry: &AxisRegistry,
    padding: ChartPadding,
) -> Rect {
    let left = padding.left + registry.inset(AxisType::Y, AxisPosition::Start);
    let right = padding.right + registry.inset(AxisType::Y, AxisPosition::End);
    let top = padding.top + registry.inset(AxisType::X, AxisPosition::Start);
    let bottom = padding.bottom + registry.inset(AxisType::X, AxisPosition::End);

    Rect::new(
        left,
        top,
        container_width - left - right,
        container_height - top - bottom,
    )
}

/// Strip occupied by axis `id`, stacked outward from `drawing_area` in
/// registration order.
#[must_use]
pub fn axis_strip(registry: &AxisRegistry, drawing_area: Rect, id: &str) -> Option<Rect> {
    let axis = registry.get(id)?;
    let offset = registry.offset_before(id)?;
    let size = axis.size;

    let strip = match (axis.axis_type, axis.position) {
        (AxisType::Y, AxisPosition::Start) => Rect::new(
            drawing_area.x - offset - size,
            drawing_area.y,
            size,
            drawing_area.height,
        ),
        (AxisType::Y, AxisPosition::End) => Rect::new(
            drawing_area.right() + offset,
            drawing_area.y,
            size,
            drawing_area.height,
        ),
        (AxisType::X, AxisPosition::Start) => Rect::new(
            drawing_area.x,
            drawing_area.y - offset - size,
            drawing_area.width,
            size,
        ),
        (AxisType::X, AxisPosition::End) => Rect::new(
            drawing_area.x,
            drawing_area.bottom() + offset,
            drawing_area.width,
            size,
        ),
    };
    Some(strip)
}
