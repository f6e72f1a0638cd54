use serde::{Deserialize, Serialize};

pub const DEFAULT_REGION_COUNT: usize = 10;

/// Contiguous slice of a series narrated as one unit by assistive tech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibleRegion<T> {
    pub data: Vec<T>,
    /// Item count, consumed as a flex weight rather than a pixel width.
    pub proportional_width: usize,
}

/// Splits `data` into `region_count` contiguous regions.
///
/// Every region holds `len / region_count` items and the remainder is folded
/// into the last region. Shorter inputs get one region per item.
#[must_use]
pub fn map_to_accessible_regions<T: Clone>(
    data: &[T],
    region_count: usize,
) -> Vec<AccessibleRegion<T>> {
    if data.is_empty() {
        return Vec::new();
    }
    let region_count = region_count.max(1);
    let chunk_size = (data.len() / region_count).max(1);

    let mut regions: Vec<AccessibleRegion<T>> = data
        .chunks(chunk_size)
        .map(|chunk| AccessibleRegion {
            data: chunk.to_vec(),
            proportional_width: chunk.len(),
        })
        .collect();

    while regions.len() > region_count {
        let Some(tail) = regions.pop() else {
            break;
        };
        if let Some(last) = regions.last_mut() {
            last.proportional_width += tail.proportional_width;
            last.data.extend(tail.data);
        }
    }
    regions
}
