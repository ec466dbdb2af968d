use crate::types::Coordinate;

/// Fills missing entries by linear interpolation between the nearest valid
/// neighbours.
///
/// Entries before the first valid sample take the first valid value and
/// entries after the last take the last one (flat, not linear,
/// extrapolation). Returns `None` when the input holds no valid sample.
pub fn fill_missing(raw: &[Coordinate]) -> Option<Vec<f64>> {
    let anchors: Vec<(usize, f64)> = raw
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.value().map(|v| (i, v)))
        .collect();
    if anchors.is_empty() {
        return None;
    }

    let mut out = Vec::with_capacity(raw.len());
    // Index of the first anchor at or after the current frame.
    let mut next = 0usize;
    for (i, c) in raw.iter().enumerate() {
        if let Some(v) = c.value() {
            out.push(v);
            continue;
        }
        while next < anchors.len() && anchors[next].0 < i {
            next += 1;
        }
        let value = if next == 0 {
            anchors[0].1
        } else if next == anchors.len() {
            anchors[anchors.len() - 1].1
        } else {
            lerp(anchors[next - 1], anchors[next], i)
        };
        out.push(value);
    }
    Some(out)
}

fn lerp((x1, y1): (usize, f64), (x2, y2): (usize, f64), x: usize) -> f64 {
    if x2 == x1 {
        return y1;
    }
    y1 + (y2 - y1) * (x - x1) as f64 / (x2 - x1) as f64
}
