/// Triangle indices covering a row-major `(u_samples + 1) x (v_samples + 1)`
/// sample grid, as produced by the surface evaluators.
///
/// Every cell `(i, j)` emits `(top_left, bottom_left, top_right)` followed by
/// `(top_right, bottom_left, bottom_right)`, with
/// `top_left = i * (v_samples + 1) + j`. The winding is fixed; renderers rely
/// on it for backface culling and lighting.
#[must_use]
pub fn generate_surface_indices(u_samples: usize, v_samples: usize) -> Vec<u32> {
    let stride = v_samples + 1;
    let mut indices = Vec::with_capacity(u_samples * v_samples * 6);

    for i in 0..u_samples {
        for j in 0..v_samples {
            let top_left = (i * stride + j) as u32;
            let top_right = top_left + 1;
            let bottom_left = ((i + 1) * stride + j) as u32;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[top_left, bottom_left, top_right]);
            indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
        }
    }

    indices
}

/// Segment indices `(0,1), (1,2), ...` for drawing a sampled polyline as a
/// line list.
#[must_use]
pub fn polyline_segment_indices(point_count: usize) -> Vec<u32> {
    (1..point_count)
        .flat_map(|i| [(i - 1) as u32, i as u32])
        .collect()
}
