//! Separable Gaussian blur over a single-channel buffer.

/// Build a normalized 1-D Gaussian kernel for `sigma`.
///
/// The kernel spans `ceil(3 * sigma)` taps on each side of the center.
fn kernel(sigma: f64) -> Vec<f32> {
    let radius = (3.0 * sigma).ceil().max(1.0) as i64;
    let s2 = 2.0 * sigma * sigma;
    let mut weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-((x * x) as f64) / s2).exp())
        .collect();
    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights.into_iter().map(|w| w as f32).collect()
}

/// Blur `values` (row-major, `width * height`) in place.
///
/// Horizontal pass into a scratch row buffer, then vertical pass.
/// Taps that fall outside the image are dropped and the remaining weights
/// renormalized, so border pixels average only what is actually there.
/// A non-positive or non-finite `sigma` leaves the data as is.
pub fn gaussian_blur(values: &mut [f32], width: usize, height: usize, sigma: f64) {
    if !(sigma > 0.0 && sigma.is_finite()) || width == 0 || height == 0 {
        return;
    }
    debug_assert_eq!(values.len(), width * height);

    let k = kernel(sigma);
    let r = (k.len() / 2) as i64;
    let (w, h) = (width as i64, height as i64);

    let mut tmp = vec![0f32; values.len()];

    // Pass 1: rows -> tmp
    for y in 0..h {
        let row = (y * w) as usize;
        for x in 0..w {
            let (mut acc, mut wsum) = (0f32, 0f32);
            for (i, &kw) in k.iter().enumerate() {
                let sx = x + i as i64 - r;
                if (0..w).contains(&sx) {
                    acc += values[row + sx as usize] * kw;
                    wsum += kw;
                }
            }
            tmp[row + x as usize] = acc / wsum;
        }
    }

    // Pass 2: columns -> values
    for x in 0..w {
        for y in 0..h {
            let (mut acc, mut wsum) = (0f32, 0f32);
            for (i, &kw) in k.iter().enumerate() {
                let sy = y + i as i64 - r;
                if (0..h).contains(&sy) {
                    acc += tmp[(sy * w + x) as usize] * kw;
                    wsum += kw;
                }
            }
            values[(y * w + x) as usize] = acc / wsum;
        }
    }
}
