//! Autoscale-to-budget: pick one uniform downscale factor so the final
//! canvas stays within a maximum total pixel count.
//!
//! Canvas area scales quadratically with a linear scale, so the first
//! estimate is `sqrt(budget / unscaled_pixels)`. Flooring, one-pixel
//! minimums, and per-track maxima make the real layout non-linear, so
//! the layout is measured again at that estimate and, if still over
//! budget, the scale is multiplied once more by
//! `sqrt(budget / measured_pixels)`. The correction is applied once and
//! not iterated; the result is not guaranteed to land exactly on or
//! under the budget.

use tracing::debug;

use crate::types::{PipelineError, Size};

/// Compute the scale factor for a layout whose canvas size at a given
/// scale is reported by `measure`.
///
/// `measure(1.0)` must return the unscaled canvas size, and
/// `measure(s)` for `s < 1.0` the canvas size after every image, margin,
/// and gap has been scaled by `s` (see
/// [`scale_length`](crate::resample::scale_length)).
///
/// Returns exactly `1.0` when `max_total_pixels` is zero or the unscaled
/// canvas already fits. Otherwise the result lies in `(0, 1)`.
///
/// # Errors
///
/// Propagates any error from `measure`.
#[allow(clippy::cast_precision_loss)]
pub fn fit_scale<F>(max_total_pixels: u64, measure: F) -> Result<f64, PipelineError>
where
    F: Fn(f64) -> Result<Size, PipelineError>,
{
    if max_total_pixels == 0 {
        return Ok(1.0);
    }

    let unscaled = measure(1.0)?;
    let pixels = unscaled.area();
    if pixels <= max_total_pixels {
        return Ok(1.0);
    }

    let budget = max_total_pixels as f64;
    let mut scale = (budget / pixels as f64).sqrt();

    let estimated = measure(scale)?;
    if estimated.area() > max_total_pixels {
        let corrected = scale * (budget / estimated.area() as f64).sqrt();
        debug!(
            first = scale,
            corrected,
            estimated = %estimated,
            "first budget estimate overshot, applying correction"
        );
        scale = corrected;
    }

    debug!(
        %unscaled,
        budget = max_total_pixels,
        scale,
        "downscaling to fit pixel budget"
    );
    Ok(scale)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::grid::grid_size;
    use crate::resample::{scale_length, scale_size};

    /// Margin-free linear measure: a `w x h` canvas scaled uniformly.
    fn linear(w: u32, h: u32) -> impl Fn(f64) -> Result<Size, PipelineError> {
        move |s| Ok(scale_size(Size::new(w, h), s))
    }

    #[test]
    fn disabled_budget_is_identity() {
        assert_eq!(fit_scale(0, linear(10_000, 10_000)).unwrap(), 1.0);
    }

    #[test]
    fn fitting_canvas_is_identity() {
        assert_eq!(fit_scale(100 * 100, linear(100, 100)).unwrap(), 1.0);
        assert_eq!(fit_scale(1_000_000, linear(100, 100)).unwrap(), 1.0);
    }

    #[test]
    fn oversize_canvas_scales_down_under_budget() {
        let budget = 250_000;
        let scale = fit_scale(budget, linear(1000, 1000)).unwrap();
        assert!(scale > 0.0 && scale < 1.0);
        assert!((scale - 0.5).abs() < 1e-9);
        assert!(scale_size(Size::new(1000, 1000), scale).area() <= budget);
    }

    #[test]
    fn first_estimate_meets_budget_without_margins() {
        for (w, h, budget) in [(1920, 1080, 1_000_000), (333, 777, 12_345), (5000, 10, 999)] {
            let scale = fit_scale(budget, linear(w, h)).unwrap();
            let scaled = scale_size(Size::new(w, h), scale);
            assert!(
                scaled.area() <= budget,
                "{w}x{h} at {scale} -> {scaled} exceeds {budget}"
            );
        }
    }

    #[test]
    fn correction_applies_once_when_floors_overshoot() {
        // 100 tiny tiles: at the first estimate every tile and the margin
        // floor to 1px, so the grid is 21x21 = 441 against a budget of 200.
        let sizes = vec![Size::new(3, 3); 100];
        let calls = std::cell::Cell::new(0);
        let measure = |s: f64| {
            calls.set(calls.get() + 1);
            let scaled: Vec<Size> = sizes.iter().map(|&sz| scale_size(sz, s)).collect();
            grid_size(&scaled, 10, scale_length(1, s))
        };
        assert_eq!(measure(1.0).unwrap(), Size::new(41, 41));
        calls.set(0);

        let budget = 200;
        let scale = fit_scale(budget, measure).unwrap();
        // Unscaled and first-estimate measurements only; the corrected
        // scale is never re-measured.
        assert_eq!(calls.get(), 2);

        let first = (200.0_f64 / 1681.0).sqrt();
        assert_eq!(measure(first).unwrap(), Size::new(21, 21));
        assert!(scale < first);
        assert_eq!(scale, first * (200.0_f64 / 441.0).sqrt());
        // Still over budget after the single correction.
        assert!(measure(scale).unwrap().area() > budget);
    }

    #[test]
    fn measure_errors_propagate() {
        let result = fit_scale(10, |_| Err(PipelineError::EmptyInput));
        assert!(matches!(result, Err(PipelineError::EmptyInput)));
    }
}
