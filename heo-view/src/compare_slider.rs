//! Before/after image comparison slider.

/// Divider position over two stacked images, as a percentage of the
/// container width from its left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageCompareSlider {
    position: f64,
}

impl Default for ImageCompareSlider {
    fn default() -> Self {
        Self { position: 50.0 }
    }
}

impl ImageCompareSlider {
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Move the divider to a pointer at client x `pointer_x` over a container
    /// whose left edge is at `left` and which is `width` wide.
    ///
    /// The result is clamped to `[0, 100]`. Containers without a positive
    /// width (not laid out yet) and non-finite coordinates leave the
    /// position unchanged.
    pub fn on_pointer(&mut self, pointer_x: f64, left: f64, width: f64) {
        if !pointer_x.is_finite() || !left.is_finite() || width.is_nan() || width <= 0.0 {
            return;
        }
        let ratio = (pointer_x - left) / width;
        if ratio.is_nan() {
            return;
        }
        self.position = (ratio * 100.0).clamp(0.0, 100.0);
    }

    /// CSS `clip-path` for the "after" image, revealing it right of the divider.
    pub fn clip_inset(&self) -> String {
        format!("inset(0 0 0 {:.1}%)", self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_centered() {
        let slider = ImageCompareSlider::default();
        assert_eq!(slider.position(), 50.0);
        assert_eq!(slider.clip_inset(), "inset(0 0 0 50.0%)");
    }

    #[test]
    fn test_pointer_inside_container() {
        let mut slider = ImageCompareSlider::default();
        slider.on_pointer(150.0, 100.0, 200.0);
        assert_eq!(slider.position(), 25.0);
    }

    #[test]
    fn test_position_is_clamped() {
        let mut slider = ImageCompareSlider::default();
        slider.on_pointer(20.0, 100.0, 200.0);
        assert_eq!(slider.position(), 0.0);
        slider.on_pointer(900.0, 100.0, 200.0);
        assert_eq!(slider.position(), 100.0);
    }

    #[test]
    fn test_zero_width_container_is_ignored() {
        let mut slider = ImageCompareSlider::default();
        slider.on_pointer(10.0, 0.0, 0.0);
        assert_eq!(slider.position(), 50.0);
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let mut slider = ImageCompareSlider::default();
        slider.on_pointer(150.0, 100.0, 200.0);
        slider.on_pointer(f64::NAN, 0.0, 200.0);
        assert_eq!(slider.position(), 25.0);
        slider.on_pointer(10.0, f64::INFINITY, 200.0);
        assert_eq!(slider.position(), 25.0);
        slider.on_pointer(f64::NEG_INFINITY, 0.0, 200.0);
        assert_eq!(slider.position(), 25.0);
        // an infinitely wide container still yields a finite position
        slider.on_pointer(50.0, 0.0, f64::INFINITY);
        assert!((0.0..=100.0).contains(&slider.position()));
        assert!(!slider.clip_inset().contains("NaN"));
    }
}
