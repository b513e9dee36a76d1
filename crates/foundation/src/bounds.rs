/// Viewport-relative rectangle, as reported by `getBoundingClientRect`.
///
/// `top`/`bottom` grow downward, in CSS pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClientRect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl ClientRect {
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        ClientRect {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Full-width rectangle spanning `top..bottom`.
    pub fn vertical(top: f64, bottom: f64) -> Self {
        ClientRect::new(top, bottom, 0.0, 0.0)
    }

    /// True when the horizontal line at `y` passes through the rectangle.
    ///
    /// The top edge is inclusive, the bottom edge exclusive, so two stacked
    /// rectangles sharing an edge never both straddle the same line.
    pub fn straddles(&self, y: f64) -> bool {
        self.bottom > y && self.top <= y
    }
}
