use image::math::Rect;

/// The part of a photograph handed to the sampler.
///
/// Product photography almost always centers the garment, so cropping toward the middle removes walls, floor and
/// some exposed skin without any segmentation. Tighter crops reduce background contamination but can end up seeing
/// only a fold's shadow or highlight instead of the base dye.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Roi {
    /// The whole image.
    Full,
    /// A box around the image center spanning `±vertical·H` and `±horizontal·W`.
    Centered { vertical: f32, horizontal: f32 },
    /// A box whose edges are given as fractions of the image size, measured from the top-left corner. Allows
    /// asymmetric crops such as a center-top bias for garments worn by a model.
    Edges { top: f32, bottom: f32, left: f32, right: f32 },
    /// An explicit pixel rectangle. Clipped to the image bounds.
    Pixels { x: u32, y: u32, width: u32, height: u32 },
}

impl Roi {
    pub fn centered(vertical: f32, horizontal: f32) -> Self {
        Roi::Centered { vertical, horizontal }
    }

    /// Resolves the region against an image of the given size. Returns `None` if the region is degenerate, i.e. it
    /// would contain no pixel of the image.
    pub fn resolve(self, width: u32, height: u32) -> Option<Rect> {
        if width == 0 || height == 0 {
            return None;
        }

        match self {
            Roi::Full => Some(Rect {
                x: 0,
                y: 0,
                width,
                height,
            }),
            Roi::Centered { vertical, horizontal } => Roi::Edges {
                top: 0.5 - vertical,
                bottom: 0.5 + vertical,
                left: 0.5 - horizontal,
                right: 0.5 + horizontal,
            }
            .resolve(width, height),
            Roi::Edges {
                top,
                bottom,
                left,
                right,
            } => {
                let (y0, y1) = fraction_span(top, bottom, height)?;
                let (x0, x1) = fraction_span(left, right, width)?;

                Some(Rect {
                    x: x0,
                    y: y0,
                    width: x1 - x0,
                    height: y1 - y0,
                })
            }
            Roi::Pixels {
                x,
                y,
                width: w,
                height: h,
            } => {
                if x >= width || y >= height || w == 0 || h == 0 {
                    return None;
                }

                Some(Rect {
                    x,
                    y,
                    width: w.min(width - x),
                    height: h.min(height - y),
                })
            }
        }
    }

    /// Like [`Roi::resolve`], but falls back to the full image for a degenerate region. The flag tells whether the
    /// fallback was taken.
    pub fn resolve_or_full(self, width: u32, height: u32) -> (Rect, bool) {
        match self.resolve(width, height) {
            Some(rect) => (rect, false),
            None => (
                Rect {
                    x: 0,
                    y: 0,
                    width,
                    height,
                },
                true,
            ),
        }
    }
}

impl Default for Roi {
    fn default() -> Self {
        Roi::centered(0.25, 0.25)
    }
}

// maps a [start, end) fraction pair onto pixel indices, truncating like array slicing does
fn fraction_span(start: f32, end: f32, len: u32) -> Option<(u32, u32)> {
    if !start.is_finite() || !end.is_finite() {
        return None;
    }

    let start = (start.clamp(0.0, 1.0) * len as f32) as u32;
    let end = ((end.clamp(0.0, 1.0) * len as f32) as u32).min(len);

    if end > start {
        Some((start, end))
    } else {
        None
    }
}
