use crate::foundation::error::{ReelError, ReelResult};
use image::GrayImage;

/// Ordered characters used to encode brightness, from the lowest level to the highest.
///
/// Ramps may run sparse->dense (`" .:-=+*#%@"`) or dense->sparse; the rasterizer only uses the
/// order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharRamp {
    chars: Vec<char>,
}

impl CharRamp {
    /// Default sparse->dense ramp.
    pub const DEFAULT: &'static str = " .:-=+*#%@";

    pub fn new(ramp: &str) -> ReelResult<Self> {
        let chars: Vec<char> = ramp.chars().collect();
        if chars.is_empty() {
            return Err(ReelError::validation("character ramp must not be empty"));
        }
        if chars.iter().any(|c| c.is_control()) {
            return Err(ReelError::validation(
                "character ramp must not contain control characters",
            ));
        }
        Ok(Self { chars })
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Character for a brightness level in `[0, 1]` (clamped).
    pub fn pick(&self, level: f64) -> char {
        let last = self.chars.len() - 1;
        let level = if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) };
        let idx = (level * last as f64).round() as usize;
        self.chars[idx.min(last)]
    }
}

impl Default for CharRamp {
    fn default() -> Self {
        Self {
            chars: Self::DEFAULT.chars().collect(),
        }
    }
}

/// Luminance-to-character rasterizer over grayscale renders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsciiRasterizer {
    /// Map dark pixels to the end of the ramp instead of the start.
    pub invert: bool,
    /// Glyph width divided by glyph height; cells are `1 / cell_aspect` times taller than wide.
    pub cell_aspect: f64,
    /// Emit a single HTML table cell with `<br/>` rows and entity-encoded characters.
    pub markup: bool,
}

impl Default for AsciiRasterizer {
    fn default() -> Self {
        Self {
            invert: false,
            cell_aspect: 0.5,
            markup: false,
        }
    }
}

impl AsciiRasterizer {
    /// Rasterize `img` into `columns` character columns.
    ///
    /// Returns `None` when the image has no pixels.
    pub fn rasterize(&self, img: &GrayImage, columns: u32, ramp: &CharRamp) -> Option<String> {
        let (w, h) = img.dimensions();
        if w == 0 || h == 0 || columns == 0 {
            return None;
        }

        let cell_w = f64::from(w) / f64::from(columns);
        let aspect = if self.cell_aspect > 0.0 {
            self.cell_aspect
        } else {
            1.0
        };
        let cell_h = cell_w / aspect;
        let rows = ((f64::from(h) / cell_h).floor() as u32).max(1);

        let mut out = String::with_capacity(capacity_hint(rows, columns));
        if self.markup {
            out.push_str("<table><tr><td>");
        }
        for row in 0..rows {
            let (y0, y1) = span(row, cell_h, h);
            for col in 0..columns {
                let (x0, x1) = span(col, cell_w, w);
                let level = mean_luma(img, x0, x1, y0, y1) / 255.0;
                let level = if self.invert { 1.0 - level } else { level };
                let c = ramp.pick(level);
                if self.markup {
                    push_escaped(&mut out, c);
                } else {
                    out.push(c);
                }
            }
            if self.markup {
                out.push_str("<br/>");
            } else if row + 1 < rows {
                out.push('\n');
            }
        }
        if self.markup {
            out.push_str("</td></tr></table>");
        }
        Some(out)
    }
}

/// Initial output buffer size: one byte per cell plus row breaks, capped so huge grids grow on
/// demand instead of reserving up front.
fn capacity_hint(rows: u32, columns: u32) -> usize {
    const MAX_HINT: usize = 1 << 20;
    (rows as usize)
        .saturating_mul((columns as usize).saturating_add(6))
        .min(MAX_HINT)
}

/// Pixel range `[start, end)` covered by cell `i`; never empty.
fn span(i: u32, cell: f64, limit: u32) -> (u32, u32) {
    let start = ((f64::from(i) * cell).floor() as u32).min(limit - 1);
    let end = ((f64::from(i + 1) * cell).floor() as u32).clamp(start + 1, limit);
    (start, end)
}

fn mean_luma(img: &GrayImage, x0: u32, x1: u32, y0: u32, y1: u32) -> f64 {
    let mut sum = 0u64;
    for y in y0..y1 {
        for x in x0..x1 {
            sum += u64::from(img.get_pixel(x, y).0[0]);
        }
    }
    let n = u64::from(x1 - x0) * u64::from(y1 - y0);
    sum as f64 / n as f64
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        ' ' => out.push_str("&nbsp;"),
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        _ => out.push(c),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/ascii.rs"]
mod tests;
