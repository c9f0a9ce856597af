//! Terminal rendering of sampled field maps.

use std::f64::consts::FRAC_PI_4;

use crate::fields::ElectricField;
use crate::grid::FieldMap;
use crate::math::Scalar;

/// Glyphs from weakest to strongest normalised potential.
const DENSITY_RAMP: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];
/// Arrows for the eight direction octants, counter-clockwise from +x.
const ARROWS: [char; 8] = ['→', '↗', '↑', '↖', '←', '↙', '↓', '↘'];

/// Output options for [`render_potential`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Wrap every cell in a 24-bit ANSI colour escape.
    pub color: bool,
    /// Glyphs printed per cell; two keeps cells roughly square.
    pub cell_width: usize,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: false,
            cell_width: 2,
        }
    }
}

/// Renders the potential of `map` as text, top row first.
///
/// Negative potentials are scaled against the 2nd percentile and positive ones
/// against the 98th, then clamped to `[-1, 1]`.
#[must_use]
pub fn render_potential(map: &FieldMap, style: &TextStyle) -> String {
    let normals = normalise(map);
    let grid = map.grid();
    let mut out = String::with_capacity(grid.len() * (style.cell_width + 1));
    for j in (0..grid.rows()).rev() {
        for i in 0..grid.columns() {
            let normal = normals[j * grid.columns() + i];
            let glyph = density_glyph(normal);
            let cell: String = std::iter::repeat(glyph).take(style.cell_width).collect();
            if style.color {
                let (r, g, b) = cell_color(normal);
                out.push_str(&format!("\x1b[38;2;{r};{g};{b}m{cell}\x1b[0m"));
            } else {
                out.push_str(&cell);
            }
        }
        out.push('\n');
    }
    out
}

/// Renders one arrow per cell following the field direction, top row first.
#[must_use]
pub fn render_field(map: &FieldMap) -> String {
    let grid = map.grid();
    let mut out = String::with_capacity(grid.len() * 4);
    for j in (0..grid.rows()).rev() {
        for i in 0..grid.columns() {
            out.push(arrow(&ElectricField::from_vector(map.field_at(i, j))));
        }
        out.push('\n');
    }
    out
}

/// Arrow glyph for a field direction; `·` when the field vanishes.
#[must_use]
pub fn arrow(field: &ElectricField) -> char {
    if field.is_zero() {
        return '·';
    }
    let octant = (field.angle / FRAC_PI_4).round() as usize % ARROWS.len();
    ARROWS[octant]
}

/// Potentials of `map` mapped into `[-1, 1]`, row-major.
#[must_use]
pub fn normalise(map: &FieldMap) -> Vec<Scalar> {
    let low = map.percentile(0.02);
    let high = map.percentile(0.98);
    let potentials = map.potentials();

    let most_negative = potentials.iter().copied().fold(0.0, Scalar::min);
    let most_positive = potentials.iter().copied().fold(0.0, Scalar::max);
    let negative_scale = if low < 0.0 { -low } else { -most_negative };
    let positive_scale = if high > 0.0 { high } else { most_positive };

    potentials
        .iter()
        .map(|&v| {
            if v < 0.0 {
                (v / negative_scale).clamp(-1.0, 0.0)
            } else if v > 0.0 {
                (v / positive_scale).clamp(0.0, 1.0)
            } else {
                0.0
            }
        })
        .collect()
}

fn density_glyph(normal: Scalar) -> char {
    let index = (normal.abs() * (DENSITY_RAMP.len() - 1) as Scalar).round() as usize;
    DENSITY_RAMP[index.min(DENSITY_RAMP.len() - 1)]
}

fn cell_color(normal: Scalar) -> (u8, u8, u8) {
    let channel = |v: Scalar| (255.0 * v).round().clamp(0.0, 255.0) as u8;
    if normal < 0.0 {
        let c = channel(normal + 1.0);
        (c, c, 255)
    } else if normal > 0.0 {
        let c = channel(1.0 - normal);
        (255, c, c)
    } else {
        (255, 255, 255)
    }
}
