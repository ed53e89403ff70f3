use super::{PackConfig, Packer, PlacedWord};
use crate::sizing::SizedWord;
use fastrand::Rng;

/// Average advance of one glyph relative to the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.6;
const SPIRAL_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Bounds {
    fn centred(cx: f64, cy: f64, half_w: f64, half_h: f64) -> Self {
        Self {
            x0: cx - half_w,
            y0: cy - half_h,
            x1: cx + half_w,
            y1: cy + half_h,
        }
    }

    #[inline(always)]
    fn overlaps(&self, other: &Bounds) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    #[inline(always)]
    fn inside(&self, width: f64, height: f64) -> bool {
        self.x0 >= 0.0 && self.y0 >= 0.0 && self.x1 <= width && self.y1 <= height
    }
}

/// Half extents of the padded text box after rotation.
fn rotated_half_extent(text: &str, size: f64, rotate: f64, padding: f64) -> (f64, f64) {
    let chars = text.chars().count().max(1) as f64;
    let w = GLYPH_WIDTH_RATIO * size * chars + 2.0 * padding;
    let h = size + 2.0 * padding;
    let (sin, cos) = rotate.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    ((w * cos + h * sin) / 2.0, (w * sin + h * cos) / 2.0)
}

#[inline(always)]
fn archimedean(aspect: f64, t: f64) -> (f64, f64) {
    let t = t * SPIRAL_STEP;
    (aspect * t * t.cos(), t * t.sin())
}

/// Spiral word-cloud packer.
///
/// Words are placed largest first. Each word gets a rotation in 30 degree steps from -90 to
/// 60 and a start point jittered around the centre, then walks an Archimedean spiral until
/// its padded bounding box fits inside the canvas without touching any placed word. Words
/// that run off the end of the spiral are left out.
pub struct SpiralPacker {
    rng: Rng,
}

impl Default for SpiralPacker {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SpiralPacker {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(s) = seed {
            Rng::with_seed(s)
        } else {
            Rng::new()
        };
        Self { rng }
    }
}

impl Packer for SpiralPacker {
    fn pack(&mut self, config: &PackConfig<'_>, words: &[SizedWord]) -> Vec<PlacedWord> {
        let width = config.size.width;
        let height = config.size.height;
        if !(width > 0.0 && height > 0.0) {
            return Vec::new();
        }

        let sizes: Vec<f64> = words.iter().map(|w| (config.font_size)(w)).collect();
        let mut order: Vec<usize> = (0..words.len()).collect();
        order.sort_by(|&a, &b| sizes[b].total_cmp(&sizes[a]));

        let aspect = width / height;
        let max_delta = config.size.diagonal();

        let mut boxes: Vec<Bounds> = Vec::with_capacity(words.len());
        let mut placed = Vec::with_capacity(words.len());

        for idx in order {
            let size = sizes[idx];
            if !(size.is_finite() && size > 0.0) {
                continue;
            }
            let text = &words[idx].text;

            let rotate = (self.rng.usize(0..6) as f64 - 3.0) * 30.0;
            let (half_w, half_h) = rotated_half_extent(text, size, rotate, config.padding);
            let start_x = width * (self.rng.f64() + 0.5) / 2.0;
            let start_y = height * (self.rng.f64() + 0.5) / 2.0;
            let dt = if self.rng.bool() { 1.0 } else { -1.0 };

            // Too big for the canvas in this orientation; no point walking the spiral.
            if 2.0 * half_w > width || 2.0 * half_h > height {
                continue;
            }

            let mut t = 0.0;
            loop {
                let (dx, dy) = archimedean(aspect, t);
                if dx.abs().min(dy.abs()) >= max_delta {
                    break;
                }

                let candidate = Bounds::centred(start_x + dx, start_y + dy, half_w, half_h);
                if candidate.inside(width, height) && !boxes.iter().any(|b| b.overlaps(&candidate))
                {
                    boxes.push(candidate);
                    placed.push(PlacedWord {
                        text: text.clone(),
                        size,
                        x: start_x + dx - width / 2.0,
                        y: start_y + dy - height / 2.0,
                        rotate,
                    });
                    break;
                }
                t += dt;
            }
        }

        placed
    }
}
