//! Engine state and the generation pass.

use tiny_skia::{Color, Pixmap, PixmapPaint, Transform};

use crate::color::Rgb;
use crate::grid::GridWalker;
use crate::image::SourceImage;
use crate::mask::{cut, EraseMask};
use crate::params::HalftoneParams;
use crate::policy::{Decision, GatePolicy};
use crate::preprocess::{sample_window, LuminanceMap, ToneMapper};
use crate::render::ShapeRenderer;

/// Counters from one generation pass.
///
/// `visited == drawn + skipped_empty + skipped_range + skipped_matrix`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateStats {
    /// In-bounds grid cells considered
    pub visited: u64,
    /// Cells that produced a shape (including zero-sized ones)
    pub drawn: u64,
    /// Cells whose sample window held no pixels
    pub skipped_empty: u64,
    /// Cells outside the darkness threshold range
    pub skipped_range: u64,
    /// Cells rejected by the dither matrix
    pub skipped_matrix: u64,
}

/// A cell that survived sampling and gating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub grid_x: i64,
    pub grid_y: i64,
    /// Shape center in canvas pixels
    pub x: f64,
    pub y: f64,
    /// Radius or half-side in pixels
    pub size: f64,
    pub darkness: f64,
    /// Tone-mapped brightness, used as the color ramp position
    pub normalized: f64,
    pub color: Rgb,
}

/// Lazy stream of [`Placement`]s for an image and parameter set.
///
/// Owns an image-sized luminance buffer; nothing else is allocated per cell.
/// [`stats`](Self::stats) is complete once the iterator is exhausted.
pub struct Placements {
    walker: GridWalker,
    luminance: LuminanceMap,
    window: u32,
    tone: ToneMapper,
    policy: GatePolicy,
    color_a: Rgb,
    color_b: Rgb,
    stats: GenerateStats,
}

impl Placements {
    pub fn new(image: &SourceImage, params: &HalftoneParams) -> Self {
        Self {
            walker: GridWalker::new(image.width(), image.height(), params.cell_size, params.angle),
            luminance: LuminanceMap::from_image(image, params.blur),
            window: sample_window(params.cell_size),
            tone: ToneMapper::from_params(params),
            policy: GatePolicy::new(params),
            color_a: Rgb::parse_or_black(&params.color_a),
            color_b: Rgb::parse_or_black(&params.color_b),
            stats: GenerateStats::default(),
        }
    }

    pub fn stats(&self) -> GenerateStats {
        self.stats
    }
}

impl Iterator for Placements {
    type Item = Placement;

    fn next(&mut self) -> Option<Placement> {
        for cell in self.walker.by_ref() {
            self.stats.visited += 1;

            let Some(avg) = self.luminance.sample_cell(cell.x, cell.y, self.window) else {
                self.stats.skipped_empty += 1;
                continue;
            };
            let tone = self.tone.map(avg);

            match self.policy.decide(cell.grid_x, cell.grid_y, tone.darkness) {
                Decision::OutOfRange => self.stats.skipped_range += 1,
                Decision::BelowMatrix => self.stats.skipped_matrix += 1,
                Decision::Draw(size) => {
                    self.stats.drawn += 1;
                    return Some(Placement {
                        grid_x: cell.grid_x,
                        grid_y: cell.grid_y,
                        x: cell.x,
                        y: cell.y,
                        size,
                        darkness: tone.darkness,
                        normalized: tone.normalized,
                        color: self.color_a.lerp(self.color_b, tone.normalized),
                    });
                }
            }
        }
        None
    }
}

/// The three image-sized buffers tied to the current image.
#[derive(Debug, Clone)]
pub struct Layers {
    background: Pixmap,
    overlay: Pixmap,
    erase_mask: EraseMask,
}

impl Layers {
    fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            background: Pixmap::new(width, height)?,
            overlay: Pixmap::new(width, height)?,
            erase_mask: EraseMask::new(width, height)?,
        })
    }

    pub fn background(&self) -> &Pixmap {
        &self.background
    }

    pub fn overlay(&self) -> &Pixmap {
        &self.overlay
    }

    pub fn erase_mask(&self) -> &EraseMask {
        &self.erase_mask
    }
}

/// Halftone renderer bound to one source image.
///
/// Layers are created with the image and replaced only when a new image is
/// loaded, which is also the only implicit way to lose erase strokes.
/// A zero-sized image has no layers and every operation is a no-op.
///
/// # Example
///
/// ```
/// use halftone_engine::{DitherPattern, HalftoneEngine, HalftoneParams, SourceImage};
///
/// let image = SourceImage::solid(32, 32, [40, 40, 40, 255]);
/// let mut engine = HalftoneEngine::new(image);
///
/// let params = HalftoneParams::new().pattern(DitherPattern::Variable).angle(0.0);
/// let stats = engine.generate(&params);
/// assert!(stats.drawn > 0);
///
/// engine.erase(16.0, 16.0, 6.0);
/// let rgba = engine.export_rgba().unwrap();
/// assert_eq!(rgba.len(), 32 * 32 * 4);
/// ```
#[derive(Debug, Clone)]
pub struct HalftoneEngine {
    image: SourceImage,
    layers: Option<Layers>,
    last_params: Option<HalftoneParams>,
}

impl HalftoneEngine {
    pub fn new(image: SourceImage) -> Self {
        let layers = Layers::new(image.width(), image.height());
        Self {
            image,
            layers,
            last_params: None,
        }
    }

    /// Replace the source image. Layers are rebuilt and the erase mask
    /// starts empty.
    pub fn load_image(&mut self, image: SourceImage) {
        *self = Self::new(image);
    }

    pub fn image(&self) -> &SourceImage {
        &self.image
    }

    pub fn layers(&self) -> Option<&Layers> {
        self.layers.as_ref()
    }

    pub fn background(&self) -> Option<&Pixmap> {
        self.layers.as_ref().map(Layers::background)
    }

    pub fn overlay(&self) -> Option<&Pixmap> {
        self.layers.as_ref().map(Layers::overlay)
    }

    pub fn erase_mask(&self) -> Option<&EraseMask> {
        self.layers.as_ref().map(Layers::erase_mask)
    }

    /// Parameters of the most recent [`generate`](Self::generate) call.
    pub fn last_params(&self) -> Option<&HalftoneParams> {
        self.last_params.as_ref()
    }

    /// Run one full pass: fill the background, redraw every shape on a
    /// cleared overlay, then subtract the erase mask.
    pub fn generate(&mut self, params: &HalftoneParams) -> GenerateStats {
        self.last_params = Some(params.clone());
        let Some(layers) = self.layers.as_mut() else {
            return GenerateStats::default();
        };

        layers
            .background
            .fill(Rgb::parse_or_black(&params.background).to_skia(255));
        layers.overlay.fill(Color::TRANSPARENT);

        let half = params.cell_size / 2.0;
        let mut renderer = ShapeRenderer::new(params.shape, params.cell_size);
        let mut placements = Placements::new(&self.image, params);
        for p in placements.by_ref() {
            renderer.draw(
                &mut layers.overlay,
                p.x - half,
                p.y - half,
                p.size,
                p.darkness,
                p.color,
            );
        }

        layers.erase_mask.apply_to(&mut layers.overlay);
        placements.stats()
    }

    /// Erase a brush circle at `(x, y)` in image coordinates.
    ///
    /// The circle is recorded in the mask and cut from the current overlay
    /// immediately. Returns false if nothing was painted.
    pub fn erase(&mut self, x: f64, y: f64, radius: f64) -> bool {
        let Some(layers) = self.layers.as_mut() else {
            return false;
        };
        match layers.erase_mask.erase(x, y, radius) {
            Some(path) => {
                cut(&mut layers.overlay, &path);
                true
            }
            None => false,
        }
    }

    /// Erase along a pointer drag; returns how many points painted.
    pub fn erase_stroke<I>(&mut self, points: I, radius: f64) -> usize
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        points
            .into_iter()
            .filter(|&(x, y)| self.erase(x, y, radius))
            .count()
    }

    /// Empty the erase mask and regenerate with the last parameters so
    /// erased shapes reappear. Returns `None` if nothing was generated yet.
    pub fn clear_erase_mask(&mut self) -> Option<GenerateStats> {
        let layers = self.layers.as_mut()?;
        layers.erase_mask.clear();
        let params = self.last_params.clone()?;
        Some(self.generate(&params))
    }

    /// Background with the overlay composited on top.
    pub fn flatten(&self) -> Option<Pixmap> {
        let layers = self.layers.as_ref()?;
        let mut merged = layers.background.clone();
        merged.draw_pixmap(
            0,
            0,
            layers.overlay.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Some(merged)
    }

    /// Flattened export as straight-alpha RGBA8, row-major.
    pub fn export_rgba(&self) -> Option<Vec<u8>> {
        let merged = self.flatten()?;
        let mut out = Vec::with_capacity(merged.pixels().len() * 4);
        for px in merged.pixels() {
            let c = px.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Some(out)
    }
}
