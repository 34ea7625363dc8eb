//! A loaded image plus the job that drives it.
//!
//! The session owns the engine and replays the job's erase points after
//! every generation, so the exported picture always reflects the job file
//! as written.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use halftone_engine::{GenerateStats, HalftoneEngine, SourceImage};

use crate::error::RenderError;
use crate::models::{ErasePoint, JobConfig, UploadLimits};
use crate::rendering;

/// What [`HalftoneSession::apply`] had to do for a new job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobChange {
    /// Nothing that affects the picture changed
    Unchanged,
    /// Parameters or erase strokes changed, same image
    Regenerated,
    /// The input image was reloaded
    Reloaded,
}

pub struct HalftoneSession {
    engine: HalftoneEngine,
    job: JobConfig,
    limits: UploadLimits,
    last_stats: Option<GenerateStats>,
    /// Modification time of the input file when it was last read
    input_modified: Option<SystemTime>,
}

fn modified(path: Option<&Path>) -> Option<SystemTime> {
    std::fs::metadata(path?).and_then(|m| m.modified()).ok()
}

impl HalftoneSession {
    /// Wrap an already-decoded image. Nothing is rendered until
    /// [`render`](Self::render) is called.
    pub fn new(image: SourceImage, job: JobConfig) -> Self {
        let input_modified = modified(job.input.as_deref());
        Self {
            engine: HalftoneEngine::new(image),
            job,
            limits: UploadLimits::default(),
            last_stats: None,
            input_modified,
        }
    }

    /// Load the job's input PNG under `limits`.
    pub fn open(job: JobConfig, limits: UploadLimits) -> Result<Self, RenderError> {
        let input = job.input.as_deref().ok_or(RenderError::MissingPath("input"))?;
        let input_modified = modified(Some(input));
        let image = rendering::read_png(input, &limits)?;
        tracing::info!(
            path = %input.display(),
            width = image.width(),
            height = image.height(),
            "Loaded source image"
        );
        Ok(Self {
            engine: HalftoneEngine::new(image),
            job,
            limits,
            last_stats: None,
            input_modified,
        })
    }

    pub fn job(&self) -> &JobConfig {
        &self.job
    }

    pub fn engine(&self) -> &HalftoneEngine {
        &self.engine
    }

    pub fn last_stats(&self) -> Option<GenerateStats> {
        self.last_stats
    }

    /// Generate with the job's parameters and replay its erase points.
    pub fn render(&mut self) -> GenerateStats {
        let stats = self.engine.generate(&self.job.params);
        let brush = self.job.brush_radius;
        let erased = self
            .job
            .erase
            .iter()
            .filter(|p| self.engine.erase(p.x, p.y, p.radius_or(brush)))
            .count();

        tracing::info!(
            visited = stats.visited,
            drawn = stats.drawn,
            skipped_empty = stats.skipped_empty,
            skipped_range = stats.skipped_range,
            skipped_matrix = stats.skipped_matrix,
            erased,
            "Generated halftone"
        );
        self.last_stats = Some(stats);
        stats
    }

    /// Swap in a newly loaded job and redo only the work it requires.
    ///
    /// A changed input path, or an input file rewritten since it was last
    /// read, reloads the image. Removing erase points or changing the brush
    /// radius starts a fresh mask, since strokes cannot be taken back
    /// individually.
    pub fn apply(&mut self, job: JobConfig) -> Result<JobChange, RenderError> {
        let input_modified = modified(job.input.as_deref());
        let change = if job.input != self.job.input || input_modified != self.input_modified {
            let input = job.input.as_deref().ok_or(RenderError::MissingPath("input"))?;
            let image = rendering::read_png(input, &self.limits)?;
            tracing::info!(path = %input.display(), "Reloaded source image");
            self.engine.load_image(image);
            self.input_modified = input_modified;
            JobChange::Reloaded
        } else if !job.erase.starts_with(&self.job.erase)
            || job.brush_radius != self.job.brush_radius
        {
            let image = self.engine.image().clone();
            self.engine.load_image(image);
            JobChange::Regenerated
        } else if job.params != self.job.params
            || job.erase.len() != self.job.erase.len()
            || self.last_stats.is_none()
        {
            JobChange::Regenerated
        } else {
            JobChange::Unchanged
        };

        self.job = job;
        if change != JobChange::Unchanged {
            self.render();
        } else {
            tracing::debug!("Job unchanged, skipping regeneration");
        }
        Ok(change)
    }

    /// Re-read the input PNG after it changed on disk and regenerate.
    ///
    /// The erase mask starts over and the job's points are replayed.
    pub fn reload_input(&mut self) -> Result<GenerateStats, RenderError> {
        let input = self
            .job
            .input
            .as_deref()
            .ok_or(RenderError::MissingPath("input"))?;
        let input_modified = modified(Some(input));
        let image = rendering::read_png(input, &self.limits)?;
        tracing::info!(path = %input.display(), "Reloaded source image");
        self.engine.load_image(image);
        self.input_modified = input_modified;
        Ok(self.render())
    }

    /// Interactive brush: cut immediately and remember the point so later
    /// regenerations keep it.
    pub fn erase(&mut self, point: ErasePoint) -> bool {
        let painted = self
            .engine
            .erase(point.x, point.y, point.radius_or(self.job.brush_radius));
        if painted {
            self.job.erase.push(point);
        }
        painted
    }

    /// Forget every erase stroke and bring the erased shapes back.
    pub fn clear_erase(&mut self) -> Option<GenerateStats> {
        self.job.erase.clear();
        let stats = self.engine.clear_erase_mask()?;
        self.last_stats = Some(stats);
        Some(stats)
    }

    /// Flattened picture as PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, RenderError> {
        rendering::export_png(&self.engine, self.job.optimize)
    }

    /// Write the export to the job's output path.
    pub fn write_output(&self) -> Result<PathBuf, RenderError> {
        let output = self
            .job
            .output
            .clone()
            .ok_or(RenderError::MissingPath("output"))?;
        self.write_to(&output)?;
        Ok(output)
    }

    pub fn write_to(&self, path: &Path) -> Result<usize, RenderError> {
        let png_bytes = self.export_png()?;
        std::fs::write(path, &png_bytes)?;
        tracing::info!(
            path = %path.display(),
            bytes = png_bytes.len(),
            "Wrote halftone PNG"
        );
        Ok(png_bytes.len())
    }
}
