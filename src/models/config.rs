use crate::error::ConfigError;
use halftone_engine::{HalftoneParams, Rgb};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A render job loaded from a YAML file.
///
/// ```yaml
/// input: photo.png
/// output: photo-halftone.png
/// params:
///   cell_size: 10
///   shape: circle
///   pattern: bayer4
/// brush_radius: 20
/// erase:
///   - { x: 120, y: 80 }
///   - { x: 130, y: 84, radius: 35 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JobConfig {
    /// Source PNG (relative paths resolve against the job file's directory)
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Destination PNG
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Halftone parameters; omitted fields take their defaults
    #[serde(default)]
    pub params: HalftoneParams,

    /// Radius used by erase points that do not set their own
    #[serde(default = "default_brush_radius")]
    pub brush_radius: f64,

    /// Erase strokes replayed after every generation
    #[serde(default)]
    pub erase: Vec<ErasePoint>,

    /// Recompress exported PNGs with oxipng
    #[serde(default)]
    pub optimize: bool,
}

fn default_brush_radius() -> f64 {
    20.0
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            params: HalftoneParams::default(),
            brush_radius: default_brush_radius(),
            erase: Vec::new(),
            optimize: false,
        }
    }
}

/// One erase brush position in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ErasePoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl ErasePoint {
    /// Radius of this point, or `brush_radius` if unset.
    pub fn radius_or(&self, brush_radius: f64) -> f64 {
        self.radius.unwrap_or(brush_radius)
    }
}

impl FromStr for ErasePoint {
    type Err = ConfigError;

    /// Parse `x,y` or `x,y,radius`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::ErasePoint(s.to_string());
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| invalid())?;

        match parts.as_slice() {
            [x, y] => Ok(Self {
                x: *x,
                y: *y,
                radius: None,
            }),
            [x, y, r] => Ok(Self {
                x: *x,
                y: *y,
                radius: Some(*r),
            }),
            _ => Err(invalid()),
        }
    }
}

impl JobConfig {
    /// Read and validate a job file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut job = Self::from_yaml(&content)?;
        if let Some(base) = path.parent() {
            job.resolve_paths(base);
        }
        tracing::debug!(
            path = %path.display(),
            erase_points = job.erase.len(),
            "Loaded job file"
        );
        Ok(job)
    }

    /// Parse and validate YAML. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let job: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };
        job.validate()?;
        Ok(job)
    }

    /// Make relative `input`/`output` paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [&mut self.input, &mut self.output].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Caller-side checks the engine deliberately does not perform.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_params(&self.params)?;
        if !(self.brush_radius.is_finite() && self.brush_radius > 0.0) {
            return Err(invalid("brush_radius", "must be a positive number"));
        }
        for point in &self.erase {
            let r = point.radius_or(self.brush_radius);
            if !(point.x.is_finite() && point.y.is_finite() && r.is_finite() && r > 0.0) {
                return Err(ConfigError::ErasePoint(format!(
                    "{},{},{}",
                    point.x, point.y, r
                )));
            }
        }
        Ok(())
    }
}

/// Range checks matching the editor's input controls.
pub fn validate_params(p: &HalftoneParams) -> Result<(), ConfigError> {
    let numbers = [
        ("cell_size", p.cell_size),
        ("shape_size", p.shape_size),
        ("threshold_min", p.threshold_min),
        ("threshold_max", p.threshold_max),
        ("contrast", p.contrast),
        ("brightness", p.brightness),
        ("blur", p.blur),
        ("angle", p.angle),
    ];
    if let Some((field, _)) = numbers.into_iter().find(|(_, v)| !v.is_finite()) {
        return Err(invalid(field, "must be a finite number"));
    }

    if p.cell_size < 2.0 {
        return Err(invalid("cell_size", "must be at least 2"));
    }
    if p.shape_size <= 0.0 {
        return Err(invalid("shape_size", "must be positive"));
    }
    if !(0.0..=1.0).contains(&p.threshold_min) || !(0.0..=1.0).contains(&p.threshold_max) {
        return Err(invalid("threshold", "bounds must lie within 0..1"));
    }
    if p.threshold_min > p.threshold_max {
        return Err(invalid(
            "threshold",
            format!(
                "min {} is greater than max {}",
                p.threshold_min, p.threshold_max
            ),
        ));
    }
    if p.contrast <= 0.0 {
        return Err(invalid("contrast", "must be positive"));
    }
    if p.blur < 0.0 {
        return Err(invalid("blur", "must not be negative"));
    }
    if !(2..=256).contains(&p.posterize) {
        return Err(invalid("posterize", "must be between 2 and 256"));
    }

    for (field, value) in [
        ("color_a", &p.color_a),
        ("color_b", &p.color_b),
        ("background", &p.background),
    ] {
        value
            .parse::<Rgb>()
            .map_err(|e| invalid(field, format!("{value:?}: {e}")))?;
    }
    Ok(())
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
