use crate::arclen::cache::DEFAULT_CAPACITY;
use crate::arclen::table::DEFAULT_DENSITY;
use crate::fit::fine_tune::FineTuneOpts;
use crate::foundation::error::{CurveError, CurveResult};

/// Options for [`crate::Converter`].
///
/// Deserializes from a JSON object where every field is optional.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConvertOpts {
    /// Samples taken per original segment of a run.
    pub samples: usize,
    /// Bound on path RMSE relative to the run's sampled length.
    pub max_error_3d: f64,
    /// Bound on absolute value RMSE for easing-only runs.
    pub max_error_2d: f64,
    /// Segment cap per run.
    pub max_segments: usize,
    /// Refit cycle cap per run.
    pub max_cycles: usize,
    /// RMSE treated as an exact fit.
    pub min_rmse: f64,
    /// Control-point optimizer limits.
    pub fine_tune: FineTuneOpts,
    /// Integration density of arc-length tables.
    pub arc_length_density: usize,
    /// Number of arc-length tables kept by the converter's cache.
    pub cache_capacity: usize,
}

impl Default for ConvertOpts {
    fn default() -> Self {
        Self {
            samples: 20,
            max_error_3d: 0.03,
            max_error_2d: 0.01,
            max_segments: 4,
            max_cycles: 10,
            min_rmse: 1e-6,
            fine_tune: FineTuneOpts::default(),
            arc_length_density: DEFAULT_DENSITY,
            cache_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl ConvertOpts {
    /// Reject settings the conversion loop cannot run with.
    pub fn validate(&self) -> CurveResult<()> {
        let counts = [
            ("samples", self.samples),
            ("max_segments", self.max_segments),
            ("max_cycles", self.max_cycles),
            ("fine_tune.iterations", self.fine_tune.iterations),
            ("fine_tune.samples", self.fine_tune.samples),
            ("arc_length_density", self.arc_length_density),
            ("cache_capacity", self.cache_capacity),
        ];
        if let Some((name, _)) = counts.iter().find(|(_, v)| *v == 0) {
            return Err(CurveError::validation(format!("{name} must be > 0")));
        }
        let bounds = [
            ("max_error_3d", self.max_error_3d),
            ("max_error_2d", self.max_error_2d),
            ("min_rmse", self.min_rmse),
        ];
        if let Some((name, v)) = bounds.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(CurveError::validation(format!(
                "{name} must be finite and > 0, got {v}"
            )));
        }
        Ok(())
    }

    /// Parse options from JSON, filling missing fields with defaults.
    pub fn from_json_str(s: &str) -> CurveResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/opts.rs"]
mod tests;
