use crate::foundation::core::Vec3;
use crate::foundation::math::{Cubic, FitPoint, cubic_curvature, cubic_derivative};

/// Default integration density (grid steps over `t ∈ [0, 1]`).
pub const DEFAULT_DENSITY: usize = 1000;

/// Minimum number of lookup entries regardless of density.
const MIN_TABLE_SIZE: usize = 11;

/// Curvature above which the adaptive integrator refines its step.
const CURVATURE_REFINE: f64 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Entry {
    /// Grid index of the bracket start.
    k: usize,
    /// Accumulated length at `t = k / density`.
    length: f64,
}

/// Arc-length parameterization of one cubic.
///
/// `total_length` comes from an adaptive trapezoidal integrator that refines its step around
/// sharp bends. Lookups walk a fixed integration grid; every table entry stores the accumulated
/// length at a grid point so that resuming from an entry reproduces the walk from `t = 0`
/// exactly, which keeps [`ArcLengthTable::find_t_by_length`] monotonic.
#[derive(Clone, Debug)]
pub struct ArcLengthTable {
    cubic: Cubic<Vec3>,
    density: usize,
    total_length: f64,
    entries: Vec<Entry>,
}

impl ArcLengthTable {
    /// Build the table for `cubic` with the given integration density (clamped to at least 1).
    pub fn new(cubic: Cubic<Vec3>, density: usize) -> Self {
        let density = density.max(1);
        let total_length = adaptive_length(&cubic, 1.0 / density as f64);
        let size = table_size(density);

        let mut table = Self {
            cubic,
            density,
            total_length,
            entries: Vec::new(),
        };
        table.entries = table.build_entries(size);
        table
    }

    fn build_entries(&self, size: usize) -> Vec<Entry> {
        let mut entries = Vec::with_capacity(size);
        let mut k = 0;
        let mut acc = 0.0;
        for i in 0..size {
            let target = self.total_length * (i as f64 / (size - 1) as f64);
            while k < self.density {
                let seg = self.grid_segment(k);
                if acc + seg >= target {
                    break;
                }
                acc += seg;
                k += 1;
            }
            entries.push(Entry { k, length: acc });
        }
        entries
    }

    #[inline]
    fn grid_t(&self, k: usize) -> f64 {
        k as f64 / self.density as f64
    }

    /// Trapezoidal length of grid bracket `[k, k + 1]`.
    #[inline]
    fn grid_segment(&self, k: usize) -> f64 {
        let t0 = self.grid_t(k);
        let t1 = self.grid_t(k + 1);
        let s0 = cubic_derivative(&self.cubic, t0).length();
        let s1 = cubic_derivative(&self.cubic, t1).length();
        (s0 + s1) * 0.5 * (t1 - t0)
    }

    /// Integrated length of the whole curve.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Integration density the table was built with.
    pub fn density(&self) -> usize {
        self.density
    }

    /// Number of lookup entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a table holds at least eleven entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The cubic this table parameterizes.
    pub fn cubic(&self) -> &Cubic<Vec3> {
        &self.cubic
    }

    /// Bezier parameter at which the curve has covered `percent` of its length.
    ///
    /// `0` and `1` map exactly to themselves; values outside `[0, 1]` clamp. A zero-length curve
    /// returns `percent` unchanged.
    pub fn find_t_by_length(&self, percent: f64) -> f64 {
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 1.0)
        };
        if percent == 0.0 {
            return 0.0;
        }
        if percent == 1.0 {
            return 1.0;
        }
        if self.total_length <= 0.0 {
            return percent;
        }

        let slot = ((percent * (self.entries.len() - 1) as f64).floor() as usize)
            .min(self.entries.len() - 1);
        let guess = self.entries[slot];
        let target = self.total_length * percent;

        let mut acc = guess.length;
        for k in guess.k..self.density {
            let seg = self.grid_segment(k);
            if acc + seg >= target {
                let t0 = self.grid_t(k);
                let t1 = self.grid_t(k + 1);
                let ratio = if seg > 0.0 {
                    ((target - acc) / seg).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                return (t0 + ratio * (t1 - t0)).min(t1);
            }
            acc += seg;
        }
        1.0
    }
}

/// Entry count for a density: `max(11, ceil(sqrt(density / 10)))`.
pub fn table_size(density: usize) -> usize {
    ((density as f64 / 10.0).sqrt().ceil() as usize).max(MIN_TABLE_SIZE)
}

/// Adaptive trapezoidal integral of `|B'(t)|` over `[0, 1]`.
///
/// The step halves (down to `step / 10`) where curvature exceeds the refine threshold and grows
/// by half (up to `step * 10`) elsewhere.
pub fn adaptive_length<P: FitPoint>(cubic: &Cubic<P>, step: f64) -> f64 {
    let min_step = step / 10.0;
    let max_step = (step * 10.0).min(1.0);
    let mut step = step;
    let mut total = 0.0;
    let mut t0 = 0.0;
    while t0 < 1.0 {
        let t1 = (t0 + step).min(1.0);
        let s0 = cubic_derivative(cubic, t0).length();
        let s1 = cubic_derivative(cubic, t1).length();
        total += (s0 + s1) * 0.5 * (t1 - t0);

        step = if cubic_curvature(cubic, t0) > CURVATURE_REFINE {
            (step * 0.5).max(min_step)
        } else {
            (step * 1.5).min(max_step)
        };
        t0 = t1;
    }
    total
}

#[cfg(test)]
#[path = "../../tests/unit/arclen/table.rs"]
mod tests;
