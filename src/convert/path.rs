use crate::convert::{
    Conversion, Converter, RunReport, boundary_indices, end_tangents, polyline_length,
    sample_times,
};
use crate::curve::corners::{path_corners, runs};
use crate::curve::model::{EasingCurve, PathCurve, SpatialPath};
use crate::eval::evaluator::{CurveFormat, Evaluator};
use crate::fit::fine_tune::fine_tune;
use crate::fit::fitter::{CurveFitter, FitOptions};
use crate::foundation::core::{Vec2, Vec3};
use crate::foundation::error::{CurveError, CurveResult};
use crate::foundation::math::{FitPoint, rmse_from_squares};

/// Source samples of one run.
struct RunSamples {
    /// `(time, value)` pairs.
    ease: Vec<Vec2>,
    /// Spatial positions.
    points: Vec<Vec3>,
    /// Polyline length through `points`.
    length: f64,
}

/// One refit attempt.
struct Candidate {
    easing: EasingCurve,
    path: SpatialPath,
    rmse: f64,
}

impl<F: CurveFitter> Converter<F> {
    /// Convert a path curve into `target` format.
    ///
    /// The input is read with the opposite format's evaluator. Corners split the curve into runs
    /// that are refit independently and stitched back together; corner anchors survive
    /// unchanged.
    #[tracing::instrument(skip(self, curve), fields(segments = curve.segment_count()))]
    pub fn convert_path(
        &mut self,
        curve: &PathCurve,
        target: CurveFormat,
    ) -> CurveResult<Conversion<PathCurve>> {
        let corners = path_corners(curve);
        let mut easings = Vec::with_capacity(corners.len());
        let mut paths = Vec::with_capacity(corners.len());
        let mut reports = Vec::with_capacity(corners.len());
        for (first, last) in runs(&corners, curve.segment_count()) {
            let run = curve.slice(first, last);
            let (easing, path, report) = self.convert_run(&run, first, target)?;
            easings.push(easing);
            paths.push(path);
            reports.push(report);
        }
        let out = PathCurve::new(
            EasingCurve::concat(&easings)?,
            SpatialPath::concat(&paths)?,
            curve.meta().clone(),
        )?;
        tracing::debug!(
            runs = reports.len(),
            segments = out.segment_count(),
            "path conversion done"
        );
        Ok(Conversion {
            curve: out,
            runs: reports,
        })
    }

    fn sample_run(&mut self, run: &PathCurve, source: &dyn Evaluator) -> RunSamples {
        let times = sample_times(
            run.easing().start_time(),
            run.easing().end_time(),
            self.opts.samples * run.segment_count(),
        );
        let mut ease = Vec::with_capacity(times.len());
        let mut points = Vec::with_capacity(times.len());
        for t in times {
            let s = source.evaluate_3d(t, run.easing(), run.path(), &mut self.cache);
            ease.push(Vec2::new(t, s.ease.value));
            points.push(s.point);
        }
        let length = polyline_length(&points);
        RunSamples {
            ease,
            points,
            length,
        }
    }

    fn convert_run(
        &mut self,
        run: &PathCurve,
        first_anchor: usize,
        target: CurveFormat,
    ) -> CurveResult<(EasingCurve, SpatialPath, RunReport)> {
        let source = target.opposite().evaluator();
        let reader = target.evaluator();
        let samples = self.sample_run(run, source);
        let copoint = run.path().is_copoint();
        let precision = samples.length / samples.points.len() as f64 / 1000.0;

        // An interchange target reads each path segment at the easing progress, so the samples'
        // values are the parameters the spatial fit must honour.
        let values: Vec<f64> = samples.ease.iter().map(|p| p.y).collect();
        let hint = (target == CurveFormat::Interchange).then_some(values.as_slice());

        let mut best: Option<Candidate> = None;
        let mut seg_num = 1;
        let mut cycles = 0;
        loop {
            let (path, exhausted) = if copoint {
                (run.path().clone(), true)
            } else {
                let mut fit_opts = FitOptions::new(precision).with_max_segments(seg_num);
                fit_opts.hint = hint;
                let cubics = self.fitter.fit(&samples.points, &fit_opts);
                let exhausted = cubics.len() < seg_num;
                (SpatialPath::from_cubics(&cubics)?, exhausted)
            };

            let easing = self.refit_easing(run, &samples, &path, source, reader, precision)?;
            let rmse = self.path_rmse(&samples, &easing, &path, reader);
            tracing::debug!(
                first_anchor,
                source = ?source.format(),
                cycle = cycles,
                segments = path.segment_count(),
                rmse,
                relative = rmse / samples.length,
                "refit cycle"
            );

            let done = path.segment_count() >= self.opts.max_segments
                || rmse / samples.length < self.opts.max_error_3d
                || rmse < self.opts.min_rmse
                || exhausted;
            if best.as_ref().is_none_or(|b| rmse < b.rmse) {
                best = Some(Candidate { easing, path, rmse });
            }
            cycles += 1;
            if done || cycles >= self.opts.max_cycles {
                break;
            }
            seg_num += 1;
        }
        if copoint {
            tracing::debug!(first_anchor, "coincident handle, spatial path kept");
        }

        let best =
            best.ok_or_else(|| CurveError::conversion("refit loop produced no candidate"))?;
        let report = RunReport {
            first_anchor,
            segments: best.path.segment_count(),
            cycles,
            rmse: best.rmse,
            copoint,
        };
        Ok((best.easing, best.path, report))
    }

    /// Fit one easing cubic per candidate path segment and fine-tune it against the source.
    fn refit_easing(
        &self,
        run: &PathCurve,
        samples: &RunSamples,
        path: &SpatialPath,
        source: &dyn Evaluator,
        reader: &dyn Evaluator,
        precision: f64,
    ) -> CurveResult<EasingCurve> {
        let interior: Vec<Vec3> = path.anchors()[1..path.segment_count()].to_vec();
        let bounds = boundary_indices(&samples.points, &interior);
        let source_value = |t: f64| source.evaluate(t, run.easing()).value;

        let mut cubics = Vec::with_capacity(bounds.len() - 1);
        for w in bounds.windows(2) {
            let (a, b) = (w[0], w[1]);
            let (left, right) = end_tangents(&samples.ease, a, b);
            let opts = FitOptions::new(1e-6).with_tangents(left, right);
            let fitted = self.fitter.fit(&samples.ease[a..=b], &opts);
            for cubic in fitted {
                let tuned = fine_tune(cubic, reader, &source_value, precision, self.opts.fine_tune);
                tracing::trace!(
                    outcome = ?tuned.outcome,
                    rmse = tuned.rmse,
                    "easing segment tuned"
                );
                cubics.push(tuned.cubic);
            }
        }
        EasingCurve::from_cubics(&cubics)
    }

    /// RMSE of the target reading of a candidate against the source samples.
    fn path_rmse(
        &mut self,
        samples: &RunSamples,
        easing: &EasingCurve,
        path: &SpatialPath,
        reader: &dyn Evaluator,
    ) -> f64 {
        let sum: f64 = samples
            .ease
            .iter()
            .zip(&samples.points)
            .map(|(e, p)| {
                let got = reader.evaluate_3d(e.x, easing, path, &mut self.cache).point;
                let d = got.distance(*p);
                d * d
            })
            .sum();
        rmse_from_squares(sum, samples.points.len())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/path.rs"]
mod tests;
