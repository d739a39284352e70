use crate::convert::{Conversion, Converter, RunReport, polyline_length, sample_times};
use crate::curve::corners::{easing_corners, runs};
use crate::curve::model::EasingCurve;
use crate::eval::evaluator::CurveFormat;
use crate::fit::fine_tune::fine_tune;
use crate::fit::fitter::{CurveFitter, FitOptions};
use crate::foundation::core::Vec2;
use crate::foundation::error::{CurveError, CurveResult};
use crate::foundation::math::rmse_from_squares;

impl<F: CurveFitter> Converter<F> {
    /// Convert a standalone easing curve into `target` format.
    ///
    /// Runs between corners are sampled with the opposite format's evaluator, refit with a
    /// growing segment count and fine-tuned until the target reading stays within
    /// `max_error_2d` of the samples.
    #[tracing::instrument(skip(self, curve), fields(segments = curve.segment_count()))]
    pub fn convert_easing(
        &mut self,
        curve: &EasingCurve,
        target: CurveFormat,
    ) -> CurveResult<Conversion<EasingCurve>> {
        let corners = easing_corners(curve);
        let mut parts = Vec::with_capacity(corners.len());
        let mut reports = Vec::with_capacity(corners.len());
        for (first, last) in runs(&corners, curve.segment_count()) {
            let (part, report) = self.convert_easing_run(&curve.slice(first, last), first, target)?;
            parts.push(part);
            reports.push(report);
        }
        Ok(Conversion {
            curve: EasingCurve::concat(&parts)?,
            runs: reports,
        })
    }

    fn convert_easing_run(
        &mut self,
        run: &EasingCurve,
        first_anchor: usize,
        target: CurveFormat,
    ) -> CurveResult<(EasingCurve, RunReport)> {
        let source = target.opposite().evaluator();
        let reader = target.evaluator();
        let source_value = |t: f64| source.evaluate(t, run).value;

        let samples: Vec<Vec2> = sample_times(
            run.start_time(),
            run.end_time(),
            self.opts.samples * run.segment_count(),
        )
        .into_iter()
        .map(|t| Vec2::new(t, source_value(t)))
        .collect();
        let precision = polyline_length(&samples) / samples.len() as f64 / 100.0;

        let mut best: Option<(EasingCurve, f64)> = None;
        let mut seg_num = 1;
        let mut cycles = 0;
        loop {
            let opts = FitOptions::new(precision).with_max_segments(seg_num);
            let fitted = self.fitter.fit(&samples, &opts);
            let exhausted = fitted.len() < seg_num;
            let tuned: Vec<_> = fitted
                .into_iter()
                .map(|c| {
                    fine_tune(
                        c,
                        reader,
                        &source_value,
                        self.opts.max_error_2d,
                        self.opts.fine_tune,
                    )
                    .cubic
                })
                .collect();
            let candidate = EasingCurve::from_cubics(&tuned)?;

            let sum: f64 = samples
                .iter()
                .map(|p| {
                    let d = reader.evaluate(p.x, &candidate).value - p.y;
                    d * d
                })
                .sum();
            let rmse = rmse_from_squares(sum, samples.len());
            tracing::debug!(
                first_anchor,
                source = ?source.format(),
                cycle = cycles,
                segments = candidate.segment_count(),
                rmse,
                "easing refit cycle"
            );

            let done = candidate.segment_count() >= self.opts.max_segments
                || rmse < self.opts.max_error_2d
                || rmse < self.opts.min_rmse
                || exhausted;
            if best.as_ref().is_none_or(|(_, r)| rmse < *r) {
                best = Some((candidate, rmse));
            }
            cycles += 1;
            if done || cycles >= self.opts.max_cycles {
                break;
            }
            seg_num += 1;
        }

        let (curve, rmse) =
            best.ok_or_else(|| CurveError::conversion("refit loop produced no candidate"))?;
        let report = RunReport {
            first_anchor,
            segments: curve.segment_count(),
            cycles,
            rmse,
            copoint: false,
        };
        Ok((curve, report))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/easing.rs"]
mod tests;
