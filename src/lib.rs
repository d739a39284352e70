//! bezconv converts eased 3D bezier motion paths between two encodings.
//!
//! A motion curve pairs a 2D easing curve (time → value) with a 3D spatial path that has the
//! same number of segments. The two supported encodings read the same data differently:
//!
//! - **Native**: each easing segment is a timing function over its time span and the resulting
//!   progress is an arc-length fraction of the matching path segment.
//! - **Interchange**: time maps linearly onto the easing parameter and the eased progress is
//!   used directly as the path's bezier parameter.
//!
//! # Pipeline overview
//!
//! 1. **Split**: corners in either half cut the curve into independent runs.
//! 2. **Sample**: each run is evaluated with the source format's [`Evaluator`].
//! 3. **Refit**: a [`CurveFitter`] refits the samples with a growing segment budget, and every
//!    easing segment is [`fine_tune`]d against the source under the target reading.
//! 4. **Stitch**: runs are concatenated with their corner anchors kept verbatim.
//!
//! Numerical shortfalls never fail a conversion; the best candidate is returned along with a
//! [`RunReport`] per run.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod arclen;
mod convert;
mod curve;
mod eval;
mod fit;
mod foundation;

pub use arclen::cache::{ArcLengthCache, DEFAULT_CAPACITY};
pub use arclen::table::{ArcLengthTable, DEFAULT_DENSITY, adaptive_length, table_size};
pub use convert::opts::ConvertOpts;
pub use convert::{Conversion, Converter, RunReport};
pub use curve::corners::{CORNER_TOLERANCE, easing_corners, path_corners, runs};
pub use curve::model::{EasingCurve, EasingTrack, PathCurve, SpatialPath};
pub use curve::split::{split_at, split_at_lengths, split_at_params};
pub use eval::easing::{EasingSolve, UnitEasing};
pub use eval::evaluator::{
    CurveFormat, EaseSample, Evaluator, InterchangeEvaluator, NativeEvaluator, PathSample,
    SegmentHit,
};
pub use fit::fine_tune::{FineTuneOpts, FineTuneOutcome, FineTuned, fine_tune};
pub use fit::fitter::{CurveFitter, FitOptions, LeastSquaresFitter};
pub use foundation::core::{Point, Vec2, Vec3, point_of, vec_of};
pub use foundation::error::{CurveError, CurveResult};
pub use foundation::math::{
    Cubic, FitPoint, angle_at, bernstein, cubic_curvature, cubic_derivative, cubic_point,
    cubic_scalar, cubic_second_derivative, map_percent, map_range, rmse_from_squares,
};
