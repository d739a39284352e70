use crate::foundation::core::{Point, Vec2, Vec3, point_of, vec_of, vec3_at};
use crate::foundation::error::{CurveError, CurveResult};
use crate::foundation::math::Cubic;

/// Piecewise cubic time → value curve.
///
/// Anchors are `(time, value)` pairs with strictly increasing time; every segment carries two
/// interior control points in the same `(time, value)` space.
#[derive(Clone, Debug, PartialEq)]
pub struct EasingCurve {
    anchors: Vec<Point>,
    controls: Vec<[Point; 2]>,
}

impl EasingCurve {
    /// Build an easing curve, rejecting malformed shapes and non-increasing times.
    pub fn new(anchors: Vec<Point>, controls: Vec<[Point; 2]>) -> CurveResult<Self> {
        if anchors.len() < 2 {
            return Err(CurveError::validation(
                "easing curve needs at least two anchors",
            ));
        }
        if controls.len() != anchors.len() - 1 {
            return Err(CurveError::validation(format!(
                "easing curve has {} anchors but {} control pairs",
                anchors.len(),
                controls.len()
            )));
        }
        let finite = anchors.iter().all(|p| p.is_finite())
            && controls.iter().flatten().all(|p| p.is_finite());
        if !finite {
            return Err(CurveError::validation("easing curve has non-finite values"));
        }
        if let Some(w) = anchors.windows(2).find(|w| w[1].x <= w[0].x) {
            return Err(CurveError::validation(format!(
                "easing anchor times must strictly increase ({} then {})",
                w[0].x, w[1].x
            )));
        }
        Ok(Self { anchors, controls })
    }

    /// Build from flat arrays: `[t0, v0, t1, v1, ...]` and `[c1x, c1y, c2x, c2y, ...]`.
    pub fn from_flat(anchors: &[f64], controls: &[f64]) -> CurveResult<Self> {
        if anchors.len() % 2 != 0 || anchors.len() < 4 {
            return Err(CurveError::validation(format!(
                "easing anchors must hold 2*(segments+1) numbers, got {}",
                anchors.len()
            )));
        }
        let segments = anchors.len() / 2 - 1;
        if controls.len() != 4 * segments {
            return Err(CurveError::validation(format!(
                "easing controls must hold 4*{segments} numbers, got {}",
                controls.len()
            )));
        }
        let pts = anchors
            .chunks_exact(2)
            .map(|c| Point::new(c[0], c[1]))
            .collect();
        let cps = controls
            .chunks_exact(4)
            .map(|c| [Point::new(c[0], c[1]), Point::new(c[2], c[3])])
            .collect();
        Self::new(pts, cps)
    }

    /// Assemble consecutive fitted cubics into a curve.
    pub fn from_cubics(cubics: &[Cubic<Vec2>]) -> CurveResult<Self> {
        let Some(first) = cubics.first() else {
            return Err(CurveError::conversion("no easing segments to assemble"));
        };
        let mut anchors = Vec::with_capacity(cubics.len() + 1);
        anchors.push(point_of(first[0]));
        let mut controls = Vec::with_capacity(cubics.len());
        for c in cubics {
            anchors.push(point_of(c[3]));
            controls.push([point_of(c[1]), point_of(c[2])]);
        }
        Self::new(anchors, controls)
    }

    /// Anchors as `(time, value)` points.
    pub fn anchors(&self) -> &[Point] {
        &self.anchors
    }

    /// Control point pairs, one per segment.
    pub fn controls(&self) -> &[[Point; 2]] {
        &self.controls
    }

    /// Number of cubic segments.
    pub fn segment_count(&self) -> usize {
        self.controls.len()
    }

    /// Time of the first anchor.
    pub fn start_time(&self) -> f64 {
        self.anchors[0].x
    }

    /// Time of the last anchor.
    pub fn end_time(&self) -> f64 {
        self.anchors[self.anchors.len() - 1].x
    }

    /// Segment `i` as a cubic in vector form.
    pub fn segment(&self, i: usize) -> Cubic<Vec2> {
        [
            vec_of(self.anchors[i]),
            vec_of(self.controls[i][0]),
            vec_of(self.controls[i][1]),
            vec_of(self.anchors[i + 1]),
        ]
    }

    /// Sub-curve spanning anchors `first..=last`.
    pub fn slice(&self, first: usize, last: usize) -> Self {
        Self {
            anchors: self.anchors[first..=last].to_vec(),
            controls: self.controls[first..last].to_vec(),
        }
    }

    /// Flatten into `(anchors, controls)` numeric arrays.
    pub fn to_flat(&self) -> (Vec<f64>, Vec<f64>) {
        let anchors = self.anchors.iter().flat_map(|p| [p.x, p.y]).collect();
        let controls = self
            .controls
            .iter()
            .flat_map(|[a, b]| [a.x, a.y, b.x, b.y])
            .collect();
        (anchors, controls)
    }

    /// Concatenate runs that share boundary anchors, keeping the first copy of each.
    pub fn concat(runs: &[Self]) -> CurveResult<Self> {
        let mut anchors = Vec::new();
        let mut controls = Vec::new();
        for (i, run) in runs.iter().enumerate() {
            let skip = usize::from(i != 0);
            anchors.extend_from_slice(&run.anchors[skip..]);
            controls.extend_from_slice(&run.controls);
        }
        Self::new(anchors, controls)
    }
}

/// Piecewise cubic 3D path with two control points per segment.
#[derive(Clone, Debug, PartialEq)]
pub struct SpatialPath {
    anchors: Vec<Vec3>,
    controls: Vec<[Vec3; 2]>,
}

impl SpatialPath {
    /// Build a path, rejecting malformed shapes.
    pub fn new(anchors: Vec<Vec3>, controls: Vec<[Vec3; 2]>) -> CurveResult<Self> {
        if anchors.len() < 2 {
            return Err(CurveError::validation("path needs at least two anchors"));
        }
        if controls.len() != anchors.len() - 1 {
            return Err(CurveError::validation(format!(
                "path has {} anchors but {} control pairs",
                anchors.len(),
                controls.len()
            )));
        }
        let finite = anchors
            .iter()
            .chain(controls.iter().flatten())
            .all(|p| p.iter().all(|v| v.is_finite()));
        if !finite {
            return Err(CurveError::validation("path has non-finite values"));
        }
        Ok(Self { anchors, controls })
    }

    /// Build from flat arrays: `3*(segments+1)` anchor numbers and `6*segments` control numbers.
    pub fn from_flat(anchors: &[f64], controls: &[f64]) -> CurveResult<Self> {
        if anchors.len() % 3 != 0 || anchors.len() < 6 {
            return Err(CurveError::validation(format!(
                "path anchors must hold 3*(segments+1) numbers, got {}",
                anchors.len()
            )));
        }
        let segments = anchors.len() / 3 - 1;
        if controls.len() != 6 * segments {
            return Err(CurveError::validation(format!(
                "path controls must hold 6*{segments} numbers, got {}",
                controls.len()
            )));
        }
        let pts = (0..=segments).map(|i| vec3_at(anchors, i * 3)).collect();
        let cps = (0..segments)
            .map(|i| [vec3_at(controls, i * 6), vec3_at(controls, i * 6 + 3)])
            .collect();
        Self::new(pts, cps)
    }

    /// Assemble consecutive cubics into a path.
    pub fn from_cubics(cubics: &[Cubic<Vec3>]) -> CurveResult<Self> {
        let Some(first) = cubics.first() else {
            return Err(CurveError::conversion("no path segments to assemble"));
        };
        let mut anchors = Vec::with_capacity(cubics.len() + 1);
        anchors.push(first[0]);
        let mut controls = Vec::with_capacity(cubics.len());
        for c in cubics {
            anchors.push(c[3]);
            controls.push([c[1], c[2]]);
        }
        Self::new(anchors, controls)
    }

    /// Anchor points.
    pub fn anchors(&self) -> &[Vec3] {
        &self.anchors
    }

    /// Control point pairs, one per segment.
    pub fn controls(&self) -> &[[Vec3; 2]] {
        &self.controls
    }

    /// Number of cubic segments.
    pub fn segment_count(&self) -> usize {
        self.controls.len()
    }

    /// Segment `i` as a cubic.
    pub fn segment(&self, i: usize) -> Cubic<Vec3> {
        [
            self.anchors[i],
            self.controls[i][0],
            self.controls[i][1],
            self.anchors[i + 1],
        ]
    }

    /// All segments in order.
    pub fn segments(&self) -> Vec<Cubic<Vec3>> {
        (0..self.segment_count()).map(|i| self.segment(i)).collect()
    }

    /// Sub-path spanning anchors `first..=last`.
    pub fn slice(&self, first: usize, last: usize) -> Self {
        Self {
            anchors: self.anchors[first..=last].to_vec(),
            controls: self.controls[first..last].to_vec(),
        }
    }

    /// Flatten into `(anchors, controls)` numeric arrays.
    pub fn to_flat(&self) -> (Vec<f64>, Vec<f64>) {
        let anchors = self.anchors.iter().flat_map(|p| [p.x, p.y, p.z]).collect();
        let controls = self
            .controls
            .iter()
            .flat_map(|[a, b]| [a.x, a.y, a.z, b.x, b.y, b.z])
            .collect();
        (anchors, controls)
    }

    /// Whether the first anchor coincides exactly with any control point or later anchor.
    ///
    /// A coincident handle marks a degenerate segment whose geometry must not be refit.
    pub fn is_copoint(&self) -> bool {
        let p = self.anchors[0];
        self.controls.iter().flatten().any(|c| *c == p) || self.anchors[1..].contains(&p)
    }

    /// Concatenate runs that share boundary anchors, keeping the first copy of each.
    pub fn concat(runs: &[Self]) -> CurveResult<Self> {
        let mut anchors = Vec::new();
        let mut controls = Vec::new();
        for (i, run) in runs.iter().enumerate() {
            let skip = usize::from(i != 0);
            anchors.extend_from_slice(&run.anchors[skip..]);
            controls.extend_from_slice(&run.controls);
        }
        Self::new(anchors, controls)
    }
}

/// An easing curve coupled with the spatial path it drives, plus opaque metadata.
///
/// Easing segment `i` drives path segment `i`, so both halves always have the same segment
/// count.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PathCurveWire", into = "PathCurveWire")]
pub struct PathCurve {
    easing: EasingCurve,
    path: SpatialPath,
    meta: serde_json::Value,
}

impl PathCurve {
    /// Couple an easing curve and a path.
    pub fn new(
        easing: EasingCurve,
        path: SpatialPath,
        meta: serde_json::Value,
    ) -> CurveResult<Self> {
        if easing.segment_count() != path.segment_count() {
            return Err(CurveError::validation(format!(
                "easing has {} segments but path has {}",
                easing.segment_count(),
                path.segment_count()
            )));
        }
        Ok(Self { easing, path, meta })
    }

    /// Build from the flat wire arrays.
    pub fn from_flat(
        anchors_2d: &[f64],
        controls_2d: &[f64],
        anchors_3d: &[f64],
        controls_3d: &[f64],
        meta: serde_json::Value,
    ) -> CurveResult<Self> {
        let easing = EasingCurve::from_flat(anchors_2d, controls_2d)?;
        let path = SpatialPath::from_flat(anchors_3d, controls_3d)?;
        Self::new(easing, path, meta)
    }

    /// Parse the JSON wire shape `[anchors2D, controls2D, anchors3D, controls3D, meta]`.
    pub fn from_json_str(s: &str) -> CurveResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Time → value easing half.
    pub fn easing(&self) -> &EasingCurve {
        &self.easing
    }

    /// Spatial half.
    pub fn path(&self) -> &SpatialPath {
        &self.path
    }

    /// Opaque metadata carried through conversions.
    pub fn meta(&self) -> &serde_json::Value {
        &self.meta
    }

    /// Number of segments (shared by both halves).
    pub fn segment_count(&self) -> usize {
        self.easing.segment_count()
    }

    /// Sub-curve spanning anchors `first..=last` of both halves.
    pub fn slice(&self, first: usize, last: usize) -> Self {
        Self {
            easing: self.easing.slice(first, last),
            path: self.path.slice(first, last),
            meta: self.meta.clone(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct PathCurveWire(Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>, serde_json::Value);

impl TryFrom<PathCurveWire> for PathCurve {
    type Error = CurveError;

    fn try_from(w: PathCurveWire) -> Result<Self, Self::Error> {
        Self::from_flat(&w.0, &w.1, &w.2, &w.3, w.4)
    }
}

impl From<PathCurve> for PathCurveWire {
    fn from(c: PathCurve) -> Self {
        let (a2, c2) = c.easing.to_flat();
        let (a3, c3) = c.path.to_flat();
        Self(a2, c2, a3, c3, c.meta)
    }
}

/// A standalone easing curve with opaque metadata, wire shape `[anchors2D, controls2D, meta]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "EasingTrackWire", into = "EasingTrackWire")]
pub struct EasingTrack {
    /// The easing curve.
    pub easing: EasingCurve,
    /// Opaque metadata carried through conversions.
    pub meta: serde_json::Value,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct EasingTrackWire(Vec<f64>, Vec<f64>, serde_json::Value);

impl TryFrom<EasingTrackWire> for EasingTrack {
    type Error = CurveError;

    fn try_from(w: EasingTrackWire) -> Result<Self, Self::Error> {
        Ok(Self {
            easing: EasingCurve::from_flat(&w.0, &w.1)?,
            meta: w.2,
        })
    }
}

impl From<EasingTrack> for EasingTrackWire {
    fn from(t: EasingTrack) -> Self {
        let (a, c) = t.easing.to_flat();
        Self(a, c, t.meta)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/model.rs"]
mod tests;
