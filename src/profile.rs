//! Closed 2D outlines used as extrusion cross-sections.
//!
//! Every profile is centered on the origin and built from straight edges and
//! quarter-circle corners, walked counter-clockwise:
//!
//! ```text
//!        top edge
//!     ╭───────────╮
//!     │           │
//!  left           right
//!     │           │
//!     ╰─────●─────╯
//!         start (x + r, y)
//! ```
//!
//! # Example
//!
//! ```
//! use handset::Profile;
//!
//! let outline = Profile::rounded_rect(7.0, 15.0, 0.7).unwrap();
//! assert!(outline.is_closed());
//! assert_eq!(outline.size(), handset::Vec2::new(7.0, 15.0));
//! ```

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use crate::error::{BuildError, require_non_negative, require_positive};

/// Tolerance used when merging coincident outline points.
const WELD_EPSILON: f32 = 1e-6;

/// One step of a profile outline, starting where the previous one ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    /// Straight edge to `to`.
    Line { to: Vec2 },
    /// Counter-clockwise quarter circle around `center`, ending exactly at `to`.
    ///
    /// A zero radius collapses the arc onto its center (a sharp corner).
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        to: Vec2,
    },
}

impl Segment {
    /// The point this segment ends at.
    pub fn end(&self) -> Vec2 {
        match *self {
            Segment::Line { to } | Segment::Arc { to, .. } => to,
        }
    }
}

/// A closed outline parameterized by width, height and corner radius.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    start: Vec2,
    segments: Vec<Segment>,
    width: f32,
    height: f32,
    corner_radius: f32,
}

impl Profile {
    /// Builds a rounded rectangle centered on the origin.
    ///
    /// Fails with [`BuildError::InvalidGeometryParams`] if a dimension is not
    /// positive or `radius` exceeds half of the smaller side.
    pub fn rounded_rect(width: f32, height: f32, radius: f32) -> Result<Self, BuildError> {
        require_positive("profile width", width)?;
        require_positive("profile height", height)?;
        require_non_negative("corner radius", radius)?;

        let half_min = width.min(height) * 0.5;
        if radius > half_min {
            return Err(BuildError::invalid(format!(
                "corner radius {radius} exceeds half of the smaller side ({half_min})"
            )));
        }

        Ok(Self::trace(width, height, radius))
    }

    /// Builds a pill (stadium) outline.
    ///
    /// Same walk as [`Profile::rounded_rect`], but `radius` is clamped to half
    /// of the smaller side instead of being rejected, so `pill(w, h, h)` is a
    /// valid full pill.
    pub fn pill(width: f32, height: f32, radius: f32) -> Result<Self, BuildError> {
        require_positive("pill width", width)?;
        require_positive("pill height", height)?;
        require_non_negative("pill radius", radius)?;

        let radius = radius.min(width.min(height) * 0.5);
        Ok(Self::trace(width, height, radius))
    }

    /// Builds a circle of the given radius (a rounded square whose corners meet).
    pub fn circle(radius: f32) -> Result<Self, BuildError> {
        require_positive("circle radius", radius)?;
        Ok(Self::trace(radius * 2.0, radius * 2.0, radius))
    }

    fn trace(width: f32, height: f32, r: f32) -> Self {
        let x = -width * 0.5;
        let y = -height * 0.5;
        let right = x + width;
        let top = y + height;

        let start = Vec2::new(x + r, y);
        let segments = vec![
            Segment::Line {
                to: Vec2::new(right - r, y),
            },
            Segment::Arc {
                center: Vec2::new(right - r, y + r),
                radius: r,
                start_angle: -FRAC_PI_2,
                to: Vec2::new(right, y + r),
            },
            Segment::Line {
                to: Vec2::new(right, top - r),
            },
            Segment::Arc {
                center: Vec2::new(right - r, top - r),
                radius: r,
                start_angle: 0.0,
                to: Vec2::new(right - r, top),
            },
            Segment::Line {
                to: Vec2::new(x + r, top),
            },
            Segment::Arc {
                center: Vec2::new(x + r, top - r),
                radius: r,
                start_angle: FRAC_PI_2,
                to: Vec2::new(x, top - r),
            },
            Segment::Line {
                to: Vec2::new(x, y + r),
            },
            Segment::Arc {
                center: Vec2::new(x + r, y + r),
                radius: r,
                start_angle: PI,
                to: start,
            },
        ];

        Self {
            start,
            segments,
            width,
            height,
            corner_radius: r,
        }
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// The corner radius actually used (after clamping, for pills).
    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    /// True if the last segment ends exactly where the outline starts.
    pub fn is_closed(&self) -> bool {
        self.segments
            .last()
            .is_some_and(|segment| segment.end() == self.start)
    }

    /// Returns the `(min, max)` corners of the outline's bounding box.
    ///
    /// Quarter arcs are axis-aligned, so segment end points are the extremes.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        self.segments
            .iter()
            .map(Segment::end)
            .fold((self.start, self.start), |(min, max), p| {
                (min.min(p), max.max(p))
            })
    }

    /// Size of the bounding box.
    pub fn size(&self) -> Vec2 {
        let (min, max) = self.bounds();
        max - min
    }

    /// Samples the outline into a counter-clockwise polygon.
    ///
    /// Each quarter arc is split into `arc_divisions` chords. Coincident points
    /// (zero-length edges, zero-radius corners) are merged and the closing
    /// point is not repeated.
    pub fn flatten(&self, arc_divisions: u32) -> Vec<Vec2> {
        let divisions = arc_divisions.max(1);
        let mut points = vec![self.start];

        for segment in &self.segments {
            match *segment {
                Segment::Line { to } => push_welded(&mut points, to),
                Segment::Arc {
                    center,
                    radius,
                    start_angle,
                    to,
                } => {
                    for i in 1..divisions {
                        let angle = start_angle + FRAC_PI_2 * i as f32 / divisions as f32;
                        let p = center + radius * Vec2::new(angle.cos(), angle.sin());
                        push_welded(&mut points, p);
                    }
                    push_welded(&mut points, to);
                }
            }
        }

        if points.len() > 1
            && points
                .last()
                .is_some_and(|last| last.distance(self.start) <= WELD_EPSILON)
        {
            points.pop();
        }
        points
    }
}

fn push_welded(points: &mut Vec<Vec2>, p: Vec2) {
    if points
        .last()
        .is_none_or(|last| last.distance(p) > WELD_EPSILON)
    {
        points.push(p);
    }
}

/// Signed area of a polygon; positive for counter-clockwise winding.
#[cfg(test)]
fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}
