//! Types for collecting the segments emitted while walking an outline.

use std::fmt::{self, Write};

use raster_types::Point;

/// Interface for accepting a sequence of line and quadratic segments.
///
/// Coordinates are already scaled into pixel space when they reach the
/// pen.
pub trait SegmentPen {
    /// Begin a new contour at `p`.
    fn move_to(&mut self, p: Point<f32>);

    /// Emit a line from the current point to `p`.
    fn line_to(&mut self, p: Point<f32>);

    /// Emit a quadratic bezier from the current point with a control point
    /// at `control`, ending at `p`.
    fn quad_to(&mut self, control: Point<f32>, p: Point<f32>);

    /// Close the current contour. The contour implicitly ends at the point
    /// passed to the preceding [`move_to`](Self::move_to).
    fn close(&mut self);
}

/// Single element of a path.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Segment {
    MoveTo(Point<f32>),
    LineTo(Point<f32>),
    QuadTo(Point<f32>, Point<f32>),
    Close,
}

impl SegmentPen for Vec<Segment> {
    fn move_to(&mut self, p: Point<f32>) {
        self.push(Segment::MoveTo(p))
    }

    fn line_to(&mut self, p: Point<f32>) {
        self.push(Segment::LineTo(p))
    }

    fn quad_to(&mut self, control: Point<f32>, p: Point<f32>) {
        self.push(Segment::QuadTo(control, p))
    }

    fn close(&mut self) {
        self.push(Segment::Close)
    }
}

impl<P: SegmentPen + ?Sized> SegmentPen for &mut P {
    fn move_to(&mut self, p: Point<f32>) {
        (**self).move_to(p)
    }

    fn line_to(&mut self, p: Point<f32>) {
        (**self).line_to(p)
    }

    fn quad_to(&mut self, control: Point<f32>, p: Point<f32>) {
        (**self).quad_to(control, p)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Pen that drops all drawing output into the ether.
pub struct NullPen;

impl SegmentPen for NullPen {
    fn move_to(&mut self, _p: Point<f32>) {}
    fn line_to(&mut self, _p: Point<f32>) {}
    fn quad_to(&mut self, _control: Point<f32>, _p: Point<f32>) {}
    fn close(&mut self) {}
}

/// Pen that generates SVG style path data.
///
/// Handy for eyeballing an outline walk in a test failure.
#[derive(Clone, Default, Debug)]
pub struct SvgPen(String);

impl SvgPen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the content of the internal string.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    fn push_command(&mut self, args: fmt::Arguments) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        let _ = self.0.write_fmt(args);
    }
}

impl std::ops::Deref for SvgPen {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl SegmentPen for SvgPen {
    fn move_to(&mut self, p: Point<f32>) {
        self.push_command(format_args!("M{},{}", p.x, p.y));
    }

    fn line_to(&mut self, p: Point<f32>) {
        self.push_command(format_args!("L{},{}", p.x, p.y));
    }

    fn quad_to(&mut self, control: Point<f32>, p: Point<f32>) {
        self.push_command(format_args!(
            "Q{},{} {},{}",
            control.x, control.y, p.x, p.y
        ));
    }

    fn close(&mut self) {
        self.push_command(format_args!("Z"));
    }
}

impl AsRef<str> for SvgPen {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl fmt::Display for SvgPen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
