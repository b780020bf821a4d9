use crate::error::Result;
use crate::geometry::segment::Paint;
use crate::math::angle::{Angle, Heading};
use crate::math::Point;

use super::Pen;

/// A recorded pen command.
///
/// The pen's committed state is fully reconstructible by replaying a
/// recorded command list onto a fresh pen, which keeps undo/copy
/// conveniences outside the engine: callers that want them record
/// commands, drop a suffix, and replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenCommand {
    MoveTo(Point),
    MoveForward(f64),
    MoveToX(f64),
    MoveToY(f64),
    BreakStroke,
    TurnTo(Heading),
    TurnLeft(Angle),
    TurnRight(Angle),
    TurnToward(Point),
    SetWidth(f64),
    ClearWidth,
    SetPaint(Paint),
    LineTo {
        to: Point,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    },
    LineForward {
        distance: f64,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    },
    LineToX {
        x: f64,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    },
    LineToY {
        y: f64,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    },
    ArcLeft {
        angle: Angle,
        radius: f64,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    },
    ArcRight {
        angle: Angle,
        radius: f64,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    },
    ArcLeftAbout {
        angle: Angle,
        center: Point,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    },
    ArcRightAbout {
        angle: Angle,
        center: Point,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    },
    ArcTo {
        to: Point,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    },
    ArcToAbout {
        to: Point,
        center: Point,
        start_slant: Option<Heading>,
        end_slant: Option<Heading>,
    },
}

impl Pen {
    /// Applies one recorded command.
    ///
    /// # Errors
    ///
    /// Propagates the same errors the direct method would return.
    pub fn apply(&mut self, command: PenCommand) -> Result<()> {
        match command {
            PenCommand::MoveTo(to) => self.move_to(to),
            PenCommand::MoveForward(distance) => self.move_forward(distance),
            PenCommand::MoveToX(x) => self.move_to_x(x)?,
            PenCommand::MoveToY(y) => self.move_to_y(y)?,
            PenCommand::BreakStroke => self.break_stroke(),
            PenCommand::TurnTo(heading) => self.turn_to(heading),
            PenCommand::TurnLeft(angle) => self.turn_left(angle),
            PenCommand::TurnRight(angle) => self.turn_right(angle),
            PenCommand::TurnToward(target) => self.turn_toward(target),
            PenCommand::SetWidth(width) => self.set_width(width),
            PenCommand::ClearWidth => self.clear_width(),
            PenCommand::SetPaint(paint) => self.set_paint(paint),
            PenCommand::LineTo {
                to,
                start_slant,
                end_slant,
            } => self.line_to_with(to, start_slant, end_slant),
            PenCommand::LineForward {
                distance,
                start_slant,
                end_slant,
            } => self.line_forward_with(distance, start_slant, end_slant),
            PenCommand::LineToX {
                x,
                start_slant,
                end_slant,
            } => self.line_to_x_with(x, start_slant, end_slant)?,
            PenCommand::LineToY {
                y,
                start_slant,
                end_slant,
            } => self.line_to_y_with(y, start_slant, end_slant)?,
            PenCommand::ArcLeft {
                angle,
                radius,
                start_slant,
                end_slant,
            } => self.arc_left_with(angle, radius, start_slant, end_slant),
            PenCommand::ArcRight {
                angle,
                radius,
                start_slant,
                end_slant,
            } => self.arc_right_with(angle, radius, start_slant, end_slant),
            PenCommand::ArcLeftAbout {
                angle,
                center,
                start_slant,
                end_slant,
            } => self.arc_left_about_with(angle, center, start_slant, end_slant),
            PenCommand::ArcRightAbout {
                angle,
                center,
                start_slant,
                end_slant,
            } => self.arc_right_about_with(angle, center, start_slant, end_slant),
            PenCommand::ArcTo {
                to,
                start_slant,
                end_slant,
            } => self.arc_to_with(to, start_slant, end_slant)?,
            PenCommand::ArcToAbout {
                to,
                center,
                start_slant,
                end_slant,
            } => self.arc_to_about_with(to, center, start_slant, end_slant)?,
        }
        Ok(())
    }

    /// Replays a recorded command list, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Propagates the first command error encountered.
    pub fn replay<I>(&mut self, commands: I) -> Result<()>
    where
        I: IntoIterator<Item = PenCommand>,
    {
        for command in commands {
            self.apply(command)?;
        }
        Ok(())
    }
}
