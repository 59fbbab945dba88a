use std::fmt::{self, Write as _};

/// Which way a `Move` goes.
///
/// `Forward` and `Backward` follow the agent's heading; the other four are fixed axes
/// of the (y-up) drawing plane and ignore the heading entirely.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Forward,
    Backward,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Direction::Forward => "fd",
            Direction::Backward => "bk",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "lft",
            Direction::Right => "rgt",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.keyword() == s)
    }
}

/// Rotation sense. Anticlockwise increases the heading, clockwise decreases it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rotation {
    Clockwise,
    Anticlockwise,
}

impl Rotation {
    pub fn keyword(&self) -> &'static str {
        match self {
            Rotation::Clockwise => "ror",
            Rotation::Anticlockwise => "rol",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Rotation> {
        match s {
            "ror" => Some(Rotation::Clockwise),
            "rol" => Some(Rotation::Anticlockwise),
            _ => None,
        }
    }

    /// The sign that a rotation of this sense contributes to the heading.
    pub fn sign(&self) -> f64 {
        match self {
            Rotation::Clockwise => -1.0,
            Rotation::Anticlockwise => 1.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    pub fn keyword(&self) -> &'static str {
        match self {
            AngleUnit::Degrees => "deg",
            AngleUnit::Radians => "rad",
        }
    }

    pub fn from_keyword(s: &str) -> Option<AngleUnit> {
        match s {
            "deg" => Some(AngleUnit::Degrees),
            "rad" => Some(AngleUnit::Radians),
            _ => None,
        }
    }

    pub fn to_radians(&self, amount: f64) -> f64 {
        match self {
            AngleUnit::Degrees => amount.to_radians(),
            AngleUnit::Radians => amount,
        }
    }

    pub fn from_radians(&self, radians: f64) -> f64 {
        match self {
            AngleUnit::Degrees => radians.to_degrees(),
            AngleUnit::Radians => radians,
        }
    }
}

/// One statement of a tortuga script.
///
/// Distances and amounts are never negative in a well-formed script: the sign lives in the
/// [`Direction`] or [`Rotation`].
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Create(String),
    Move {
        agent: String,
        direction: Direction,
        distance: f64,
    },
    SetAngleUnit {
        agent: String,
        unit: AngleUnit,
    },
    Rotate {
        agent: String,
        rotation: Rotation,
        amount: f64,
    },
    Repeat {
        count: u32,
        body: Vec<Statement>,
    },
}

impl Statement {
    /// The agent this statement acts on, if it is a primitive.
    pub fn agent(&self) -> Option<&str> {
        match self {
            Statement::Create(agent)
            | Statement::Move { agent, .. }
            | Statement::SetAngleUnit { agent, .. }
            | Statement::Rotate { agent, .. } => Some(agent),
            Statement::Repeat { .. } => None,
        }
    }
}

// Floats use the `Debug` representation, which always has a decimal point (or an exponent)
// and reads back to exactly the same value.
impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Create(agent) => write!(f, "create {agent}"),
            Statement::Move {
                agent,
                direction,
                distance,
            } => write!(f, "{} {agent} {distance:?}", direction.keyword()),
            Statement::SetAngleUnit { agent, unit } => write!(f, "{} {agent}", unit.keyword()),
            Statement::Rotate {
                agent,
                rotation,
                amount,
            } => write!(f, "{} {agent} {amount:?}", rotation.keyword()),
            Statement::Repeat { count, body } => {
                writeln!(f, "repeat {count}")?;
                for s in body {
                    writeln!(f, "{s}")?;
                }
                f.write_str("end")
            }
        }
    }
}

/// Serialize statements to script text, one statement per line.
///
/// This is the inverse of [`crate::parse()`].
pub fn render(statements: &[Statement]) -> String {
    let mut out = String::new();
    for s in statements {
        // Writing to a String can't fail.
        let _ = writeln!(out, "{s}");
    }
    out
}
