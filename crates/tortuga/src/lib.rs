//! Parser and interpreter for tortuga, a line-oriented language for driving named turtles.
//!
//! ```text
//! create monty
//! repeat 4
//! fd monty 100.0
//! deg monty
//! rol monty 90.0
//! end
//! ```
//!
//! Scripts are parsed into [`Statement`]s with [`parse()`] and turned back into text with
//! [`render()`]. [`execute()`] runs statements against an [`AgentStore`], reporting every
//! motion to a [`Sink`].
//!
//! The drawing plane is y-up. A heading of zero points along +x, `rol` (anticlockwise)
//! increases the heading and `ror` decreases it. `up`, `down`, `lft` and `rgt` move along
//! the fixed axes no matter which way the turtle faces.

pub mod agent;
pub mod exec;
pub mod parse;
pub mod script;

pub use agent::{AgentState, AgentStore};
pub use exec::{execute, ExecError, Interpreter, RecordingSink, Sink, SinkCmd, Summary};
pub use parse::{is_valid_name, parse, ParseError, ParseErrorKind};
pub use script::{render, AngleUnit, Direction, Rotation, Statement};
