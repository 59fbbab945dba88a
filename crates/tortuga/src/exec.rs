use std::f64::consts::TAU;

use kurbo::Vec2;

use crate::{
    agent::AgentStore,
    script::{Direction, Statement},
};

/// Where the drawing actually happens.
///
/// The interpreter calls this once for every primitive motion, after it has checked the
/// motion but before it updates the agent's state.
pub trait Sink {
    /// Translate `agent` by `delta`, leaving a line behind if `pen_down`.
    fn move_by(&mut self, agent: &str, delta: Vec2, pen_down: bool) -> anyhow::Result<()>;

    /// Turn `agent` by `delta` radians; positive is anticlockwise.
    fn rotate_by(&mut self, agent: &str, delta: f64) -> anyhow::Result<()>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum SinkCmd {
    Move {
        agent: String,
        delta: Vec2,
        pen_down: bool,
    },
    Rotate {
        agent: String,
        delta: f64,
    },
}

/// A sink that just remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub cmds: Vec<SinkCmd>,
}

impl Sink for RecordingSink {
    fn move_by(&mut self, agent: &str, delta: Vec2, pen_down: bool) -> anyhow::Result<()> {
        self.cmds.push(SinkCmd::Move {
            agent: agent.to_owned(),
            delta,
            pen_down,
        });
        Ok(())
    }

    fn rotate_by(&mut self, agent: &str, delta: f64) -> anyhow::Result<()> {
        self.cmds.push(SinkCmd::Rotate {
            agent: agent.to_owned(),
            delta,
        });
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("drawing failed for {agent}")]
    Sink {
        agent: String,
        #[source]
        source: anyhow::Error,
    },
}

/// How many primitive statements ran, and how many were skipped.
///
/// Statements inside a repeat are counted once per iteration.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub executed: usize,
    pub skipped: usize,
}

pub struct Interpreter<'a, S: ?Sized> {
    store: &'a mut AgentStore,
    sink: &'a mut S,
    summary: Summary,
}

fn check_magnitude(x: f64) -> Result<(), &'static str> {
    if !x.is_finite() {
        Err("magnitude is not finite")
    } else if x < 0.0 {
        Err("magnitude is negative")
    } else {
        Ok(())
    }
}

// `rem_euclid` can round up to exactly `TAU` for tiny negative inputs.
fn wrap_heading(h: f64) -> f64 {
    let h = h.rem_euclid(TAU);
    if h >= TAU {
        0.0
    } else {
        h
    }
}

impl<'a, S: Sink + ?Sized> Interpreter<'a, S> {
    pub fn new(store: &'a mut AgentStore, sink: &'a mut S) -> Self {
        Interpreter {
            store,
            sink,
            summary: Summary::default(),
        }
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn exec_block(&mut self, block: &[Statement]) -> Result<(), ExecError> {
        for statement in block {
            match statement {
                Statement::Repeat { count, body } => {
                    for _ in 0..*count {
                        self.exec_block(body)?;
                    }
                }
                _ => match self.exec_primitive(statement)? {
                    Ok(()) => self.summary.executed += 1,
                    Err(reason) => {
                        log::warn!("skipping `{statement}`: {reason}");
                        self.summary.skipped += 1;
                    }
                },
            }
        }
        Ok(())
    }

    // The outer error aborts the run; the inner one only skips this statement.
    fn exec_primitive(
        &mut self,
        statement: &Statement,
    ) -> Result<Result<(), &'static str>, ExecError> {
        let Some(name) = statement.agent() else {
            return Ok(Err("not a primitive statement"));
        };
        if name.is_empty() {
            return Ok(Err("agent has no name"));
        }
        let sink_err = |source| ExecError::Sink {
            agent: name.to_owned(),
            source,
        };

        match statement {
            Statement::Create(_) => {
                self.store.get_or_create(name);
            }
            Statement::Move {
                direction,
                distance,
                ..
            } => {
                if let Err(reason) = check_magnitude(*distance) {
                    return Ok(Err(reason));
                }
                let agent = self.store.get_or_create(name);
                let delta = match direction {
                    Direction::Forward => agent.facing() * *distance,
                    Direction::Backward => agent.facing() * -*distance,
                    Direction::Up => Vec2::new(0.0, *distance),
                    Direction::Down => Vec2::new(0.0, -*distance),
                    Direction::Left => Vec2::new(-*distance, 0.0),
                    Direction::Right => Vec2::new(*distance, 0.0),
                };
                let position = agent.position + delta;
                if !position.x.is_finite() || !position.y.is_finite() {
                    return Ok(Err("position would leave the plane"));
                }
                self.sink
                    .move_by(name, delta, agent.pen_down)
                    .map_err(sink_err)?;
                agent.position = position;
            }
            Statement::SetAngleUnit { unit, .. } => {
                self.store.get_or_create(name).angle_unit = *unit;
            }
            Statement::Rotate {
                rotation, amount, ..
            } => {
                if let Err(reason) = check_magnitude(*amount) {
                    return Ok(Err(reason));
                }
                let agent = self.store.get_or_create(name);
                let delta = rotation.sign() * agent.angle_unit.to_radians(*amount);
                self.sink.rotate_by(name, delta).map_err(sink_err)?;
                agent.heading = wrap_heading(agent.heading + delta);
            }
            Statement::Repeat { .. } => return Ok(Err("not a primitive statement")),
        }
        Ok(Ok(()))
    }
}

/// Run `statements` in order against `store`, drawing on `sink`.
///
/// Agents are created on first reference. A sink failure stops the run; a statement that
/// can't be carried out (a negative or non-finite magnitude, say) is skipped with a warning.
pub fn execute<S: Sink + ?Sized>(
    statements: &[Statement],
    store: &mut AgentStore,
    sink: &mut S,
) -> Result<Summary, ExecError> {
    let mut interp = Interpreter::new(store, sink);
    interp.exec_block(statements)?;
    Ok(interp.summary())
}
