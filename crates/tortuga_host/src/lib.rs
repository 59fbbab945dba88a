use std::io::Write;

use tortuga::AgentStore;

pub mod accuracy;
pub mod drawing;
pub mod shell;
pub mod trace;

pub use drawing::SvgSink;
pub use trace::TraceSink;

/// Print one line per agent, in name order.
pub fn write_states(out: &mut impl Write, store: &AgentStore) -> std::io::Result<()> {
    for (name, agent) in store.iter() {
        writeln!(
            out,
            "{name}: at ({:.3}, {:.3}), heading {:.3} {}, pen {}",
            agent.position.x,
            agent.position.y,
            agent.heading_in_unit(),
            agent.angle_unit.keyword(),
            if agent.pen_down { "down" } else { "up" },
        )?;
    }
    Ok(())
}
