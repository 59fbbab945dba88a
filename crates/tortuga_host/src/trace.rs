use std::io::Write;

use kurbo::Vec2;
use tortuga::Sink;

/// Echoes every drawing command before passing it on.
pub struct TraceSink<'a, W> {
    inner: &'a mut dyn Sink,
    out: W,
}

impl<'a, W: Write> TraceSink<'a, W> {
    pub fn new(inner: &'a mut dyn Sink, out: W) -> Self {
        TraceSink { inner, out }
    }
}

impl<W: Write> Sink for TraceSink<'_, W> {
    fn move_by(&mut self, agent: &str, delta: Vec2, pen_down: bool) -> anyhow::Result<()> {
        let pen = if pen_down { "" } else { " (pen up)" };
        writeln!(
            self.out,
            "{agent}: move by ({:.3}, {:.3}){pen}",
            delta.x, delta.y
        )?;
        self.inner.move_by(agent, delta, pen_down)
    }

    fn rotate_by(&mut self, agent: &str, delta: f64) -> anyhow::Result<()> {
        writeln!(self.out, "{agent}: turn by {:.3} degrees", delta.to_degrees())?;
        self.inner.rotate_by(agent, delta)
    }
}
