use std::io::{BufRead, Write};

use tortuga::{execute, AgentStore, Sink};

/// Collects input lines until every `repeat` among them has been closed.
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    text: String,
    depth: usize,
}

impl ChunkBuffer {
    /// Add a line, returning the buffered chunk if it is now complete.
    ///
    /// A stray `end` also completes the chunk, so that the parser gets to complain about it.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let mut complete = self.depth == 0;
        match line.split_whitespace().next() {
            Some("repeat") => {
                self.depth += 1;
                complete = false;
            }
            Some("end") => {
                self.depth = self.depth.saturating_sub(1);
                complete = self.depth == 0;
            }
            _ => {}
        }
        self.text.push_str(line);
        self.text.push('\n');
        complete.then(|| std::mem::take(&mut self.text))
    }

    /// Whether we're in the middle of a `repeat` block.
    pub fn is_open(&self) -> bool {
        self.depth > 0
    }
}

/// Read script lines from `input` and run them as soon as they form a complete chunk.
///
/// Prompts and parse errors go to `console`; a bad chunk is thrown away and the session
/// carries on with the agents as they were. Sink failures end the session.
pub fn run(
    mut input: impl BufRead,
    mut console: impl Write,
    store: &mut AgentStore,
    sink: &mut dyn Sink,
) -> anyhow::Result<()> {
    let mut buf = ChunkBuffer::default();
    let mut line = String::new();
    loop {
        let prompt = if buf.is_open() { "... " } else { ">>> " };
        write!(console, "{prompt}")?;
        console.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(console)?;
            break;
        }
        let Some(chunk) = buf.push_line(line.trim_end()) else {
            continue;
        };
        match tortuga::parse(&chunk) {
            Ok(statements) => {
                let summary = execute(&statements, store, sink)?;
                log::debug!("ran chunk: {summary:?}");
            }
            Err(e) => writeln!(console, "{e}")?,
        }
    }
    Ok(())
}
