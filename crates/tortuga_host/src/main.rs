use std::{
    io::{BufRead, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tortuga::{execute, render, AgentStore, Statement};
use tortuga_host::{accuracy, shell, write_states, SvgSink, TraceSink};
use tortuga_nlp::{service::DEFAULT_SERVER, CoreNlpClient};

#[derive(Parser, Debug)]
#[command(name = "tortuga", version, about = "Drive turtles with scripts or plain English")]
struct Args {
    /// The CoreNLP server used for parsing English.
    #[arg(long, global = true, env = "TORTUGA_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a script and print where every agent ended up
    Run {
        /// The script to run (default: stdin)
        input: Option<PathBuf>,

        /// Also draw the result to this SVG file
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Print every drawing command as it happens
        #[arg(long)]
        trace: bool,
    },

    /// Type script lines and run them as you go
    Shell {
        /// Draw the session to this SVG file on exit
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Turn English sentences (one request per line of stdin) into scripts
    Translate {
        /// Run the scripts as well
        #[arg(long)]
        execute: bool,

        /// Draw the result to this SVG file
        #[arg(long, requires = "execute")]
        svg: Option<PathBuf>,
    },

    /// Measure recognition accuracy against a directory of example sentences
    Accuracy {
        /// A test file, or a directory to search for them
        path: Option<PathBuf>,

        /// Show every sentence that failed
        #[arg(long)]
        show_fails: bool,
    },
}

fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to open input file {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn run(input: Option<&Path>, svg: Option<&Path>, trace: bool) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let statements = tortuga::parse(&text).context("parse error")?;

    let mut store = AgentStore::new();
    let mut drawing = SvgSink::new();
    let summary = if trace {
        let mut sink = TraceSink::new(&mut drawing, std::io::stdout().lock());
        execute(&statements, &mut store, &mut sink)?
    } else {
        execute(&statements, &mut store, &mut drawing)?
    };
    if summary.skipped > 0 {
        log::warn!("skipped {} statements", summary.skipped);
    }

    write_states(&mut std::io::stdout().lock(), &store)?;
    if let Some(path) = svg {
        drawing.save(path)?;
    }
    Ok(())
}

fn interactive(svg: Option<&Path>) -> anyhow::Result<()> {
    let mut store = AgentStore::new();
    let mut drawing = SvgSink::new();
    shell::run(
        std::io::stdin().lock(),
        std::io::stderr(),
        &mut store,
        &mut drawing,
    )?;
    write_states(&mut std::io::stdout().lock(), &store)?;
    if let Some(path) = svg {
        drawing.save(path)?;
    }
    Ok(())
}

fn translate(server: &str, exec: bool, svg: Option<&Path>) -> anyhow::Result<()> {
    let client = CoreNlpClient::new(server)?;
    let mut store = AgentStore::new();
    let mut drawing = SvgSink::new();

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let sentences = tortuga_nlp::translate(&client, &line)
            .with_context(|| format!("failed to parse {line:?}"))?;
        let misses = sentences.iter().filter(|s| s.is_empty()).count();
        if misses > 0 {
            log::info!("{misses} of {} sentences not understood", sentences.len());
        }
        let statements: Vec<Statement> = sentences.into_iter().flatten().collect();
        if statements.is_empty() {
            eprintln!("didn't understand: {line}");
            continue;
        }
        print!("{}", render(&statements));
        if exec {
            execute(&statements, &mut store, &mut drawing)?;
        }
    }

    if exec {
        write_states(&mut std::io::stdout().lock(), &store)?;
    }
    if let Some(path) = svg {
        drawing.save(path)?;
    }
    Ok(())
}

fn measure(server: &str, path: Option<&Path>, show_fails: bool) -> anyhow::Result<()> {
    let default = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/sentences"));
    let client = CoreNlpClient::new(server)?;
    accuracy::run_all(
        path.unwrap_or(default),
        &client,
        show_fails,
        &mut std::io::stdout().lock(),
    )?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    match &args.command {
        Command::Run { input, svg, trace } => run(input.as_deref(), svg.as_deref(), *trace),
        Command::Shell { svg } => interactive(svg.as_deref()),
        Command::Translate { execute, svg } => translate(&args.server, *execute, svg.as_deref()),
        Command::Accuracy { path, show_fails } => {
            measure(&args.server, path.as_deref(), *show_fails)
        }
    }
}
