//! Measuring how well the recognizer does on a corpus of example sentences.
//!
//! Each test file holds a single JSON object:
//!
//! ```json
//! {
//!     "name": "move forward",
//!     "text": "Move {who} forward by {n} units.",
//!     "params": { "who": ["Monty", "the turtle"], "n": [1, 20] },
//!     "result": ["fd monty 1.0"]
//! }
//! ```
//!
//! `text` is expanded once for every combination of `params`. A test with `result` passes
//! when the recognized script is exactly those lines; a test with `errors` passes when
//! nothing at all is recognized.

use std::{
    collections::BTreeMap,
    fmt,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context};
use serde::Deserialize;
use serde_json::Value;
use tortuga::{render, Statement};
use tortuga_nlp::ParserService;

#[derive(Clone, Debug, PartialEq)]
pub enum Expected {
    Script(Vec<String>),
    Nothing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TestCase {
    pub name: String,
    pub text: String,
    pub params: BTreeMap<String, Vec<String>>,
    pub expected: Expected,
}

#[derive(Deserialize)]
struct RawTest {
    name: Option<String>,
    text: String,
    #[serde(default)]
    params: BTreeMap<String, Vec<Value>>,
    result: Option<Vec<String>>,
    errors: Option<Value>,
    // Common misspellings, caught so that they don't silently turn into the wrong kind of test.
    results: Option<Value>,
    error: Option<Value>,
}

fn param_string(v: Value) -> String {
    match v {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl TestCase {
    /// Read a test from JSON. `path` is only used for naming and error messages.
    pub fn from_json(path: &Path, json: &str) -> anyhow::Result<TestCase> {
        let raw: RawTest = serde_json::from_str(json)
            .with_context(|| format!("malformed test file {}", path.display()))?;
        let name = raw.name.unwrap_or_else(|| {
            path.file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        if raw.results.is_some() {
            bail!("change 'results' to 'result' in {}: {name}", path.display());
        }
        if raw.error.is_some() {
            bail!("change 'error' to 'errors' in {}: {name}", path.display());
        }
        let expected = match (raw.result, raw.errors) {
            (Some(lines), None) => Expected::Script(lines),
            (None, Some(_)) => Expected::Nothing,
            (Some(_), Some(_)) => {
                bail!("found both 'result' and 'errors' in {}: {name}", path.display())
            }
            (None, None) => {
                bail!("found neither 'result' nor 'errors' in {}: {name}", path.display())
            }
        };
        let params = raw
            .params
            .into_iter()
            .map(|(k, vs)| (k, vs.into_iter().map(param_string).collect()))
            .collect();
        Ok(TestCase {
            name,
            text: raw.text,
            params,
            expected,
        })
    }

    pub fn load(path: &Path) -> anyhow::Result<TestCase> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("couldn't read {}", path.display()))?;
        TestCase::from_json(path, &json)
    }

    /// Every sentence this test covers.
    pub fn sentences(&self) -> Vec<String> {
        expand(&self.text, &self.params)
    }

    /// Does the recognizer's output for one sentence count as a pass?
    pub fn check(&self, statements: &[Statement]) -> bool {
        match &self.expected {
            Expected::Nothing => statements.is_empty(),
            Expected::Script(lines) => render(statements)
                .lines()
                .eq(lines.iter().map(|l| l.as_str())),
        }
    }
}

/// Substitute every combination of `params` into the `{key}` placeholders of `template`.
///
/// With no parameters there is exactly one sentence; a parameter with no values gives none.
pub fn expand(template: &str, params: &BTreeMap<String, Vec<String>>) -> Vec<String> {
    let mut combos: Vec<BTreeMap<&str, &str>> = vec![BTreeMap::new()];
    for (key, values) in params {
        combos = combos
            .iter()
            .flat_map(|combo| {
                values.iter().map(move |v| {
                    let mut combo = combo.clone();
                    combo.insert(key.as_str(), v.as_str());
                    combo
                })
            })
            .collect();
    }
    combos.iter().map(|combo| fill(template, combo)).collect()
}

// Replaces placeholders in a single pass, so values are never themselves expanded.
// Braces around unknown keys are left alone.
fn fill(template: &str, values: &BTreeMap<&str, &str>) -> String {
    let mut ret = String::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        ret.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}').and_then(|close| Some((values.get(&after[..close])?, close))) {
            Some((value, close)) => {
                ret.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                ret.push('{');
                rest = after;
            }
        }
    }
    ret.push_str(rest);
    ret
}

/// Every `.json` file at or under `path`, directories in sorted order.
pub fn test_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_owned()]);
    }
    if !path.is_dir() {
        return Err(anyhow!("{} is neither a file nor a directory", path.display()));
    }

    let mut entries = std::fs::read_dir(path)?
        .map(|e| Ok(e?.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    let mut ret = Vec::new();
    let (dirs, files): (Vec<_>, Vec<_>) = entries.into_iter().partition(|p| p.is_dir());
    ret.extend(
        files
            .into_iter()
            .filter(|p| p.extension().map_or(false, |ext| ext == "json")),
    );
    for dir in dirs {
        ret.extend(test_files(&dir)?);
    }
    Ok(ret)
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Tally {
    pub pass: usize,
    pub fail: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.pass + self.fail
    }
}

impl std::ops::AddAssign for Tally {
    fn add_assign(&mut self, other: Tally) {
        self.pass += other.pass;
        self.fail += other.fail;
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = |n: usize| {
            if self.total() == 0 {
                0.0
            } else {
                100.0 * n as f64 / self.total() as f64
            }
        };
        write!(
            f,
            "Pass: {} ({:.1}%), Fail: {} ({:.1}%), Total: {}",
            self.pass,
            pct(self.pass),
            self.fail,
            pct(self.fail),
            self.total()
        )
    }
}

/// Run one test, reporting failures to `out` if `show_fails` is set.
pub fn run_test(
    test: &TestCase,
    service: &dyn ParserService,
    show_fails: bool,
    out: &mut impl Write,
) -> anyhow::Result<Tally> {
    let mut tally = Tally::default();
    for text in test.sentences() {
        let statements: Vec<Statement> = tortuga_nlp::translate(service, &text)?
            .into_iter()
            .flatten()
            .collect();
        if test.check(&statements) {
            tally.pass += 1;
            continue;
        }
        tally.fail += 1;
        if show_fails {
            writeln!(out, "\t{text}")?;
            match &test.expected {
                Expected::Nothing => {
                    writeln!(out, "\t\texpected nothing to be recognized, but got:")?
                }
                Expected::Script(lines) => writeln!(out, "\t\texpected: {lines:?}")?,
            }
            let got: Vec<_> = render(&statements).lines().map(str::to_owned).collect();
            writeln!(out, "\t\treceived: {got:?}")?;
        }
    }
    if tally.total() == 0 {
        log::warn!("test \"{}\" has no sentences", test.name);
    }
    Ok(tally)
}

/// Run every test at or under `path`, printing per-file and overall results to `out`.
pub fn run_all(
    path: &Path,
    service: &dyn ParserService,
    show_fails: bool,
    out: &mut impl Write,
) -> anyhow::Result<Tally> {
    let mut total = Tally::default();
    for file in test_files(path)? {
        let test = TestCase::load(&file)?;
        writeln!(out, "{}", file.display())?;
        let tally = run_test(&test, service, show_fails, out)?;
        if tally.fail > 0 {
            writeln!(out, "\t{tally}")?;
        }
        total += tally;
    }
    writeln!(out, "\n{total}")?;
    Ok(total)
}
