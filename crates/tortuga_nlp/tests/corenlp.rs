use pretty_assertions::assert_eq;
use tortuga::{execute, parse, render, AgentStore, RecordingSink};
use tortuga_nlp::{decode_response, translate, DependencyGraph, ParserService, ServiceError};

/// Answers every request with the same recorded parser output.
struct Canned(&'static str);

impl ParserService for Canned {
    fn parse(&self, _text: &str) -> Result<Vec<DependencyGraph>, ServiceError> {
        Ok(decode_response(self.0))
    }
}

fn scripts(json: &'static str) -> Vec<String> {
    translate(&Canned(json), "")
        .unwrap()
        .iter()
        .map(|s| render(s))
        .collect()
}

#[test]
fn one_script_per_sentence() {
    assert_eq!(
        scripts(include_str!("parses/forward_and_up.json")),
        vec!["fd turtle 30.0\n", "up turtle 40.0\n"]
    );
}

#[test]
fn create_then_rotate() {
    assert_eq!(
        scripts(include_str!("parses/create_and_rotate.json")),
        vec!["create monty\ndeg monty\nrol monty 90.0\n"]
    );
}

#[test]
fn repetition_wraps_earlier_clauses() {
    let square = scripts(include_str!("parses/square.json"));
    assert_eq!(
        square,
        vec!["repeat 4\nfd monty 100.0\ndeg monty\nrol monty 90.0\nend\n"]
    );

    // The recognized script is valid input for the interpreter, and draws a closed square.
    let statements = parse(&square[0]).unwrap();
    let mut store = AgentStore::new();
    let mut sink = RecordingSink::default();
    execute(&statements, &mut store, &mut sink).unwrap();
    let monty = store.get("monty").unwrap();
    assert!(monty.position.to_vec2().hypot() < 1e-9);
    assert_eq!(sink.cmds.len(), 8);
}

#[test]
fn unknown_command() {
    assert_eq!(scripts(include_str!("parses/jump.json")), vec![""]);
}

/// A parser that is up but refuses every request.
struct Overloaded;

impl ParserService for Overloaded {
    fn parse(&self, _text: &str) -> Result<Vec<DependencyGraph>, ServiceError> {
        Err(ServiceError::Status {
            status: 503,
            body: "busy".to_owned(),
        })
    }
}

#[test]
fn service_errors_propagate() {
    let err = translate(&Overloaded, "Move forward 3 units.").unwrap_err();
    assert!(matches!(err, ServiceError::Status { status: 503, .. }));
}
