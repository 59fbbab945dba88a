//! Talking to a CoreNLP-compatible dependency parser.
//!
//! The parser is treated as a black box: we send it raw text and get back, for every
//! sentence it finds, the tokens and the basic dependency edges between them.

use serde::Deserialize;

use crate::graph::{DependencyEdge, DependencyGraph, Relation, Token};

pub const DEFAULT_SERVER: &str = "http://localhost:9000/";

/// The annotators we need, and the output format we know how to read.
pub const PROPERTIES: &str =
    r#"{"annotators": "tokenize,ssplit,pos,lemma,depparse", "outputFormat": "json"}"#;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("couldn't reach the parser: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("the parser answered with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Something that can turn text into dependency graphs, one per sentence.
pub trait ParserService {
    fn parse(&self, text: &str) -> Result<Vec<DependencyGraph>, ServiceError>;
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    sentences: Vec<Sentence>,
}

#[derive(Debug, Deserialize)]
struct Sentence {
    #[serde(default)]
    tokens: Vec<RawToken>,
    #[serde(rename = "basicDependencies", alias = "basic-dependencies", default)]
    dependencies: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
struct RawToken {
    index: usize,
    word: String,
    lemma: Option<String>,
    pos: String,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    dep: String,
    governor: usize,
    dependent: usize,
}

impl Sentence {
    fn into_graph(self) -> DependencyGraph {
        let tokens = self
            .tokens
            .into_iter()
            .map(|t| {
                let lemma = t.lemma.unwrap_or_else(|| t.word.to_lowercase());
                Token {
                    index: t.index,
                    word: t.word,
                    lemma,
                    pos: t.pos,
                }
            })
            .collect();
        let edges = self
            .dependencies
            .into_iter()
            .map(|e| DependencyEdge {
                governor: e.governor,
                dependent: e.dependent,
                relation: Relation::from_label(&e.dep),
            })
            .collect();
        DependencyGraph::new(tokens, edges).unwrap_or_else(|e| {
            log::warn!("discarding malformed sentence: {e}");
            DependencyGraph::default()
        })
    }
}

/// Read the parser's JSON answer.
///
/// A response we can't make sense of yields no sentences, and a sentence whose graph is
/// inconsistent yields an empty graph. Either way we log a warning rather than failing,
/// because to the caller it just means "nothing was understood".
pub fn decode_response(json: &str) -> Vec<DependencyGraph> {
    match serde_json::from_str::<Response>(json) {
        Ok(resp) => resp
            .sentences
            .into_iter()
            .map(Sentence::into_graph)
            .collect(),
        Err(e) => {
            log::warn!("couldn't decode the parser's response: {e}");
            Vec::new()
        }
    }
}

/// A client for a CoreNLP server.
pub struct CoreNlpClient {
    url: String,
    client: reqwest::blocking::Client,
}

impl CoreNlpClient {
    pub fn new(url: &str) -> Result<Self, ServiceError> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(CoreNlpClient {
            url: url.to_owned(),
            client,
        })
    }
}

impl ParserService for CoreNlpClient {
    fn parse(&self, text: &str) -> Result<Vec<DependencyGraph>, ServiceError> {
        log::debug!("asking {} to parse {text:?}", self.url);
        let resp = self
            .client
            .post(&self.url)
            .query(&[("properties", PROPERTIES)])
            .body(text.to_owned())
            .send()?;
        let status = resp.status();
        let body = check_status(status, resp.text()?)?;
        Ok(decode_response(&body))
    }
}

fn check_status(status: reqwest::StatusCode, body: String) -> Result<String, ServiceError> {
    if status.is_success() {
        Ok(body)
    } else {
        Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode() {
        let json = r#"{"sentences": [{
            "index": 0,
            "basicDependencies": [
                {"dep": "ROOT", "governor": 0, "governorGloss": "ROOT",
                 "dependent": 1, "dependentGloss": "Go"},
                {"dep": "advmod", "governor": 1, "governorGloss": "Go",
                 "dependent": 2, "dependentGloss": "up"}
            ],
            "tokens": [
                {"index": 1, "word": "Go", "originalText": "Go", "lemma": "go", "pos": "VB"},
                {"index": 2, "word": "up", "originalText": "up", "pos": "RB"}
            ]
        }]}"#;
        let graphs = decode_response(json);
        assert_eq!(graphs.len(), 1);
        let g = &graphs[0];
        assert_eq!(g.root().unwrap().lemma, "go");
        // Missing lemmas fall back to the lowercased word.
        assert_eq!(g.token(2).unwrap().lemma, "up");
        assert_eq!(
            g.follow(1, &Relation::AdverbialModifier).unwrap().word,
            "up"
        );
    }

    #[test]
    fn hyphenated_key() {
        let json = r#"{"sentences": [{
            "basic-dependencies": [{"dep": "ROOT", "governor": 0, "dependent": 1}],
            "tokens": [{"index": 1, "word": "Turn", "lemma": "turn", "pos": "VB"}]
        }]}"#;
        let graphs = decode_response(json);
        assert_eq!(graphs[0].edges().len(), 1);
    }

    #[test]
    fn garbage() {
        assert!(decode_response("<html>oops</html>").is_empty());
        assert!(decode_response("{}").is_empty());

        // Two governors for one token: the sentence survives, but as an empty graph.
        let json = r#"{"sentences": [{
            "basicDependencies": [
                {"dep": "ROOT", "governor": 0, "dependent": 1},
                {"dep": "dep", "governor": 2, "dependent": 1}
            ],
            "tokens": [
                {"index": 1, "word": "a", "pos": "DT"},
                {"index": 2, "word": "b", "pos": "NN"}
            ]
        }]}"#;
        let graphs = decode_response(json);
        assert_eq!(graphs, vec![DependencyGraph::default()]);
    }

    #[test]
    fn status() {
        assert_eq!(
            check_status(reqwest::StatusCode::OK, "{}".to_owned()).unwrap(),
            "{}"
        );
        let err = check_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom".to_owned())
            .unwrap_err();
        assert!(matches!(&err, ServiceError::Status { status: 500, body } if body == "boom"));
        assert_eq!(err.to_string(), "the parser answered with status 500: boom");
    }

    #[test]
    fn unreachable_server() {
        // Nothing listens on port 1, so the connection is refused straight away.
        let client = CoreNlpClient::new("http://127.0.0.1:1/").unwrap();
        let err = client.parse("Move forward 3 units.").unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_)), "{err}");
    }
}
