//! Turning English instructions into turtle scripts.
//!
//! Text goes to a dependency parser (see [`service`]), which splits it into sentences and
//! hands back a [`DependencyGraph`] for each one. [`recognize`] then walks each graph looking
//! for commands it knows, and produces the corresponding script statements.

use tortuga::Statement;

pub mod graph;
pub mod recognize;
pub mod service;

pub use graph::{DependencyEdge, DependencyGraph, GraphError, Relation, Token};
pub use recognize::{recognize, Family, DEFAULT_AGENT};
pub use service::{decode_response, CoreNlpClient, ParserService, ServiceError};

/// Parse `text` and recognize each of its sentences.
///
/// There is one entry per sentence, in order; a sentence that wasn't understood gives an
/// empty entry.
pub fn translate(
    service: &dyn ParserService,
    text: &str,
) -> Result<Vec<Vec<Statement>>, ServiceError> {
    Ok(service.parse(text)?.iter().map(recognize).collect())
}
