use std::collections::{HashSet, VecDeque};

use tortuga::{AngleUnit, Direction, Rotation, Statement};

use crate::graph::{DependencyGraph, Relation, Token};

/// The agent a command talks about when the sentence never names one.
pub const DEFAULT_AGENT: &str = "turtle";

/// What kind of command a verb introduces.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Family {
    Move,
    Rotate,
    Repeat,
    Create,
}

const VERBS: &[(&str, Family)] = &[
    ("move", Family::Move),
    ("go", Family::Move),
    ("walk", Family::Move),
    ("shift", Family::Move),
    ("travel", Family::Move),
    ("turn", Family::Rotate),
    ("rotate", Family::Rotate),
    ("rol", Family::Rotate),
    ("spin", Family::Rotate),
    ("repeat", Family::Repeat),
    ("do", Family::Repeat),
    ("create", Family::Create),
    ("name", Family::Create),
    ("spawn", Family::Create),
];

// Edges along which one command clause leads to another.
const CLAUSE_LINKS: &[Relation] = &[
    Relation::Conjunction,
    Relation::Parataxis,
    Relation::ClausalComplement,
    Relation::OpenClausalComplement,
    Relation::AdverbialClause,
    Relation::Dependent,
];

pub fn family(tok: &Token) -> Option<Family> {
    let word = tok.word.to_lowercase();
    VERBS
        .iter()
        .find(|(verb, _)| *verb == tok.lemma || *verb == word)
        .map(|(_, f)| *f)
}

// Direction words, before we know whether they belong to a move or a rotation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Way {
    Forward,
    Backward,
    Up,
    Down,
    Left,
    Right,
    Clockwise,
    Anticlockwise,
}

impl Way {
    fn from_word(w: &str) -> Option<Way> {
        Some(match w {
            "forward" | "forwards" | "ahead" => Way::Forward,
            "backward" | "backwards" | "back" => Way::Backward,
            "up" | "upward" | "upwards" => Way::Up,
            "down" | "downward" | "downwards" => Way::Down,
            "left" | "leftward" | "leftwards" => Way::Left,
            "right" | "rightward" | "rightwards" => Way::Right,
            "clockwise" => Way::Clockwise,
            "anticlockwise" | "anti-clockwise" | "counterclockwise" | "counter-clockwise" => {
                Way::Anticlockwise
            }
            _ => return None,
        })
    }

    fn direction(self) -> Option<Direction> {
        match self {
            Way::Forward => Some(Direction::Forward),
            Way::Backward => Some(Direction::Backward),
            Way::Up => Some(Direction::Up),
            Way::Down => Some(Direction::Down),
            Way::Left => Some(Direction::Left),
            Way::Right => Some(Direction::Right),
            Way::Clockwise | Way::Anticlockwise => None,
        }
    }

    // "towards the left" turns anticlockwise, "towards the right" clockwise.
    fn rotation(self) -> Option<Rotation> {
        match self {
            Way::Left | Way::Anticlockwise => Some(Rotation::Anticlockwise),
            Way::Right | Way::Clockwise => Some(Rotation::Clockwise),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Unit {
    Angle(AngleUnit),
    Distance,
    Times,
}

impl Unit {
    fn from_word(w: &str) -> Option<Unit> {
        Some(match w {
            "degree" | "degrees" | "deg" => Unit::Angle(AngleUnit::Degrees),
            "radian" | "radians" | "rad" => Unit::Angle(AngleUnit::Radians),
            "unit" | "units" | "pixel" | "pixels" | "px" | "step" | "steps" | "point"
            | "points" | "meter" | "meters" | "metre" | "metres" => Unit::Distance,
            "time" | "times" => Unit::Times,
            _ => return None,
        })
    }
}

const NUMBER_WORDS: &[(&str, f64)] = &[
    ("zero", 0.0),
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
    ("six", 6.0),
    ("seven", 7.0),
    ("eight", 8.0),
    ("nine", 9.0),
    ("ten", 10.0),
    ("eleven", 11.0),
    ("twelve", 12.0),
    ("thirteen", 13.0),
    ("fourteen", 14.0),
    ("fifteen", 15.0),
    ("sixteen", 16.0),
    ("seventeen", 17.0),
    ("eighteen", 18.0),
    ("nineteen", 19.0),
    ("twenty", 20.0),
];

const REPEAT_ADVERBS: &[(&str, f64)] = &[("once", 1.0), ("twice", 2.0), ("thrice", 3.0)];

fn lower(tok: &Token) -> String {
    tok.word.to_lowercase()
}

fn way(tok: &Token) -> Option<Way> {
    Way::from_word(&lower(tok)).or_else(|| Way::from_word(&tok.lemma))
}

fn unit(tok: &Token) -> Option<Unit> {
    Unit::from_word(&lower(tok)).or_else(|| Unit::from_word(&tok.lemma))
}

fn number(tok: &Token) -> Option<f64> {
    if let Ok(x) = tok.word.replace(',', "").parse::<f64>() {
        return (x.is_finite() && x >= 0.0).then_some(x);
    }
    if !tok.is_cardinal() {
        return None;
    }
    let w = lower(tok);
    NUMBER_WORDS
        .iter()
        .find(|(name, _)| *name == w)
        .map(|(_, x)| *x)
}

// Words that describe a command rather than name the turtle doing it.
fn is_cue(tok: &Token) -> bool {
    way(tok).is_some() || unit(tok).is_some() || number(tok).is_some()
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Magnitude {
    value: f64,
    unit: Option<Unit>,
}

/// One command clause: a verb from the table together with the part of the sentence that
/// hangs off it.
struct Clause<'g> {
    graph: &'g DependencyGraph,
    verb: &'g Token,
    family: Family,
    /// Tokens below the verb (but not below another clause's verb), shallowest first.
    region: Vec<&'g Token>,
}

impl<'g> Clause<'g> {
    fn new(
        graph: &'g DependencyGraph,
        verb: &'g Token,
        family: Family,
        heads: &HashSet<usize>,
    ) -> Self {
        let mut region = Vec::new();
        let mut seen = HashSet::from([verb.index]);
        let mut queue = VecDeque::from([verb.index]);
        while let Some(index) = queue.pop_front() {
            for (_, child) in graph.children(index) {
                if heads.contains(&child.index) || !seen.insert(child.index) {
                    continue;
                }
                region.push(child);
                queue.push_back(child.index);
            }
        }
        Clause {
            graph,
            verb,
            family,
            region,
        }
    }

    fn tokens(&self) -> impl Iterator<Item = &'g Token> + '_ {
        self.region.iter().copied()
    }

    /// Direction words, closest to the verb first.
    fn ways(&self) -> impl Iterator<Item = Way> + '_ {
        self.tokens().filter_map(way)
    }

    /// Numbers together with the unit they count, closest to the verb first.
    fn magnitudes(&self) -> Vec<Magnitude> {
        let mut ret = Vec::new();
        for tok in self.tokens() {
            if let Some(value) = number(tok) {
                // Usually the number modifies its unit ("30 <- units"), but sometimes the
                // parser hangs the unit off the number instead.
                let counts = self
                    .graph
                    .governor(tok.index)
                    .and_then(|(_, gov)| unit(gov))
                    .or_else(|| {
                        self.graph
                            .children(tok.index)
                            .into_iter()
                            .find_map(|(_, child)| unit(child))
                    });
                ret.push(Magnitude {
                    value,
                    unit: counts,
                });
            } else if let Some((_, value)) = REPEAT_ADVERBS.iter().find(|(w, _)| *w == lower(tok))
            {
                ret.push(Magnitude {
                    value: *value,
                    unit: Some(Unit::Times),
                });
            }
        }
        ret
    }

    fn repeat_count(&self) -> Option<Magnitude> {
        self.magnitudes()
            .into_iter()
            .find(|m| m.unit == Some(Unit::Times))
    }

    /// The name of an explicitly mentioned agent.
    fn agent(&self) -> Option<String> {
        [Relation::DirectObject, Relation::Subject]
            .iter()
            .filter_map(|rel| self.graph.follow(self.verb.index, rel))
            .find_map(|tok| self.name_of(tok))
            .or_else(|| self.tokens().find_map(|tok| self.proper_name(tok)))
    }

    fn proper_name(&self, tok: &Token) -> Option<String> {
        if !tok.is_proper_noun() || is_cue(tok) {
            return None;
        }
        let name = lower(tok);
        tortuga::is_valid_name(&name).then_some(name)
    }

    // "Monty", "the turtle", "the turtle named Monty".
    fn name_of(&self, tok: &Token) -> Option<String> {
        if tok.is_pronoun() || is_cue(tok) {
            return None;
        }
        if let Some(name) = self.proper_name(tok) {
            return Some(name);
        }
        if !tok.is_noun() {
            return None;
        }
        let inner = self
            .graph
            .subtree(tok.index)
            .into_iter()
            .find_map(|t| self.proper_name(t));
        inner.or_else(|| {
            let name = tok.lemma.to_lowercase();
            tortuga::is_valid_name(&name).then_some(name)
        })
    }
}

enum Outcome {
    /// Statements, to be wrapped in a loop if the clause carried its own count.
    Statements(Vec<Statement>, Option<u32>),
    /// A repetition cue: wraps the clauses around it.
    Repeat(u32),
    Miss(&'static str),
}

fn loop_count(m: Magnitude) -> Option<u32> {
    (m.value.fract() == 0.0 && m.value <= u32::MAX as f64).then_some(m.value as u32)
}

fn own_count(clause: &Clause) -> Result<Option<u32>, &'static str> {
    match clause.repeat_count() {
        None => Ok(None),
        Some(m) => loop_count(m).map(Some).ok_or("repeat count is not a whole number"),
    }
}

fn recognize_move(clause: &Clause, agent: String) -> Outcome {
    let Some(direction) = clause.ways().find_map(Way::direction) else {
        return Outcome::Miss("no direction to move in");
    };
    let Some(distance) = clause
        .magnitudes()
        .into_iter()
        .find(|m| matches!(m.unit, None | Some(Unit::Distance)))
    else {
        return Outcome::Miss("no distance to move");
    };
    match own_count(clause) {
        Ok(count) => Outcome::Statements(
            vec![Statement::Move {
                agent,
                direction,
                distance: distance.value,
            }],
            count,
        ),
        Err(reason) => Outcome::Miss(reason),
    }
}

fn recognize_rotate(clause: &Clause, agent: String) -> Outcome {
    let Some(rotation) = clause.ways().find_map(Way::rotation) else {
        return Outcome::Miss("no direction to turn in");
    };
    let magnitudes = clause.magnitudes();
    // An amount in degrees or radians beats a bare number or a distance.
    let amount = magnitudes
        .iter()
        .find(|m| matches!(m.unit, Some(Unit::Angle(_))))
        .or_else(|| {
            magnitudes
                .iter()
                .find(|m| matches!(m.unit, None | Some(Unit::Distance)))
        });
    let Some(amount) = amount else {
        return Outcome::Miss("no angle to turn by");
    };

    let mut statements = Vec::new();
    if let Some(Unit::Angle(unit)) = amount.unit {
        statements.push(Statement::SetAngleUnit {
            agent: agent.clone(),
            unit,
        });
    }
    statements.push(Statement::Rotate {
        agent,
        rotation,
        amount: amount.value,
    });
    match own_count(clause) {
        Ok(count) => Outcome::Statements(statements, count),
        Err(reason) => Outcome::Miss(reason),
    }
}

fn recognize_repeat(clause: &Clause) -> Outcome {
    // "repeat 4 times", or just "repeat 4".
    let count = clause.repeat_count().or_else(|| {
        clause
            .magnitudes()
            .into_iter()
            .find(|m| m.unit.is_none())
    });
    match count {
        None => Outcome::Miss("no repeat count"),
        Some(m) => match loop_count(m) {
            Some(n) => Outcome::Repeat(n),
            None => Outcome::Miss("repeat count is not a whole number"),
        },
    }
}

// Resolves the clause's agent, falling back to the one from the previous clause.
fn resolve_agent(clause: &Clause, last_agent: &mut Option<String>) -> String {
    let agent = clause
        .agent()
        .or_else(|| last_agent.clone())
        .unwrap_or_else(|| DEFAULT_AGENT.to_owned());
    *last_agent = Some(agent.clone());
    agent
}

fn recognize_clause(clause: &Clause, last_agent: &mut Option<String>) -> Outcome {
    match clause.family {
        Family::Move => recognize_move(clause, resolve_agent(clause, last_agent)),
        Family::Rotate => recognize_rotate(clause, resolve_agent(clause, last_agent)),
        Family::Repeat => recognize_repeat(clause),
        Family::Create => {
            // "Name the turtle Monty": the proper noun is the new name, not "turtle".
            let name = clause
                .tokens()
                .find_map(|tok| clause.proper_name(tok))
                .or_else(|| clause.agent())
                .unwrap_or_else(|| DEFAULT_AGENT.to_owned());
            *last_agent = Some(name.clone());
            Outcome::Statements(vec![Statement::Create(name)], None)
        }
    }
}

// The root, plus every command verb reachable from it through clause-joining edges, in
// sentence order.
fn clauses(graph: &DependencyGraph) -> Vec<(&Token, Family)> {
    let Some(root) = graph.root() else {
        return Vec::new();
    };
    let mut ret = Vec::new();
    let mut seen = HashSet::from([root.index]);
    let mut queue = VecDeque::from([root]);
    while let Some(tok) = queue.pop_front() {
        if let Some(f) = family(tok) {
            ret.push((tok, f));
        }
        for (rel, child) in graph.children(tok.index) {
            if CLAUSE_LINKS.contains(rel) && seen.insert(child.index) {
                queue.push_back(child);
            }
        }
    }
    ret.sort_by_key(|(tok, _)| tok.index);
    ret
}

/// Translate one parsed sentence into statements.
///
/// Each command clause contributes its statements in sentence order. A repetition cue
/// ("do this 4 times") wraps everything recognized before it in the sentence; if nothing
/// came before it ("repeat 4 times: ..."), it wraps everything after it instead. Clauses
/// that can't be understood contribute nothing, so the result may be empty.
pub fn recognize(graph: &DependencyGraph) -> Vec<Statement> {
    let heads = clauses(graph);
    let head_set: HashSet<usize> = heads.iter().map(|(tok, _)| tok.index).collect();

    let mut out = Vec::new();
    // Loops opened by a leading repetition cue: where their body starts in `out`, and the count.
    let mut scopes: Vec<(usize, u32)> = Vec::new();
    let mut last_agent = None;

    for (verb, family) in heads {
        let clause = Clause::new(graph, verb, family, &head_set);
        let scope_start = scopes.last().map_or(0, |&(start, _)| start);
        match recognize_clause(&clause, &mut last_agent) {
            Outcome::Statements(mut statements, None) => out.append(&mut statements),
            Outcome::Statements(body, Some(count)) => out.push(Statement::Repeat { count, body }),
            Outcome::Repeat(count) if out.len() > scope_start => {
                let body = out.split_off(scope_start);
                out.push(Statement::Repeat { count, body });
            }
            Outcome::Repeat(count) => scopes.push((out.len(), count)),
            Outcome::Miss(reason) => {
                log::debug!("ignoring clause \"{}\": {reason}", clause.verb.word);
            }
        }
    }

    while let Some((start, count)) = scopes.pop() {
        let body = out.split_off(start);
        if body.is_empty() {
            log::debug!("dropping a repeat with nothing to repeat");
        } else {
            out.push(Statement::Repeat { count, body });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::graph;

    fn script(g: &DependencyGraph) -> String {
        tortuga::render(&recognize(g))
    }

    // Move the turtle forward by 30 units.
    fn forward_30() -> DependencyGraph {
        graph(
            &[
                ("Move", "move", "VB"),
                ("the", "the", "DT"),
                ("turtle", "turtle", "NN"),
                ("forward", "forward", "RB"),
                ("by", "by", "IN"),
                ("30", "30", "CD"),
                ("units", "unit", "NNS"),
                (".", ".", "."),
            ],
            &[
                (0, 1, "ROOT"),
                (3, 2, "det"),
                (1, 3, "dobj"),
                (1, 4, "advmod"),
                (7, 5, "case"),
                (7, 6, "nummod"),
                (1, 7, "nmod"),
                (1, 8, "punct"),
            ],
        )
    }

    #[test]
    fn move_forward() {
        assert_eq!(script(&forward_30()), "fd turtle 30.0\n");
    }

    #[test]
    fn deterministic() {
        let g = forward_30();
        assert_eq!(recognize(&g), recognize(&g));
    }

    #[test]
    fn move_up() {
        // Move the turtle 40 units up.
        let g = graph(
            &[
                ("Move", "move", "VB"),
                ("the", "the", "DT"),
                ("turtle", "turtle", "NN"),
                ("40", "40", "CD"),
                ("units", "unit", "NNS"),
                ("up", "up", "RB"),
            ],
            &[
                (0, 1, "ROOT"),
                (3, 2, "det"),
                (1, 3, "dobj"),
                (5, 4, "nummod"),
                (6, 5, "nmod:npmod"),
                (1, 6, "advmod"),
            ],
        );
        assert_eq!(script(&g), "up turtle 40.0\n");
    }

    #[test]
    fn turn_with_default_agent_and_word_number() {
        // Turn right by ninety degrees.
        let g = graph(
            &[
                ("Turn", "turn", "VB"),
                ("right", "right", "RB"),
                ("by", "by", "IN"),
                ("ninety", "ninety", "CD"),
                ("degrees", "degree", "NNS"),
            ],
            &[
                (0, 1, "ROOT"),
                (1, 2, "advmod"),
                (5, 3, "case"),
                (5, 4, "nummod"),
                (1, 5, "nmod"),
            ],
        );
        // "ninety" isn't in the table, so there's no amount.
        assert_eq!(script(&g), "");

        let g = graph(
            &[
                ("Turn", "turn", "VB"),
                ("right", "right", "RB"),
                ("by", "by", "IN"),
                ("twenty", "twenty", "CD"),
                ("radians", "radian", "NNS"),
            ],
            &[
                (0, 1, "ROOT"),
                (1, 2, "advmod"),
                (5, 3, "case"),
                (5, 4, "nummod"),
                (1, 5, "nmod"),
            ],
        );
        assert_eq!(script(&g), "rad turtle\nror turtle 20.0\n");
    }

    #[test]
    fn unknown_verb() {
        // Jump over the fence.
        let g = graph(
            &[
                ("Jump", "jump", "VB"),
                ("over", "over", "IN"),
                ("the", "the", "DT"),
                ("fence", "fence", "NN"),
            ],
            &[(0, 1, "ROOT"), (4, 2, "case"), (4, 3, "det"), (1, 4, "nmod")],
        );
        assert!(recognize(&g).is_empty());
        assert!(recognize(&DependencyGraph::default()).is_empty());
    }

    #[test]
    fn move_without_direction_is_a_miss() {
        // Move Monty by 10 units.
        let g = graph(
            &[
                ("Move", "move", "VB"),
                ("Monty", "Monty", "NNP"),
                ("by", "by", "IN"),
                ("10", "10", "CD"),
                ("units", "unit", "NNS"),
            ],
            &[
                (0, 1, "ROOT"),
                (1, 2, "dobj"),
                (5, 3, "case"),
                (5, 4, "nummod"),
                (1, 5, "nmod"),
            ],
        );
        assert!(recognize(&g).is_empty());
    }

    #[test]
    fn clause_with_its_own_count() {
        // Move forward 10 steps twice.
        let g = graph(
            &[
                ("Move", "move", "VB"),
                ("forward", "forward", "RB"),
                ("10", "10", "CD"),
                ("steps", "step", "NNS"),
                ("twice", "twice", "RB"),
            ],
            &[
                (0, 1, "ROOT"),
                (1, 2, "advmod"),
                (4, 3, "nummod"),
                (1, 4, "dobj"),
                (1, 5, "advmod"),
            ],
        );
        assert_eq!(script(&g), "repeat 2\nfd turtle 10.0\nend\n");
    }

    #[test]
    fn leading_repeat() {
        // Repeat 3 times: go back 5 units and turn left 120 degrees.
        let g = graph(
            &[
                ("Repeat", "repeat", "VB"),
                ("3", "3", "CD"),
                ("times", "time", "NNS"),
                (":", ":", ":"),
                ("go", "go", "VB"),
                ("back", "back", "RB"),
                ("5", "5", "CD"),
                ("units", "unit", "NNS"),
                ("and", "and", "CC"),
                ("turn", "turn", "VB"),
                ("left", "left", "RB"),
                ("120", "120", "CD"),
                ("degrees", "degree", "NNS"),
            ],
            &[
                (0, 1, "ROOT"),
                (3, 2, "nummod"),
                (1, 3, "nmod:tmod"),
                (1, 4, "punct"),
                (1, 5, "parataxis"),
                (5, 6, "advmod"),
                (8, 7, "nummod"),
                (5, 8, "dobj"),
                (5, 9, "cc"),
                (5, 10, "conj"),
                (10, 11, "advmod"),
                (13, 12, "nummod"),
                (10, 13, "dobj"),
            ],
        );
        assert_eq!(
            script(&g),
            "repeat 3\nbk turtle 5.0\ndeg turtle\nrol turtle 120.0\nend\n"
        );
    }

    #[test]
    fn pronoun_reuses_agent() {
        // Move Alice up 3 units and turn her clockwise by 1 radian.
        let g = graph(
            &[
                ("Move", "move", "VB"),
                ("Alice", "Alice", "NNP"),
                ("up", "up", "RP"),
                ("3", "3", "CD"),
                ("units", "unit", "NNS"),
                ("and", "and", "CC"),
                ("turn", "turn", "VB"),
                ("her", "she", "PRP"),
                ("clockwise", "clockwise", "RB"),
                ("by", "by", "IN"),
                ("1", "1", "CD"),
                ("radian", "radian", "NN"),
            ],
            &[
                (0, 1, "ROOT"),
                (1, 2, "dobj"),
                (1, 3, "compound:prt"),
                (5, 4, "nummod"),
                (1, 5, "nmod:npmod"),
                (1, 6, "cc"),
                (1, 7, "conj"),
                (7, 8, "dobj"),
                (7, 9, "advmod"),
                (12, 10, "case"),
                (12, 11, "nummod"),
                (7, 12, "nmod"),
            ],
        );
        assert_eq!(script(&g), "up alice 3.0\nrad alice\nror alice 1.0\n");
    }

    #[test]
    fn create_prefers_the_proper_noun() {
        // Name the turtle Monty.
        let g = graph(
            &[
                ("Name", "name", "VB"),
                ("the", "the", "DT"),
                ("turtle", "turtle", "NN"),
                ("Monty", "Monty", "NNP"),
            ],
            &[(0, 1, "ROOT"), (3, 2, "det"), (1, 3, "dobj"), (1, 4, "xcomp")],
        );
        assert_eq!(script(&g), "create monty\n");

        // Create a turtle.
        let g = graph(
            &[("Create", "create", "VB"), ("a", "a", "DT"), ("turtle", "turtle", "NN")],
            &[(0, 1, "ROOT"), (3, 2, "det"), (1, 3, "dobj")],
        );
        assert_eq!(script(&g), "create turtle\n");
    }

    #[test]
    fn angle_unit_beats_distance_in_a_turn() {
        // Turn Monty left 10 units by 90 degrees.
        let g = graph(
            &[
                ("Turn", "turn", "VB"),
                ("Monty", "Monty", "NNP"),
                ("left", "left", "RB"),
                ("10", "10", "CD"),
                ("units", "unit", "NNS"),
                ("by", "by", "IN"),
                ("90", "90", "CD"),
                ("degrees", "degree", "NNS"),
            ],
            &[
                (0, 1, "ROOT"),
                (1, 2, "dobj"),
                (1, 3, "advmod"),
                (5, 4, "nummod"),
                (1, 5, "nmod:npmod"),
                (8, 6, "case"),
                (8, 7, "nummod"),
                (1, 8, "nmod"),
            ],
        );
        assert_eq!(script(&g), "deg monty\nrol monty 90.0\n");
    }

    #[test]
    fn closest_direction_and_distance_win() {
        // Past the box 7 units up, move the turtle forward 5 units.
        // "up" comes first in the sentence, but hangs further from the verb.
        let g = graph(
            &[
                ("Past", "past", "IN"),
                ("the", "the", "DT"),
                ("box", "box", "NN"),
                ("7", "7", "CD"),
                ("units", "unit", "NNS"),
                ("up", "up", "RB"),
                (",", ",", ","),
                ("move", "move", "VB"),
                ("the", "the", "DT"),
                ("turtle", "turtle", "NN"),
                ("forward", "forward", "RB"),
                ("5", "5", "CD"),
                ("units", "unit", "NNS"),
            ],
            &[
                (3, 1, "case"),
                (3, 2, "det"),
                (8, 3, "nmod"),
                (5, 4, "nummod"),
                (6, 5, "nmod:npmod"),
                (3, 6, "advmod"),
                (8, 7, "punct"),
                (0, 8, "ROOT"),
                (10, 9, "det"),
                (8, 10, "dobj"),
                (8, 11, "advmod"),
                (13, 12, "nummod"),
                (8, 13, "nmod:npmod"),
            ],
        );
        assert_eq!(script(&g), "fd turtle 5.0\n");
    }

    #[test]
    fn families() {
        let verb = |lemma: &str| family(&Token::new(1, lemma, lemma, "VB"));
        assert_eq!(verb("walk"), Some(Family::Move));
        assert_eq!(verb("rotate"), Some(Family::Rotate));
        assert_eq!(verb("do"), Some(Family::Repeat));
        assert_eq!(verb("name"), Some(Family::Create));
        assert_eq!(verb("jump"), None);
    }
}
