use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1, take_while, take_while1},
    character::complete::{alpha1, alphanumeric1},
    combinator::{all_consuming, eof, recognize},
    multi::{many0_count, many_till, separated_list0},
    number::complete::double,
    sequence::{delimited, pair},
    IResult,
};

use crate::script::{AngleUnit, Direction, Rotation, Statement};

pub type Span<'a> = nom_locate::LocatedSpan<&'a str>;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: u32,
    pub kind: ParseErrorKind,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("I don't know how to {0}")]
    UnknownCommand(String),
    #[error("wrong number of inputs to {command} (got {found}, expected {expected})")]
    WrongArity {
        command: String,
        expected: usize,
        found: usize,
    },
    #[error("{command} doesn't like {arg} as input")]
    BadArgument { command: String, arg: String },
    #[error("end without a matching repeat")]
    UnmatchedEnd,
    #[error("repeat is never closed by an end")]
    UnclosedRepeat,
    #[error("unreadable script text")]
    Syntax,
}

// Whitespace other than the newline, which separates statements.
fn blank0(input: Span) -> IResult<Span, Span> {
    take_while(|c: char| c.is_whitespace() && c != '\n')(input)
}

fn blank1(input: Span) -> IResult<Span, Span> {
    take_while1(|c: char| c.is_whitespace() && c != '\n')(input)
}

fn word(input: Span) -> IResult<Span, Span> {
    take_till1(|c: char| c.is_whitespace())(input)
}

fn line(input: Span) -> IResult<Span, Vec<Span>> {
    delimited(
        blank0,
        separated_list0(blank1, word),
        pair(blank0, alt((tag("\n"), eof))),
    )(input)
}

fn script_lines(input: Span) -> IResult<Span, Vec<Vec<Span>>> {
    let (input, (lines, _)) = many_till(line, eof)(input)?;
    Ok((input, lines))
}

fn ident(input: Span) -> IResult<Span, Span> {
    all_consuming(recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    )))(input)
}

/// Whether `s` can be used as an agent name in a script.
pub fn is_valid_name(s: &str) -> bool {
    ident(Span::new(s)).is_ok()
}

fn number(input: Span) -> IResult<Span, f64> {
    all_consuming(double)(input)
}

fn count(input: Span) -> IResult<Span, u32> {
    all_consuming(nom::character::complete::u32)(input)
}

// A single line, before repeat/end are matched up.
enum Line {
    Statement(Statement),
    Repeat(u32),
    End,
}

fn bad_arg(command: &Span, arg: &Span) -> ParseErrorKind {
    ParseErrorKind::BadArgument {
        command: command.fragment().to_string(),
        arg: arg.fragment().to_string(),
    }
}

fn classify(command: &Span, args: &[Span]) -> Result<Line, ParseErrorKind> {
    let arity = |expected: usize| {
        if args.len() == expected {
            Ok(())
        } else {
            Err(ParseErrorKind::WrongArity {
                command: command.fragment().to_string(),
                expected,
                found: args.len(),
            })
        }
    };
    let name = |arg: &Span| match ident(*arg) {
        Ok((_, name)) => Ok(name.fragment().to_string()),
        Err(_) => Err(bad_arg(command, arg)),
    };
    let amount = |arg: &Span| match number(*arg) {
        Ok((_, x)) if x.is_finite() && x >= 0.0 => Ok(x),
        _ => Err(bad_arg(command, arg)),
    };

    let cmd = *command.fragment();
    if let Some(direction) = Direction::from_keyword(cmd) {
        arity(2)?;
        return Ok(Line::Statement(Statement::Move {
            agent: name(&args[0])?,
            direction,
            distance: amount(&args[1])?,
        }));
    }
    if let Some(rotation) = Rotation::from_keyword(cmd) {
        arity(2)?;
        return Ok(Line::Statement(Statement::Rotate {
            agent: name(&args[0])?,
            rotation,
            amount: amount(&args[1])?,
        }));
    }
    if let Some(unit) = AngleUnit::from_keyword(cmd) {
        arity(1)?;
        return Ok(Line::Statement(Statement::SetAngleUnit {
            agent: name(&args[0])?,
            unit,
        }));
    }
    match cmd {
        "create" => {
            arity(1)?;
            Ok(Line::Statement(Statement::Create(name(&args[0])?)))
        }
        "repeat" => {
            arity(1)?;
            let (_, n) = count(args[0]).map_err(|_| bad_arg(command, &args[0]))?;
            Ok(Line::Repeat(n))
        }
        "end" => {
            arity(0)?;
            Ok(Line::End)
        }
        _ => Err(ParseErrorKind::UnknownCommand(cmd.to_owned())),
    }
}

struct OpenRepeat {
    count: u32,
    line: u32,
    body: Vec<Statement>,
}

fn innermost<'a>(
    stack: &'a mut [OpenRepeat],
    top: &'a mut Vec<Statement>,
) -> &'a mut Vec<Statement> {
    match stack.last_mut() {
        Some(open) => &mut open.body,
        None => top,
    }
}

/// Parse script text into statements.
///
/// Blank lines are ignored. Every `repeat` must be closed by exactly one `end`; any error
/// rejects the whole script.
pub fn parse(text: &str) -> Result<Vec<Statement>, ParseError> {
    let (_, lines) = script_lines(Span::new(text)).map_err(|e| match e {
        nom::Err::Error(e) | nom::Err::Failure(e) => ParseError {
            line: e.input.location_line(),
            kind: ParseErrorKind::Syntax,
        },
        nom::Err::Incomplete(_) => ParseError {
            line: 1,
            kind: ParseErrorKind::Syntax,
        },
    })?;

    let mut stack: Vec<OpenRepeat> = Vec::new();
    let mut top = Vec::new();
    for words in lines {
        let Some((command, args)) = words.split_first() else {
            continue;
        };
        let line = command.location_line();
        match classify(command, args).map_err(|kind| ParseError { line, kind })? {
            Line::Statement(s) => innermost(&mut stack, &mut top).push(s),
            Line::Repeat(count) => stack.push(OpenRepeat {
                count,
                line,
                body: Vec::new(),
            }),
            Line::End => {
                let open = stack.pop().ok_or(ParseError {
                    line,
                    kind: ParseErrorKind::UnmatchedEnd,
                })?;
                innermost(&mut stack, &mut top).push(Statement::Repeat {
                    count: open.count,
                    body: open.body,
                });
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError {
            line: open.line,
            kind: ParseErrorKind::UnclosedRepeat,
        });
    }
    Ok(top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;

    fn fd(agent: &str, distance: f64) -> Statement {
        Statement::Move {
            agent: agent.to_owned(),
            direction: Direction::Forward,
            distance,
        }
    }

    #[test]
    fn nesting_balance() {
        assert_eq!(
            parse("repeat 2\nfd t 1.0\nend").unwrap(),
            vec![Statement::Repeat {
                count: 2,
                body: vec![fd("t", 1.0)]
            }]
        );

        let err = parse("repeat 2\nfd t 1.0").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedRepeat);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn whitespace() {
        let s = parse("\n  fd\tt   1 \r\n\n   \nbk t 2.5").unwrap();
        assert_eq!(
            s,
            vec![
                fd("t", 1.0),
                Statement::Move {
                    agent: "t".to_owned(),
                    direction: Direction::Backward,
                    distance: 2.5,
                }
            ]
        );
        assert_eq!(parse("").unwrap(), vec![]);
        assert_eq!(parse("\n\n").unwrap(), vec![]);
    }

    #[test]
    fn every_command() {
        let text = "create monty\nfd monty 1.0\nbk monty 2.0\nup monty 3.0\ndown monty 4.0\n\
                    lft monty 5.0\nrgt monty 6.0\ndeg monty\nrad monty\nrol monty 0.5\n\
                    ror monty 1e-7\nrepeat 0\nend\n";
        let s = parse(text).unwrap();
        assert_eq!(s.len(), 12);
        assert_eq!(render(&s), text);
    }

    #[test]
    fn nested_blocks() {
        let s = parse("repeat 2\nrepeat 3\nfd t 1\nend\nrol t 90\nend\nfd t 2").unwrap();
        assert_eq!(
            s,
            vec![
                Statement::Repeat {
                    count: 2,
                    body: vec![
                        Statement::Repeat {
                            count: 3,
                            body: vec![fd("t", 1.0)]
                        },
                        Statement::Rotate {
                            agent: "t".to_owned(),
                            rotation: Rotation::Anticlockwise,
                            amount: 90.0,
                        }
                    ]
                },
                fd("t", 2.0),
            ]
        );
    }

    #[test]
    fn errors() {
        let kind = |s| parse(s).unwrap_err().kind;
        assert_eq!(kind("jump t 3"), ParseErrorKind::UnknownCommand("jump".to_owned()));
        assert_eq!(
            kind("fd t"),
            ParseErrorKind::WrongArity {
                command: "fd".to_owned(),
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            kind("fd t -1"),
            ParseErrorKind::BadArgument {
                command: "fd".to_owned(),
                arg: "-1".to_owned()
            }
        );
        assert_eq!(
            kind("rol t inf"),
            ParseErrorKind::BadArgument {
                command: "rol".to_owned(),
                arg: "inf".to_owned()
            }
        );
        assert_eq!(kind("end"), ParseErrorKind::UnmatchedEnd);
        assert!(matches!(kind("repeat -1\nend"), ParseErrorKind::BadArgument { .. }));
        assert!(matches!(kind("create t.x"), ParseErrorKind::BadArgument { .. }));
    }

    #[test]
    fn names() {
        assert!(is_valid_name("monty"));
        assert!(is_valid_name("_t2"));
        assert!(!is_valid_name("2t"));
        assert!(!is_valid_name("o'brien"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn error_lines() {
        assert_eq!(parse("fd t 1\n\ncreate a\nwhat").unwrap_err().line, 4);
        assert_eq!(parse("repeat 1\nend\nend").unwrap_err().line, 3);
        assert_eq!(
            parse("repeat 2\nfd t 1\nbogus\nend").unwrap_err().to_string(),
            "line 3: I don't know how to bogus"
        );
    }
}
