//! Parsers for the small annotation languages embedded in JSON strings.
//!
//! - edge specs: `<from><shape><to>[ <label>]`, e.g. `a-|>b setup`
//! - lane labels: `.`-separated cycle tokens, e.g. `.A..{rdy}(0.5)`

use winnow::{
    Parser as _,
    ascii::{digit0, digit1, multispace0},
    combinator::{alt, delimited, opt, preceded},
    error::{ContextError, ErrMode},
    token::{any, one_of, rest, take_till, take_while},
};

use wavelane_core::semantic::{ArcShape, EdgeSpec, LabelToken, LaneLabel};

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode};

/// Context type for annotation parse errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what is currently being parsed
    Label(&'static str),
}

type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

/// Endpoints and label of an edge before the shape is resolved.
#[derive(Debug, PartialEq)]
struct RawEdge<'s> {
    endpoints: &'s str,
    label: Option<&'s str>,
}

fn edge_endpoints<'s>(input: &mut &'s str) -> IResult<&'s str> {
    preceded(multispace0, take_till(1.., char::is_whitespace))
        .context(Context::Label("edge endpoints"))
        .parse_next(input)
}

/// The label is everything after the single separator following the
/// endpoints, so inner spacing is preserved.
fn edge_label<'s>(input: &mut &'s str) -> IResult<Option<&'s str>> {
    opt(preceded(any.verify(|c: &char| c.is_whitespace()), rest))
        .map(|label: Option<&str>| label.filter(|label| !label.is_empty()))
        .parse_next(input)
}

fn raw_edge<'s>(input: &mut &'s str) -> IResult<RawEdge<'s>> {
    let endpoints = edge_endpoints.parse_next(input)?;
    let label = edge_label.parse_next(input)?;
    Ok(RawEdge { endpoints, label })
}

/// Parses one entry of the `edge` list, found at `path`.
///
/// The first character of the leading word names the source event, the
/// last names the target, and everything in between is the connector shape.
/// Unknown shapes draw a plain line and are reported as a warning.
pub(crate) fn edge_spec(
    source: &str,
    path: &str,
    diagnostics: &mut DiagnosticCollector,
) -> Option<EdgeSpec> {
    let endpoints = raw_edge.parse(source).ok().and_then(|raw| {
        let mut chars = raw.endpoints.chars();
        let from = chars.next()?;
        let to = chars.next_back().unwrap_or(from);
        Some((from, chars.as_str(), to, raw.label))
    });
    let Some((from, shape_text, to, label)) = endpoints else {
        diagnostics.emit(
            Diagnostic::new(ErrorCode::E200, format!("`{path}` is not an edge: `{source}`"))
                .with_help("edges are written as `<from><shape><to> [label]`, e.g. `a~>b`"),
        );
        return None;
    };

    let shape = if shape_text.is_empty() {
        ArcShape::default()
    } else {
        shape_text.parse().unwrap_or_else(|_| {
            diagnostics.emit(
                Diagnostic::new(
                    ErrorCode::W200,
                    format!("`{path}` uses unknown connector `{shape_text}`, drawing a straight line"),
                )
                .with_help("connectors combine `-`, `~` and `|`, optionally between `<` and `>`"),
            );
            ArcShape::default()
        })
    };

    Some(EdgeSpec::new(from, to, shape, label.map(str::to_string)))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `\d*\.?\d+`
fn offset_number(input: &mut &str) -> IResult<f64> {
    alt(((digit0, '.', digit1).take(), digit1))
        .parse_to()
        .context(Context::Label("label offset"))
        .parse_next(input)
}

fn label_offset(input: &mut &str) -> IResult<Option<f64>> {
    opt(delimited('(', offset_number, ')')).parse_next(input)
}

fn label_token(input: &mut &str) -> IResult<LabelToken> {
    let text = alt((
        '.'.value(None),
        delimited('{', take_while(1.., is_word_char), '}').map(|word: &str| Some(word.to_string())),
        one_of(is_word_char).map(|c: char| Some(c.to_string())),
    ))
    .context(Context::Label("label token"))
    .parse_next(input)?;
    let offset = label_offset.parse_next(input)?;

    Ok(match text {
        None => LabelToken::Skip,
        Some(text) => LabelToken::Text {
            text,
            offset: offset.unwrap_or(0.0),
        },
    })
}

/// Parses a lane `label` string.
///
/// Characters that do not start a token are skipped, so this never fails.
pub(crate) fn lane_label(source: &str) -> LaneLabel {
    let mut input = source;
    let mut tokens = Vec::new();
    while !input.is_empty() {
        match label_token.parse_next(&mut input) {
            Ok(token) => tokens.push(token),
            Err(_) => {
                let _: IResult<char> = any.parse_next(&mut input);
            }
        }
    }
    LaneLabel::new(tokens)
}
