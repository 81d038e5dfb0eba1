//! JSON document loading and normalization.
//!
//! The loader walks the parsed JSON value once, resolving every polymorphic
//! field into the tagged unions of [`wavelane_core::semantic`]. Problems with
//! individual lanes or edges are collected so that one run reports all of
//! them.

use log::{debug, info};
use serde_json::{Map, Value, error::Category};

use wavelane_core::semantic::{
    Axis, Caption, Diagram, EdgeSpec, Group, Lane, MAX_HSCALE, MAX_PERIOD, SignalNode, TickSpec,
};

use crate::{
    annotation,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    rich_text,
    span::Span,
};

/// Keys whose presence makes an object a lane rather than a spacer.
const LANE_KEYS: [&str; 5] = ["name", "wave", "node", "data", "label"];

/// Parses and normalizes a JSON timing diagram document, returning the
/// warnings for input that was skipped or adjusted.
pub(crate) fn load(source: &str) -> Result<(Diagram, Vec<Diagnostic>), ParseError> {
    info!(bytes = source.len(); "Loading diagram");

    let value: Value = serde_json::from_str(source).map_err(|err| syntax_error(source, &err))?;
    let Value::Object(root) = value else {
        return Err(Diagnostic::new(ErrorCode::E100, "a diagram must be a JSON object")
            .with_help("wrap the signal list as `{ \"signal\": [...] }`")
            .into());
    };

    let Some(signal) = root.get("signal") else {
        return Err(missing_signal(&root).into());
    };

    let mut loader = Loader::default();
    let diagram = loader.diagram(&root, signal);
    let warnings = loader.diagnostics.finish()?;

    debug!(
        edges = diagram.edges().len(),
        hscale = diagram.hscale(),
        warnings = warnings.len();
        "Loaded diagram"
    );
    Ok((diagram, warnings))
}

fn syntax_error(source: &str, err: &serde_json::Error) -> Diagnostic {
    let span = Span::at_line_column(source, err.line(), err.column());
    let (code, message) = match err.classify() {
        Category::Eof => (ErrorCode::E002, "unexpected end of input"),
        _ => (ErrorCode::E001, "invalid JSON"),
    };
    Diagnostic::new(code, message).with_label(span, err.to_string())
}

fn missing_signal(root: &Map<String, Value>) -> Diagnostic {
    if let Some(kind) = ["reg", "assign"].into_iter().find(|k| root.contains_key(*k)) {
        return Diagnostic::new(ErrorCode::E102, format!("`{kind}` diagrams are not supported"))
            .with_help("only `signal` timing diagrams can be rendered");
    }
    Diagnostic::new(ErrorCode::E101, "the diagram has no `signal` list")
        .with_help(r#"add a list of lanes, e.g. `"signal": [{"name": "clk", "wave": "p..."}]`"#)
}

#[derive(Default)]
struct Loader {
    diagnostics: DiagnosticCollector,
}

impl Loader {
    fn diagram(&mut self, root: &Map<String, Value>, signal: &Value) -> Diagram {
        let group = match signal {
            Value::Array(items) => self.group(items, "signal"),
            _ => {
                self.type_error("signal", "a list");
                Group::default()
            }
        };

        let mut diagram = Diagram::new(group);
        if let Some(config) = root.get("config") {
            diagram = self.config(diagram, config);
        }
        if let Some(axis) = root.get("head").and_then(|head| self.axis(head, "head")) {
            diagram = diagram.with_head(axis);
        }
        if let Some(axis) = root.get("foot").and_then(|foot| self.axis(foot, "foot")) {
            diagram = diagram.with_foot(axis);
        }
        if let Some(edges) = root.get("edge") {
            diagram = diagram.with_edges(self.edges(edges));
        }
        diagram
    }

    /// Loads a group list. A leading string or integer names the group;
    /// entries that are neither lists nor objects are ignored.
    fn group(&mut self, items: &[Value], path: &str) -> Group {
        let name = match items.first() {
            Some(Value::String(name)) => Some(name.clone()),
            Some(Value::Number(number)) if number.is_i64() || number.is_u64() => {
                Some(number.to_string())
            }
            _ => None,
        };

        let children = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let path = format!("{path}[{i}]");
                match item {
                    Value::Array(items) => Some(SignalNode::Group(self.group(items, &path))),
                    Value::Object(fields) => Some(self.entry(fields, &path)),
                    _ => None,
                }
            })
            .collect();

        Group::new(name, children)
    }

    fn entry(&mut self, fields: &Map<String, Value>, path: &str) -> SignalNode {
        if !LANE_KEYS.iter().any(|key| fields.contains_key(*key)) {
            return SignalNode::Spacer;
        }

        let name = match fields.get("name") {
            None => String::new(),
            Some(Value::String(name)) => name.trim().to_string(),
            Some(Value::Number(number)) => number.to_string(),
            Some(_) => {
                self.type_error(&format!("{path}.name"), "a string");
                String::new()
            }
        };
        let wave = self.optional_string(fields, "wave", path).unwrap_or_default();
        let mut lane = Lane::new(name, wave);

        if let Some(period) = self.optional_number(fields, "period", path) {
            if period <= 0.0 {
                self.diagnostics.emit(Diagnostic::new(
                    ErrorCode::E104,
                    format!("`{path}.period` must be positive"),
                ));
            } else {
                if period > MAX_PERIOD {
                    self.diagnostics.emit(Diagnostic::new(
                        ErrorCode::W101,
                        format!("`{path}.period` is capped at {MAX_PERIOD}"),
                    ));
                }
                lane = lane.with_period(period);
            }
        }
        if let Some(phase) = self.optional_number(fields, "phase", path) {
            lane = lane.with_phase(phase);
        }
        if let Some(data) = fields.get("data") {
            lane = lane.with_data(self.data(data, &format!("{path}.data")));
        }
        if let Some(node) = self.optional_string(fields, "node", path) {
            lane = lane.with_node(node);
        }
        if let Some(label) = self.optional_string(fields, "label", path) {
            lane = lane.with_label(annotation::lane_label(&label));
        }

        SignalNode::Lane(lane)
    }

    /// Bus labels: a whitespace separated string or a list of scalars.
    fn data(&mut self, value: &Value, path: &str) -> Vec<String> {
        match value {
            Value::String(text) => text.split_whitespace().map(str::to_string).collect(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    Value::Number(number) => number.to_string(),
                    _ => {
                        self.type_error(path, "a list of strings");
                        String::new()
                    }
                })
                .collect(),
            _ => {
                self.type_error(path, "a string or a list of strings");
                Vec::new()
            }
        }
    }

    fn config(&mut self, diagram: Diagram, config: &Value) -> Diagram {
        let Value::Object(fields) = config else {
            self.type_error("config", "an object");
            return diagram;
        };

        let mut diagram = diagram;
        if let Some(hscale) = self.optional_number(fields, "hscale", "config") {
            let hscale = hscale.round_ties_even();
            if hscale <= 0.0 {
                self.diagnostics.emit(Diagnostic::new(
                    ErrorCode::W100,
                    format!("`config.hscale` of {hscale} is ignored, it must be at least 1"),
                ));
            } else {
                if hscale > f64::from(MAX_HSCALE) {
                    self.diagnostics.emit(Diagnostic::new(
                        ErrorCode::W100,
                        format!("`config.hscale` is capped at {MAX_HSCALE}"),
                    ));
                }
                diagram = diagram.with_hscale(hscale.min(f64::from(MAX_HSCALE)) as u32);
            }
        }
        if let Some(skin) = self.optional_string(fields, "skin", "config") {
            diagram = diagram.with_skin(skin);
        }
        if fields.contains_key("hbounds") {
            self.diagnostics.emit(Diagnostic::new(
                ErrorCode::W100,
                "`config.hbounds` is not supported and is ignored",
            ));
        }
        diagram
    }

    fn axis(&mut self, value: &Value, path: &str) -> Option<Axis> {
        let Value::Object(fields) = value else {
            self.type_error(path, "an object");
            return None;
        };

        let text = match fields.get("text") {
            None => None,
            Some(Value::String(text)) if text.is_empty() => None,
            Some(Value::String(text)) => Some(Caption::Plain(text.clone())),
            Some(markup @ Value::Array(_)) => {
                match rich_text::jsonml_to_element(markup, &format!("{path}.text")) {
                    Ok(element) => Some(Caption::Rich(element)),
                    Err(diagnostic) => {
                        self.diagnostics.emit(diagnostic);
                        None
                    }
                }
            }
            Some(_) => {
                self.type_error(&format!("{path}.text"), "a string or JsonML list");
                None
            }
        };
        let tick = fields.get("tick").and_then(|value| {
            tick_spec(value, &format!("{path}.tick"), &mut self.diagnostics)
        });
        let tock = fields.get("tock").and_then(|value| {
            tick_spec(value, &format!("{path}.tock"), &mut self.diagnostics)
        });

        Some(Axis::new(text, tick, tock))
    }

    fn edges(&mut self, value: &Value) -> Vec<EdgeSpec> {
        let Value::Array(items) = value else {
            self.type_error("edge", "a list of strings");
            return Vec::new();
        };

        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let path = format!("edge[{i}]");
                let Value::String(spec) = item else {
                    self.type_error(&path, "a string");
                    return None;
                };
                annotation::edge_spec(spec, &path, &mut self.diagnostics)
            })
            .collect()
    }

    fn optional_string(
        &mut self,
        fields: &Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Option<String> {
        match fields.get(key)? {
            Value::String(text) => Some(text.clone()),
            _ => {
                self.type_error(&format!("{path}.{key}"), "a string");
                None
            }
        }
    }

    fn optional_number(
        &mut self,
        fields: &Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Option<f64> {
        let value = fields.get(key)?;
        let number = value.as_f64();
        if number.is_none() {
            self.type_error(&format!("{path}.{key}"), "a number");
        }
        number
    }

    fn type_error(&mut self, path: &str, expected: &str) {
        self.diagnostics.emit(Diagnostic::new(
            ErrorCode::E103,
            format!("`{path}` must be {expected}"),
        ));
    }
}

/// Resolves a `tick`/`tock` value. Unusable values are skipped with a
/// warning.
fn tick_spec(
    value: &Value,
    path: &str,
    diagnostics: &mut DiagnosticCollector,
) -> Option<TickSpec> {
    let spec = match value {
        Value::Number(number) => number.as_f64().map(sequence),
        Value::String(text) => match text.trim().parse::<f64>() {
            Ok(offset) => Some(sequence(offset)),
            Err(_) => {
                let labels: Vec<String> = text.split_whitespace().map(str::to_string).collect();
                (!labels.is_empty()).then_some(TickSpec::Literal(labels))
            }
        },
        Value::Array(items) => list_tick_spec(items),
        _ => None,
    };
    if spec.is_none() {
        diagnostics.emit(Diagnostic::new(
            ErrorCode::W102,
            format!("`{path}` produces no labels and is skipped: {value}"),
        ));
    }
    spec
}

fn sequence(offset: f64) -> TickSpec {
    TickSpec::Sequence {
        offset: offset.trunc() as i64,
    }
}

fn list_tick_spec(items: &[Value]) -> Option<TickSpec> {
    match items {
        [] => None,
        [Value::Number(offset)] => offset.as_f64().map(sequence),
        [offset, step] => match (numeric(offset), numeric(step)) {
            (Some(offset), Some(step)) => Some(TickSpec::Stepped {
                offset: offset.trunc(),
                step,
                decimals: decimals(step),
            }),
            _ => literal(items),
        },
        _ => literal(items),
    }
}

/// A number or numeric string.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Fraction digits of the shortest decimal form of `step`, so `1.0` has
/// none and `0.25` has two.
fn decimals(step: f64) -> usize {
    step.to_string()
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
}

fn literal(items: &[Value]) -> Option<TickSpec> {
    items
        .iter()
        .map(|item| match item {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .map(TickSpec::Literal)
}
