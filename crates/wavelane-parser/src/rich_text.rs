//! Conversion of JsonML caption markup into element trees.
//!
//! A JsonML node is `[tag, {attributes}?, ...children]` where each child is
//! a string or another node:
//!
//! ```text
//! ["tspan", {"class": "h3"}, "Timing ", ["tspan", {"font-style": "italic"}, "Diagram"]]
//! ```

use serde_json::Value;

use wavelane_core::element::Element;

use crate::error::{Diagnostic, ErrorCode};

/// Converts a JsonML node into an element.
pub(crate) fn jsonml_to_element(value: &Value, path: &str) -> Result<Element, Diagnostic> {
    let Value::Array(items) = value else {
        return Err(malformed(path, "a JsonML node must be a list"));
    };
    let Some((Value::String(tag), rest)) = items.split_first() else {
        return Err(malformed(path, "a JsonML node must start with a tag name"));
    };

    let mut element = Element::new(tag.as_str());
    let mut children = rest;
    if let Some((Value::Object(attributes), tail)) = rest.split_first() {
        for (name, value) in attributes {
            element.assign(name.as_str(), scalar_text(value).ok_or_else(|| {
                malformed(path, format!("attribute `{name}` must be a string or number"))
            })?);
        }
        children = tail;
    }

    for (i, child) in children.iter().enumerate() {
        match child {
            Value::Array(_) => {
                let child_path = format!("{path}[{}]", i + items.len() - children.len());
                element.append(jsonml_to_element(child, &child_path)?);
            }
            other => match scalar_text(other) {
                Some(text) => element = element.add_text(text),
                None => return Err(malformed(path, "JsonML children must be text or nodes")),
            },
        }
    }

    Ok(element)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn malformed(path: &str, message: impl Into<String>) -> Diagnostic {
    Diagnostic::new(ErrorCode::E201, format!("malformed rich text in `{path}`")).with_help(message)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_nested_markup() {
        let value = json!(["tspan", {"class": "h3"}, "Timing ", ["tspan", {"font-weight": "bold"}, "Diagram"]]);
        let element = jsonml_to_element(&value, "head.text").unwrap();

        assert_eq!(element.tag(), "tspan");
        assert_eq!(element.attr("class"), Some("h3"));
        assert_eq!(element.children().len(), 2);
        assert_eq!(element.text_content(), "Timing Diagram");

        let inner = element.child_elements().next().unwrap();
        assert_eq!(inner.attr("font-weight"), Some("bold"));
    }

    #[test]
    fn test_without_attributes() {
        let value = json!(["tspan", "plain", 42]);
        let element = jsonml_to_element(&value, "foot.text").unwrap();
        assert!(element.attrs().next().is_none());
        assert_eq!(element.text_content(), "plain42");
    }

    #[test]
    fn test_rejects_missing_tag() {
        let err = jsonml_to_element(&json!([{"class": "h1"}]), "head.text").unwrap_err();
        assert_eq!(err.code(), ErrorCode::E201);
        assert!(jsonml_to_element(&json!([]), "head.text").is_err());
    }

    #[test]
    fn test_rejects_bad_child() {
        let err = jsonml_to_element(&json!(["tspan", null]), "head.text").unwrap_err();
        assert_eq!(err.message(), "malformed rich text in `head.text`");
    }
}
