//! Translation of `jsonschema` errors into [`FieldIssue`]s.
//!
//! Instance paths become `education[0].gpa` style paths. The expected side is
//! described from the schema fragment the failing keyword belongs to, so an
//! enum failure wrapped in `anyOf` still reads `one of "applied", ... or null`.

use jsonschema::error::ValidationErrorKind;
use serde_json::Value;

use crate::error::FieldIssue;

/// How deep `$ref`/`anyOf` chains are followed when describing a constraint.
const MAX_DESCRIBE_DEPTH: usize = 8;

pub(crate) fn field_issue(
    err: &jsonschema::ValidationError<'_>,
    root_schema: &Value,
    instance: &Value,
) -> FieldIssue {
    let mut instance_segments = pointer_segments(&err.instance_path.to_string());
    let schema_segments = pointer_segments(&err.schema_path.to_string());
    let parent = schema_segments
        .split_last()
        .and_then(|(_, parent)| schema_at(root_schema, parent));

    if let ValidationErrorKind::Required { property } = &err.kind {
        let property = property
            .as_str()
            .map_or_else(|| property.to_string(), str::to_string);
        let expected = parent
            .and_then(|p| p.get("properties"))
            .and_then(|props| props.get(property.as_str()))
            .map_or_else(|| "a value".to_string(), |s| describe(root_schema, s, 0));
        instance_segments.push(property);
        return FieldIssue {
            path: render_path(&instance_segments, instance),
            expected,
            actual: "missing".to_string(),
        };
    }

    let expected = parent.map_or_else(
        || fallback_expected(err),
        |fragment| describe(root_schema, fragment, 0),
    );
    FieldIssue {
        path: render_path(&instance_segments, instance),
        expected,
        actual: json_type(&err.instance).to_string(),
    }
}

/// Name of the JSON type of `value`.
pub(crate) const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn pointer_segments(pointer: &str) -> Vec<String> {
    pointer
        .split('/')
        .skip(1)
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Render pointer segments as a field path, using the instance to tell array
/// indexes from object keys that happen to be numeric.
fn render_path(segments: &[String], instance: &Value) -> String {
    let mut out = String::new();
    let mut node = Some(instance);
    for seg in segments {
        if let Some(Value::Array(items)) = node {
            out.push('[');
            out.push_str(seg);
            out.push(']');
            node = seg.parse::<usize>().ok().and_then(|i| items.get(i));
        } else {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(seg);
            node = node.and_then(|v| v.get(seg.as_str()));
        }
    }
    if out.is_empty() { "$".to_string() } else { out }
}

fn resolve_ref<'a>(root: &'a Value, schema: &Value) -> Option<&'a Value> {
    let reference = schema.get("$ref")?.as_str()?;
    root.pointer(reference.strip_prefix('#')?)
}

fn step<'a>(node: &'a Value, seg: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(seg),
        Value::Array(items) => items.get(seg.parse::<usize>().ok()?),
        _ => None,
    }
}

/// Walk a schema location, following `$ref` whether or not the location
/// names it explicitly.
fn schema_at<'a>(root: &'a Value, segments: &[String]) -> Option<&'a Value> {
    let mut node = root;
    for seg in segments {
        if seg == "$ref" {
            node = resolve_ref(root, node)?;
            continue;
        }
        node = match step(node, seg) {
            Some(next) => next,
            None => step(resolve_ref(root, node)?, seg)?,
        };
    }
    Some(node)
}

fn describe(root: &Value, schema: &Value, depth: usize) -> String {
    if depth > MAX_DESCRIBE_DEPTH {
        return "a valid value".to_string();
    }
    if let Some(target) = resolve_ref(root, schema) {
        return describe(root, target, depth + 1);
    }
    if let Some(options) = schema.get("enum").and_then(Value::as_array) {
        let options: Vec<String> = options.iter().map(Value::to_string).collect();
        return format!("one of {}", options.join(", "));
    }
    if let Some(constant) = schema.get("const") {
        return constant.to_string();
    }
    for keyword in ["anyOf", "oneOf"] {
        if let Some(alternatives) = schema.get(keyword).and_then(Value::as_array) {
            let described: Vec<String> = alternatives
                .iter()
                .map(|alt| describe(root, alt, depth + 1))
                .collect();
            return described.join(" or ");
        }
    }

    let types: Vec<&str> = match schema.get("type") {
        Some(Value::String(t)) => vec![t.as_str()],
        Some(Value::Array(ts)) => ts.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    if types.is_empty() {
        return "any value".to_string();
    }
    types
        .iter()
        .map(|t| match *t {
            "number" | "integer" => format!("{t}{}", numeric_range(schema)),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" or ")
}

fn numeric_range(schema: &Value) -> String {
    match (schema.get("minimum"), schema.get("maximum")) {
        (Some(min), Some(max)) => format!(" between {min} and {max}"),
        (Some(min), None) => format!(" >= {min}"),
        (None, Some(max)) => format!(" <= {max}"),
        (None, None) => String::new(),
    }
}

/// Constraint text taken from the validator message, minus the instance.
fn fallback_expected(err: &jsonschema::ValidationError<'_>) -> String {
    let message = err.to_string();
    let instance = err.instance.to_string();
    message
        .strip_prefix(instance.as_str())
        .unwrap_or(&message)
        .trim()
        .trim_start_matches("is not ")
        .to_string()
}
