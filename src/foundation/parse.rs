//! Tolerant readers for authored values.
//!
//! Story documents come from markup attributes, so numbers arrive as strings, vectors as
//! `"x y z"` strings, booleans as `"true"`/`""`. Every reader returns `None` (or the given
//! default) for anything it cannot interpret; none of them fail.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::foundation::core::{DVec3, Rect};

pub fn f64_opt(v: Option<&Value>) -> Option<f64> {
    let n = match v? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

pub fn f64_or(v: Option<&Value>, default: f64) -> f64 {
    f64_opt(v).unwrap_or(default)
}

pub fn bool_opt(v: Option<&Value>) -> Option<bool> {
    match v? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            // A bare attribute (`camera-selectable=""`) means "on".
            "" | "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn bool_or(v: Option<&Value>, default: bool) -> bool {
    bool_opt(v).unwrap_or(default)
}

/// Non-empty trimmed string; numbers are stringified so numeric ids survive.
pub fn string_opt(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn numbers(v: &Value) -> Option<Vec<f64>> {
    match v {
        Value::String(s) => s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f64>().ok().filter(|n| n.is_finite()))
            .collect(),
        Value::Array(items) => items.iter().map(|item| f64_opt(Some(item))).collect(),
        _ => None,
    }
}

/// `"x y z"`, `"x,y,z"`, `[x, y, z]` or `{ "x": .., "y": .., "z": .. }`.
pub fn vec3_opt(v: Option<&Value>) -> Option<DVec3> {
    let v = v?;
    if let Value::Object(map) = v {
        return Some(DVec3::new(
            f64_opt(map.get("x"))?,
            f64_opt(map.get("y"))?,
            f64_opt(map.get("z"))?,
        ));
    }
    match numbers(v)?.as_slice() {
        [x, y, z] => Some(DVec3::new(*x, *y, *z)),
        _ => None,
    }
}

/// Parse `"x y z"` text such as a command-line argument.
///
/// `None` unless it holds exactly three finite numbers.
pub fn parse_vec3(text: &str) -> Option<DVec3> {
    vec3_opt(Some(&Value::String(text.to_owned())))
}

/// Orthographic bounds as `left right top bottom`.
///
/// The returned rect stores `x0 = left`, `x1 = right`, `y0 = bottom`, `y1 = top`.
pub fn bounds_opt(v: Option<&Value>) -> Option<Rect> {
    let v = v?;
    if let Value::Object(map) = v {
        return Some(Rect::new(
            f64_opt(map.get("left"))?,
            f64_opt(map.get("bottom"))?,
            f64_opt(map.get("right"))?,
            f64_opt(map.get("top"))?,
        ));
    }
    match numbers(v)?.as_slice() {
        [left, right, top, bottom] => Some(Rect::new(*left, *bottom, *right, *top)),
        _ => None,
    }
}

/// Whitespace/comma separated names, or an array of names.
pub fn layers(v: Option<&Value>) -> BTreeSet<String> {
    match v {
        Some(Value::String(s)) => s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(str::to_owned)
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| string_opt(Some(item)))
            .collect(),
        _ => BTreeSet::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/parse.rs"]
mod tests;
