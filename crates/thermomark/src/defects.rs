//! Lenient JSON parsing for caller-supplied defect lists.
//!
//! Two wire formats are accepted per record, resolved once by key presence:
//! millimeter coordinates (`x_mm`/`y_mm`, preferred) or legacy pixel
//! coordinates (`x`/`y`). Missing numeric fields take their defaults; a
//! present but un-coercible field is a record-level error, and a payload
//! that is not an array of objects is a list-level error.

use serde_json::{Map, Value};

use thermomark_core::{Defect, DefectPosition, Severity, DEFAULT_DIAMETER_MM};

use crate::api::AnnotError;

/// Parse a defect list from a JSON string.
pub fn parse_defects(json: &str) -> Result<Vec<Defect>, AnnotError> {
    let value: Value = serde_json::from_str(json).map_err(|err| AnnotError::MalformedDefectList {
        reason: err.to_string(),
    })?;
    parse_defects_value(&value)
}

/// Parse a defect list from an already-parsed JSON value.
pub fn parse_defects_value(value: &Value) -> Result<Vec<Defect>, AnnotError> {
    let records = value
        .as_array()
        .ok_or_else(|| AnnotError::MalformedDefectList {
            reason: "expected a JSON array of defect objects".to_string(),
        })?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record))
        .collect()
}

fn parse_record(index: usize, record: &Value) -> Result<Defect, AnnotError> {
    let fields = record
        .as_object()
        .ok_or_else(|| AnnotError::MalformedDefectList {
            reason: format!("element {index} is not an object"),
        })?;

    let id = match opt_number(fields, "id", index)? {
        Some(id) if id >= 0.0 => id as u32,
        Some(_) | None => index as u32 + 1,
    };

    // Key presence selects the position variant; values default to zero.
    let position = if fields.contains_key("x_mm") || fields.contains_key("y_mm") {
        DefectPosition::Millimeters {
            x_mm: opt_number(fields, "x_mm", index)?.unwrap_or(0.0),
            y_mm: opt_number(fields, "y_mm", index)?.unwrap_or(0.0),
        }
    } else {
        DefectPosition::Pixels {
            x: opt_number(fields, "x", index)?.unwrap_or(0.0),
            y: opt_number(fields, "y", index)?.unwrap_or(0.0),
        }
    };

    let diameter_mm = match opt_number(fields, "diameter_mm", index)? {
        Some(d) => d,
        None => opt_number(fields, "size", index)?.unwrap_or(DEFAULT_DIAMETER_MM),
    };

    let severity = fields
        .get("severity")
        .and_then(Value::as_str)
        .map(Severity::parse)
        .unwrap_or_default();

    Ok(Defect {
        id,
        position,
        diameter_mm,
        severity,
        temperature: opt_number(fields, "temperature", index)?,
        brightness: opt_number(fields, "brightness", index)?,
    })
}

/// Numeric field lookup accepting JSON numbers and numeric strings.
///
/// Absent or null fields are `Ok(None)`; a present value of any other
/// un-coercible shape is a `MalformedDefectRecord`.
fn opt_number(
    fields: &Map<String, Value>,
    key: &'static str,
    index: usize,
) -> Result<Option<f64>, AnnotError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => {
            s.trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| AnnotError::MalformedDefectRecord {
                    index,
                    field: key,
                    reason: format!("string {s:?} is not numeric"),
                })
        }
        Some(other) => Err(AnnotError::MalformedDefectRecord {
            index,
            field: key,
            reason: format!("unexpected type {}", type_name(other)),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millimeter_variant_is_selected_by_key_presence() {
        let defects = parse_defects(
            r#"[{"x_mm": 120.5, "y_mm": 80.0, "diameter_mm": 15.0, "severity": "high"}]"#,
        )
        .unwrap();
        assert_eq!(defects.len(), 1);
        assert_eq!(
            defects[0].position,
            DefectPosition::Millimeters {
                x_mm: 120.5,
                y_mm: 80.0
            }
        );
        assert_eq!(defects[0].severity, Severity::High);
        assert_eq!(defects[0].diameter_mm, 15.0);
        assert_eq!(defects[0].id, 1);
    }

    #[test]
    fn legacy_variant_uses_pixels_and_the_size_alias() {
        let defects = parse_defects(r#"[{"x": 200, "y": 140, "size": 8.5}]"#).unwrap();
        assert_eq!(
            defects[0].position,
            DefectPosition::Pixels { x: 200.0, y: 140.0 }
        );
        assert_eq!(defects[0].diameter_mm, 8.5);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let defects = parse_defects(r#"[{}, {"x_mm": 10}]"#).unwrap();
        assert_eq!(defects[0].id, 1);
        assert_eq!(defects[0].position, DefectPosition::Pixels { x: 0.0, y: 0.0 });
        assert_eq!(defects[0].diameter_mm, DEFAULT_DIAMETER_MM);
        assert_eq!(defects[0].severity, Severity::Medium);
        assert_eq!(
            defects[1].position,
            DefectPosition::Millimeters {
                x_mm: 10.0,
                y_mm: 0.0
            }
        );
        assert_eq!(defects[1].id, 2);
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let defects = parse_defects(r#"[{"x_mm": "12.5", "y_mm": "30", "size": "9"}]"#).unwrap();
        assert_eq!(
            defects[0].position,
            DefectPosition::Millimeters {
                x_mm: 12.5,
                y_mm: 30.0
            }
        );
        assert_eq!(defects[0].diameter_mm, 9.0);
    }

    #[test]
    fn unknown_severity_defaults_to_medium() {
        let defects = parse_defects(r#"[{"x": 1, "y": 2, "severity": "catastrophic"}]"#).unwrap();
        assert_eq!(defects[0].severity, Severity::Medium);
    }

    #[test]
    fn non_array_payload_is_a_list_error() {
        let err = parse_defects(r#"{"x": 1}"#).unwrap_err();
        assert!(matches!(err, AnnotError::MalformedDefectList { .. }));

        let err = parse_defects(r#"[42]"#).unwrap_err();
        assert!(matches!(err, AnnotError::MalformedDefectList { .. }));
    }

    #[test]
    fn uncoercible_field_is_a_record_error() {
        let err = parse_defects(r#"[{"x_mm": [1, 2]}]"#).unwrap_err();
        match err {
            AnnotError::MalformedDefectRecord { index, field, .. } => {
                assert_eq!(index, 0);
                assert_eq!(field, "x_mm");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = parse_defects(r#"[{"x": "wide"}]"#).unwrap_err();
        assert!(matches!(err, AnnotError::MalformedDefectRecord { .. }));
    }

    #[test]
    fn explicit_ids_are_preserved() {
        let defects = parse_defects(r#"[{"id": 7, "x": 1, "y": 2}, {"x": 3, "y": 4}]"#).unwrap();
        assert_eq!(defects[0].id, 7);
        assert_eq!(defects[1].id, 2);
    }
}
