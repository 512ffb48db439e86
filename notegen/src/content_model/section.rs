//! A single named block of notes

use serde_json::Value;

/// Heading used when a section arrives without a usable name
pub const UNTITLED_SECTION: &str = "Untitled Section";

/// One named block of bullet points plus an optional code excerpt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section heading as sent by the backend
    pub name: Option<String>,
    /// Bullet points in backend order
    pub points: Vec<String>,
    /// Code excerpt, `None` when the backend sent nothing (or an empty string)
    pub code: Option<String>,
}

impl Section {
    /// Create a section from its parts
    ///
    /// Empty names and empty code are normalised to `None` so that both
    /// renderers see the same absence.
    pub fn new(name: Option<String>, points: Vec<String>, code: Option<String>) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()),
            points,
            code: code.filter(|c| !c.is_empty()),
        }
    }

    /// Heading text to render, falling back to the placeholder
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNTITLED_SECTION)
    }

    /// Build a section from one element of the `topics` array
    pub(super) fn from_value(value: &Value) -> Result<Self, String> {
        let Value::Object(fields) = value else {
            return Err(format!("expected an object, found {}", json_type_name(value)));
        };

        let name = match fields.get("name") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(format!(
                    "'name' must be a string, found {}",
                    json_type_name(other)
                ))
            }
        };

        let points = match fields.get("points") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| point_text(item).ok_or_else(|| {
                    format!(
                        "point {} must be text, found {}",
                        i,
                        json_type_name(item)
                    )
                }))
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(format!(
                    "'points' must be an array, found {}",
                    json_type_name(other)
                ))
            }
        };

        let code = match fields.get("code") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(format!(
                    "'code' must be a string, found {}",
                    json_type_name(other)
                ))
            }
        };

        Ok(Self::new(name, points, code))
    }
}

/// Scalars are accepted as points; containers are not
fn point_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Human-readable JSON type name for error messages
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name_placeholder() {
        let section = Section::new(None, vec![], None);
        assert_eq!(section.display_name(), UNTITLED_SECTION);

        let section = Section::new(Some(String::new()), vec![], None);
        assert_eq!(section.display_name(), UNTITLED_SECTION);
        assert_eq!(section.name, None);
    }

    #[test]
    fn test_empty_code_is_absent() {
        let section = Section::new(Some("A".to_string()), vec![], Some(String::new()));
        assert_eq!(section.code, None);
    }

    #[test]
    fn test_from_value_missing_points_is_empty() {
        let section = Section::from_value(&json!({"name": "Intro"})).unwrap();
        assert!(section.points.is_empty());
        assert_eq!(section.display_name(), "Intro");
    }

    #[test]
    fn test_from_value_scalar_points() {
        let section = Section::from_value(&json!({"points": ["a", 2, true]})).unwrap();
        assert_eq!(section.points, vec!["a", "2", "true"]);
    }

    #[test]
    fn test_from_value_rejects_nested_point() {
        let err = Section::from_value(&json!({"points": ["a", {"b": 1}]})).unwrap_err();
        assert!(err.contains("point 1"));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = Section::from_value(&json!("just text")).unwrap_err();
        assert!(err.contains("string"));
    }

    #[test]
    fn test_from_value_drops_unknown_fields() {
        let section =
            Section::from_value(&json!({"name": "X", "points": [], "extra": 1})).unwrap();
        assert_eq!(section, Section::new(Some("X".to_string()), vec![], None));
    }
}
