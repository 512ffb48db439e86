//! Content model returned by the notes backend
//!
//! The backend answers with loosely-typed JSON. This module checks that
//! answer once at the boundary and turns it into a [`ContentModel`] that
//! both renderers can rely on. Acceptance is all-or-nothing: a response
//! missing `title` or `topics` is rejected outright, never partially kept.

use serde_json::Value;

mod error;
mod section;

pub use error::ValidationError;
pub use section::{Section, UNTITLED_SECTION};

use section::json_type_name;

/// Validated notes content: a title and its sections in backend order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentModel {
    title: String,
    topics: Vec<Section>,
}

impl ContentModel {
    /// Create a model directly from validated parts
    ///
    /// # Returns
    /// * `Err(ValidationError::EmptyTitle)` - The title is blank
    pub fn new(title: impl Into<String>, topics: Vec<Section>) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Self { title, topics })
    }

    /// Validate a decoded backend response
    ///
    /// # Parameters
    /// * `value` - The JSON body as received
    ///
    /// # Returns
    /// * `Ok(ContentModel)` - The response has a non-empty `title` and a `topics` array
    ///   whose elements are all well-formed sections
    /// * `Err(ValidationError)` - The first problem found
    pub fn validate(value: &Value) -> Result<Self, ValidationError> {
        let Value::Object(fields) = value else {
            return Err(ValidationError::NotAnObject {
                found: json_type_name(value),
            });
        };

        let title = match fields.get("title") {
            None | Some(Value::Null) => return Err(ValidationError::MissingTitle),
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(_) => return Err(ValidationError::EmptyTitle),
        };

        let raw_topics = match fields.get("topics") {
            None | Some(Value::Null) => return Err(ValidationError::MissingTopics),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ValidationError::TopicsNotArray {
                    found: json_type_name(other),
                })
            }
        };

        let topics = raw_topics
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Section::from_value(item)
                    .map_err(|reason| ValidationError::InvalidSection { index, reason })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { title, topics })
    }

    /// Decode a JSON body and validate it
    pub fn from_json_str(body: &str) -> Result<Self, ValidationError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        Self::validate(&value)
    }

    /// Document title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sections in rendering order
    pub fn topics(&self) -> &[Section] {
        &self.topics
    }

    /// Total number of bullet points across all sections
    pub fn point_count(&self) -> usize {
        self.topics.iter().map(|s| s.points.len()).sum()
    }

    /// Number of sections carrying a code excerpt
    pub fn code_block_count(&self) -> usize {
        self.topics.iter().filter(|s| s.code.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loops_response() -> Value {
        json!({
            "title": "Loops",
            "topics": [{
                "name": "For Loop",
                "points": ["Repeats N times", "Uses an index"],
                "code": "for i in range(5): print(i)"
            }]
        })
    }

    #[test]
    fn test_validate_loops_example() {
        let model = ContentModel::validate(&loops_response()).unwrap();
        assert_eq!(model.title(), "Loops");
        assert_eq!(model.topics().len(), 1);

        let section = &model.topics()[0];
        assert_eq!(section.display_name(), "For Loop");
        assert_eq!(section.points, vec!["Repeats N times", "Uses an index"]);
        assert_eq!(section.code.as_deref(), Some("for i in range(5): print(i)"));
        assert_eq!(model.point_count(), 2);
        assert_eq!(model.code_block_count(), 1);
    }

    #[test]
    fn test_validate_empty_topics_is_valid() {
        let model = ContentModel::validate(&json!({"title": "Empty", "topics": []})).unwrap();
        assert!(model.topics().is_empty());
    }

    #[test]
    fn test_validate_empty_object() {
        assert_eq!(
            ContentModel::validate(&json!({})),
            Err(ValidationError::MissingTitle)
        );
    }

    #[test]
    fn test_validate_missing_title_with_good_topics() {
        let value = json!({"topics": [{"name": "A", "points": ["x"]}]});
        assert_eq!(
            ContentModel::validate(&value),
            Err(ValidationError::MissingTitle)
        );
    }

    #[test]
    fn test_validate_null_title() {
        let value = json!({"title": null, "topics": []});
        assert_eq!(
            ContentModel::validate(&value),
            Err(ValidationError::MissingTitle)
        );
    }

    #[test]
    fn test_validate_blank_title() {
        for title in [json!(""), json!("   "), json!(42)] {
            let value = json!({"title": title, "topics": []});
            assert_eq!(
                ContentModel::validate(&value),
                Err(ValidationError::EmptyTitle)
            );
        }
    }

    #[test]
    fn test_validate_missing_topics() {
        let value = json!({"title": "Loops"});
        assert_eq!(
            ContentModel::validate(&value),
            Err(ValidationError::MissingTopics)
        );
    }

    #[test]
    fn test_validate_topics_not_array() {
        let value = json!({"title": "Loops", "topics": "nope"});
        assert_eq!(
            ContentModel::validate(&value),
            Err(ValidationError::TopicsNotArray { found: "string" })
        );
    }

    #[test]
    fn test_validate_rejects_whole_model_on_bad_section() {
        let value = json!({
            "title": "Loops",
            "topics": [
                {"name": "Good", "points": ["ok"]},
                {"name": "Bad", "points": "not a list"}
            ]
        });
        match ContentModel::validate(&value) {
            Err(ValidationError::InvalidSection { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidSection, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_not_an_object() {
        assert_eq!(
            ContentModel::validate(&json!([1, 2])),
            Err(ValidationError::NotAnObject { found: "array" })
        );
    }

    #[test]
    fn test_validate_preserves_order() {
        let value = json!({
            "title": "Order",
            "topics": [
                {"name": "Third", "points": ["c", "b", "a"]},
                {"name": "First", "points": []},
                {"name": "Second"}
            ]
        });
        let model = ContentModel::validate(&value).unwrap();
        let names: Vec<&str> = model.topics().iter().map(|s| s.display_name()).collect();
        assert_eq!(names, vec!["Third", "First", "Second"]);
        assert_eq!(model.topics()[0].points, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_from_json_str_malformed() {
        let err = ContentModel::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }

    #[test]
    fn test_new_rejects_blank_title() {
        assert_eq!(
            ContentModel::new(" ", vec![]),
            Err(ValidationError::EmptyTitle)
        );
    }
}
