// src/api/properties.rs
//! Best-effort decoding of typed Notion property cells.
//!
//! Every decoder degrades to its type's zero value when the property is
//! absent or of an unexpected underlying type. None of them can fail:
//! user-editable data must never abort a sync run, only malformed API
//! envelopes can.
//!
//! Timestamps come from the page envelope (`created_time`,
//! `last_edited_time`), not from user-editable properties, so their
//! provenance is independent of data entry.

use crate::model::DateRange;
use serde_json::Value;

/// Concatenated plain text of a `title` or `rich_text` property.
pub fn text(props: &Value, name: &str) -> String {
    let Some(property) = props.get(name) else {
        return String::new();
    };

    let items = match property.get("type").and_then(Value::as_str) {
        Some("title") => property.get("title"),
        Some("rich_text") => property.get("rich_text"),
        _ => None,
    };

    items
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|item| item.get("plain_text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

/// A `checkbox` property; absent or mistyped decodes to `false`.
pub fn checkbox(props: &Value, name: &str) -> bool {
    typed_field(props, name, "checkbox")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// The option names of a `multi_select` property.
pub fn multi_select(props: &Value, name: &str) -> Vec<String> {
    typed_field(props, name, "multi_select")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|item| item.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// The selected option name of a `select` property, if any.
pub fn select(props: &Value, name: &str) -> Option<String> {
    typed_field(props, name, "select")?
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// A `url` property; empty cells decode to `None`.
pub fn url(props: &Value, name: &str) -> Option<String> {
    typed_field(props, name, "url")?
        .as_str()
        .filter(|u| !u.is_empty())
        .map(str::to_string)
}

/// A `date` property as a start/optional-end range.
pub fn date(props: &Value, name: &str) -> Option<DateRange> {
    let date = typed_field(props, name, "date")?;
    let start = date.get("start")?.as_str()?.to_string();
    let end = date
        .get("end")
        .and_then(Value::as_str)
        .map(str::to_string);
    Some(DateRange { start, end })
}

/// The related page ids of a `relation` property.
pub fn relation(props: &Value, name: &str) -> Vec<String> {
    typed_field(props, name, "relation")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|item| item.get("id").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Creation timestamp from the page envelope.
pub fn created_time(page: &Value) -> String {
    page.get("created_time")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Last-edit timestamp from the page envelope.
pub fn last_edited_time(page: &Value) -> String {
    page.get("last_edited_time")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// A property's payload, but only when its declared type matches.
fn typed_field<'a>(props: &'a Value, name: &str, expected: &str) -> Option<&'a Value> {
    let property = props.get(name)?;
    if property.get("type").and_then(Value::as_str) != Some(expected) {
        return None;
    }
    let field = property.get(expected)?;
    if field.is_null() {
        None
    } else {
        Some(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_concatenates_title_spans() {
        let props = json!({
            "Title": {
                "type": "title",
                "title": [
                    {"plain_text": "Hello "},
                    {"plain_text": "World"}
                ]
            }
        });
        assert_eq!(text(&props, "Title"), "Hello World");
    }

    #[test]
    fn absent_properties_decode_to_zero_values() {
        let props = json!({});
        assert_eq!(text(&props, "Title"), "");
        assert!(!checkbox(&props, "published"));
        assert!(multi_select(&props, "tags").is_empty());
        assert_eq!(select(&props, "status"), None);
        assert_eq!(url(&props, "thumbnail"), None);
        assert_eq!(date(&props, "period"), None);
        assert!(relation(&props, "relatedPosts").is_empty());
    }

    #[test]
    fn mistyped_properties_decode_to_zero_values() {
        let props = json!({
            "published": {"type": "rich_text", "rich_text": []},
            "tags": {"type": "checkbox", "checkbox": true}
        });
        assert!(!checkbox(&props, "published"));
        assert!(multi_select(&props, "tags").is_empty());
    }

    #[test]
    fn empty_select_cell_decodes_to_none() {
        let props = json!({
            "status": {"type": "select", "select": null}
        });
        assert_eq!(select(&props, "status"), None);
    }

    #[test]
    fn date_range_keeps_optional_end() {
        let props = json!({
            "period": {
                "type": "date",
                "date": {"start": "2024-01-01", "end": null}
            }
        });
        let range = date(&props, "period").unwrap();
        assert_eq!(range.start, "2024-01-01");
        assert_eq!(range.end, None);
    }
}
