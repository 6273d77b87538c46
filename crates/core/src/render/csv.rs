//! Tabular CSV export.
//!
//! The header row is the key set of the first row (minus `_links`). A single
//! object is treated as a one-row table and an empty list renders as an empty
//! string. Rows are joined with `\n` and there is no trailing newline.

use std::borrow::Cow;

use serde_json::Value;

use super::text_form;
use crate::hateoas::LINKS_KEY;

/// Column name used when the rows are not objects.
const SCALAR_COLUMN: &str = "value";

pub fn to_csv(payload: &Value) -> String {
    let rows: Vec<&Value> = match payload {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };

    let Some(first) = rows.first() else {
        return String::new();
    };

    let headers: Vec<&str> = match first {
        Value::Object(map) => map
            .keys()
            .map(String::as_str)
            .filter(|key| *key != LINKS_KEY)
            .collect(),
        _ => vec![SCALAR_COLUMN],
    };
    let scalar_rows = !first.is_object();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(join_fields(headers.iter().map(|h| Cow::Borrowed(*h))));

    for row in rows {
        let line = if scalar_rows {
            join_fields(std::iter::once(text_form(row)))
        } else {
            join_fields(headers.iter().map(|header| match row {
                Value::Object(map) => map.get(*header).map(text_form).unwrap_or_default(),
                _ => Cow::Borrowed(""),
            }))
        };
        lines.push(line);
    }

    lines.join("\n")
}

fn join_fields<'a>(fields: impl Iterator<Item = Cow<'a, str>>) -> String {
    fields
        .map(|field| escape_field(&field).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a field containing a comma, a double quote or a newline, doubling
/// embedded quotes.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// Minimal reader for single-line records, enough to check round-trips.
    fn parse_record(line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            match (ch, in_quotes) {
                ('"', true) if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                ('"', _) => in_quotes = !in_quotes,
                (',', false) => fields.push(std::mem::take(&mut current)),
                (other, _) => current.push(other),
            }
        }
        fields.push(current);
        fields
    }

    #[test]
    fn empty_list_renders_empty_string() {
        assert_eq!(to_csv(&json!([])), "");
    }

    #[test]
    fn single_object_is_wrapped_as_one_row() {
        assert_eq!(
            to_csv(&json!({"id": 3, "title": "Hades"})),
            "id,title\n3,Hades"
        );
    }

    #[test]
    fn value_with_comma_is_quoted() {
        let csv = to_csv(&json!([{"id": 1, "title": "Halo, Reach", "genre": "Shooter"}]));
        assert_eq!(csv, "id,title,genre\n1,\"Halo, Reach\",Shooter");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let csv = to_csv(&json!([{"title": "The \"Best\" Game"}]));
        assert_eq!(csv, "title\n\"The \"\"Best\"\" Game\"");
    }

    #[test]
    fn newline_forces_quoting() {
        let csv = to_csv(&json!([{"comment": "line one\nline two"}]));
        assert_eq!(csv, "comment\n\"line one\nline two\"");
    }

    #[test]
    fn missing_and_null_fields_are_empty() {
        let csv = to_csv(&json!([
            {"id": 1, "studioId": 4},
            {"id": 2, "studioId": null},
            {"id": 3}
        ]));
        assert_eq!(csv, "id,studioId\n1,4\n2,\n3,");
    }

    #[test]
    fn header_comes_from_first_row_only() {
        let csv = to_csv(&json!([{"a": 1}, {"a": 2, "b": 3}]));
        assert_eq!(csv, "a\n1\n2");
    }

    #[test]
    fn links_are_dropped() {
        let csv = to_csv(&json!([{
            "id": 1,
            "_links": {"self": {"href": "/api/v1/games/1", "method": "GET", "rel": "self"}}
        }]));
        assert_eq!(csv, "id\n1");
    }

    #[test]
    fn nested_values_become_compact_json() {
        let csv = to_csv(&json!([{"id": 1, "reviews": [{"rating": 9}]}]));
        assert_eq!(csv, "id,reviews\n1,\"[{\"\"rating\"\":9}]\"");
    }

    #[test]
    fn scalar_rows_use_value_column() {
        assert_eq!(to_csv(&json!(["a", "b,c"])), "value\na\n\"b,c\"");
    }

    #[test]
    fn round_trip_reproduces_scalar_fields_as_strings() {
        let row = json!({
            "id": 42,
            "title": "Halo, Reach",
            "genre": "Shooter",
            "releaseDate": "2010-09-14",
            "platform": "Xbox",
            "studioId": null,
            "tagline": "Remember \"Reach\""
        });
        let csv = to_csv(&json!([row.clone()]));

        let mut lines = csv.lines();
        let header = parse_record(lines.next().unwrap());
        let values = parse_record(lines.next().unwrap());
        assert!(lines.next().is_none());

        assert_eq!(header.len(), values.len());
        for (key, value) in header.iter().zip(values.iter()) {
            assert_eq!(value, &text_form(&row[key.as_str()]).into_owned(), "field {key}");
        }
        assert!(csv.contains("\"Halo, Reach\""));
    }
}
