//! Recursive XML rendering.
//!
//! A mapping becomes one child element per key, a sequence becomes repeated
//! `<item>` children, a scalar becomes escaped text content. Keys are used
//! as element names verbatim.

use serde_json::Value;

use super::text_form;

pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Render a full document: declaration followed by `<root>…</root>`.
pub fn to_document(root: &str, value: &Value) -> String {
    let mut out = String::from(XML_DECLARATION);
    write_element(&mut out, root, value);
    out
}

fn write_element(out: &mut String, name: &str, value: &Value) {
    out.push('<');
    out.push_str(name);
    out.push('>');

    match value {
        Value::Array(items) => {
            for item in items {
                write_element(out, "item", item);
            }
        }
        Value::Object(map) => {
            for (key, child) in map {
                write_element(out, key, child);
            }
        }
        scalar => escape_into(out, &text_form(scalar)),
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Escape `& < > " '` as XML entities.
pub fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(doc: &str) -> &str {
        doc.strip_prefix(XML_DECLARATION).unwrap()
    }

    #[test]
    fn mapping_becomes_child_elements_in_order() {
        let doc = to_document("game", &json!({"id": 7, "title": "Celeste"}));
        assert_eq!(body(&doc), "<game><id>7</id><title>Celeste</title></game>");
    }

    #[test]
    fn sequence_becomes_item_children() {
        let doc = to_document("games", &json!([{"id": 1}, {"id": 2}]));
        assert_eq!(
            body(&doc),
            "<games><item><id>1</id></item><item><id>2</id></item></games>"
        );
    }

    #[test]
    fn scalars_are_escaped() {
        let doc = to_document("title", &json!("Tom & Jerry's <\"Chase\">"));
        assert_eq!(
            body(&doc),
            "<title>Tom &amp; Jerry&apos;s &lt;&quot;Chase&quot;&gt;</title>"
        );
    }

    #[test]
    fn null_and_booleans_render_as_text() {
        let doc = to_document("r", &json!({"studioId": null, "ok": false, "rating": 8}));
        assert_eq!(
            body(&doc),
            "<r><studioId></studioId><ok>false</ok><rating>8</rating></r>"
        );
    }

    #[test]
    fn nested_links_render_recursively() {
        let doc = to_document(
            "game",
            &json!({"_links": {"self": {"href": "/api/v1/games/1", "method": "GET"}}}),
        );
        assert_eq!(
            body(&doc),
            "<game><_links><self><href>/api/v1/games/1</href><method>GET</method></self></_links></game>"
        );
    }

    #[test]
    fn empty_sequence_is_an_empty_element() {
        let doc = to_document("games", &json!([]));
        assert_eq!(body(&doc), "<games></games>");
    }
}
