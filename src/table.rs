//! HTML table rendering for league pages.
//!
//! Cell values are written verbatim. Callers only feed upstream league data
//! through here and are responsible for sanitising anything user-influenced.

use serde_json::{Map, Value};

use crate::mfl::{Franchise, LivePlayer};

pub const DEFAULT_BODY_ID: &str = "table-body-id";

/// Something that renders as one body row.
///
/// Cells come out in field order; nothing aligns them against the headers.
pub trait TableRow {
    fn cells(&self) -> Vec<String>;
}

impl TableRow for Franchise {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.owner_name.clone(),
            self.last_visit.clone(),
        ]
    }
}

impl TableRow for LivePlayer {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.team.clone(),
            self.position.clone(),
            self.score.clone(),
            self.game_seconds_remaining.clone(),
        ]
    }
}

/// Insertion-ordered JSON objects render their values in key order of insertion.
impl TableRow for Map<String, Value> {
    fn cells(&self) -> Vec<String> {
        self.values()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    }
}

fn table_row<S: AsRef<str>>(values: &[S], tag: &str) -> String {
    let cells: String = values
        .iter()
        .map(|v| format!("<{tag}>{}</{tag}>", v.as_ref()))
        .collect();
    format!("<tr>{}</tr>", cells)
}

pub fn render_table<R: TableRow>(rows: &[R], caption: &str, headers: &[&str]) -> String {
    render_table_with_id(rows, caption, headers, DEFAULT_BODY_ID)
}

pub fn render_table_with_id<R: TableRow>(
    rows: &[R],
    caption: &str,
    headers: &[&str],
    body_id: &str,
) -> String {
    let header_row = table_row(headers, "th");
    let body_rows = rows
        .iter()
        .map(|row| table_row(&row.cells(), "td"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<table>
<caption>
<span classname="module_expand" class="module_expand" href="javascript:void(0);">[-]</span>
<span>{caption}</span>
</caption>
<thead>
{header_row}
</thead>
<tbody id="{body_id}">
{body_rows}
</tbody>
</table>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_single_row_table() {
        let html = render_table(&[row(json!({"a": "1", "b": "2"}))], "Cap", &["A", "B"]);
        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.contains("<thead>\n<tr><th>A</th><th>B</th></tr>\n</thead>"));
        assert!(html.contains("<tr><td>1</td><td>2</td></tr>"));
        assert!(html.contains("<span>Cap</span>"));
        assert!(html.contains(r#"<tbody id="table-body-id">"#));
    }

    #[test]
    fn test_caption_toggle_markup() {
        let html = render_table(&[row(json!({"a": "1"}))], "Cap", &["A"]);
        assert!(html.contains(
            r#"<span classname="module_expand" class="module_expand" href="javascript:void(0);">[-]</span>"#
        ));
    }

    #[test]
    fn test_values_follow_insertion_order_not_headers() {
        let html = render_table(&[row(json!({"b": "2", "a": "1"}))], "Cap", &["A", "B"]);
        assert!(html.contains("<tr><td>2</td><td>1</td></tr>"));
    }

    #[test]
    fn test_custom_body_id_and_empty_rows() {
        let rows: Vec<Map<String, Value>> = Vec::new();
        let html = render_table_with_id(&rows, "Empty", &["A"], "league-body");
        assert!(html.contains(r#"<tbody id="league-body">"#));
        assert_eq!(html.matches("<td>").count(), 0);
    }

    #[test]
    fn test_non_string_json_values() {
        let html = render_table(&[row(json!({"n": 3, "flag": true}))], "Cap", &["N", "F"]);
        assert!(html.contains("<tr><td>3</td><td>true</td></tr>"));
    }

    #[test]
    fn test_franchise_row_order() {
        let franchise = Franchise {
            id: "0001".into(),
            name: "Blitz".into(),
            owner_name: "Sam".into(),
            last_visit: "2024-06-30 19:00:00".into(),
        };
        assert!(render_table(&[franchise], "League", &["ID", "Franchise", "Owner", "Last Visit"])
            .contains("<tr><td>0001</td><td>Blitz</td><td>Sam</td><td>2024-06-30 19:00:00</td></tr>"));
    }
}
