//! Lookup table wire types.
//!
//! This module defines the types describing one page of lookup table search
//! results as served by the backend. A [`TablePage`] is transient: it is decoded
//! from a fetch response, applied to the session once, and dropped. Cursor values
//! (`prev_skip`/`next_skip`) are opaque offsets owned by the server; the client
//! echoes them back verbatim and never computes its own.

use serde::{Deserialize, Serialize};

/// One page of search results for a lookup table.
///
/// All header text (`title`, `description`, `search_placeholder`,
/// `pagination_info`) is server-formatted and replaces the corresponding
/// session fields verbatim on apply. A missing `prev_skip` or `next_skip`
/// means "no such page" and disables the matching pagination control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    /// Display title for the table.
    pub title: String,

    /// Descriptive text shown under the title.
    #[serde(default)]
    pub description: String,

    /// Placeholder text for the query input.
    #[serde(default)]
    pub search_placeholder: String,

    /// Server-formatted range text ("showing 1-25 of 312" style).
    #[serde(default)]
    pub pagination_info: String,

    /// Cursor for the previous page, absent on the first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_skip: Option<u64>,

    /// Cursor for the next page, absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_skip: Option<u64>,

    /// Result rows in server order.
    #[serde(default)]
    pub entries: Vec<TableEntry>,
}

/// One renderable search result row.
///
/// `code` and `label` identify the entry towards the consumer that opened the
/// browser; `name` is the human-readable display text. An entry with `source`
/// present gets an expandable detail panel, one without does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableEntry {
    /// Stable entry code handed to the selection consumer.
    pub code: String,

    /// Label handed to the selection consumer alongside the code.
    pub label: String,

    /// Display name rendered as the row's primary text.
    pub name: String,

    /// Whether to render the code in parentheses after the name.
    #[serde(default)]
    pub show_code: bool,

    /// Optional secondary description line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional expandable detail text (definition source, raw record).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_page() {
        let body = r#"{
            "title": "Countries",
            "description": "ISO country codes",
            "searchPlaceholder": "Search countries...",
            "paginationInfo": "1-2 of 240",
            "nextSkip": 2,
            "entries": [
                {"code": "de", "label": "Germany", "name": "Germany", "showCode": true},
                {"code": "fr", "label": "France", "name": "France", "showCode": false,
                 "description": "French Republic", "source": "code: fr\nname: France"}
            ]
        }"#;

        let page: TablePage = serde_json::from_str(body).unwrap();
        assert_eq!(page.title, "Countries");
        assert_eq!(page.prev_skip, None);
        assert_eq!(page.next_skip, Some(2));
        assert_eq!(page.entries.len(), 2);
        assert!(page.entries[0].show_code);
        assert!(page.entries[0].source.is_none());
        assert_eq!(
            page.entries[1].source.as_deref(),
            Some("code: fr\nname: France")
        );
    }

    #[test]
    fn absent_cursors_decode_as_none() {
        let page: TablePage =
            serde_json::from_str(r#"{"title": "Units", "entries": []}"#).unwrap();
        assert_eq!(page.prev_skip, None);
        assert_eq!(page.next_skip, None);
        assert!(page.entries.is_empty());
        assert_eq!(page.pagination_info, "");
    }

    #[test]
    fn cursor_zero_is_a_valid_page() {
        // skip 0 is a real cursor (back to the first page), distinct from absent
        let page: TablePage =
            serde_json::from_str(r#"{"title": "Units", "prevSkip": 0, "entries": []}"#).unwrap();
        assert_eq!(page.prev_skip, Some(0));
    }
}
