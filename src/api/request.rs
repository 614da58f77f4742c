//! Endpoint URL and query-string construction.
//!
//! The backend exposes two read-only endpoints: the lookup table search/page
//! endpoint and the smart values endpoint. Both take their parameters as
//! query strings; all values are percent-encoded here so callers can pass
//! raw user input.

/// Path of the lookup table search endpoint, relative to the base URL.
const LOOKUP_TABLE_PATH: &str = "/system/lookuptable/info";

/// Path of the smart values endpoint, relative to the base URL.
const SMART_VALUES_PATH: &str = "/tycho/smartValues";

/// Parameters of one lookup table search/page request.
///
/// `skip` is always a cursor previously supplied by the server (or 0 for the
/// first page); the controller never synthesizes cursor values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest<'a> {
    /// Name of the table being browsed.
    pub table_name: &'a str,

    /// Current query text, possibly empty.
    pub query: &'a str,

    /// Pagination cursor echoed from the last response, 0 initially.
    pub skip: u64,

    /// Opaque label format hint forwarded to the server.
    pub label_format: Option<&'a str>,
}

/// Builds the search endpoint URL for one request.
///
/// The table name becomes a path segment, everything else a query parameter.
/// `labelFormat` is omitted entirely when no format was supplied.
///
/// # Examples
///
/// ```
/// use zlookup::api::{search_url, SearchRequest};
///
/// let url = search_url("http://localhost:9000", &SearchRequest {
///     table_name: "countries",
///     query: "ger",
///     skip: 0,
///     label_format: None,
/// });
/// assert_eq!(url, "http://localhost:9000/system/lookuptable/info/countries?query=ger&skip=0");
/// ```
#[must_use]
pub fn search_url(base_url: &str, request: &SearchRequest<'_>) -> String {
    let mut url = format!(
        "{}{}/{}?query={}&skip={}",
        base_url.trim_end_matches('/'),
        LOOKUP_TABLE_PATH,
        urlencoding::encode(request.table_name),
        urlencoding::encode(request.query),
        request.skip,
    );

    if let Some(label_format) = request.label_format {
        url.push_str("&labelFormat=");
        url.push_str(&urlencoding::encode(label_format));
    }

    url
}

/// Builds the smart values endpoint URL.
///
/// The signature authenticates the `(type, payload)` pair server-side and is
/// echoed verbatim, never inspected.
#[must_use]
pub fn smart_values_url(
    base_url: &str,
    value_type: &str,
    payload: &str,
    signature: &str,
) -> String {
    format!(
        "{}{}?type={}&payload={}&securityHash={}",
        base_url.trim_end_matches('/'),
        SMART_VALUES_PATH,
        urlencoding::encode(value_type),
        urlencoding::encode(payload),
        urlencoding::encode(signature),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_without_label_format() {
        let url = search_url(
            "http://localhost:9000",
            &SearchRequest {
                table_name: "countries",
                query: "",
                skip: 0,
                label_format: None,
            },
        );
        assert_eq!(
            url,
            "http://localhost:9000/system/lookuptable/info/countries?query=&skip=0"
        );
    }

    #[test]
    fn search_url_encodes_query_and_table() {
        let url = search_url(
            "http://localhost:9000/",
            &SearchRequest {
                table_name: "unit types",
                query: "kg & lbs",
                skip: 50,
                label_format: Some("{code}: {name}"),
            },
        );
        assert_eq!(
            url,
            "http://localhost:9000/system/lookuptable/info/unit%20types\
             ?query=kg%20%26%20lbs&skip=50&labelFormat=%7Bcode%7D%3A%20%7Bname%7D"
        );
    }

    #[test]
    fn smart_values_url_encodes_all_parameters() {
        let url = smart_values_url("http://localhost:9000", "order", "id=42", "a+b/c");
        assert_eq!(
            url,
            "http://localhost:9000/tycho/smartValues?type=order&payload=id%3D42&securityHash=a%2Bb%2Fc"
        );
    }
}
