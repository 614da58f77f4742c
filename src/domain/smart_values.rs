//! Smart value wire types.
//!
//! Smart values are contextual actions attached to an on-screen element,
//! fetched lazily when the tooltip overlay opens. The fetch is authenticated
//! by a server-issued signature that the client echoes back without
//! interpreting, the same way pagination cursors are echoed.

use serde::{Deserialize, Serialize};

/// The set of smart values returned for one element.
///
/// An empty `values` list means the element has no actions; the overlay
/// dismisses itself instead of rendering an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartValueSet {
    /// Contextual actions in server order.
    #[serde(default)]
    pub values: Vec<SmartValue>,
}

/// One contextual action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartValue {
    /// Target the action navigates to when activated.
    pub action: String,

    /// Optional icon hint for rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Display label.
    pub label: String,

    /// Optional text offered for copying alongside the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_payload: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_value_set() {
        let body = r#"{
            "values": [
                {"action": "/order/1234", "icon": "fa-box", "label": "Open order",
                 "copyPayload": "1234"},
                {"action": "/customer/77", "label": "Open customer"}
            ]
        }"#;

        let set: SmartValueSet = serde_json::from_str(body).unwrap();
        assert_eq!(set.values.len(), 2);
        assert_eq!(set.values[0].copy_payload.as_deref(), Some("1234"));
        assert!(set.values[1].icon.is_none());
        assert!(set.values[1].copy_payload.is_none());
    }

    #[test]
    fn empty_set_decodes() {
        let set: SmartValueSet = serde_json::from_str(r#"{"values": []}"#).unwrap();
        assert!(set.values.is_empty());
    }
}
