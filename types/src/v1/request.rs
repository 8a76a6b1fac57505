use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::Id;

/// Represents a JSON-RPC 1.0 request.
///
/// The 1.0 wire shape is exactly the three members `method`, `params` and
/// `id`; an `id` of null signifies a notification. Parsing is liberal about
/// absent `params`/`id` (they default to empty/null) but any additional
/// member is rejected — the exact 3-key shape is a deliberate rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Request {
    /// A String containing the name of the method to be invoked.
    pub method: String,
    /// An Array of objects to pass as arguments to the method.
    #[serde(default)]
    pub params: Vec<Value>,
    /// The request id, null for notifications.
    #[serde(default)]
    pub id: Option<Id>,
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).expect("`Request` is serializable");
        write!(f, "{}", json)
    }
}

impl Request {
    /// Creates a JSON-RPC 1.0 request. `id: None` makes it a notification.
    pub fn new<M: Into<String>>(method: M, params: Vec<Value>, id: Option<Id>) -> Self {
        Self {
            method: method.into(),
            params,
            id,
        }
    }

    /// Whether this request is a notification.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}
