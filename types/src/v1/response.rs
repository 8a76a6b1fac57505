use std::fmt;

use serde::{de, Deserialize, Serialize};
use serde_json::Value;

use crate::id::Id;

/// Represents a JSON-RPC 1.0 response.
///
/// All three members are always present on the wire; exactly one of
/// `result`/`error` is non-null on a valid response to a call (both may be
/// null for a successful call that returned nothing). Since 1.0 never
/// defined an error object, `error` is kept as a raw JSON value and
/// interpreted by the codec (the conventional shape is the 2.0 error
/// object).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Response {
    /// Successful execution result, null on failure.
    pub result: Option<Value>,
    /// Failed execution error, null on success.
    pub error: Option<Value>,
    /// Correlation id, the same value as the request's `id` member. Null
    /// when the originating id could not be recovered.
    pub id: Option<Id>,
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).expect("`Response` is serializable");
        write!(f, "{}", json)
    }
}

impl Response {
    /// Creates a JSON-RPC 1.0 success response.
    pub fn success(result: Value, id: Id) -> Self {
        Self {
            result: Some(result),
            error: None,
            id: Some(id),
        }
    }

    /// Creates a JSON-RPC 1.0 failure response.
    pub fn failure(error: Value, id: Option<Id>) -> Self {
        Self {
            result: None,
            error: Some(error),
            id,
        }
    }
}

// Deserialization is hand-rolled to get the 1.0 validation rules exact:
// `id` must be present (even if null), `result`/`error` default to null
// when absent, both non-null at once is invalid, and any member outside
// the 3-key shape is rejected.
impl<'de> de::Deserialize<'de> for Response {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        const FIELDS: &[&str] = &["result", "error", "id"];

        #[derive(Deserialize)]
        #[serde(field_identifier, rename_all = "lowercase")]
        enum Field {
            Result,
            Error,
            Id,
        }

        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = Response;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("struct Response")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut result = Option::<Option<Value>>::None;
                let mut error = Option::<Option<Value>>::None;
                let mut id = Option::<Option<Id>>::None;

                while let Some(key) = de::MapAccess::next_key::<Field>(&mut map)? {
                    match key {
                        Field::Result => {
                            if result.is_some() {
                                return Err(de::Error::duplicate_field("result"));
                            }
                            result = Some(de::MapAccess::next_value::<Option<Value>>(&mut map)?)
                        }
                        Field::Error => {
                            if error.is_some() {
                                return Err(de::Error::duplicate_field("error"));
                            }
                            error = Some(de::MapAccess::next_value::<Option<Value>>(&mut map)?)
                        }
                        Field::Id => {
                            if id.is_some() {
                                return Err(de::Error::duplicate_field("id"));
                            }
                            id = Some(de::MapAccess::next_value::<Option<Id>>(&mut map)?)
                        }
                    }
                }

                let result = result.unwrap_or(None).filter(|value| !value.is_null());
                let error = error.unwrap_or(None).filter(|value| !value.is_null());
                let id = id.ok_or_else(|| de::Error::missing_field("id"))?;
                if result.is_some() && error.is_some() {
                    return Err(de::Error::custom(
                        r#"Invalid JSON-RPC 1.0 response, one of "result" or "error" must be null"#,
                    ));
                }
                Ok(Response { result, error, id })
            }
        }

        de::Deserializer::deserialize_struct(deserializer, "Response", FIELDS, Visitor)
    }
}
