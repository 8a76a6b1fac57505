use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{from_value, Map, Value};

use crate::error::Fault;

/// Represents JSON-RPC request parameters.
///
/// If present, parameters for the rpc call MUST be provided as a Structured
/// value: either by-position through an Array or by-name through an Object.
/// Being an enum, the two styles are mutually exclusive by construction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Params {
    /// Array of values (positional arguments)
    Array(Vec<Value>),
    /// Map of values (named arguments)
    Map(Map<String, Value>),
}

impl Default for Params {
    fn default() -> Self {
        Params::Array(vec![])
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).expect("`Params` is serializable");
        write!(f, "{}", json)
    }
}

impl Params {
    /// Parses incoming `Params` into the expected types.
    pub fn parse<D>(self) -> Result<D, Fault>
    where
        D: DeserializeOwned,
    {
        let value: Value = self.into();
        from_value(value).map_err(Fault::invalid_params)
    }

    /// Checks whether the parameters are an empty array or map.
    pub fn is_empty(&self) -> bool {
        match self {
            Params::Array(array) => array.is_empty(),
            Params::Map(map) => map.is_empty(),
        }
    }

    /// Checks whether the parameters are positional.
    pub fn is_array(&self) -> bool {
        matches!(self, Params::Array(_))
    }

    /// Checks whether the parameters are named.
    pub fn is_map(&self) -> bool {
        matches!(self, Params::Map(_))
    }
}

impl From<Params> for Value {
    fn from(params: Params) -> Value {
        match params {
            Params::Array(array) => Value::Array(array),
            Params::Map(object) => Value::Object(object),
        }
    }
}

impl From<Vec<Value>> for Params {
    fn from(array: Vec<Value>) -> Params {
        Params::Array(array)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(object: Map<String, Value>) -> Params {
        Params::Map(object)
    }
}
