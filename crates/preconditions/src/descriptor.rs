//! Validation descriptors: a value, its expected type and a condition chain.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{CheckError, CheckResult};

/// The exact key set a loosely-typed descriptor must carry.
pub const DESCRIPTOR_KEYS: [&str; 3] = ["conditions", "expected_type", "value"];

/// A value handed to the validator.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl ArgValue {
    /// The type of this value, `None` for `Null`.
    pub fn arg_type(&self) -> Option<ArgType> {
        match self {
            ArgValue::Str(_) => Some(ArgType::Str),
            ArgValue::Int(_) => Some(ArgType::Int),
            ArgValue::Float(_) => Some(ArgType::Float),
            ArgValue::Bool(_) => Some(ArgType::Bool),
            ArgValue::Null => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret a JSON scalar. Arrays and objects are rejected.
    pub fn from_json(value: &Value) -> CheckResult<Self> {
        match value {
            Value::String(s) => Ok(ArgValue::Str(s.clone())),
            Value::Bool(b) => Ok(ArgValue::Bool(*b)),
            Value::Null => Ok(ArgValue::Null),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(ArgValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(ArgValue::Float(f))
                } else {
                    Err(CheckError::InvalidDescriptor(format!(
                        "number {} is out of range",
                        n
                    )))
                }
            }
            Value::Array(_) | Value::Object(_) => Err(CheckError::InvalidDescriptor(
                "value must be a scalar".to_string(),
            )),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Str(value)
    }
}

/// Paths that are not valid UTF-8 become `Null`, so a `Str` check on them
/// fails instead of testing a lossily converted path that names another file.
impl From<&Path> for ArgValue {
    fn from(value: &Path) -> Self {
        match value.to_str() {
            Some(s) => ArgValue::Str(s.to_string()),
            None => ArgValue::Null,
        }
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

/// Type a descriptor's value is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    Str,
    Int,
    Float,
    Bool,
}

impl ArgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgType::Str => "str",
            ArgType::Int => "int",
            ArgType::Float => "float",
            ArgType::Bool => "bool",
        }
    }

    /// Exact type match; `Null` matches nothing.
    pub fn matches(&self, value: &ArgValue) -> bool {
        value.arg_type() == Some(*self)
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArgType {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "str" | "string" => Ok(ArgType::Str),
            "int" | "integer" => Ok(ArgType::Int),
            "float" => Ok(ArgType::Float),
            "bool" | "boolean" => Ok(ArgType::Bool),
            other => Err(CheckError::InvalidDescriptor(format!(
                "unknown expected_type '{}'",
                other
            ))),
        }
    }
}

/// One validation request: a value, the type it must have, and the
/// conditions it must satisfy, in order.
///
/// `conditions` is either a single condition name or a comma-separated
/// chain such as `"is_file,is_hdf5"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionDescriptor {
    pub value: ArgValue,
    pub expected_type: ArgType,
    pub conditions: String,
}

impl ConditionDescriptor {
    pub fn new(
        value: impl Into<ArgValue>,
        expected_type: ArgType,
        conditions: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            expected_type,
            conditions: conditions.into(),
        }
    }

    /// The descriptor every reader uses to gate its container path.
    pub fn existing_hdf5(path: &Path) -> Self {
        Self::new(
            path,
            ArgType::Str,
            format!("{},{}", crate::IS_FILE, crate::IS_HDF5),
        )
    }

    /// The condition chain split into names, in evaluation order.
    pub fn condition_names(&self) -> Vec<&str> {
        split_conditions(&self.conditions)
    }

    /// Parse a loosely-typed descriptor object.
    ///
    /// The object must carry exactly the keys in [`DESCRIPTOR_KEYS`];
    /// anything else is a [`CheckError::KeyMismatch`].
    pub fn from_json(descriptor: &Value) -> CheckResult<Self> {
        let object = descriptor.as_object().ok_or_else(|| {
            CheckError::InvalidDescriptor(format!("descriptor must be an object, got {}", descriptor))
        })?;

        let found: BTreeSet<&str> = object.keys().map(String::as_str).collect();
        let expected: BTreeSet<&str> = DESCRIPTOR_KEYS.into_iter().collect();
        if found != expected {
            return Err(CheckError::KeyMismatch {
                expected: expected.into_iter().map(String::from).collect(),
                found: found.into_iter().map(String::from).collect(),
            });
        }

        let value = ArgValue::from_json(&object["value"])?;
        let expected_type = object["expected_type"]
            .as_str()
            .ok_or_else(|| CheckError::InvalidDescriptor("expected_type must be a string".to_string()))?
            .parse()?;
        let conditions = object["conditions"]
            .as_str()
            .ok_or_else(|| CheckError::InvalidDescriptor("conditions must be a string".to_string()))?
            .to_string();

        Ok(Self {
            value,
            expected_type,
            conditions,
        })
    }
}

/// Split a condition chain: on commas when one is present, otherwise the
/// whole string is a single name. Names are trimmed.
pub fn split_conditions(chain: &str) -> Vec<&str> {
    if chain.contains(',') {
        chain.split(',').map(str::trim).collect()
    } else {
        vec![chain.trim()]
    }
}
