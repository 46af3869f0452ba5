//! Evaluates descriptor batches against a condition registry.

use serde_json::Value;
use tracing::trace;

use crate::descriptor::ConditionDescriptor;
use crate::error::{CheckError, CheckResult};
use crate::registry::ConditionRegistry;

/// Checks descriptor batches against a borrowed, immutable registry.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'r> {
    registry: &'r ConditionRegistry,
}

impl Validator<'static> {
    /// A validator over [`ConditionRegistry::standard`].
    pub fn standard() -> Self {
        Self::new(ConditionRegistry::standard())
    }
}

impl<'r> Validator<'r> {
    pub fn new(registry: &'r ConditionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r ConditionRegistry {
        self.registry
    }

    /// Evaluate every descriptor in order.
    ///
    /// Returns `Ok(false)` as soon as a value has the wrong type or fails a
    /// condition; nothing after it is evaluated. Unknown condition names and
    /// an empty batch are errors, not verdicts.
    pub fn validate(&self, descriptors: &[ConditionDescriptor]) -> CheckResult<bool> {
        if descriptors.is_empty() {
            return Err(CheckError::Empty);
        }

        for descriptor in descriptors {
            if !self.check(descriptor)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Evaluate a loosely-typed request: a JSON array of descriptor objects.
    ///
    /// Descriptors are parsed one at a time, so a malformed descriptor after
    /// a failing one is never looked at.
    pub fn validate_json(&self, request: &Value) -> CheckResult<bool> {
        let descriptors = request
            .as_array()
            .ok_or_else(|| CheckError::NotASequence(json_type_name(request).to_string()))?;

        if descriptors.is_empty() {
            return Err(CheckError::Empty);
        }

        for raw in descriptors {
            let descriptor = ConditionDescriptor::from_json(raw)?;
            if !self.check(&descriptor)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Verdict for a single descriptor.
    pub fn check(&self, descriptor: &ConditionDescriptor) -> CheckResult<bool> {
        if !descriptor.expected_type.matches(&descriptor.value) {
            trace!(
                expected = %descriptor.expected_type,
                value = ?descriptor.value,
                "Type check failed"
            );
            return Ok(false);
        }

        for name in descriptor.condition_names() {
            let predicate = self
                .registry
                .get(name)
                .ok_or_else(|| CheckError::UnknownCondition(name.to_string()))?;

            let passed = predicate(&descriptor.value);
            trace!(condition = name, passed, value = ?descriptor.value, "Evaluated condition");
            if !passed {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

/// Validate against the standard registry.
pub fn validate(descriptors: &[ConditionDescriptor]) -> CheckResult<bool> {
    Validator::standard().validate(descriptors)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
