use serde_json::Value;

use super::result::ValidationResult;
use super::{build_path, index_path};

/// A structural check over an erased JSON value.
pub trait Validator: Send + Sync {
    fn validate(&self, input: &Value, path: &str) -> ValidationResult;
}

/// Validates string fields with optional length bounds.
#[derive(Default)]
pub struct StringValidator {
    min_len: Option<usize>,
    max_len: Option<usize>,
}

impl StringValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_len(mut self, min: usize) -> Self {
        self.min_len = Some(min);
        self
    }

    pub fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }
}

impl Validator for StringValidator {
    fn validate(&self, input: &Value, path: &str) -> ValidationResult {
        let Some(s) = input.as_str() else {
            return ValidationResult::fail(path, "expected a string");
        };
        let mut result = ValidationResult::ok();
        if let Some(min) = self.min_len {
            if s.chars().count() < min {
                result.merge(ValidationResult::fail(
                    path,
                    format!("expected at least {} characters", min),
                ));
            }
        }
        if let Some(max) = self.max_len {
            if s.chars().count() > max {
                result.merge(ValidationResult::fail(
                    path,
                    format!("expected at most {} characters", max),
                ));
            }
        }
        result
    }
}

/// Validates numeric fields with optional range bounds.
#[derive(Default)]
pub struct NumberValidator {
    min: Option<f64>,
    max: Option<f64>,
}

impl NumberValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

impl Validator for NumberValidator {
    fn validate(&self, input: &Value, path: &str) -> ValidationResult {
        let Some(n) = input.as_f64() else {
            return ValidationResult::fail(path, "expected a number");
        };
        let mut result = ValidationResult::ok();
        if let Some(min) = self.min {
            if n < min {
                result.merge(ValidationResult::fail(
                    path,
                    format!("expected a number >= {}", min),
                ));
            }
        }
        if let Some(max) = self.max {
            if n > max {
                result.merge(ValidationResult::fail(
                    path,
                    format!("expected a number <= {}", max),
                ));
            }
        }
        result
    }
}

/// Validates boolean fields.
#[derive(Default)]
pub struct BoolValidator;

impl BoolValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for BoolValidator {
    fn validate(&self, input: &Value, path: &str) -> ValidationResult {
        if input.is_boolean() {
            ValidationResult::ok()
        } else {
            ValidationResult::fail(path, "expected a boolean")
        }
    }
}

/// Validates an object field-by-field against per-key rules.
///
/// Rules run in registration order. Missing keys are skipped unless marked
/// required; present keys are validated with a dotted path appended.
#[derive(Default)]
pub struct ObjectValidator {
    rules: Vec<Rule>,
}

struct Rule {
    key: String,
    required: bool,
    validator: Box<dyn Validator>,
}

impl ObjectValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `key` with `validator` when the key is present.
    pub fn field(mut self, key: impl Into<String>, validator: impl Validator + 'static) -> Self {
        self.rules.push(Rule {
            key: key.into(),
            required: false,
            validator: Box::new(validator),
        });
        self
    }

    /// Validate `key` with `validator`; a missing key is an error.
    pub fn required_field(
        mut self,
        key: impl Into<String>,
        validator: impl Validator + 'static,
    ) -> Self {
        self.rules.push(Rule {
            key: key.into(),
            required: true,
            validator: Box::new(validator),
        });
        self
    }
}

impl Validator for ObjectValidator {
    fn validate(&self, input: &Value, path: &str) -> ValidationResult {
        let Some(object) = input.as_object() else {
            return ValidationResult::fail(path, "expected an object");
        };

        let mut result = ValidationResult::ok();
        for rule in &self.rules {
            let field_path = build_path(path, &rule.key);
            match object.get(&rule.key) {
                Some(value) => result.merge(rule.validator.validate(value, &field_path)),
                None if rule.required => {
                    result.merge(ValidationResult::fail(field_path, "required field missing"));
                }
                None => {}
            }
        }
        result
    }
}

/// Applies one element validator to every item of an array.
pub struct ArrayValidator {
    element: Box<dyn Validator>,
}

impl ArrayValidator {
    pub fn new(element: impl Validator + 'static) -> Self {
        Self {
            element: Box::new(element),
        }
    }
}

impl Validator for ArrayValidator {
    fn validate(&self, input: &Value, path: &str) -> ValidationResult {
        let Some(items) = input.as_array() else {
            return ValidationResult::fail(path, "expected an array");
        };

        let mut result = ValidationResult::ok();
        for (index, item) in items.iter().enumerate() {
            result.merge(self.element.validate(item, &index_path(path, index)));
        }
        result
    }
}
