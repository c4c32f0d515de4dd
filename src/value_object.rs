//! Value objects compared by value, not identity.

use serde::Serialize;
use serde_json::Value;

/// Marker trait for value objects.
///
/// Equality is structural, via `PartialEq` on the fields, and serde
/// provides the canonical value rendering.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Serialize)]
/// struct Money { amount: u64, currency: String }
///
/// impl ValueObject for Money {}
/// ```
pub trait ValueObject: PartialEq + Clone + Serialize {
    /// Render the value object as an erased JSON value.
    fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Canonical string rendering.
    fn render(&self) -> String {
        self.to_value().to_string()
    }
}
