//! Structural validation of erased JSON input.
//!
//! A [`Validator`] checks a `serde_json::Value` and reports every problem
//! it finds as a path-tagged [`ValidationError`] instead of stopping at the
//! first one. [`ObjectValidator`] and [`ArrayValidator`] recurse through
//! nested structures, building dotted/indexed paths like `user.tags[2]`.

mod result;
mod validators;

pub use result::{ValidationError, ValidationResult};
pub use validators::{
    ArrayValidator, BoolValidator, NumberValidator, ObjectValidator, StringValidator, Validator,
};

/// Append an object key to a validation path.
pub fn build_path(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", base, key)
    }
}

/// Append an array index to a validation path.
pub fn index_path(base: &str, index: usize) -> String {
    format!("{}[{}]", base, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_building() {
        assert_eq!(build_path("", "name"), "name");
        assert_eq!(build_path("user", "name"), "user.name");
        assert_eq!(index_path("tags", 2), "tags[2]");
        assert_eq!(build_path(&index_path("users", 0), "name"), "users[0].name");
    }
}
