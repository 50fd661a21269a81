//! Conversion of declarative `validator` results into field violations.

use std::borrow::Cow;

use common::ValidationError;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Custom constraint: the string contains a non-whitespace character.
pub fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("not_blank")
            .with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

/// Custom constraint: the integer fits the `u32` quantity carried by an order item.
pub fn fits_u32(value: i64) -> Result<(), validator::ValidationError> {
    if value > i64::from(u32::MAX) {
        return Err(validator::ValidationError::new("fits_u32")
            .with_message(Cow::Owned(format!("must not exceed {}", u32::MAX))));
    }
    Ok(())
}

/// Flattens nested validation errors into `(field-path, message)` pairs.
///
/// Paths use camelCase segments and `[index]` for list elements, e.g.
/// `items[0].productId`. The result is sorted by path so responses are
/// deterministic.
pub fn violations(errors: &ValidationErrors) -> Vec<ValidationError> {
    let mut out = Vec::new();
    collect("", errors, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    out
}

fn collect(prefix: &str, errors: &ValidationErrors, out: &mut Vec<ValidationError>) {
    for (field, kind) in errors.errors() {
        let name = camel_case(field);
        let path = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}.{name}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for e in field_errors {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    out.push(ValidationError::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(&path, nested, out),
            ValidationErrorsKind::List(entries) => {
                for (index, nested) in entries {
                    collect(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
