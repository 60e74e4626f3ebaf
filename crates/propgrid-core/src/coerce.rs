//! String/value coercion bridge
//!
//! Converts between the text a user edits and a property's native value.
//! Formatting never fails. Parsing returns a [`CoercionError`] that callers
//! are expected to discard, keeping the previous value in place.

use crate::collate::eq_ignore_case;
use crate::config::LocaleConfig;
use crate::error::CoercionError;
use crate::value::{Value, ValueType};

/// Bridge between display text and typed values for one locale
#[derive(Debug, Clone, Default)]
pub struct Coercer {
    locale: LocaleConfig,
}

impl Coercer {
    /// Create a bridge for the given locale conventions
    #[must_use]
    pub fn new(locale: LocaleConfig) -> Self {
        Self { locale }
    }

    /// Locale conventions in use
    #[must_use]
    pub fn locale(&self) -> &LocaleConfig {
        &self.locale
    }

    /// Render a value as display text
    #[must_use]
    pub fn to_display_string(&self, value: &Value) -> String {
        match value {
            Value::Float(n) => self.format_float(*n),
            Value::List(items) => items
                .iter()
                .map(|v| self.to_display_string(v))
                .collect::<Vec<_>>()
                .join(&self.locale.list_separator),
            other => other.to_string(),
        }
    }

    /// Parse display text into a value of the target type
    pub fn from_display_string(&self, text: &str, target: &ValueType) -> Result<Value, CoercionError> {
        if *target == ValueType::String {
            return Ok(Value::string(text));
        }
        if text.trim().is_empty() {
            return Ok(if target.is_value_type() {
                target.default_value()
            } else {
                Value::Null
            });
        }
        self.convert(text.trim(), target)
    }

    fn convert(&self, text: &str, target: &ValueType) -> Result<Value, CoercionError> {
        match target {
            ValueType::String => Ok(Value::string(text)),
            ValueType::Bool => {
                if eq_ignore_case(text, "true") {
                    Ok(Value::Bool(true))
                } else if eq_ignore_case(text, "false") {
                    Ok(Value::Bool(false))
                } else {
                    Err(invalid(text, target, "expected true or false"))
                }
            }
            ValueType::Int => text
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| invalid(text, target, &e.to_string())),
            ValueType::Float => self.parse_float(text).ok_or_else(|| invalid(text, target, "not a number")),
            ValueType::Enum(ty) => ty
                .values()
                .into_iter()
                .find(|v| eq_ignore_case(v.name(), text))
                .or_else(|| text.parse::<usize>().ok().and_then(|i| ty.value_at(i)))
                .map(Value::Enum)
                .ok_or_else(|| invalid(text, target, "no such variant")),
            ValueType::Nullable(inner) => self.convert(text, inner),
            ValueType::Object(_) | ValueType::Node | ValueType::List => Err(CoercionError::Unsupported {
                target: target.friendly_name(),
            }),
        }
    }

    /// Shortest round-trip digits; magnitudes of 1e21 and up or below 1e-7
    /// switch to exponent form
    fn format_float(&self, n: f64) -> String {
        let magnitude = n.abs();
        let text = if n.is_finite() && magnitude != 0.0 && !(1e-7..1e21).contains(&magnitude) {
            format!("{n:e}")
        } else {
            n.to_string()
        };
        if self.locale.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &self.locale.decimal_separator.to_string())
        }
    }

    fn parse_float(&self, text: &str) -> Option<Value> {
        let sep = self.locale.decimal_separator;
        let normalized = if sep == '.' {
            text.to_string()
        } else if text.contains('.') {
            return None;
        } else {
            text.replace(sep, ".")
        };
        normalized.parse::<f64>().ok().map(Value::Float)
    }
}

fn invalid(text: &str, target: &ValueType, reason: &str) -> CoercionError {
    CoercionError::Invalid {
        text: text.to_string(),
        target: target.friendly_name(),
        reason: reason.to_string(),
    }
}
