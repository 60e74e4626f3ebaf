//! List picker candidate resolution
//!
//! A picker holds a snapshot of candidate values and at most one selected
//! candidate. An externally supplied value is matched to a candidate by
//! reference identity first, then value equality, then equal display text.

use crate::coerce::Coercer;
use crate::value::{Value, ValueType};

/// Candidate list with a single selection slot
#[derive(Debug, Clone, Default)]
pub struct ListPicker {
    candidates: Vec<Value>,
    selected: Option<usize>,
}

impl ListPicker {
    /// Create a picker with nothing selected
    #[must_use]
    pub fn new(candidates: Vec<Value>) -> Self {
        Self {
            candidates,
            selected: None,
        }
    }

    /// Create a picker pre-selecting the candidate that matches `current`
    #[must_use]
    pub fn with_current(candidates: Vec<Value>, current: &Value, coercer: &Coercer) -> Self {
        let selected = if current.is_null() {
            None
        } else {
            Self::resolve(&candidates, current, coercer)
        };
        Self { candidates, selected }
    }

    /// Find the candidate matching a value.
    ///
    /// Identity beats equality, which beats equal display text; within each
    /// tier the first candidate wins.
    #[must_use]
    pub fn resolve(candidates: &[Value], value: &Value, coercer: &Coercer) -> Option<usize> {
        candidates
            .iter()
            .position(|c| c.same_ref(value))
            .or_else(|| candidates.iter().position(|c| c == value))
            .or_else(|| {
                let text = coercer.to_display_string(value);
                candidates.iter().position(|c| coercer.to_display_string(c) == text)
            })
    }

    /// Candidate values in source order
    #[must_use]
    pub fn candidates(&self) -> &[Value] {
        &self.candidates
    }

    /// Index of the selected candidate
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected candidate
    #[must_use]
    pub fn selected(&self) -> Option<&Value> {
        self.selected.and_then(|i| self.candidates.get(i))
    }

    /// Display text of the selected candidate
    #[must_use]
    pub fn selected_display(&self, coercer: &Coercer) -> Option<String> {
        self.selected().map(|v| coercer.to_display_string(v))
    }

    /// Select by index; out-of-range indices are ignored.
    ///
    /// Returns whether the selection changed.
    pub fn select_index(&mut self, index: Option<usize>) -> bool {
        if index.is_some_and(|i| i >= self.candidates.len()) || index == self.selected {
            return false;
        }
        self.selected = index;
        true
    }

    /// Value to store in a property of type `target` for a candidate.
    ///
    /// Assignable candidates are stored as-is. Otherwise the candidate's
    /// display text is used for string targets and coerced for others; a
    /// failed coercion yields the target's cleared value.
    #[must_use]
    pub fn value_for(candidate: Option<&Value>, target: &ValueType, coercer: &Coercer) -> Value {
        let Some(candidate) = candidate else {
            return target.default_value();
        };
        if target.accepts(candidate) {
            return candidate.clone();
        }
        let text = coercer.to_display_string(candidate);
        if *target == ValueType::String {
            return Value::string(text);
        }
        coercer.from_display_string(&text, target).unwrap_or_else(|err| {
            tracing::trace!(%err, "list picker candidate not convertible, clearing");
            target.default_value()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ObjectValue;

    fn server(label: &str) -> Value {
        Value::object(ObjectValue::new("Server", label).with_field("region", Value::string("eu")))
    }

    #[test]
    fn test_identity_beats_equality() {
        let current = server("eu-1");
        let equal_copy = server("eu-1");
        let candidates = vec![equal_copy, current.clone()];
        let picker = ListPicker::with_current(candidates, &current, &Coercer::default());
        assert_eq!(picker.selected_index(), Some(1));
        assert!(picker.selected().unwrap().same_ref(&current));
    }

    #[test]
    fn test_equality_beats_display_text() {
        let candidates = vec![Value::string("7"), Value::Int(7)];
        let idx = ListPicker::resolve(&candidates, &Value::Int(7), &Coercer::default());
        assert_eq!(idx, Some(1));
    }

    #[test]
    fn test_display_text_fallback() {
        let candidates = vec![Value::string("alpha"), Value::string("7")];
        let idx = ListPicker::resolve(&candidates, &Value::Int(7), &Coercer::default());
        assert_eq!(idx, Some(1));
    }

    #[test]
    fn test_display_match_is_case_sensitive() {
        let candidates = vec![Value::string("Alpha")];
        assert_eq!(ListPicker::resolve(&candidates, &Value::string("alpha"), &Coercer::default()), None);
    }

    #[test]
    fn test_null_current_selects_nothing() {
        let picker = ListPicker::with_current(vec![Value::string("")], &Value::Null, &Coercer::default());
        assert_eq!(picker.selected_index(), None);
    }

    #[test]
    fn test_select_index_bounds() {
        let mut picker = ListPicker::new(vec![Value::Int(1), Value::Int(2)]);
        assert!(picker.select_index(Some(1)));
        assert!(!picker.select_index(Some(1)));
        assert!(!picker.select_index(Some(5)));
        assert_eq!(picker.selected(), Some(&Value::Int(2)));
        assert!(picker.select_index(None));
        assert_eq!(picker.selected_display(&Coercer::default()), None);
    }

    #[test]
    fn test_value_for_conversions() {
        let c = Coercer::default();
        let as_is = ListPicker::value_for(Some(&Value::Int(3)), &ValueType::Int, &c);
        assert_eq!(as_is, Value::Int(3));

        let to_string = ListPicker::value_for(Some(&server("eu-1")), &ValueType::String, &c);
        assert_eq!(to_string, Value::string("eu-1"));

        let coerced = ListPicker::value_for(Some(&Value::string("12")), &ValueType::Int, &c);
        assert_eq!(coerced, Value::Int(12));

        let cleared = ListPicker::value_for(Some(&Value::string("twelve")), &ValueType::Int, &c);
        assert_eq!(cleared, Value::Int(0));

        let none = ListPicker::value_for(None, &ValueType::nullable(ValueType::Int), &c);
        assert_eq!(none, Value::Null);
    }
}
