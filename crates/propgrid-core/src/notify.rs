//! Change notifications for entry accessors
//!
//! Every write-through fans out to the full set of dependent accessors, so
//! observers are keyed by accessor rather than by the setter that ran.
//! Delivery is synchronous: all observers have run before the setter returns.

use std::fmt;

/// Observable accessors of a property entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    /// Display string of the value
    StringValue,
    /// Boolean editor value
    BoolValue,
    /// Enum editor value
    EnumValue,
    /// List picker selection
    SelectedItem,
    /// List picker selection display text
    SelectedItemDisplay,
    /// Cascade first-level selection
    SelectedLevel1,
    /// Cascade second-level selection
    SelectedLevel2,
    /// Cascade third-level selection
    SelectedLevel3,
    /// Cascade second-level options
    Level2Options,
    /// Cascade third-level options
    Level3Options,
    /// Cascade popup visibility
    CascaderOpen,
}

impl Accessor {
    /// Accessors notified after every successful write-through, in order
    pub const WRITE_THROUGH: [Accessor; 5] = [
        Accessor::StringValue,
        Accessor::BoolValue,
        Accessor::EnumValue,
        Accessor::SelectedItem,
        Accessor::SelectedItemDisplay,
    ];

    /// Stable key used by rendering layers
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Accessor::StringValue => "string_value",
            Accessor::BoolValue => "bool_value",
            Accessor::EnumValue => "enum_value",
            Accessor::SelectedItem => "selected_item",
            Accessor::SelectedItemDisplay => "selected_item_display",
            Accessor::SelectedLevel1 => "selected_level1",
            Accessor::SelectedLevel2 => "selected_level2",
            Accessor::SelectedLevel3 => "selected_level3",
            Accessor::Level2Options => "level2_options",
            Accessor::Level3Options => "level3_options",
            Accessor::CascaderOpen => "cascader_open",
        }
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A change to one accessor of one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Property name
    pub property: String,
    /// Accessor whose effective value changed
    pub accessor: Accessor,
}

/// Unique identifier for a registered observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Get the raw ID value
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

type Observer = Box<dyn FnMut(&ChangeEvent)>;

/// Observer list for one entry
pub struct ChangeNotifier {
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl ChangeNotifier {
    /// Create an empty notifier
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 1,
        }
    }

    /// Register an observer and return its ID
    pub fn subscribe(&mut self, observer: impl FnMut(&ChangeEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// Number of registered observers
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check if no observers are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver a change to every observer in registration order
    pub fn notify(&mut self, property: &str, accessor: Accessor) {
        if self.observers.is_empty() {
            return;
        }
        let event = ChangeEvent {
            property: property.to_string(),
            accessor,
        };
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }

    /// Deliver several changes in order
    pub fn notify_all(&mut self, property: &str, accessors: impl IntoIterator<Item = Accessor>) {
        for accessor in accessors {
            self.notify(property, accessor);
        }
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observers", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_and_notify() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();
        let sink = Rc::clone(&seen);
        let id = notifier.subscribe(move |e| sink.borrow_mut().push(e.accessor));
        assert_eq!(id.raw(), 1);

        notifier.notify_all("Count", Accessor::WRITE_THROUGH);
        assert_eq!(*seen.borrow(), Accessor::WRITE_THROUGH.to_vec());
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut notifier = ChangeNotifier::new();
        let sink = Rc::clone(&count);
        let id = notifier.subscribe(move |_| *sink.borrow_mut() += 1);
        let other = notifier.subscribe(|_| {});
        assert_eq!(other.raw(), 2);
        assert_eq!(notifier.len(), 2);

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.notify("Count", Accessor::StringValue);
        assert_eq!(*count.borrow(), 0);
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn test_accessor_names() {
        assert_eq!(Accessor::SelectedItemDisplay.name(), "selected_item_display");
        assert_eq!(Accessor::CascaderOpen.to_string(), "cascader_open");
    }
}
