use derive_more::{Deref, DerefMut};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

///
/// SettingsStore
///
/// Persisted key-value boundary. Only the shape is required here;
/// file-format and flush mechanics belong to the host. Values at this
/// layer are stored verbatim: range metadata on a settings field bounds
/// its slider display, it does not clamp what gets persisted.
///

pub trait SettingsStore {
    fn get(&self, key: &str, default: &JsonValue) -> JsonValue;

    fn set(&mut self, key: &str, value: JsonValue);

    /// Drop any stored override so `get` falls back to the default.
    fn remove(&mut self, key: &str);
}

///
/// MemorySettings
///

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct MemorySettings(BTreeMap<String, JsonValue>);

impl MemorySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str, default: &JsonValue) -> JsonValue {
        self.0.get(key).cloned().unwrap_or_else(|| default.clone())
    }

    fn set(&mut self, key: &str, value: JsonValue) {
        self.0.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }
}

type ChangeListener = Box<dyn FnMut(&JsonValue)>;

///
/// SettingsHub
///
/// Typed facade over a store plus per-key change listeners. Generated
/// settings accessors go through here; keys are the string concatenation
/// of (namespace, struct, field) fixed at codegen time.
///

pub struct SettingsHub {
    store: Box<dyn SettingsStore>,
    listeners: Vec<(String, ChangeListener)>,
}

impl SettingsHub {
    #[must_use]
    pub fn new(store: Box<dyn SettingsStore>) -> Self {
        Self {
            store,
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemorySettings::new()))
    }

    pub fn get<T>(&self, key: &str, default: &T) -> T
    where
        T: DeserializeOwned + Serialize + Clone,
    {
        let fallback = serde_json::to_value(default).unwrap_or(JsonValue::Null);

        serde_json::from_value(self.store.get(key, &fallback))
            .unwrap_or_else(|_| default.clone())
    }

    /// Store a value verbatim and notify that key's listeners.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        let json = serde_json::to_value(value).unwrap_or(JsonValue::Null);

        self.store.set(key, json.clone());
        self.notify(key, &json);
    }

    /// Remove the stored override and notify with the default.
    pub fn reset<T: Serialize>(&mut self, key: &str, default: &T) {
        self.store.remove(key);

        let json = serde_json::to_value(default).unwrap_or(JsonValue::Null);
        self.notify(key, &json);
    }

    pub fn subscribe(
        &mut self,
        key: impl Into<String>,
        listener: impl FnMut(&JsonValue) + 'static,
    ) {
        self.listeners.push((key.into(), Box::new(listener)));
    }

    fn notify(&mut self, key: &str, value: &JsonValue) {
        for (listened, listener) in &mut self.listeners {
            if listened == key {
                listener(value);
            }
        }
    }
}

impl std::fmt::Debug for SettingsHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsHub")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn get_falls_back_to_default() {
        let hub = SettingsHub::in_memory();

        assert_eq!(hub.get("Demo.Prefs.brush_size", &5_i64), 5);
    }

    #[test]
    fn set_stores_out_of_range_values_verbatim() {
        // range metadata is display-only at this layer
        let mut hub = SettingsHub::in_memory();
        hub.set("Demo.Prefs.brush_size", &15_i64);

        assert_eq!(hub.get("Demo.Prefs.brush_size", &5_i64), 15);
    }

    #[test]
    fn reset_restores_the_default_and_notifies() {
        let mut hub = SettingsHub::in_memory();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        hub.subscribe("k", move |v| sink.borrow_mut().push(v.clone()));
        hub.set("k", &9_i64);
        hub.reset("k", &5_i64);

        assert_eq!(hub.get("k", &5_i64), 5);
        assert_eq!(
            *seen.borrow(),
            vec![JsonValue::from(9_i64), JsonValue::from(5_i64)]
        );
    }

    #[test]
    fn listeners_are_keyed() {
        let mut hub = SettingsHub::in_memory();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);

        hub.subscribe("a", move |_| *sink.borrow_mut() += 1);
        hub.set("b", &1_i64);
        hub.set("a", &1_i64);

        assert_eq!(*count.borrow(), 1);
    }
}
