//! Scene-graph components shared across the engine.
//!
//! The mansion is a hecs [`World`](hecs::World) where props form a tree via
//! [`Parent`] links. Interaction metadata lives in [`Interactable`] tags on
//! whichever node of a prop's hierarchy owns the behavior — usually the prop
//! root, while its leaf meshes carry only colliders.

use std::collections::HashMap;

/// Link to the parent node in the scene graph. Root nodes carry no `Parent`.
#[derive(Debug, Clone, Copy)]
pub struct Parent(pub hecs::Entity);

/// Human-readable node name, for logging and debug overlays.
#[derive(Debug, Clone)]
pub struct Named(pub String);

/// One loosely-typed property on an interactable tag.
///
/// Scene authoring treats tag data as a bag of fields; handlers shape-check
/// the fields they need instead of assuming a fixed schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Prop {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Marks a scene node as something the interaction system can dispatch to.
///
/// `kind` selects the registered handler ("door", "key", "safe", …); `props`
/// carries the per-prop state those handlers read and mutate (`locked`,
/// `key`, `code`, …).
#[derive(Debug, Clone, Default)]
pub struct Interactable {
    pub kind: String,
    props: HashMap<String, Prop>,
}

impl Interactable {
    /// Create a tag with the given kind and no properties.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            props: HashMap::new(),
        }
    }

    /// Builder-style property insertion for scene construction.
    pub fn with(mut self, name: impl Into<String>, value: Prop) -> Self {
        self.props.insert(name.into(), value);
        self
    }

    pub fn with_bool(self, name: impl Into<String>, value: bool) -> Self {
        self.with(name, Prop::Bool(value))
    }

    pub fn with_int(self, name: impl Into<String>, value: i64) -> Self {
        self.with(name, Prop::Int(value))
    }

    pub fn with_text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(name, Prop::Text(value.into()))
    }

    /// Read a boolean property. Missing or non-bool fields return `None`.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.props.get(name) {
            Some(Prop::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Read an integer property.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.props.get(name) {
            Some(Prop::Int(i)) => Some(*i),
            _ => None,
        }
    }

    /// Read a text property.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.props.get(name) {
            Some(Prop::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Set or replace a property (handlers flip `locked`, `open`, …).
    pub fn set(&mut self, name: impl Into<String>, value: Prop) {
        self.props.insert(name.into(), value);
    }

    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) {
        self.set(name, Prop::Bool(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Handlers must be able to shape-check: reading a field with the wrong
    /// type behaves like a missing field, not a panic.
    #[test]
    fn prop_type_mismatch_reads_as_missing() {
        let tag = Interactable::new("door")
            .with_bool("locked", true)
            .with_int("uses", 3)
            .with_text("key", "library_key");
        assert_eq!(tag.get_bool("locked"), Some(true));
        assert_eq!(tag.get_int("uses"), Some(3));
        assert_eq!(tag.get_text("key"), Some("library_key"));
        assert_eq!(tag.get_bool("key"), None);
        assert_eq!(tag.get_int("key"), None);
        assert_eq!(tag.get_text("missing"), None);
    }

    /// Mutation replaces the stored value in place.
    #[test]
    fn set_bool_overwrites() {
        let mut tag = Interactable::new("door").with_bool("locked", true);
        tag.set_bool("locked", false);
        assert_eq!(tag.get_bool("locked"), Some(false));
    }
}
