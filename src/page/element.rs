// std
use std::sync::Arc;
// crates
use parking_lot::RwLock;
use serde::Serialize;
// internal
use crate::controller::surface::Surface;
use crate::controller::Action;

pub const HIDDEN_CLASS: &str = "hidden";

pub type SharedState<S> = Arc<RwLock<S>>;

pub type ElementHandle = SharedState<Element>;

/// Inline `pointer-events` style.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEvents {
    #[default]
    Auto,
    None,
}

impl PointerEvents {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: &'static str,
    id: Option<String>,
    classes: Vec<String>,
    text: String,
    pointer_events: PointerEvents,
    on_click: Option<Action>,
    parent: Option<usize>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_owned();
        self
    }

    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes = class_name.split_whitespace().map(str::to_owned).collect();
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Hidden by its own class list. Ancestors are the document's concern.
    pub fn is_hidden(&self) -> bool {
        self.has_class(HIDDEN_CLASS)
    }

    pub fn pointer_events(&self) -> PointerEvents {
        self.pointer_events
    }

    pub fn set_pointer_events(&mut self, pointer_events: PointerEvents) {
        self.pointer_events = pointer_events;
    }

    pub fn on_click(&self) -> Option<Action> {
        self.on_click
    }

    pub fn set_on_click(&mut self, action: Option<Action>) {
        self.on_click = action;
    }

    pub fn is_focusable(&self) -> bool {
        self.tag == "button"
    }

    /// Matches a single compound selector: `tag`, `#id` or `.class`.
    pub fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            self.id() == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.has_class(class)
        } else {
            self.tag == selector
        }
    }
}

impl Surface for ElementHandle {
    fn set_text(&self, text: &str) {
        self.write().set_text(text);
    }

    fn set_hidden(&self, hidden: bool) {
        let mut element = self.write();
        if hidden {
            element.add_class(HIDDEN_CLASS);
        } else {
            element.remove_class(HIDDEN_CLASS);
        }
    }

    fn set_interactive(&self, interactive: bool) {
        self.write().set_pointer_events(if interactive {
            PointerEvents::Auto
        } else {
            PointerEvents::None
        });
    }

    fn set_class_name(&self, class_name: &str) {
        self.write().set_class_name(class_name);
    }
}
