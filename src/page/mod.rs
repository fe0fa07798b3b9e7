pub mod document;
pub mod element;

// std
use std::time::Duration;
// crates
use rand::Rng;
// internal
use crate::controller::{Controller, LEVEL_CLASS};
use crate::error::{InteractionError, SetupError};
use crate::outcome::Outcome;
use crate::settings::ControllerSettings;
pub use document::Document;
pub use element::{Element, ElementHandle, PointerEvents, SharedState};

/// A loaded omikuji page: the document, the controller bound to it and the
/// keyboard focus. Everything runs on the caller's thread.
pub struct Page<R> {
    document: Document,
    controller: Controller<ElementHandle, R>,
    focus: Option<usize>,
}

impl<R: Rng> Page<R> {
    pub fn load(settings: ControllerSettings, rng: R) -> Result<Self, SetupError> {
        let document = Document::omikuji();
        let controller = Controller::initialize(&document, settings, rng)?;
        Ok(Self {
            document,
            controller,
            focus: None,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn controller(&self) -> &Controller<ElementHandle, R> {
        &self.controller
    }

    pub fn locator(&self, selector: &str) -> Result<ElementHandle, InteractionError> {
        self.document
            .query(selector)
            .ok_or_else(|| InteractionError::NotFound(selector.to_owned()))
    }

    pub fn is_visible(&self, selector: &str) -> bool {
        self.document
            .position(selector)
            .is_some_and(|index| self.document.is_visible(index))
    }

    /// Clicks like a pointer would: hidden elements and elements with
    /// `pointer-events: none` are rejected.
    pub fn click(&mut self, selector: &str) -> Result<(), InteractionError> {
        let index = self.find(selector)?;
        let interactive = self
            .document
            .get(index)
            .is_some_and(|element| element.read().pointer_events() == PointerEvents::Auto);
        if !interactive || !self.document.is_visible(index) {
            return Err(InteractionError::NotActionable(selector.to_owned()));
        }
        self.dispatch_click(index);
        Ok(())
    }

    /// Dispatches the click without any actionability checks.
    pub fn force_click(&mut self, selector: &str) -> Result<(), InteractionError> {
        let index = self.find(selector)?;
        self.dispatch_click(index);
        Ok(())
    }

    /// Moves focus to the next visible focusable element, wrapping around.
    pub fn press_tab(&mut self) -> Option<ElementHandle> {
        let len = self.document.len();
        let start = self.focus.map_or(0, |index| index + 1);
        self.focus = (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&index| self.document.is_focusable(index));
        self.focused()
    }

    pub fn focused(&self) -> Option<ElementHandle> {
        self.focus
            .and_then(|index| self.document.get(index))
            .cloned()
    }

    /// Activates the focused element. Keyboard activation ignores
    /// `pointer-events`, so only visibility is checked.
    pub fn press_enter(&mut self) -> Result<(), InteractionError> {
        let index = self.focus.ok_or(InteractionError::NoFocus)?;
        if !self.document.is_visible(index) {
            self.focus = None;
            return Err(InteractionError::NoFocus);
        }
        self.dispatch_click(index);
        Ok(())
    }

    /// Lets `elapsed` pass. Returns the outcome if a draw completed.
    pub fn wait(&mut self, elapsed: Duration) -> Option<&'static Outcome> {
        self.controller.step(elapsed)
    }

    /// Plain-text view of the visible page.
    pub fn render(&self) -> String {
        let mut out = format!("== {} ==\n", self.document.title());
        for (index, element) in self.document.iter().enumerate() {
            if !self.document.is_visible(index) {
                continue;
            }
            let element = element.read();
            if element.text().is_empty() {
                continue;
            }
            let focused = if self.focus == Some(index) { " <" } else { "" };
            let line = match element.tag() {
                "button" => format!("[ {} ]{focused}", element.text()),
                _ if element.has_class(LEVEL_CLASS) => {
                    format!("  {}  ({})", element.text(), element.class_name())
                }
                _ => element.text().to_owned(),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    fn find(&self, selector: &str) -> Result<usize, InteractionError> {
        self.document
            .position(selector)
            .ok_or_else(|| InteractionError::NotFound(selector.to_owned()))
    }

    fn dispatch_click(&mut self, index: usize) {
        let action = self
            .document
            .get(index)
            .and_then(|element| element.read().on_click());
        if let Some(action) = action {
            tracing::trace!(?action, "click");
            self.controller.dispatch(action);
        }
    }
}
