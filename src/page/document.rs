// std
use std::sync::Arc;
// crates
use parking_lot::RwLock;
// internal
use super::element::{Element, ElementHandle, HIDDEN_CLASS};
use crate::controller::{DRAW_LABEL, LEVEL_CLASS};

pub const PAGE_TITLE: &str = "おみくじアプリ";
pub const HEADING: &str = "🎋 おみくじ 🎋";
pub const FOOTER_TEXT: &str = "今日の運勢を占ってみましょう！";
pub const RESET_LABEL: &str = "もう一度引く";

/// Flat, ordered element tree. Parents are referenced by index and always
/// precede their children.
#[derive(Debug, Default)]
pub struct Document {
    title: String,
    elements: Vec<ElementHandle>,
}

impl Document {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            elements: Vec::new(),
        }
    }

    /// The page the controller ships with.
    pub fn omikuji() -> Self {
        let mut document = Self::new(PAGE_TITLE);
        let container = document.append(Element::new("div").with_class("container"));
        document.append(Element::new("h1").with_text(HEADING).with_parent(container));
        document.append(
            Element::new("button")
                .with_id("drawButton")
                .with_class("draw-button")
                .with_text(DRAW_LABEL)
                .with_parent(container),
        );
        let result = document.append(
            Element::new("div")
                .with_id("result")
                .with_class("result")
                .with_class(HIDDEN_CLASS)
                .with_parent(container),
        );
        document.append(
            Element::new("div")
                .with_class(LEVEL_CLASS)
                .with_parent(result),
        );
        document.append(
            Element::new("div")
                .with_class("fortune-message")
                .with_parent(result),
        );
        document.append(
            Element::new("button")
                .with_id("resetButton")
                .with_class("reset-button")
                .with_class(HIDDEN_CLASS)
                .with_text(RESET_LABEL)
                .with_parent(container),
        );
        let footer = document.append(Element::new("footer").with_parent(container));
        document.append(Element::new("p").with_text(FOOTER_TEXT).with_parent(footer));
        document
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn append(&mut self, element: Element) -> usize {
        self.elements.push(Arc::new(RwLock::new(element)));
        self.elements.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&ElementHandle> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementHandle> {
        self.elements.iter()
    }

    pub fn query(&self, selector: &str) -> Option<ElementHandle> {
        self.position(selector)
            .map(|index| Arc::clone(&self.elements[index]))
    }

    /// First element in document order matching `selector`. Supports
    /// descendant selectors made of `tag`, `#id` and `.class` parts.
    pub fn position(&self, selector: &str) -> Option<usize> {
        let parts: Vec<&str> = selector.split_whitespace().collect();
        if parts.is_empty() {
            return None;
        }
        (0..self.elements.len()).find(|&index| self.matches(index, &parts))
    }

    fn matches(&self, index: usize, parts: &[&str]) -> bool {
        let Some((last, ancestors)) = parts.split_last() else {
            return true;
        };
        let element = self.elements[index].read();
        if !element.matches(last) {
            return false;
        }
        let mut remaining = ancestors;
        let mut current = element.parent();
        drop(element);
        while let Some((wanted, rest)) = remaining.split_last() {
            let Some(parent) = current else {
                return false;
            };
            let parent = self.elements[parent].read();
            if parent.matches(wanted) {
                remaining = rest;
            }
            current = parent.parent();
        }
        true
    }

    /// Visible when neither the element nor any ancestor is hidden.
    pub fn is_visible(&self, index: usize) -> bool {
        let mut current = Some(index);
        while let Some(index) = current {
            let Some(element) = self.elements.get(index) else {
                return false;
            };
            let element = element.read();
            if element.is_hidden() {
                return false;
            }
            current = element.parent();
        }
        true
    }

    pub fn is_focusable(&self, index: usize) -> bool {
        self.elements
            .get(index)
            .is_some_and(|element| element.read().is_focusable())
            && self.is_visible(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omikuji_page_initial_state() {
        let document = Document::omikuji();
        assert_eq!(document.title(), PAGE_TITLE);
        assert_eq!(document.query("h1").unwrap().read().text(), HEADING);
        assert_eq!(document.query("footer p").unwrap().read().text(), FOOTER_TEXT);

        let draw = document.position("#drawButton").unwrap();
        assert!(document.is_visible(draw));
        assert!(document.is_focusable(draw));
        assert_eq!(document.get(draw).unwrap().read().text(), DRAW_LABEL);

        let reset = document.position("#resetButton").unwrap();
        assert!(!document.is_focusable(reset));
        assert_eq!(document.get(reset).unwrap().read().text(), RESET_LABEL);
    }

    #[test]
    fn hidden_ancestor_hides_children() {
        let document = Document::omikuji();
        let level = document.position(".fortune-level").unwrap();
        assert!(!document.is_visible(level));

        document.query("#result").unwrap().write().remove_class(HIDDEN_CLASS);
        assert!(document.is_visible(level));
    }

    #[test]
    fn descendant_selectors() {
        let document = Document::omikuji();
        assert_eq!(document.position("#result .fortune-message"), Some(5));
        assert_eq!(document.position(".container footer p"), Some(8));
        assert_eq!(document.position("footer h1"), None);
        assert_eq!(document.position("   "), None);
        assert_eq!(document.position("#missing"), None);
    }
}
