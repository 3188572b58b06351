//! Owned element tree for XML documents.

use crate::error::{Result, TabulaError};

/// A child of an element, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlChild {
    Element(XmlElement),
    Text(String),
    CData(String),
    Comment(String),
}

/// An element: tag name, ordered attributes, ordered children.
///
/// Prefixed names and `xmlns` attributes are kept verbatim. Whitespace-only
/// text children are retained structurally; display projections filter them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlChild>,
}

/// A parsed document rooted at a single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub root: XmlElement,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Text content of this element: the concatenation of direct Text
    /// children (trimmed) and CData children (raw) only, never descendants.
    pub fn content(&self) -> String {
        let mut content = String::new();
        for child in &self.children {
            match child {
                XmlChild::Text(text) => content.push_str(text.trim()),
                XmlChild::CData(text) => content.push_str(text),
                _ => {}
            }
        }
        content
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set or overwrite an attribute, preserving the position of an existing
    /// one and appending a new one.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(attr, _)| attr == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Replace the first direct text child's content, or append a new text
    /// child if the element has none.
    pub fn set_text(&mut self, text: &str) {
        for child in &mut self.children {
            if let XmlChild::Text(existing) = child {
                *existing = text.to_string();
                return;
            }
        }
        self.children.push(XmlChild::Text(text.to_string()));
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlChild::Element(element) => Some(element),
            _ => None,
        })
    }

    fn child_element_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.children.iter_mut().find_map(|child| match child {
            XmlChild::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }
}

impl XmlDocument {
    /// Look up an element by slash-separated path, e.g. `"book/title"`.
    ///
    /// The first segment must name the root; each later segment selects the
    /// first matching child element.
    pub fn find_element(&self, path: &str) -> Option<&XmlElement> {
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        let first = segments.next()?;
        if first != self.root.name {
            return None;
        }
        let mut current = &self.root;
        for segment in segments {
            current = current
                .child_elements()
                .find(|element| element.name == segment)?;
        }
        Some(current)
    }

    fn find_element_mut(&mut self, path: &str) -> Option<&mut XmlElement> {
        let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();
        let (first, rest) = segments.split_first()?;
        if *first != self.root.name {
            return None;
        }
        descend_mut(&mut self.root, rest)
    }

    /// Set an attribute on the element at `path`.
    pub fn set_attribute(&mut self, path: &str, name: &str, value: &str) -> Result<()> {
        let element = self
            .find_element_mut(path)
            .ok_or_else(|| TabulaError::NodeNotFound(path.to_string()))?;
        element.set_attribute(name, value);
        Ok(())
    }

    /// Set the text content of the element at `path`.
    pub fn set_element_text(&mut self, path: &str, text: &str) -> Result<()> {
        let element = self
            .find_element_mut(path)
            .ok_or_else(|| TabulaError::NodeNotFound(path.to_string()))?;
        element.set_text(text);
        Ok(())
    }
}

fn descend_mut<'a>(element: &'a mut XmlElement, segments: &[&str]) -> Option<&'a mut XmlElement> {
    match segments.split_first() {
        None => Some(element),
        Some((first, rest)) => descend_mut(element.child_element_mut(first)?, rest),
    }
}
