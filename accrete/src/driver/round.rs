//! What the host discovered in one processing round.

use indexmap::IndexMap;

use crate::model::DeclarationSet;

/// Tags found in a round and the declarations carrying each.
///
/// Tags and declarations keep the order the host discovered them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Round {
    elements: IndexMap<String, Vec<String>>,
    processing_over: bool,
}

impl Round {
    /// An empty, non-terminal round.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The round signalling that no further declarations will arrive.
    #[must_use]
    pub fn terminal() -> Self {
        Self {
            elements: IndexMap::new(),
            processing_over: true,
        }
    }

    /// Records that `element` carries `tag`.
    #[must_use]
    pub fn with_element(mut self, tag: impl Into<String>, element: impl Into<String>) -> Self {
        let name = element.into();
        let carriers = self.elements.entry(tag.into()).or_default();
        if !carriers.contains(&name) {
            carriers.push(name);
        }
        self
    }

    /// A round covering every tag on every declaration in `declarations`.
    #[must_use]
    pub fn from_declarations(declarations: &DeclarationSet) -> Self {
        declarations
            .iter()
            .flat_map(|d| d.tags.iter().map(move |tag| (tag.name.clone(), d.name.clone())))
            .fold(Self::new(), |round, (tag, element)| round.with_element(tag, element))
    }

    /// Tags in discovery order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    /// Declarations carrying `tag`, in discovery order.
    #[must_use]
    pub fn elements_for(&self, tag: &str) -> &[String] {
        self.elements.get(tag).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether the host has signalled the end of processing.
    #[must_use]
    pub const fn is_processing_over(&self) -> bool {
        self.processing_over
    }
}
