//! Immutable mapping from tag names to strategies.
//!
//! The registry is assembled once through [`HandlerRegistryBuilder`] and
//! then shared by reference with every engine that needs it. There is no
//! process-wide table.

use std::collections::HashMap;

use crate::model::TagUsage;
use crate::strategy::Strategy;

/// Namespace under which the standard registry also binds every tag.
pub const STANDARD_NAMESPACE: &str = "lombok";

/// Tag-name to [`Strategy`] lookup table.
///
/// # Examples
///
/// ```
/// use accrete::registry::HandlerRegistry;
/// use accrete::strategy::Strategy;
///
/// let registry = HandlerRegistry::standard();
/// assert_eq!(registry.lookup("Data"), Some(Strategy::Data));
/// assert_eq!(registry.lookup("lombok.Data"), Some(Strategy::Data));
/// assert_eq!(registry.lookup("Unknown"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Strategy>,
}

impl HandlerRegistry {
    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// Every strategy under its default tag, bare and namespaced.
    #[must_use]
    pub fn standard() -> Self {
        Self::builder().with_standard().build()
    }

    /// The strategy bound to `tag`.
    #[must_use]
    pub fn lookup(&self, tag: &str) -> Option<Strategy> {
        self.handlers.get(tag).copied()
    }

    /// Number of registered tag names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered tags paired with their strategies, in dispatch order.
    ///
    /// Unregistered tags are dropped and repeated names are kept once.
    /// Ordering is by [`Strategy::priority`], then by tag name, so two tags
    /// competing for the same member resolve the same way on every run.
    pub fn dispatch_order<'t, I>(&self, tags: I) -> Vec<(&'t str, Strategy)>
    where
        I: IntoIterator<Item = &'t str>,
    {
        let mut ordered: Vec<(&'t str, Strategy)> = Vec::new();
        for tag in tags {
            if ordered.iter().any(|(seen, _)| *seen == tag) {
                continue;
            }
            match self.lookup(tag) {
                Some(strategy) => ordered.push((tag, strategy)),
                None => tracing::trace!(tag, "no strategy registered; skipping"),
            }
        }
        ordered.sort_by(|(a, sa), (b, sb)| {
            sa.priority().cmp(&sb.priority()).then_with(|| a.cmp(b))
        });
        ordered
    }

    /// Every registered usage paired with its strategy, in dispatch order.
    ///
    /// Unlike [`Self::dispatch_order`], repeated tags are kept: each usage
    /// is dispatched on its own. The sort is stable, so usages sharing a
    /// name run in declaration order.
    pub fn dispatch_usages<'t>(&self, usages: &'t [TagUsage]) -> Vec<(&'t TagUsage, Strategy)> {
        let mut ordered: Vec<(&'t TagUsage, Strategy)> = usages
            .iter()
            .filter_map(|usage| match self.lookup(&usage.name) {
                Some(strategy) => Some((usage, strategy)),
                None => {
                    tracing::trace!(tag = %usage.name, "no strategy registered; skipping");
                    None
                }
            })
            .collect();
        ordered.sort_by(|(a, sa), (b, sb)| {
            sa.priority().cmp(&sb.priority()).then_with(|| a.name.cmp(&b.name))
        });
        ordered
    }
}

/// Assembles a [`HandlerRegistry`].
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistryBuilder {
    handlers: HashMap<String, Strategy>,
}

impl HandlerRegistryBuilder {
    /// Binds `tag` to `strategy`, replacing any earlier binding.
    #[must_use]
    pub fn register(mut self, tag: impl Into<String>, strategy: Strategy) -> Self {
        let name = tag.into();
        if let Some(previous) = self.handlers.insert(name.clone(), strategy) {
            tracing::debug!(tag = %name, %previous, %strategy, "replaced tag binding");
        }
        self
    }

    /// Binds every strategy under its default tag and under
    /// [`STANDARD_NAMESPACE`].
    #[must_use]
    pub fn with_standard(self) -> Self {
        Strategy::ALL.into_iter().fold(self, |builder, strategy| {
            let tag = strategy.default_tag();
            builder
                .register(tag, strategy)
                .register(format!("{STANDARD_NAMESPACE}.{tag}"), strategy)
        })
    }

    /// Freezes the table.
    #[must_use]
    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            handlers: self.handlers,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn standard_registry_binds_every_strategy_twice() {
        let registry = HandlerRegistry::standard();
        assert_eq!(registry.len(), Strategy::ALL.len() * 2);
        for strategy in Strategy::ALL {
            assert_eq!(registry.lookup(strategy.default_tag()), Some(strategy));
        }
    }

    #[rstest]
    fn later_registration_replaces_earlier() {
        let registry = HandlerRegistry::builder()
            .register("Make", Strategy::Builder)
            .register("Make", Strategy::Copy)
            .build();
        assert_eq!(registry.lookup("Make"), Some(Strategy::Copy));
        assert_eq!(registry.len(), 1);
    }

    #[rstest]
    #[case(&["Setter", "Unknown", "AllArgsConstructor", "Getter"], &["AllArgsConstructor", "Getter", "Setter"])]
    #[case(&["Copy", "NoArgsConstructor"], &["NoArgsConstructor", "Copy"])]
    #[case(&["Builder", "Builder"], &["Builder"])]
    #[case(&["RequiredArgsConstructor", "AllArgsConstructor"], &["AllArgsConstructor", "RequiredArgsConstructor"])]
    fn dispatch_order_is_priority_then_name(#[case] tags: &[&str], #[case] expected: &[&str]) {
        let registry = HandlerRegistry::standard();
        let ordered: Vec<&str> = registry
            .dispatch_order(tags.iter().copied())
            .into_iter()
            .map(|(tag, _)| tag)
            .collect();
        assert_eq!(ordered, expected);
    }

    #[rstest]
    fn dispatch_usages_keeps_parameters() {
        let registry = HandlerRegistry::standard();
        let usages = [
            TagUsage::new("Getter"),
            TagUsage::new("AllArgsConstructor").with("static_name", "of"),
        ];
        let ordered = registry.dispatch_usages(&usages);
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[0].1, Strategy::AllArgsConstructor);
        assert!(ordered[0].0.parameter("static_name").is_some());
    }

    #[rstest]
    fn dispatch_usages_keeps_repeated_tags_in_declaration_order() {
        let registry = HandlerRegistry::standard();
        let usages = [
            TagUsage::new("Convert").with("field", "cents"),
            TagUsage::new("Getter"),
            TagUsage::new("Convert").with("field", "rate"),
        ];
        let fields: Vec<Option<&str>> = registry
            .dispatch_usages(&usages)
            .into_iter()
            .map(|(usage, _)| usage.string("field").ok().flatten())
            .collect();
        assert_eq!(fields, [None, Some("cents"), Some("rate")]);
    }
}
