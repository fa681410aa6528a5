// Feature contract - the foundation of the shell's composition system
//
// Every tab the shell hosts is a Feature: an independently built module
// exposing identity, a display title, a tab icon, and a root-view renderer.
// The shell depends only on this trait, never on concrete feature types.

use crate::shell::theme::Theme;
use anyhow::{bail, Result};
use crossterm::event::KeyCode;
use ratatui::{layout::Rect, Frame};
use std::collections::HashSet;

/// A self-contained unit of UI functionality exposed to the shell as a tab
///
/// The four required items are the entire surface a feature must implement
/// to be hostable. `render` is immediate-mode: it is called on every frame
/// and must be safe to call any number of times without side effects.
pub trait Feature {
    /// Stable identifier, unique within a registry for the app's lifetime
    fn id(&self) -> &str;

    /// Display title shown on the tab and reported in analytics
    fn title(&self) -> &str;

    /// Glyph shown next to the title on the tab bar
    fn tab_icon(&self) -> &str;

    /// Render the feature's root view into the given area
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme);

    /// Handle a key while this feature's tab is displayed
    ///
    /// Returns true if the key was consumed. Default: not interactive.
    fn handle_key(&mut self, _key: KeyCode) -> bool {
        false
    }
}

/// Pure constructor for a single feature
///
/// A factory wraps the typed dependencies its feature needs and produces
/// exactly one instance. Consuming `self` makes re-invocation impossible.
/// Construction must not perform I/O and has no error path: a factory that
/// cannot build its feature is a programming error, not a runtime condition.
pub trait FeatureFactory {
    fn make_feature(self: Box<Self>) -> Box<dyn Feature>;
}

/// Ordered, immutable collection of constructed features
///
/// Insertion order is tab display order and is stable for the process
/// lifetime. Built once at shell startup; owned exclusively by the shell.
pub struct FeatureRegistry {
    features: Vec<Box<dyn Feature>>,
}

impl FeatureRegistry {
    /// Assemble the registry by invoking each factory exactly once, in order
    ///
    /// An empty factory list yields a valid empty registry (the shell then
    /// renders an empty tab bar). Two features sharing an id is a
    /// construction error and fatal at startup.
    pub fn assemble(factories: Vec<Box<dyn FeatureFactory>>) -> Result<Self> {
        let mut features: Vec<Box<dyn Feature>> = Vec::with_capacity(factories.len());
        let mut seen_ids: HashSet<String> = HashSet::with_capacity(factories.len());

        for factory in factories {
            let feature = factory.make_feature();
            if !seen_ids.insert(feature.id().to_string()) {
                bail!("Duplicate feature id {:?} in registry", feature.id());
            }
            tracing::debug!("Composed feature {:?} ({})", feature.id(), feature.title());
            features.push(feature);
        }

        Ok(Self { features })
    }

    /// Look up a feature by id
    pub fn get(&self, id: &str) -> Option<&dyn Feature> {
        self.features.iter().find(|f| f.id() == id).map(|f| &**f)
    }

    /// Tab position of a feature id, if present
    pub fn position(&self, id: &str) -> Option<usize> {
        self.features.iter().position(|f| f.id() == id)
    }

    /// Feature at a tab position
    pub fn at(&self, index: usize) -> Option<&dyn Feature> {
        self.features.get(index).map(|f| &**f)
    }

    /// Mutable feature at a tab position (for key dispatch)
    pub fn at_mut(&mut self, index: usize) -> Option<&mut Box<dyn Feature>> {
        self.features.get_mut(index)
    }

    /// Iterate features in tab display order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Feature> {
        self.features.iter().map(|f| &**f)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Minimal feature for registry and shell tests
    pub(crate) struct StubFeature {
        pub id: &'static str,
        pub title: &'static str,
    }

    impl Feature for StubFeature {
        fn id(&self) -> &str {
            self.id
        }

        fn title(&self) -> &str {
            self.title
        }

        fn tab_icon(&self) -> &str {
            "•"
        }

        fn render(&self, _f: &mut Frame, _area: Rect, _theme: &Theme) {}
    }

    pub(crate) struct StubFactory {
        pub id: &'static str,
        pub title: &'static str,
    }

    impl FeatureFactory for StubFactory {
        fn make_feature(self: Box<Self>) -> Box<dyn Feature> {
            Box::new(StubFeature {
                id: self.id,
                title: self.title,
            })
        }
    }

    pub(crate) fn registry_of(defs: &[(&'static str, &'static str)]) -> FeatureRegistry {
        let factories: Vec<Box<dyn FeatureFactory>> = defs
            .iter()
            .map(|&(id, title)| Box::new(StubFactory { id, title }) as Box<dyn FeatureFactory>)
            .collect();
        FeatureRegistry::assemble(factories).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn assembly_preserves_input_order_and_length() {
        let registry = registry_of(&[("feed", "Feed"), ("friends", "Friends"), ("profile", "Me")]);

        assert_eq!(registry.len(), 3);
        let ids: Vec<&str> = registry.iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec!["feed", "friends", "profile"]);
    }

    #[test]
    fn duplicate_id_is_rejected_at_assembly() {
        let factories: Vec<Box<dyn FeatureFactory>> = vec![
            Box::new(StubFactory {
                id: "feed",
                title: "Feed",
            }),
            Box::new(StubFactory {
                id: "feed",
                title: "Feed Again",
            }),
        ];

        let err = match FeatureRegistry::assemble(factories) {
            Ok(_) => panic!("duplicate feature id must be rejected"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("Duplicate feature id"));
    }

    #[test]
    fn empty_factory_list_yields_valid_empty_registry() {
        let registry = FeatureRegistry::assemble(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.get("feed").is_none());
    }

    #[test]
    fn lookup_by_id_and_position() {
        let registry = registry_of(&[("feed", "Feed"), ("friends", "Friends")]);

        assert_eq!(registry.get("friends").unwrap().title(), "Friends");
        assert_eq!(registry.position("friends"), Some(1));
        assert!(registry.get("settings").is_none());
        assert_eq!(registry.position("settings"), None);
    }
}
