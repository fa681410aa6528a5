// Shell application state
//
// The shell owns the feature registry and the "currently selected tab"
// state, and is the only place that turns UI state changes into analytics
// calls: exactly one AppLaunched per shell lifetime, and one TabSelected per
// distinct selection change.

use super::theme::{Theme, ThemeKind};
use crate::analytics::{Analytics, AnalyticsEvent};
use crate::feature::FeatureRegistry;
use crate::logging::LogBuffer;
use crossterm::event::KeyCode;
use std::sync::Arc;
use std::time::Instant;

/// Main application state for the shell
pub struct Shell {
    /// Ordered features, assembled once at startup
    pub registry: FeatureRegistry,

    /// Currently selected tab id, None before the first selection
    selection: Option<String>,

    /// Whether AppLaunched has been emitted for this shell lifetime
    launched: bool,

    /// Shared analytics sink injected from the composition root
    analytics: Arc<dyn Analytics>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Current color theme
    pub theme_kind: ThemeKind,
    pub theme: Theme,

    /// Whether the system-logs overlay is visible
    pub show_logs: bool,

    /// Log buffer for the system-logs overlay
    pub log_buffer: LogBuffer,

    /// When the shell started (for uptime display)
    pub start_time: Instant,
}

impl Shell {
    pub fn new(
        registry: FeatureRegistry,
        analytics: Arc<dyn Analytics>,
        theme_kind: ThemeKind,
        log_buffer: LogBuffer,
    ) -> Self {
        Self {
            registry,
            selection: None,
            launched: false,
            analytics,
            should_quit: false,
            theme_kind,
            theme: theme_kind.theme(),
            show_logs: false,
            log_buffer,
            start_time: Instant::now(),
        }
    }

    /// Currently selected tab id
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Record that the shell's root content completed a draw
    ///
    /// Emits AppLaunched exactly once per shell lifetime, regardless of how
    /// many frames are drawn afterwards.
    pub fn mark_rendered(&mut self) {
        if !self.launched {
            self.launched = true;
            self.analytics.track(AnalyticsEvent::AppLaunched);
        }
    }

    /// Change the selection and emit the corresponding analytics event
    ///
    /// Emits exactly one TabSelected when the new value is a registry id
    /// different from the current selection. An id absent from the registry
    /// is a silent no-op for analytics (the selection still changes). A
    /// change back to None emits nothing.
    pub fn select(&mut self, new: Option<String>) {
        if new == self.selection {
            return;
        }
        self.selection = new;

        if let Some(id) = self.selection.as_deref() {
            if let Some(feature) = self.registry.get(id) {
                self.analytics.track(AnalyticsEvent::TabSelected {
                    title: feature.title().to_string(),
                });
            }
        }
    }

    /// Select the tab at a display position
    pub fn select_index(&mut self, index: usize) {
        if let Some(feature) = self.registry.at(index) {
            let id = feature.id().to_string();
            self.select(Some(id));
        }
    }

    /// Tab position shown on screen: the selection's position, or the first
    /// tab before any selection has been made
    pub fn effective_index(&self) -> usize {
        self.selection
            .as_deref()
            .and_then(|id| self.registry.position(id))
            .unwrap_or(0)
    }

    /// Move to the next tab, wrapping around
    pub fn next_tab(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        let next = (self.effective_index() + 1) % self.registry.len();
        self.select_index(next);
    }

    /// Move to the previous tab, wrapping around
    pub fn prev_tab(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        let len = self.registry.len();
        let prev = (self.effective_index() + len - 1) % len;
        self.select_index(prev);
    }

    /// Forward a key to the displayed feature
    ///
    /// Returns true if the feature consumed it.
    pub fn dispatch_to_feature(&mut self, key: KeyCode) -> bool {
        let index = self.effective_index();
        match self.registry.at_mut(index) {
            Some(feature) => feature.handle_key(key),
            None => false,
        }
    }

    /// Cycle to the next theme
    pub fn next_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
    }

    /// Toggle the system-logs overlay
    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    /// Get uptime as a formatted string
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::RecordingAnalytics;
    use crate::feature::testing::registry_of;
    use crate::feature::FeatureRegistry;

    fn shell_with(
        defs: &[(&'static str, &'static str)],
    ) -> (Shell, Arc<RecordingAnalytics>) {
        let sink = Arc::new(RecordingAnalytics::default());
        let shell = Shell::new(
            registry_of(defs),
            sink.clone(),
            ThemeKind::default(),
            LogBuffer::new(),
        );
        (shell, sink)
    }

    fn tab_selected(title: &str) -> AnalyticsEvent {
        AnalyticsEvent::TabSelected {
            title: title.to_string(),
        }
    }

    #[test]
    fn app_launched_exactly_once_across_rerenders() {
        let (mut shell, sink) = shell_with(&[("feed", "Feed")]);

        shell.mark_rendered();
        shell.mark_rendered();
        shell.mark_rendered();

        assert_eq!(sink.events(), vec![AnalyticsEvent::AppLaunched]);
    }

    #[test]
    fn selection_change_emits_tab_selected_with_title() {
        let (mut shell, sink) = shell_with(&[("feed", "Feed"), ("friends", "Friends")]);

        shell.select(Some("feed".to_string()));
        assert_eq!(shell.selection(), Some("feed"));
        assert_eq!(sink.events(), vec![tab_selected("Feed")]);

        shell.select(Some("friends".to_string()));
        assert_eq!(
            sink.events(),
            vec![tab_selected("Feed"), tab_selected("Friends")]
        );
    }

    #[test]
    fn rapid_sequential_changes_emit_one_event_each() {
        let (mut shell, sink) =
            shell_with(&[("feed", "Feed"), ("friends", "Friends"), ("profile", "Me")]);

        shell.select(Some("feed".to_string()));
        shell.select(Some("friends".to_string()));
        shell.select(Some("profile".to_string()));

        assert_eq!(
            sink.events(),
            vec![
                tab_selected("Feed"),
                tab_selected("Friends"),
                tab_selected("Me"),
            ]
        );
    }

    #[test]
    fn reselecting_current_tab_emits_nothing() {
        let (mut shell, sink) = shell_with(&[("feed", "Feed")]);

        shell.select(Some("feed".to_string()));
        shell.select(Some("feed".to_string()));

        assert_eq!(sink.events(), vec![tab_selected("Feed")]);
    }

    #[test]
    fn unknown_id_is_a_silent_noop_for_analytics() {
        let (mut shell, sink) = shell_with(&[("feed", "Feed")]);

        shell.select(Some("settings".to_string()));

        assert!(sink.events().is_empty());
        // The selection itself still changed
        assert_eq!(shell.selection(), Some("settings"));
    }

    #[test]
    fn clearing_selection_emits_nothing() {
        let (mut shell, sink) = shell_with(&[("feed", "Feed")]);

        shell.select(Some("feed".to_string()));
        shell.select(None);

        assert_eq!(sink.events(), vec![tab_selected("Feed")]);
        assert_eq!(shell.selection(), None);
    }

    #[test]
    fn empty_registry_never_emits_tab_selected() {
        let sink = Arc::new(RecordingAnalytics::default());
        let mut shell = Shell::new(
            FeatureRegistry::assemble(Vec::new()).unwrap(),
            sink.clone(),
            ThemeKind::default(),
            LogBuffer::new(),
        );

        shell.mark_rendered();
        shell.next_tab();
        shell.prev_tab();
        shell.select_index(0);

        assert_eq!(sink.events(), vec![AnalyticsEvent::AppLaunched]);
    }

    #[test]
    fn tab_navigation_wraps_and_emits_in_order() {
        let (mut shell, sink) = shell_with(&[("feed", "Feed"), ("friends", "Friends")]);

        // Before any selection the first tab is displayed; next moves to the second
        shell.next_tab();
        assert_eq!(shell.selection(), Some("friends"));

        shell.next_tab();
        assert_eq!(shell.selection(), Some("feed"));

        shell.prev_tab();
        assert_eq!(shell.selection(), Some("friends"));

        assert_eq!(
            sink.events(),
            vec![
                tab_selected("Friends"),
                tab_selected("Feed"),
                tab_selected("Friends"),
            ]
        );
    }
}
