// Feed feature - the home timeline tab
//
// The feed feature renders a scrollable list of posts. Its API capability
// (FeedApi) is satisfied by a thin client over the shared networking
// collaborator; content loading policy is the feature's own concern, not the
// shell's.

use crate::analytics::Analytics;
use crate::feature::{Feature, FeatureFactory};
use crate::net::Networking;
use crate::shell::theme::Theme;
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use serde::Deserialize;
use std::sync::Arc;

/// Stable id for the feed tab
pub const FEED_FEATURE_ID: &str = "feed";

/// A single post in the timeline
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    /// Stable post id from the BFF - kept for detail/permalink flows
    #[allow(dead_code)]
    pub id: String,
    pub author: String,
    pub body: String,
}

/// Feed-fetching capability required by this feature
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// Fetch the current timeline from the BFF
    async fn fetch_feed(&self) -> Result<Vec<Post>>;
}

/// Transport-backed feed API client
pub struct FeedApiClient {
    networking: Networking,
}

impl FeedApiClient {
    pub fn new(networking: Networking) -> Self {
        Self { networking }
    }
}

#[async_trait]
impl FeedApi for FeedApiClient {
    async fn fetch_feed(&self) -> Result<Vec<Post>> {
        self.networking.get_json("/v1/feed").await
    }
}

/// Everything the feed factory needs, typed at the wiring boundary
///
/// No downcasts: the composition root hands over an already-correct
/// `Arc<dyn FeedApi>` together with the shared analytics sink.
pub struct FeedDependencies {
    /// Feed capability - consumed by content loading flows
    #[allow(dead_code)]
    pub api: Arc<dyn FeedApi>,
    /// Shared sink, available for feature-internal tracking
    #[allow(dead_code)]
    pub analytics: Arc<dyn Analytics>,
}

impl FeedDependencies {
    pub fn new(api: Arc<dyn FeedApi>, analytics: Arc<dyn Analytics>) -> Self {
        Self { api, analytics }
    }
}

/// Factory producing the one feed feature instance
pub struct FeedFeatureFactory {
    dependencies: FeedDependencies,
}

impl FeedFeatureFactory {
    pub fn new(dependencies: FeedDependencies) -> Self {
        Self { dependencies }
    }
}

impl FeatureFactory for FeedFeatureFactory {
    fn make_feature(self: Box<Self>) -> Box<dyn Feature> {
        Box::new(FeedFeature::new(self.dependencies))
    }
}

/// The feed tab
pub struct FeedFeature {
    /// Injected capabilities; content refresh flows live outside the shell core
    #[allow(dead_code)]
    dependencies: FeedDependencies,
    posts: Vec<Post>,
    selected: usize,
}

impl FeedFeature {
    fn new(dependencies: FeedDependencies) -> Self {
        Self {
            dependencies,
            posts: Post::sample_timeline(),
            selected: 0,
        }
    }
}

impl Feature for FeedFeature {
    fn id(&self) -> &str {
        FEED_FEATURE_ID
    }

    fn title(&self) -> &str {
        "Feed"
    }

    fn tab_icon(&self) -> &str {
        "📰"
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = self
            .posts
            .iter()
            .map(|post| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        format!("@{}", post.author),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", post.body),
                        Style::default().fg(theme.fg),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style())
                    .title(" Timeline "),
            )
            .highlight_style(Style::default().bg(theme.border));

        let mut state = ListState::default();
        state.select(Some(self.selected));
        f.render_stateful_widget(list, area, &mut state);
    }

    fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            KeyCode::Down => {
                if self.selected + 1 < self.posts.len() {
                    self.selected += 1;
                }
                true
            }
            _ => false,
        }
    }
}

impl Post {
    /// Placeholder timeline shown until a real fetch is wired up
    fn sample_timeline() -> Vec<Post> {
        [
            ("maya", "Morning run done, 10k in the rain 🌧️"),
            ("chinthaka", "Shipping the new tab shell today!"),
            ("sam", "Anyone up for board games this weekend?"),
            ("lena", "New espresso machine at the office ☕"),
        ]
        .iter()
        .enumerate()
        .map(|(i, &(author, body))| Post {
            id: format!("post-{}", i + 1),
            author: author.to_string(),
            body: body.to_string(),
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::RecordingAnalytics;

    struct NoopFeedApi;

    #[async_trait]
    impl FeedApi for NoopFeedApi {
        async fn fetch_feed(&self) -> Result<Vec<Post>> {
            Ok(Vec::new())
        }
    }

    fn make_feed_feature() -> Box<dyn Feature> {
        let dependencies = FeedDependencies::new(
            Arc::new(NoopFeedApi),
            Arc::new(RecordingAnalytics::default()),
        );
        Box::new(FeedFeatureFactory::new(dependencies)).make_feature()
    }

    #[test]
    fn factory_produces_feature_with_stable_identity() {
        let feature = make_feed_feature();
        assert_eq!(feature.id(), FEED_FEATURE_ID);
        assert_eq!(feature.title(), "Feed");
        assert!(!feature.tab_icon().is_empty());
    }

    #[test]
    fn key_navigation_stays_in_bounds() {
        let mut feature = make_feed_feature();

        // Up at the top stays at the top
        assert!(feature.handle_key(KeyCode::Up));
        // Walk past the end of the sample timeline
        for _ in 0..20 {
            assert!(feature.handle_key(KeyCode::Down));
        }
        // Unhandled keys are reported as such
        assert!(!feature.handle_key(KeyCode::Char('x')));
    }

    #[test]
    fn post_payload_decodes_from_bff_json() {
        let json = r#"[{"id": "p1", "author": "maya", "body": "hello"}]"#;
        let posts: Vec<Post> = serde_json::from_str(json).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].author, "maya");
    }

    /// A constructed feature holds an analytics handle through its
    /// dependencies, so the sink channel only closes once every feature is
    /// dropped. Shutdown relies on this: the composition root must release
    /// the registry before awaiting the sink task.
    #[test]
    fn dropping_the_feature_releases_its_analytics_handle() {
        use crate::analytics::ChannelAnalytics;
        use tokio::sync::mpsc::error::TryRecvError;

        let (tx, mut rx) = tokio::sync::mpsc::channel(4);
        let analytics: Arc<dyn Analytics> = Arc::new(ChannelAnalytics::new(tx));
        let dependencies = FeedDependencies::new(Arc::new(NoopFeedApi), analytics.clone());
        let feature = Box::new(FeedFeatureFactory::new(dependencies)).make_feature();

        // The root handle is gone, but the feature still keeps the channel open
        drop(analytics);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

        drop(feature);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Disconnected)));
    }
}
