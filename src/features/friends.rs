// Friends feature - the friends list tab
//
// Renders the friends list with presence indicators. Mirrors the feed
// feature's slice layout: payload types, capability trait, client,
// dependencies, factory, feature.

use crate::analytics::Analytics;
use crate::feature::{Feature, FeatureFactory};
use crate::net::Networking;
use crate::shell::theme::Theme;
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use serde::Deserialize;
use std::sync::Arc;

/// Stable id for the friends tab
pub const FRIENDS_FEATURE_ID: &str = "friends";

/// A friend as returned by the BFF
#[derive(Debug, Clone, Deserialize)]
pub struct Friend {
    /// Stable friend id from the BFF - kept for profile navigation flows
    #[allow(dead_code)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub online: bool,
}

/// Friends-listing capability required by this feature
#[async_trait]
pub trait FriendsApi: Send + Sync {
    async fn fetch_friends(&self) -> Result<Vec<Friend>>;
}

/// Transport-backed friends API client
pub struct FriendsApiClient {
    networking: Networking,
}

impl FriendsApiClient {
    pub fn new(networking: Networking) -> Self {
        Self { networking }
    }
}

#[async_trait]
impl FriendsApi for FriendsApiClient {
    async fn fetch_friends(&self) -> Result<Vec<Friend>> {
        self.networking.get_json("/v1/friends").await
    }
}

/// Typed dependencies for the friends factory
pub struct FriendsDependencies {
    /// Friends capability - consumed by presence refresh flows
    #[allow(dead_code)]
    pub api: Arc<dyn FriendsApi>,
    /// Shared sink, available for feature-internal tracking
    #[allow(dead_code)]
    pub analytics: Arc<dyn Analytics>,
}

impl FriendsDependencies {
    pub fn new(api: Arc<dyn FriendsApi>, analytics: Arc<dyn Analytics>) -> Self {
        Self { api, analytics }
    }
}

/// Factory producing the one friends feature instance
pub struct FriendsFeatureFactory {
    dependencies: FriendsDependencies,
}

impl FriendsFeatureFactory {
    pub fn new(dependencies: FriendsDependencies) -> Self {
        Self { dependencies }
    }
}

impl FeatureFactory for FriendsFeatureFactory {
    fn make_feature(self: Box<Self>) -> Box<dyn Feature> {
        Box::new(FriendsFeature::new(self.dependencies))
    }
}

/// The friends tab
pub struct FriendsFeature {
    /// Injected capabilities; presence refresh flows live outside the shell core
    #[allow(dead_code)]
    dependencies: FriendsDependencies,
    friends: Vec<Friend>,
    selected: usize,
}

impl FriendsFeature {
    fn new(dependencies: FriendsDependencies) -> Self {
        Self {
            dependencies,
            friends: Friend::sample_friends(),
            selected: 0,
        }
    }
}

impl Feature for FriendsFeature {
    fn id(&self) -> &str {
        FRIENDS_FEATURE_ID
    }

    fn title(&self) -> &str {
        "Friends"
    }

    fn tab_icon(&self) -> &str {
        "👥"
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = self
            .friends
            .iter()
            .map(|friend| {
                let (indicator, style) = if friend.online {
                    ("●", Style::default().fg(theme.accent))
                } else {
                    ("○", theme.dim_style())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", indicator), style),
                    Span::styled(friend.name.clone(), Style::default().fg(theme.fg)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style())
                    .title(" Friends "),
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
                if self.selected + 1 < self.friends.len() {
                    self.selected += 1;
                }
                true
            }
            _ => false,
        }
    }
}

impl Friend {
    /// Placeholder list shown until a real fetch is wired up
    fn sample_friends() -> Vec<Friend> {
        [
            ("maya", true),
            ("sam", true),
            ("lena", false),
            ("arjun", false),
            ("kasia", true),
        ]
        .iter()
        .enumerate()
        .map(|(i, &(name, online))| Friend {
            id: format!("friend-{}", i + 1),
            name: name.to_string(),
            online,
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::RecordingAnalytics;

    struct NoopFriendsApi;

    #[async_trait]
    impl FriendsApi for NoopFriendsApi {
        async fn fetch_friends(&self) -> Result<Vec<Friend>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn factory_produces_feature_with_stable_identity() {
        let dependencies = FriendsDependencies::new(
            Arc::new(NoopFriendsApi),
            Arc::new(RecordingAnalytics::default()),
        );
        let feature = Box::new(FriendsFeatureFactory::new(dependencies)).make_feature();

        assert_eq!(feature.id(), FRIENDS_FEATURE_ID);
        assert_eq!(feature.title(), "Friends");
    }

    #[test]
    fn friend_payload_defaults_presence_to_offline() {
        let json = r#"[{"id": "f1", "name": "maya"}]"#;
        let friends: Vec<Friend> = serde_json::from_str(json).unwrap();
        assert!(!friends[0].online);
    }
}
