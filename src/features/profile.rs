// Profile feature - the current user's profile tab
//
// Renders a static profile card. Not interactive; the default handle_key
// from the Feature trait applies.

use crate::analytics::Analytics;
use crate::feature::{Feature, FeatureFactory};
use crate::net::Networking;
use crate::shell::theme::Theme;
use anyhow::Result;
use async_trait::async_trait;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use serde::Deserialize;
use std::sync::Arc;

/// Stable id for the profile tab
pub const PROFILE_FEATURE_ID: &str = "profile";

/// The signed-in user's profile as returned by the BFF
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub handle: String,
    pub display_name: String,
    pub bio: String,
    #[serde(default)]
    pub friends_count: u32,
    #[serde(default)]
    pub posts_count: u32,
}

/// Profile-fetching capability required by this feature
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn fetch_profile(&self) -> Result<Profile>;
}

/// Transport-backed profile API client
pub struct ProfileApiClient {
    networking: Networking,
}

impl ProfileApiClient {
    pub fn new(networking: Networking) -> Self {
        Self { networking }
    }
}

#[async_trait]
impl ProfileApi for ProfileApiClient {
    async fn fetch_profile(&self) -> Result<Profile> {
        self.networking.get_json("/v1/profile").await
    }
}

/// Typed dependencies for the profile factory
pub struct ProfileDependencies {
    /// Profile capability - consumed by profile refresh flows
    #[allow(dead_code)]
    pub api: Arc<dyn ProfileApi>,
    /// Shared sink, available for feature-internal tracking
    #[allow(dead_code)]
    pub analytics: Arc<dyn Analytics>,
}

impl ProfileDependencies {
    pub fn new(api: Arc<dyn ProfileApi>, analytics: Arc<dyn Analytics>) -> Self {
        Self { api, analytics }
    }
}

/// Factory producing the one profile feature instance
pub struct ProfileFeatureFactory {
    dependencies: ProfileDependencies,
}

impl ProfileFeatureFactory {
    pub fn new(dependencies: ProfileDependencies) -> Self {
        Self { dependencies }
    }
}

impl FeatureFactory for ProfileFeatureFactory {
    fn make_feature(self: Box<Self>) -> Box<dyn Feature> {
        Box::new(ProfileFeature::new(self.dependencies))
    }
}

/// The profile tab
pub struct ProfileFeature {
    /// Injected capabilities; profile refresh flows live outside the shell core
    #[allow(dead_code)]
    dependencies: ProfileDependencies,
    profile: Profile,
}

impl ProfileFeature {
    fn new(dependencies: ProfileDependencies) -> Self {
        Self {
            dependencies,
            profile: Profile::sample(),
        }
    }
}

impl Feature for ProfileFeature {
    fn id(&self) -> &str {
        PROFILE_FEATURE_ID
    }

    fn title(&self) -> &str {
        "Profile"
    }

    fn tab_icon(&self) -> &str {
        "🪪"
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let profile = &self.profile;
        let lines = vec![
            Line::from(Span::styled(
                profile.display_name.clone(),
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("@{}", profile.handle),
                Style::default().fg(theme.highlight),
            )),
            Line::from(""),
            Line::from(Span::styled(profile.bio.clone(), Style::default().fg(theme.fg))),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "{} friends · {} posts",
                    profile.friends_count, profile.posts_count
                ),
                theme.dim_style(),
            )),
        ];

        let card = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style())
                    .title(" Profile "),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(card, area);
    }
}

impl Profile {
    /// Placeholder profile shown until a real fetch is wired up
    fn sample() -> Self {
        Self {
            handle: "you".to_string(),
            display_name: "Your Name".to_string(),
            bio: "Connecting with friends on Wefriendz.".to_string(),
            friends_count: 5,
            posts_count: 12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::RecordingAnalytics;
    use crossterm::event::KeyCode;

    struct NoopProfileApi;

    #[async_trait]
    impl ProfileApi for NoopProfileApi {
        async fn fetch_profile(&self) -> Result<Profile> {
            Ok(Profile::sample())
        }
    }

    #[test]
    fn factory_produces_feature_with_stable_identity() {
        let dependencies = ProfileDependencies::new(
            Arc::new(NoopProfileApi),
            Arc::new(RecordingAnalytics::default()),
        );
        let mut feature = Box::new(ProfileFeatureFactory::new(dependencies)).make_feature();

        assert_eq!(feature.id(), PROFILE_FEATURE_ID);
        assert_eq!(feature.title(), "Profile");
        // Not interactive: keys fall through to the shell
        assert!(!feature.handle_key(KeyCode::Down));
    }

    #[test]
    fn profile_payload_decodes_with_optional_counts() {
        let json = r#"{"handle": "maya", "display_name": "Maya", "bio": "runner"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.friends_count, 0);
        assert_eq!(profile.posts_count, 0);
    }
}
