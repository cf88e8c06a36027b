//! The fixed set of 44 feature flags and their static properties.
//!
//! Default rules, remote keys, overridability and descriptions live in one
//! table, [`CATALOG`], indexed by the flag's discriminant. Every accessor on
//! [`FeatureFlag`] reads from that table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{BuildConfiguration, BuildContext};
use crate::errors::FlagError;

use crate::config::BuildConfiguration::{AppStore, BranchTest, LocalDeveloper, PrereleaseTesting};

/// All 44 feature flags known to this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureFlag {
    // ── Blogging prompts ───────────────────────────────────────
    BloggingPrompts,
    BloggingPromptsEnhancements,
    BloggingPromptsSocial,

    // ── Tooling & settings ─────────────────────────────────────
    JetpackDisconnect,
    DebugMenu,
    ReaderCss,
    HomepageSettings,
    UnifiedPrologueCarousel,
    TodayWidget,
    MilestoneNotifications,
    BloggingReminders,
    SiteIconCreator,

    // ── Weekly roundup ─────────────────────────────────────────
    WeeklyRoundup,
    WeeklyRoundupStaticNotification,
    WeeklyRoundupBgProcessingTask,

    // ── Site management ────────────────────────────────────────
    Domains,
    TimeZoneSuggester,
    MediaPickerPermissionsNotice,
    NotificationCommentDetails,
    SiteIntentQuestion,
    LandInTheEditor,
    StatsNewAppearance,
    StatsNewInsights,
    SiteName,
    QuickStartForExistingUsers,
    QrLogin,
    BetaSiteDesigns,
    FeatureHighlightTooltip,

    // ── Jetpack migration ──────────────────────────────────────
    JetpackPowered,
    JetpackPoweredBottomSheet,
    ContentMigration,
    NewJetpackLandingScreen,
    NewWordpressLandingScreen,
    NewCoreDataContext,
    JetpackMigrationPreventDuplicateNotifications,
    JetpackFeaturesRemovalPhaseOne,
    JetpackFeaturesRemovalPhaseTwo,
    JetpackFeaturesRemovalPhaseThree,
    JetpackFeaturesRemovalPhaseFour,
    JetpackFeaturesRemovalPhaseNewUsers,
    JetpackFeaturesRemovalPhaseSelfHosted,

    // ── Support & promotion ────────────────────────────────────
    WordpressSupportForum,
    JetpackIndividualPluginSupport,
    Blaze,
}

/// How a flag's compiled default is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultRule {
    /// Constant value.
    Always(bool),
    /// Enabled in the Jetpack flavor only.
    Jetpack,
    /// Enabled when the app configuration ships the stats revamp.
    StatsRevampV2,
    /// Enabled only for the listed build configurations.
    OnlyIn(&'static [BuildConfiguration]),
    /// Enabled for every build configuration except the listed ones.
    NotIn(&'static [BuildConfiguration]),
}

impl DefaultRule {
    /// Evaluate against a build context. Pure.
    pub fn evaluate(&self, ctx: &BuildContext) -> bool {
        match self {
            Self::Always(value) => *value,
            Self::Jetpack => ctx.is_jetpack(),
            Self::StatsRevampV2 => ctx.stats_revamp_v2,
            Self::OnlyIn(builds) => builds.contains(&ctx.configuration),
            Self::NotIn(builds) => !builds.contains(&ctx.configuration),
        }
    }

    /// Short form for listings, e.g. `only_in(local_developer)`.
    pub fn label(&self) -> String {
        let join = |builds: &[BuildConfiguration]| {
            builds
                .iter()
                .map(BuildConfiguration::as_str)
                .collect::<Vec<_>>()
                .join(",")
        };
        match self {
            Self::Always(value) => value.to_string(),
            Self::Jetpack => "jetpack".to_string(),
            Self::StatsRevampV2 => "stats_revamp_v2".to_string(),
            Self::OnlyIn(builds) => format!("only_in({})", join(builds)),
            Self::NotIn(builds) => format!("not_in({})", join(builds)),
        }
    }
}

/// Static description of one flag.
#[derive(Debug, Clone, Copy)]
pub struct FlagSpec {
    pub flag: FeatureFlag,
    /// Stable identifier used as the override store key.
    pub key: &'static str,
    pub default: DefaultRule,
    /// Must match the server-side key for remote flagging.
    pub remote_key: Option<&'static str>,
    /// Pinned flags reject local overrides.
    pub overridable: bool,
    /// Shown in the override menu.
    pub description: &'static str,
}

const fn spec(
    flag: FeatureFlag,
    key: &'static str,
    default: DefaultRule,
    description: &'static str,
) -> FlagSpec {
    FlagSpec {
        flag,
        key,
        default,
        remote_key: None,
        overridable: true,
        description,
    }
}

const fn remote(
    flag: FeatureFlag,
    key: &'static str,
    default: DefaultRule,
    remote_key: &'static str,
    description: &'static str,
) -> FlagSpec {
    FlagSpec {
        flag,
        key,
        default,
        remote_key: Some(remote_key),
        overridable: true,
        description,
    }
}

const fn pinned(
    flag: FeatureFlag,
    key: &'static str,
    default: DefaultRule,
    description: &'static str,
) -> FlagSpec {
    FlagSpec {
        flag,
        key,
        default,
        remote_key: None,
        overridable: false,
        description,
    }
}

const ON: DefaultRule = DefaultRule::Always(true);
const OFF: DefaultRule = DefaultRule::Always(false);

/// One entry per flag, in declaration order.
pub static CATALOG: [FlagSpec; FeatureFlag::COUNT] = [
    spec(
        FeatureFlag::BloggingPrompts,
        "blogging_prompts",
        DefaultRule::Jetpack,
        "Blogging Prompts",
    ),
    spec(
        FeatureFlag::BloggingPromptsEnhancements,
        "blogging_prompts_enhancements",
        DefaultRule::Jetpack,
        "Blogging Prompts Enhancements",
    ),
    spec(
        FeatureFlag::BloggingPromptsSocial,
        "blogging_prompts_social",
        OFF,
        "Blogging Prompts Social",
    ),
    spec(
        FeatureFlag::JetpackDisconnect,
        "jetpack_disconnect",
        DefaultRule::OnlyIn(&[LocalDeveloper]),
        "Jetpack disconnect",
    ),
    pinned(
        FeatureFlag::DebugMenu,
        "debug_menu",
        DefaultRule::OnlyIn(&[LocalDeveloper, BranchTest, PrereleaseTesting]),
        "Debug menu",
    ),
    spec(FeatureFlag::ReaderCss, "reader_css", OFF, "Ignore Reader CSS Cache"),
    spec(FeatureFlag::HomepageSettings, "homepage_settings", ON, "Homepage Settings"),
    spec(
        FeatureFlag::UnifiedPrologueCarousel,
        "unified_prologue_carousel",
        ON,
        "Unified Prologue Carousel",
    ),
    pinned(FeatureFlag::TodayWidget, "today_widget", ON, "iOS 14 Today Widget"),
    spec(
        FeatureFlag::MilestoneNotifications,
        "milestone_notifications",
        ON,
        "Milestone notifications",
    ),
    spec(FeatureFlag::BloggingReminders, "blogging_reminders", ON, "Blogging Reminders"),
    spec(
        FeatureFlag::SiteIconCreator,
        "site_icon_creator",
        DefaultRule::NotIn(&[AppStore]),
        "Site Icon Creator",
    ),
    pinned(FeatureFlag::WeeklyRoundup, "weekly_roundup", ON, "Weekly Roundup"),
    pinned(
        FeatureFlag::WeeklyRoundupStaticNotification,
        "weekly_roundup_static_notification",
        OFF,
        "Weekly Roundup Static Notification",
    ),
    spec(
        FeatureFlag::WeeklyRoundupBgProcessingTask,
        "weekly_roundup_bg_processing_task",
        ON,
        "Weekly Roundup BGProcessingTask",
    ),
    // Callers gating domain purchases must also check that the site supports domains.
    spec(FeatureFlag::Domains, "domains", ON, "Domain Purchases"),
    spec(FeatureFlag::TimeZoneSuggester, "time_zone_suggester", ON, "TimeZone Suggester"),
    spec(
        FeatureFlag::MediaPickerPermissionsNotice,
        "media_picker_permissions_notice",
        ON,
        "Media Picker Permissions Notice",
    ),
    spec(
        FeatureFlag::NotificationCommentDetails,
        "notification_comment_details",
        ON,
        "Notification Comment Details",
    ),
    spec(FeatureFlag::SiteIntentQuestion, "site_intent_question", ON, "Site Intent Question"),
    spec(FeatureFlag::LandInTheEditor, "land_in_the_editor", OFF, "Land In The Editor"),
    spec(
        FeatureFlag::StatsNewAppearance,
        "stats_new_appearance",
        DefaultRule::StatsRevampV2,
        "New Appearance for Stats",
    ),
    spec(
        FeatureFlag::StatsNewInsights,
        "stats_new_insights",
        DefaultRule::StatsRevampV2,
        "New Cards for Stats Insights",
    ),
    spec(FeatureFlag::SiteName, "site_name", OFF, "Site Name"),
    spec(
        FeatureFlag::QuickStartForExistingUsers,
        "quick_start_for_existing_users",
        ON,
        "Quick Start For Existing Users",
    ),
    spec(FeatureFlag::QrLogin, "qr_login", ON, "QR Code Login"),
    spec(FeatureFlag::BetaSiteDesigns, "beta_site_designs", OFF, "Fetch Beta Site Designs"),
    spec(
        FeatureFlag::FeatureHighlightTooltip,
        "feature_highlight_tooltip",
        ON,
        "Feature Highlight Tooltip",
    ),
    spec(FeatureFlag::JetpackPowered, "jetpack_powered", ON, "Jetpack powered banners and badges"),
    spec(
        FeatureFlag::JetpackPoweredBottomSheet,
        "jetpack_powered_bottom_sheet",
        ON,
        "Jetpack powered bottom sheet",
    ),
    spec(FeatureFlag::ContentMigration, "content_migration", ON, "Content Migration"),
    spec(
        FeatureFlag::NewJetpackLandingScreen,
        "new_jetpack_landing_screen",
        ON,
        "New Jetpack landing screen",
    ),
    spec(
        FeatureFlag::NewWordpressLandingScreen,
        "new_wordpress_landing_screen",
        ON,
        "New WordPress landing screen",
    ),
    spec(
        FeatureFlag::NewCoreDataContext,
        "new_core_data_context",
        ON,
        "Use new Core Data context structure (Require app restart)",
    ),
    remote(
        FeatureFlag::JetpackMigrationPreventDuplicateNotifications,
        "jetpack_migration_prevent_duplicate_notifications",
        ON,
        "prevent_duplicate_notifs_remote_field",
        "Jetpack Migration prevent duplicate WordPress app notifications when Jetpack is installed",
    ),
    remote(
        FeatureFlag::JetpackFeaturesRemovalPhaseOne,
        "jetpack_features_removal_phase_one",
        OFF,
        "jp_removal_one",
        "Jetpack Features Removal Phase One",
    ),
    remote(
        FeatureFlag::JetpackFeaturesRemovalPhaseTwo,
        "jetpack_features_removal_phase_two",
        OFF,
        "jp_removal_two",
        "Jetpack Features Removal Phase Two",
    ),
    remote(
        FeatureFlag::JetpackFeaturesRemovalPhaseThree,
        "jetpack_features_removal_phase_three",
        OFF,
        "jp_removal_three",
        "Jetpack Features Removal Phase Three",
    ),
    remote(
        FeatureFlag::JetpackFeaturesRemovalPhaseFour,
        "jetpack_features_removal_phase_four",
        OFF,
        "jp_removal_four",
        "Jetpack Features Removal Phase Four",
    ),
    remote(
        FeatureFlag::JetpackFeaturesRemovalPhaseNewUsers,
        "jetpack_features_removal_phase_new_users",
        OFF,
        "jp_removal_new_users",
        "Jetpack Features Removal Phase For New Users",
    ),
    remote(
        FeatureFlag::JetpackFeaturesRemovalPhaseSelfHosted,
        "jetpack_features_removal_phase_self_hosted",
        OFF,
        "jp_removal_self_hosted",
        "Jetpack Features Removal Phase For Self-Hosted Sites",
    ),
    remote(
        FeatureFlag::WordpressSupportForum,
        "wordpress_support_forum",
        OFF,
        "enable_wordpress_support_forum",
        "Provide support through a forum",
    ),
    spec(
        FeatureFlag::JetpackIndividualPluginSupport,
        "jetpack_individual_plugin_support",
        OFF,
        "Jetpack Individual Plugin Support",
    ),
    remote(FeatureFlag::Blaze, "blaze", OFF, "blaze", "Blaze"),
];

impl FeatureFlag {
    pub const COUNT: usize = 44;

    /// All flags in declaration order.
    pub const ALL: [FeatureFlag; Self::COUNT] = [
        Self::BloggingPrompts,
        Self::BloggingPromptsEnhancements,
        Self::BloggingPromptsSocial,
        Self::JetpackDisconnect,
        Self::DebugMenu,
        Self::ReaderCss,
        Self::HomepageSettings,
        Self::UnifiedPrologueCarousel,
        Self::TodayWidget,
        Self::MilestoneNotifications,
        Self::BloggingReminders,
        Self::SiteIconCreator,
        Self::WeeklyRoundup,
        Self::WeeklyRoundupStaticNotification,
        Self::WeeklyRoundupBgProcessingTask,
        Self::Domains,
        Self::TimeZoneSuggester,
        Self::MediaPickerPermissionsNotice,
        Self::NotificationCommentDetails,
        Self::SiteIntentQuestion,
        Self::LandInTheEditor,
        Self::StatsNewAppearance,
        Self::StatsNewInsights,
        Self::SiteName,
        Self::QuickStartForExistingUsers,
        Self::QrLogin,
        Self::BetaSiteDesigns,
        Self::FeatureHighlightTooltip,
        Self::JetpackPowered,
        Self::JetpackPoweredBottomSheet,
        Self::ContentMigration,
        Self::NewJetpackLandingScreen,
        Self::NewWordpressLandingScreen,
        Self::NewCoreDataContext,
        Self::JetpackMigrationPreventDuplicateNotifications,
        Self::JetpackFeaturesRemovalPhaseOne,
        Self::JetpackFeaturesRemovalPhaseTwo,
        Self::JetpackFeaturesRemovalPhaseThree,
        Self::JetpackFeaturesRemovalPhaseFour,
        Self::JetpackFeaturesRemovalPhaseNewUsers,
        Self::JetpackFeaturesRemovalPhaseSelfHosted,
        Self::WordpressSupportForum,
        Self::JetpackIndividualPluginSupport,
        Self::Blaze,
    ];

    /// Static properties of this flag.
    pub fn spec(&self) -> &'static FlagSpec {
        &CATALOG[*self as usize]
    }

    /// Override store key, e.g. `debug_menu`.
    pub fn as_str(&self) -> &'static str {
        self.spec().key
    }

    /// Parse a flag from its store key. Unknown keys yield `None`.
    pub fn parse(key: &str) -> Option<Self> {
        CATALOG.iter().find(|s| s.key == key).map(|s| s.flag)
    }

    /// Find the flag whose remote key matches. Unknown keys yield `None`.
    pub fn from_remote_key(remote_key: &str) -> Option<Self> {
        CATALOG
            .iter()
            .find(|s| s.remote_key == Some(remote_key))
            .map(|s| s.flag)
    }

    pub fn description(&self) -> &'static str {
        self.spec().description
    }

    pub fn remote_key(&self) -> Option<&'static str> {
        self.spec().remote_key
    }

    pub fn is_overridable(&self) -> bool {
        self.spec().overridable
    }

    pub fn default_rule(&self) -> DefaultRule {
        self.spec().default
    }

    /// Compiled default for the given build, ignoring any override.
    pub fn default_value(&self, ctx: &BuildContext) -> bool {
        self.spec().default.evaluate(ctx)
    }
}

impl fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureFlag {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| FlagError::UnknownFlag { key: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_indexed_by_discriminant() {
        for (i, flag) in FeatureFlag::ALL.iter().enumerate() {
            assert_eq!(CATALOG[i].flag, *flag, "CATALOG[{i}] out of order");
        }
    }

    #[test]
    fn keys_match_serde_names() {
        for flag in FeatureFlag::ALL {
            let json = serde_json::to_string(&flag).unwrap();
            assert_eq!(json, format!("\"{}\"", flag.as_str()));
        }
    }

    #[test]
    fn rule_labels() {
        assert_eq!(
            FeatureFlag::DebugMenu.default_rule().label(),
            "only_in(local_developer,branch_test,prerelease_testing)"
        );
        assert_eq!(FeatureFlag::SiteIconCreator.default_rule().label(), "not_in(app_store)");
        assert_eq!(FeatureFlag::Blaze.default_rule().label(), "false");
    }
}
