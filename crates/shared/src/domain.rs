use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Company selected before the directory has loaded or the user has chosen one.
pub const DEMO_COMPANY_ID: &str = "demo-company";

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(CompanyId);

impl Default for CompanyId {
    fn default() -> Self {
        Self::from(DEMO_COMPANY_ID)
    }
}

/// An organization the user may generate content for.
///
/// Fields other than `id` and `name` are kept verbatim in `extra` so a
/// directory response survives a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Company {
    pub fn new(id: impl Into<CompanyId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn industry(&self) -> Option<&str> {
        self.extra.get("industry").and_then(|v| v.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    #[default]
    Free,
    Trial,
    Premium,
}

impl Tier {
    pub fn badge(self) -> &'static str {
        match self {
            Tier::Free => "Free User",
            Tier::Trial => "Trial User",
            Tier::Premium => "Premium User",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserStatus {
    pub tier: Tier,
    pub usage: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveTab {
    #[default]
    Content,
    Analytics,
    Media,
    Calendar,
    Automation,
    Training,
}

impl ActiveTab {
    pub const ALL: [ActiveTab; 6] = [
        ActiveTab::Content,
        ActiveTab::Analytics,
        ActiveTab::Media,
        ActiveTab::Calendar,
        ActiveTab::Automation,
        ActiveTab::Training,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActiveTab::Content => "content",
            ActiveTab::Analytics => "analytics",
            ActiveTab::Media => "media",
            ActiveTab::Calendar => "calendar",
            ActiveTab::Automation => "automation",
            ActiveTab::Training => "training",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActiveTab::Content => "Content Hub",
            ActiveTab::Analytics => "Analytics",
            ActiveTab::Media => "Media Library",
            ActiveTab::Calendar => "Calendar",
            ActiveTab::Automation => "Automation",
            ActiveTab::Training => "Training",
        }
    }
}

impl fmt::Display for ActiveTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tab identifier '{0}'")]
pub struct UnknownTab(pub String);

impl FromStr for ActiveTab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActiveTab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    Facebook,
    Linkedin,
}

/// Platforms every generation request targets, in wire order.
pub const GENERATION_PLATFORMS: [Platform; 3] =
    [Platform::Instagram, Platform::Facebook, Platform::Linkedin];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudienceLevel {
    #[default]
    General,
}
