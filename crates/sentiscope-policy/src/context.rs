//! Optional publishing context supplied with an analysis request

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where and how the analyzed content will be published.
///
/// Only `platform` influences recommendations; other keys are carried
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_type: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl AnalysisContext {
    pub fn for_platform(platform: impl Into<String>) -> Self {
        Self {
            platform: Some(platform.into()),
            ..Self::default()
        }
    }

    /// Recognized platform, if any
    pub fn platform(&self) -> Option<Platform> {
        self.platform.as_deref().and_then(Platform::parse)
    }
}

/// Platforms with dedicated recommendation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Youtube,
}

impl Platform {
    /// Case-insensitive; accepts the short aliases `fb`, `ig`, and `yt`
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "facebook" | "fb" => Some(Self::Facebook),
            "instagram" | "ig" => Some(Self::Instagram),
            "youtube" | "yt" => Some(Self::Youtube),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_aliases() {
        assert_eq!(Platform::parse("Facebook"), Some(Platform::Facebook));
        assert_eq!(Platform::parse("FB"), Some(Platform::Facebook));
        assert_eq!(Platform::parse("ig"), Some(Platform::Instagram));
        assert_eq!(Platform::parse("YouTube"), Some(Platform::Youtube));
        assert_eq!(Platform::parse("tiktok"), None);
        assert_eq!(Platform::parse(""), None);
    }

    #[test]
    fn test_extra_keys_preserved() {
        let json = r#"{"platform": "IG", "post_type": "reel", "campaign": "spring", "boost": 2}"#;
        let context: AnalysisContext = serde_json::from_str(json).unwrap();

        assert_eq!(context.platform(), Some(Platform::Instagram));
        assert_eq!(context.post_type.as_deref(), Some("reel"));
        assert_eq!(context.extra["campaign"], "spring");
        assert_eq!(context.extra["boost"], 2);
    }

    #[test]
    fn test_empty_context() {
        let context: AnalysisContext = serde_json::from_str("{}").unwrap();
        assert_eq!(context.platform(), None);
    }
}
