//! Built-in recommendation rules
//!
//! Thresholds are literal business constants. Length rules compare against
//! the word count even where the advice speaks of characters.

use sentiscope_core::Classification;

use crate::context::Platform;
use crate::guard::{Bound, Guard};
use crate::recommendation::{Priority, RecommendationKind, Urgency};
use crate::rule::{DetailSource, Rule, RuleSet, Template};

/// Maximum number of sentences quoted by the sentence-negativity rule
pub const MAX_QUOTED_SENTENCES: usize = 3;

impl RuleSet {
    /// The standard rule battery, in evaluation order
    pub fn builtin() -> Self {
        Self {
            name: "sentiscope-default".to_string(),
            description: "Sentiment, length, hashtag, platform, and sentence rules".to_string(),
            version: "1.0".to_string(),
            rules: builtin_rules(),
        }
    }
}

fn template(
    kind: RecommendationKind,
    priority: Priority,
    urgency: Urgency,
    title: &str,
    description: &str,
    actions: &[&str],
) -> Template {
    Template {
        kind,
        priority,
        urgency,
        title: title.to_string(),
        description: description.to_string(),
        actions: actions.iter().map(|a| a.to_string()).collect(),
        details: None,
    }
}

fn on_platform(platform: Platform, guard: Guard) -> Guard {
    Guard::all([Guard::Platform { platform }, guard])
}

fn no_hashtags() -> Guard {
    Guard::Hashtags { present: false }
}

fn builtin_rules() -> Vec<Rule> {
    use Priority as P;
    use RecommendationKind as K;
    use Urgency as U;

    vec![
        Rule::new(
            "crisis",
            Guard::Sentiment {
                classification: Classification::Negative,
                compound: None,
                magnitude: Some(Bound::above(0.5)),
            },
            template(
                K::CrisisManagement,
                P::High,
                U::High,
                "Address Negative Sentiment Immediately",
                "Strong negative sentiment detected. Consider:",
                &[
                    "Respond quickly to address concerns",
                    "Acknowledge the issue publicly",
                    "Offer solutions or compensation",
                    "Monitor closely for escalation",
                    "Consider removing or editing the content",
                ],
            ),
        ),
        Rule::new(
            "moderate_negativity",
            Guard::Sentiment {
                classification: Classification::Negative,
                compound: None,
                magnitude: Some(Bound::above(0.2).at_most(0.5)),
            },
            template(
                K::Engagement,
                P::Medium,
                U::Medium,
                "Improve Content Sentiment",
                "Negative sentiment detected. Suggestions:",
                &[
                    "Add more positive language",
                    "Include solutions or benefits",
                    "Use more empathetic tone",
                    "Add visual content to balance text",
                    "Consider reposting with improvements",
                ],
            ),
        ),
        Rule::new(
            "low_confidence",
            Guard::Confidence {
                bound: Bound::below(0.3),
            },
            template(
                K::Clarity,
                P::Medium,
                U::Low,
                "Improve Content Clarity",
                "Sentiment is ambiguous. Consider:",
                &[
                    "Use clearer, more direct language",
                    "Add context to clarify intent",
                    "Use stronger emotional indicators",
                    "Consider adding emojis or visual cues",
                    "Test with focus group before posting",
                ],
            ),
        ),
        Rule::new(
            "strong_positive",
            Guard::Sentiment {
                classification: Classification::Positive,
                compound: Some(Bound::above(0.5)),
                magnitude: None,
            },
            template(
                K::Optimization,
                P::Low,
                U::Low,
                "Leverage Positive Sentiment",
                "Strong positive sentiment. Opportunities:",
                &[
                    "Boost this content for wider reach",
                    "Use as template for future content",
                    "Engage with positive comments",
                    "Share on multiple platforms",
                    "Create similar content to maintain momentum",
                ],
            ),
        ),
        Rule::new(
            "too_long",
            Guard::word_count(Bound::above(300.0)),
            template(
                K::Structure,
                P::Low,
                U::Low,
                "Optimize Content Length",
                "Content is quite long. Consider:",
                &[
                    "Break into multiple posts",
                    "Add visual breaks (images, videos)",
                    "Use bullet points for key messages",
                    "Create a series instead of one long post",
                    "Test shorter versions for better engagement",
                ],
            ),
        ),
        Rule::new(
            "too_short",
            Guard::word_count(Bound::below(20.0)),
            template(
                K::Structure,
                P::Medium,
                U::Medium,
                "Enhance Content Depth",
                "Content is very short. Consider:",
                &[
                    "Add more context or details",
                    "Include call-to-action",
                    "Add relevant hashtags",
                    "Provide value or insight",
                    "Engage audience with questions",
                ],
            ),
        ),
        Rule::new(
            "hashtag_strategy",
            Guard::Hashtags { present: true },
            template(
                K::Optimization,
                P::Low,
                U::Low,
                "Hashtag Strategy",
                "Content includes hashtags. Optimize:",
                &[
                    "Use 3-5 relevant hashtags (not too many)",
                    "Mix popular and niche hashtags",
                    "Research trending hashtags in your niche",
                    "Create branded hashtags for campaigns",
                    "Monitor hashtag performance",
                ],
            ),
        ),
        Rule::new(
            "add_hashtags",
            Guard::all([no_hashtags(), Guard::word_count(Bound::above(50.0))]),
            template(
                K::Optimization,
                P::Medium,
                U::Medium,
                "Add Hashtags",
                "Consider adding hashtags to increase discoverability",
                &[
                    "Research relevant hashtags",
                    "Add 3-5 strategic hashtags",
                    "Use platform-specific best practices",
                    "Avoid over-hashtagging",
                ],
            ),
        ),
        Rule::new(
            "facebook_length",
            on_platform(Platform::Facebook, Guard::word_count(Bound::above(5000.0))),
            template(
                K::Platform,
                P::High,
                U::Medium,
                "Facebook Post Length",
                "Content is very long for Facebook. Optimal length is 40-80 characters for engagement",
                &[
                    "Consider shortening to 40-80 characters for better engagement",
                    "Use Facebook Notes for longer content",
                    "Break into multiple posts with a series",
                    "Add engaging visuals to maintain attention",
                ],
            ),
        ),
        Rule::new(
            "facebook_engagement",
            on_platform(Platform::Facebook, Guard::word_count(Bound::below(10.0))),
            template(
                K::Platform,
                P::Low,
                U::Low,
                "Facebook Post Engagement",
                "Very short posts may have lower engagement on Facebook",
                &[
                    "Add more context or value",
                    "Include a call-to-action",
                    "Ask a question to encourage comments",
                    "Add relevant hashtags (1-2 recommended)",
                ],
            ),
        ),
        Rule::new(
            "instagram_caption_limit",
            on_platform(Platform::Instagram, Guard::word_count(Bound::above(2200.0))),
            template(
                K::Platform,
                P::High,
                U::High,
                "Instagram Caption Limit",
                "Content exceeds Instagram caption limit (2,200 characters)",
                &[
                    "Shorten to 2,200 characters or less",
                    "Use Instagram Notes for additional context",
                    "Break into multiple posts",
                    "Move detailed content to Instagram Stories or Reels",
                ],
            ),
        ),
        Rule::new(
            "instagram_caption_length",
            on_platform(
                Platform::Instagram,
                Guard::word_count(Bound::above(125.0).at_most(2200.0)),
            ),
            template(
                K::Platform,
                P::Low,
                U::Low,
                "Instagram Caption Length",
                "Long captions may reduce engagement. Optimal is 125 characters or less",
                &[
                    "Consider shortening caption",
                    "Use line breaks for readability",
                    "Put key message in first 125 characters",
                    "Add relevant hashtags (5-10 recommended)",
                ],
            ),
        ),
        Rule::new(
            "instagram_hashtags",
            on_platform(Platform::Instagram, no_hashtags()),
            template(
                K::Platform,
                P::Medium,
                U::Medium,
                "Instagram Hashtags",
                "Hashtags are crucial for Instagram discoverability",
                &[
                    "Add 5-10 relevant hashtags",
                    "Mix popular and niche hashtags",
                    "Use branded hashtags for campaigns",
                    "Research trending hashtags in your niche",
                ],
            ),
        ),
        Rule::new(
            "youtube_description",
            on_platform(Platform::Youtube, Guard::word_count(Bound::below(100.0))),
            template(
                K::Platform,
                P::Medium,
                U::Medium,
                "YouTube Description Optimization",
                "YouTube descriptions should be comprehensive for SEO",
                &[
                    "Expand description with more details",
                    "Include relevant keywords for SEO",
                    "Add timestamps for longer videos",
                    "Include links to related content",
                    "Add call-to-action (subscribe, like, comment)",
                ],
            ),
        ),
        Rule::new(
            "youtube_hashtags",
            on_platform(
                Platform::Youtube,
                Guard::all([no_hashtags(), Guard::word_count(Bound::above(50.0))]),
            ),
            template(
                K::Platform,
                P::Low,
                U::Low,
                "YouTube Hashtags",
                "Consider adding hashtags to YouTube description",
                &[
                    "Add 3-5 relevant hashtags",
                    "Place hashtags at the end of description",
                    "Use hashtags that match your video topic",
                    "Research trending hashtags in your niche",
                ],
            ),
        ),
        Rule::new(
            "negative_sentences",
            Guard::NegativeSentences { min_sentences: 2 },
            Template {
                details: Some(DetailSource::NegativeSentences {
                    limit: MAX_QUOTED_SENTENCES,
                }),
                ..template(
                    K::ContentImprovement,
                    P::Medium,
                    U::Medium,
                    "Review Negative Sentences",
                    "Found {negative_count} negative sentence(s). Consider revising:",
                    &[
                        "Review and rephrase negative sentences",
                        "Add positive framing",
                        "Use solution-focused language",
                        "Balance with positive statements",
                    ],
                )
            },
        ),
    ]
}
