//! Rule-based sentence segmentation

use crate::collaborator::SentenceSegmenter;

/// Abbreviations whose trailing period does not end a sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "inc", "ltd",
    "co", "approx", "a.m", "p.m",
];

/// Splits on terminal punctuation followed by whitespace, and on blank lines.
///
/// Runs of terminators (`?!`, `...`) and closing quotes or brackets stay
/// attached to the sentence they end.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedSegmenter;

impl RuleBasedSegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl SentenceSegmenter for RuleBasedSegmenter {
    fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (_, c) = chars[i];

            if c == '\n' && chars.get(i + 1).is_some_and(|(_, next)| *next == '\n') {
                push_trimmed(&mut sentences, &text[start..chars[i].0]);
                i += 2;
                start = chars.get(i).map_or(text.len(), |(pos, _)| *pos);
                continue;
            }

            if matches!(c, '.' | '!' | '?') {
                let mut end = i + 1;
                while end < chars.len() && is_trailing(chars[end].1) {
                    end += 1;
                }
                let at_boundary = end == chars.len() || chars[end].1.is_whitespace();
                if at_boundary && !(c == '.' && ends_with_abbreviation(&text[start..chars[i].0])) {
                    let end_byte = chars.get(end).map_or(text.len(), |(pos, _)| *pos);
                    push_trimmed(&mut sentences, &text[start..end_byte]);
                    start = end_byte;
                }
                i = end;
                continue;
            }

            i += 1;
        }

        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }
}

fn is_trailing(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '"' | '\'' | ')' | ']' | '”' | '’')
}

fn ends_with_abbreviation(fragment: &str) -> bool {
    let Some(last) = fragment.split_whitespace().last() else {
        return false;
    };
    let word = last.trim_start_matches(|c: char| !c.is_alphanumeric());
    // single capitals are initials ("J. Smith")
    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
        || (word.chars().count() == 1 && word.chars().all(char::is_uppercase))
}

fn push_trimmed(sentences: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<String> {
        RuleBasedSegmenter::new().split(text)
    }

    #[test]
    fn test_basic_split() {
        assert_eq!(
            split("Great product. Terrible support. Will not buy again."),
            vec!["Great product.", "Terrible support.", "Will not buy again."]
        );
    }

    #[test]
    fn test_mixed_terminators() {
        assert_eq!(
            split("I absolutely love this! #amazing #great"),
            vec!["I absolutely love this!", "#amazing #great"]
        );
        assert_eq!(split("Really?! Yes... really."), vec!["Really?!", "Yes...", "really."]);
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        assert_eq!(
            split("Dr. Smith arrived at 5 p.m. today. He left."),
            vec!["Dr. Smith arrived at 5 p.m. today.", "He left."]
        );
    }

    #[test]
    fn test_decimal_numbers_do_not_split() {
        assert_eq!(split("Version 2.0 is out. Try it"), vec!["Version 2.0 is out.", "Try it"]);
    }

    #[test]
    fn test_blank_lines_split() {
        assert_eq!(split("first line\n\nsecond line"), vec!["first line", "second line"]);
    }

    #[test]
    fn test_closing_quote_stays_attached() {
        assert_eq!(
            split("She said \"wow.\" Then left."),
            vec!["She said \"wow.\"", "Then left."]
        );
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(split("").is_empty());
        assert!(split("   \n\n  ").is_empty());
    }
}
