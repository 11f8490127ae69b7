//! Splitting paragraphs into syllables, the smallest units a line may be
//! broken between.

use super::options::LayoutOptions;
use crate::attributed::{AttributedString, Run};
use crate::style::WordBreak;
use unicode_linebreak::linebreaks;

const SOFT_HYPHEN: char = '\u{00AD}';

/// A character that allows a break after itself in any context, used to test
/// whether a break is allowed before another character
const NEUTRAL_LEAD: char = 'あ';

/// Segment every run of `string` into syllables.
///
/// Each run is split into words and whitespace; every unit goes through the
/// hyphenation callback, loses its soft hyphens, and is split further
/// according to `options.word_break`. The returned string is rebuilt from the
/// syllables, so run offsets are remapped to account for removed characters.
/// Finally, syllables that may not start a line (closing punctuation, small
/// kana, ...) are glued onto the syllable before them.
pub fn wrap_words(string: &AttributedString, options: &LayoutOptions) -> AttributedString {
    let mut text = String::with_capacity(string.len());
    let mut runs: Vec<Run> = Vec::with_capacity(string.runs.len());
    let mut syllables: Vec<String> = Vec::new();

    for run in &string.runs {
        let Some(run_text) = string.string.get(run.start..run.end) else {
            log::warn!(
                "run {}..{} does not fall on character boundaries, skipping",
                run.start,
                run.end
            );
            continue;
        };

        let start = text.len();
        for word in split_words(run_text) {
            for part in options.hyphenate(word) {
                let part = remove_soft_hyphens(&part);
                for syllable in apply_word_break(part, options.word_break) {
                    text.push_str(&syllable);
                    syllables.push(syllable);
                }
            }
        }

        if text.len() > start {
            runs.push(Run {
                start,
                end: text.len(),
                attributes: run.attributes.clone(),
            });
        }
    }

    AttributedString {
        string: text,
        runs,
        syllables: apply_line_breaking_rules(syllables),
    }
}

/// Split text into alternating runs of whitespace and non-whitespace
fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (index, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        if in_space.is_some_and(|previous| previous != space) {
            words.push(&text[start..index]);
            start = index;
        }
        in_space = Some(space);
    }

    if start < text.len() {
        words.push(&text[start..]);
    }
    words
}

fn remove_soft_hyphens(part: &str) -> String {
    part.chars().filter(|&ch| ch != SOFT_HYPHEN).collect()
}

fn is_white_space(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

fn apply_word_break(part: String, word_break: WordBreak) -> Vec<String> {
    if part.is_empty() {
        return Vec::new();
    }

    if is_white_space(&part) {
        return vec![part];
    }

    match word_break {
        WordBreak::KeepAll => vec![part],
        WordBreak::BreakAll => part.chars().map(String::from).collect(),
        WordBreak::Normal => split_by_line_break(&part),
    }
}

/// Split at every UAX #14 break opportunity
fn split_by_line_break(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut last = 0;

    for (position, _) in linebreaks(text) {
        if position > last {
            segments.push(text[last..position].to_string());
            last = position;
        }
    }

    if last < text.len() {
        segments.push(text[last..].to_string());
    }
    segments
}

/// Whether UAX #14 forbids a line from starting with `ch`
fn is_line_start_prohibited(ch: char) -> bool {
    let mut sample = String::with_capacity(8);
    sample.push(NEUTRAL_LEAD);
    sample.push(ch);

    let prohibited = linebreaks(&sample)
        .next()
        .map_or(true, |(position, _)| position > NEUTRAL_LEAD.len_utf8());
    prohibited
}

fn apply_line_breaking_rules(syllables: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(syllables.len());

    for syllable in syllables {
        let merge = match (result.last(), syllable.chars().next()) {
            (Some(previous), Some(first)) => {
                !first.is_whitespace()
                    && !is_white_space(previous)
                    && is_line_start_prohibited(first)
            }
            _ => false,
        };

        match result.last_mut() {
            Some(previous) if merge => previous.push_str(&syllable),
            _ => result.push(syllable),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributed::{Attributes, Fragment};

    fn single_run(text: &str) -> AttributedString {
        AttributedString::new(text, Attributes::default())
    }

    fn syllables(text: &str, options: &LayoutOptions) -> Vec<String> {
        wrap_words(&single_run(text), options).syllables
    }

    #[test]
    fn empty_string_has_no_syllables() {
        let result = wrap_words(&AttributedString::default(), &LayoutOptions::default());
        assert!(result.syllables.is_empty());
        assert_eq!(result.string, "");
        assert!(result.runs.is_empty());
    }

    #[test]
    fn words_and_spaces_become_syllables() {
        let result = wrap_words(&single_run("Lorem ipsum"), &LayoutOptions::default());
        assert_eq!(result.syllables, vec!["Lorem", " ", "ipsum"]);
        assert_eq!(result.runs.len(), 1);
        assert_eq!((result.runs[0].start, result.runs[0].end), (0, 11));
    }

    #[test]
    fn runs_are_segmented_independently() {
        let string = AttributedString::from_fragments([
            Fragment::new("Lorem", Attributes::default()),
            Fragment::new(" ipsum", Attributes::default()),
        ]);
        let result = wrap_words(&string, &LayoutOptions::default());
        assert_eq!(result.syllables, vec!["Lorem", " ", "ipsum"]);
        assert_eq!((result.runs[0].start, result.runs[0].end), (0, 5));
        assert_eq!((result.runs[1].start, result.runs[1].end), (5, 11));
    }

    #[test]
    fn callback_sees_every_unit_and_can_rewrite_it() {
        let options = LayoutOptions::default().with_hyphenation_callback(|word| {
            if word == " " {
                vec![word.to_string()]
            } else {
                vec![format!("{word}o")]
            }
        });
        let result = wrap_words(&single_run("Lorem ipsum"), &options);
        assert_eq!(result.syllables, vec!["Loremo", " ", "ipsumo"]);
        assert_eq!(result.runs[0].end, 13);
    }

    #[test]
    fn soft_hyphens_are_removed_and_runs_shrink() {
        let string = AttributedString::from_fragments([
            Fragment::new("hy\u{AD}phen", Attributes::default()),
            Fragment::new(" ok", Attributes::default()),
        ]);
        let options = LayoutOptions::default().with_hyphenation_callback(|word| {
            word.split_inclusive(SOFT_HYPHEN).map(str::to_string).collect()
        });
        let result = wrap_words(&string, &options);

        assert_eq!(result.string, "hyphen ok");
        assert_eq!(result.syllables, vec!["hy", "phen", " ", "ok"]);
        assert_eq!((result.runs[0].start, result.runs[0].end), (0, 6));
        assert_eq!((result.runs[1].start, result.runs[1].end), (6, 9));
    }

    #[test]
    fn syllables_join_back_into_the_string() {
        let text = "The quick brown fox, 本当に長いテキスト。 jumps!";
        for word_break in [WordBreak::Normal, WordBreak::BreakAll, WordBreak::KeepAll] {
            let options = LayoutOptions::default().with_word_break(word_break);
            let result = wrap_words(&single_run(text), &options);
            assert_eq!(result.syllables.concat(), text);
            assert_eq!(result.string, text);
        }
    }

    #[test]
    fn break_all_splits_every_character() {
        let options = LayoutOptions::default().with_word_break(WordBreak::BreakAll);
        assert_eq!(syllables("Hello", &options), vec!["H", "e", "l", "l", "o"]);
    }

    #[test]
    fn normal_splits_cjk_but_keeps_latin_words() {
        let options = LayoutOptions::default();
        assert_eq!(syllables("Hello世界", &options), vec!["Hello", "世", "界"]);
        assert_eq!(syllables("Hello world", &options), vec!["Hello", " ", "world"]);
        assert_eq!(
            syllables("本当に長いテキスト", &options),
            vec!["本", "当", "に", "長", "い", "テ", "キ", "ス", "ト"]
        );
        assert_eq!(syllables("한글테스트", &options), vec!["한", "글", "테", "스", "트"]);
    }

    #[test]
    fn keep_all_leaves_cjk_whole() {
        let options = LayoutOptions::default().with_word_break(WordBreak::KeepAll);
        assert_eq!(syllables("本当に長いテキスト", &options), vec!["本当に長いテキスト"]);
    }

    #[test]
    fn closing_punctuation_sticks_to_previous_syllable() {
        let options = LayoutOptions::default().with_word_break(WordBreak::BreakAll);
        assert_eq!(syllables("世界。", &options), vec!["世", "界。"]);
        assert_eq!(syllables("a, b", &options), vec!["a,", " ", "b"]);
    }

    #[test]
    fn prohibited_line_starts() {
        assert!(is_line_start_prohibited('。'));
        assert!(is_line_start_prohibited(')'));
        assert!(!is_line_start_prohibited('a'));
        assert!(!is_line_start_prohibited('世'));
    }
}
