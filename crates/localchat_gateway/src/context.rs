//! Prompt builder: recent turns rendered as a labeled transcript plus a generation cue.

use std::fmt::Write;

use localchat_core::Turn;

/// Exchanges (user + assistant) kept as context by default.
pub const DEFAULT_MAX_PAIRS: usize = 2;

/// The most recent `2 * max_pairs` turns, oldest first.
pub fn context_window(history: &[Turn], max_pairs: usize) -> &[Turn] {
    let keep = max_pairs.saturating_mul(2);
    &history[history.len().saturating_sub(keep)..]
}

/// Build a single-turn completion prompt from history and the new utterance.
///
/// `utterance` is expected to be non-blank; callers trim and reject empty
/// input before getting here.
pub fn build_prompt(history: &[Turn], utterance: &str, max_pairs: usize) -> String {
    let window = context_window(history, max_pairs);
    let mut prompt = String::new();

    if !window.is_empty() {
        prompt.push_str("Previous conversation:\n");
        for turn in window {
            // Writing to a String cannot fail.
            let _ = writeln!(prompt, "{}: {}", turn.role().label(), turn.text());
        }
        prompt.push('\n');
    }

    let _ = write!(prompt, "User: {utterance}\nAssistant:");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(n: usize) -> Vec<Turn> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    Turn::user(format!("question {i}"))
                } else {
                    Turn::assistant(format!("answer {i}"))
                }
            })
            .collect()
    }

    #[test]
    fn test_empty_history() {
        let prompt = build_prompt(&[], "hello", DEFAULT_MAX_PAIRS);
        assert_eq!(prompt, "User: hello\nAssistant:");
    }

    #[test]
    fn test_short_history_is_rendered_in_order() {
        let turns = vec![Turn::user("hi"), Turn::assistant("hello! how can I help?")];
        let prompt = build_prompt(&turns, "tell me a joke", DEFAULT_MAX_PAIRS);
        assert_eq!(
            prompt,
            "Previous conversation:\n\
             User: hi\n\
             Assistant: hello! how can I help?\n\
             \n\
             User: tell me a joke\nAssistant:"
        );
    }

    #[test]
    fn test_drops_oldest_turns() {
        let turns = history(7);
        let prompt = build_prompt(&turns, "next", DEFAULT_MAX_PAIRS);

        for dropped in ["question 0", "answer 1", "question 2"] {
            assert!(!prompt.contains(dropped), "{dropped} should be dropped");
        }
        let kept: Vec<_> = ["answer 3", "question 4", "answer 5", "question 6"]
            .iter()
            .map(|t| prompt.find(t).expect("recent turn kept"))
            .collect();
        assert!(kept.windows(2).all(|w| w[0] < w[1]), "chronological order");
        assert!(prompt.ends_with("User: next\nAssistant:"));
    }

    #[test]
    fn test_window_never_exceeds_bound() {
        for max_pairs in 0..4 {
            for len in 0..12 {
                let turns = history(len);
                let window = context_window(&turns, max_pairs);
                assert_eq!(window.len(), len.min(2 * max_pairs));
                if let (Some(last), Some(kept)) = (turns.last(), window.last()) {
                    assert_eq!(last.id(), kept.id(), "newest turn is never dropped");
                }

                let prompt = build_prompt(&turns, "u", max_pairs);
                let rendered = prompt
                    .lines()
                    .filter(|l| l.starts_with("User: ") || l.starts_with("Assistant: "))
                    .count();
                // The final "User: u" line is the cue, not context.
                assert_eq!(rendered - 1, window.len());
            }
        }
    }

    #[test]
    fn test_zero_pairs_means_no_context() {
        let turns = history(4);
        assert_eq!(build_prompt(&turns, "solo", 0), "User: solo\nAssistant:");
    }

    #[test]
    fn test_deterministic() {
        let turns = history(5);
        let a = build_prompt(&turns, "same input", DEFAULT_MAX_PAIRS);
        let b = build_prompt(&turns, "same input", DEFAULT_MAX_PAIRS);
        assert_eq!(a, b);
    }
}
