//! Heuristic splitting of a free-text task into ordered steps.
//!
//! Whitespace runs in the task collapse to single spaces first, so line breaks
//! act like spaces. The task is then cut at sentence punctuation, then at sequencing
//! words (`then`, `after that`, `next`). A single run-on clause falls back to
//! comma splitting. If fewer than two usable fragments remain, a fixed
//! five-step template is used instead.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    coerce::normalize_text_items,
    error::{PlannerError, Result},
};

/// Default number of steps returned when the caller does not say.
pub const DEFAULT_MAX_STEPS: i64 = 6;

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;\n.]+").expect("sentence pattern is valid"));

static SEQUENCE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:then|after that|next)\b").expect("sequence pattern is valid")
});

const FRAGMENT_TRIM: &[char] = &[' ', ',', ':', '-'];

/// Splits `task` into at most `max_steps` ordered, unique, non-empty steps.
///
/// # Errors
///
/// Returns [`PlannerError::InvalidInput`] when `max_steps` is not positive or
/// `task` is blank.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::decompose::decompose_task;
///
/// let steps = decompose_task("Inspect code then implement plan tools then run tests", 4)?;
/// assert_eq!(steps, ["Inspect code", "implement plan tools", "run tests"]);
/// # Ok::<(), waypoint_core::PlannerError>(())
/// ```
pub fn decompose_task(task: &str, max_steps: i64) -> Result<Vec<String>> {
    if max_steps <= 0 {
        return Err(PlannerError::invalid_input("max_steps").with_reason("must be > 0"));
    }
    let normalized = task.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return Err(PlannerError::invalid_input("task").with_reason("must not be empty"));
    }
    let limit = usize::try_from(max_steps).unwrap_or(usize::MAX);

    let mut fragments: Vec<&str> = SENTENCE_BREAK
        .split(&normalized)
        .flat_map(|sentence| SEQUENCE_WORD.split(sentence))
        .map(|fragment| fragment.trim_matches(FRAGMENT_TRIM))
        .filter(|fragment| !fragment.is_empty())
        .collect();

    if fragments.len() < 2 && normalized.contains(',') {
        fragments.extend(
            normalized
                .split(',')
                .map(|fragment| fragment.trim_matches(FRAGMENT_TRIM))
                .filter(|fragment| !fragment.is_empty()),
        );
    }

    let mut steps = normalize_text_items(fragments);
    if steps.len() >= 2 {
        steps.truncate(limit);
        return Ok(steps);
    }

    let mut fallback = fallback_steps(&normalized);
    fallback.truncate(limit);
    Ok(fallback)
}

fn fallback_steps(task: &str) -> Vec<String> {
    vec![
        format!("Clarify acceptance criteria for: {task}"),
        "Inspect the relevant code and dependencies".to_string(),
        "Implement the required code changes".to_string(),
        "Validate behavior with tests and checks".to_string(),
        "Summarize results and remaining follow-ups".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_sequence_words() {
        let steps = decompose_task("Inspect code then implement plan tools then run tests", 4)
            .unwrap();
        assert!((2..=4).contains(&steps.len()));
        assert_eq!(steps[0], "Inspect code");
        assert_eq!(steps[2], "run tests");
    }

    #[test]
    fn test_splits_on_sentences_and_trims_punctuation() {
        let steps = decompose_task("Read the docs. - Write notes;\nAfter that: ship it", 6).unwrap();
        assert_eq!(steps, ["Read the docs", "Write notes", "ship it"]);
    }

    #[test]
    fn test_comma_fallback_for_single_clause() {
        let steps = decompose_task("parse input, validate it, store it", 6).unwrap();
        // The whole clause survives as the first fragment, followed by the
        // comma-separated parts.
        assert_eq!(
            steps,
            [
                "parse input, validate it, store it",
                "parse input",
                "validate it",
                "store it"
            ]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let steps = decompose_task("Run tests. Run tests. Deploy", 6).unwrap();
        assert_eq!(steps, ["Run tests", "Deploy"]);
    }

    #[test]
    fn test_truncates_to_max_steps() {
        let steps = decompose_task("a. b. c. d. e", 2).unwrap();
        assert_eq!(steps, ["a", "b"]);
    }

    #[test]
    fn test_template_for_single_fragment() {
        let steps = decompose_task("  Refactor   the\nparser  ", 6).unwrap();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0], "Clarify acceptance criteria for: Refactor the parser");
        assert_eq!(steps[4], "Summarize results and remaining follow-ups");

        let short = decompose_task("Refactor the parser", 3).unwrap();
        assert_eq!(short.len(), 3);
        assert_eq!(short[2], "Implement the required code changes");
    }

    #[test]
    fn test_sequence_words_need_word_boundaries() {
        // "Nextcloud" and "Athens" must not be split.
        let steps = decompose_task("Configure Nextcloud in Athens", 6).unwrap();
        assert_eq!(steps.len(), 5);
    }

    #[test]
    fn test_rejects_bad_input() {
        let err = decompose_task("task", 0).unwrap_err();
        assert_eq!(err.to_string(), "max_steps must be > 0");

        let err = decompose_task("   ", 3).unwrap_err();
        assert_eq!(err.to_string(), "task must not be empty");
    }
}
