//! Keystroke validation against the target sentence.
//!
//! The driver hands over the whole input buffer on every change and mirrors
//! the accepted text back into it. The policy keeps the buffer within one
//! trailing mistake of the target: a single wrong character rides along until
//! it is corrected, anything past that is refused wholesale.

/// Outcome of validating one input-buffer change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Keystroke {
    /// The buffer becomes the new typed text. `mistake` is set when the
    /// change appended a character that does not match the target.
    Accepted { text: String, mistake: bool },
    /// The buffer ran more than one character past the correct prefix
    /// (key held down, paste, typing through an error). The previously
    /// typed text stands.
    Stalled,
}

/// Chars in the run of leading characters of `input` that match `target`.
pub fn match_len(input: &str, target: &str) -> usize {
    input
        .chars()
        .zip(target.chars())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Classify `raw` against `target`, given the previously accepted text.
/// Deterministic and side-effect free; the session layer turns the result
/// into state updates and events.
pub fn validate(raw: &str, target: &str, previous: &str) -> Keystroke {
    let raw_len = raw.chars().count();
    let matched = match_len(raw, target);

    if raw_len > matched + 1 {
        return Keystroke::Stalled;
    }

    let grew = raw_len > previous.chars().count();
    let mistake = grew && raw.chars().last() != target.chars().nth(raw_len - 1);

    Keystroke::Accepted {
        text: raw.to_string(),
        mistake,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted(text: &str, mistake: bool) -> Keystroke {
        Keystroke::Accepted {
            text: text.to_string(),
            mistake,
        }
    }

    #[test]
    fn test_correct_prefixes_accepted_without_error() {
        let target = "the quick brown fox";

        let mut previous = String::new();
        for end in 1..=target.chars().count() {
            let prefix: String = target.chars().take(end).collect();
            assert_eq!(
                validate(&prefix, target, &previous),
                accepted(&prefix, false)
            );
            previous = prefix;
        }
    }

    #[test]
    fn test_single_trailing_mistake_rides_along() {
        assert_eq!(validate("cx", "cat", "c"), accepted("cx", true));
    }

    #[test]
    fn test_typing_past_a_mistake_stalls() {
        assert_eq!(validate("cxy", "cat", "cx"), Keystroke::Stalled);
    }

    #[test]
    fn test_paste_ahead_stalls() {
        assert_eq!(validate("cat dxg", "cat dog", ""), Keystroke::Stalled);
    }

    #[test]
    fn test_multi_char_growth_of_correct_text_accepted() {
        assert_eq!(validate("cat", "cat dog", "c"), accepted("cat", false));
    }

    #[test]
    fn test_backspace_always_accepted() {
        assert_eq!(validate("c", "cat", "cx"), accepted("c", false));
        assert_eq!(validate("", "cat", "c"), accepted("", false));
    }

    #[test]
    fn test_empty_input_accepted() {
        assert_eq!(validate("", "cat", ""), accepted("", false));
    }

    #[test]
    fn test_replacement_at_same_length_is_not_a_mistake() {
        // Length did not grow, so no freshly appended character to blame.
        assert_eq!(validate("cx", "cat", "cb"), accepted("cx", false));
    }

    #[test]
    fn test_match_len_counts_leading_run_only() {
        assert_eq!(match_len("", "cat"), 0);
        assert_eq!(match_len("ca", "cat"), 2);
        assert_eq!(match_len("cxt", "cat"), 1);
        assert_eq!(match_len("cat dog", "cat"), 3);
    }

    #[test]
    fn test_accented_targets_compare_by_char() {
        let target = "el veloz murciélago";

        assert_eq!(match_len("el veloz murcié", target), 15);
        assert_eq!(
            validate("el veloz murcié", target, "el veloz murci"),
            accepted("el veloz murcié", false)
        );
        assert_eq!(
            validate("el veloz murcie", target, "el veloz murci"),
            accepted("el veloz murcie", true)
        );
    }

    #[test]
    fn test_one_char_past_target_end_is_a_mistake_not_a_stall() {
        assert_eq!(validate("catx", "cat", "cat"), accepted("catx", true));
        assert_eq!(validate("catxy", "cat", "catx"), Keystroke::Stalled);
    }
}
