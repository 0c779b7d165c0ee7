//! Free-text response parsing.
//!
//! The generator is asked to follow a line-oriented grammar (see
//! [`crate::quiz::prompt`]), but nothing guarantees it does. Parsing is
//! strict per block and forgiving across blocks: a block that deviates from
//! the grammar is dropped whole, never partially salvaged, and never aborts
//! the batch. Only a fully empty result is surfaced to callers, as a
//! generation failure rather than an error here.

use crate::quiz::{QuestionRecord, OPTION_COUNT};

/// Question blocks start with this marker at a line boundary.
const QUESTION_MARKER: &str = "\nQ: ";

const OPTION_LABELS: [&str; OPTION_COUNT] = ["A)", "B)", "C)", "D)"];
const ANSWER_PREFIX: &str = "Answer:";
const EXPLANATION_PREFIX: &str = "Explanation:";

/// Parse a generator reply into validated question records, in source order.
///
/// Any preamble before the first question marker is discarded. The result
/// may be shorter than requested, or empty.
pub fn parse_questions(response: &str) -> Vec<QuestionRecord> {
    let padded = format!("\n{response}");
    padded
        .split(QUESTION_MARKER)
        .skip(1)
        .filter_map(parse_block)
        .collect()
}

/// Parse one block: stem on the first line, up to four candidate option
/// lines directly after it, answer and explanation lines anywhere below.
fn parse_block(block: &str) -> Option<QuestionRecord> {
    let lines: Vec<&str> = block.trim().lines().map(str::trim_end).collect();
    let prompt = lines.first()?.trim();

    let mut options: Vec<String> = Vec::with_capacity(OPTION_COUNT);
    for line in lines.iter().skip(1).take(OPTION_COUNT) {
        // A non-option line in the candidate window is skipped, not fatal.
        if let Some(text) = strip_option_label(line) {
            options.push(text.to_string());
        }
    }
    if options.len() != OPTION_COUNT {
        return None;
    }

    let answer = lines.iter().find_map(|l| l.strip_prefix(ANSWER_PREFIX))?;
    let explanation = lines
        .iter()
        .find_map(|l| l.strip_prefix(EXPLANATION_PREFIX))?;

    // A→0 through D→3; anything else drops the block.
    let correct_index = match answer.trim() {
        "A" => 0,
        "B" => 1,
        "C" => 2,
        "D" => 3,
        _ => return None,
    };

    QuestionRecord::new(prompt, options, correct_index, explanation.trim())
}

fn strip_option_label(line: &str) -> Option<&str> {
    OPTION_LABELS
        .iter()
        .find_map(|label| line.strip_prefix(label))
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "Q: What is phishing?\n\
        A) A hardware fault\n\
        B) A social engineering attack\n\
        C) A routing protocol\n\
        D) A compression scheme\n\
        Answer: B\n\
        Explanation: Phishing tricks people into revealing credentials.\n";

    #[test]
    fn well_formed_block_parses() {
        let questions = parse_questions(WELL_FORMED);
        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.prompt(), "What is phishing?");
        assert_eq!(q.correct_index(), 1);
        assert_eq!(q.options()[1], "A social engineering attack");
        assert_eq!(
            q.explanation(),
            "Phishing tricks people into revealing credentials."
        );
    }

    #[test]
    fn preamble_before_first_marker_is_discarded() {
        let response = format!("Here are your questions:\n{WELL_FORMED}");
        assert_eq!(parse_questions(&response).len(), 1);
    }

    #[test]
    fn marker_must_sit_at_a_line_boundary() {
        let response = "Prefix Q: not a real question\nAnswer: A\n";
        assert!(parse_questions(response).is_empty());
    }

    #[test]
    fn block_with_three_options_is_dropped() {
        let response = "Q: Short one?\n\
            A) one\n\
            B) two\n\
            C) three\n\
            Answer: A\n\
            Explanation: Not enough options.\n";
        assert!(parse_questions(response).is_empty());
    }

    #[test]
    fn block_missing_answer_or_explanation_is_dropped() {
        let no_answer = WELL_FORMED.replace("Answer: B\n", "");
        assert!(parse_questions(&no_answer).is_empty());
        let no_explanation = "Q: X?\nA) a\nB) b\nC) c\nD) d\nAnswer: A\n";
        assert!(parse_questions(no_explanation).is_empty());
    }

    #[test]
    fn out_of_range_answer_label_drops_the_block() {
        for label in ["E", "AB", "1", ""] {
            let response = WELL_FORMED.replace("Answer: B", &format!("Answer: {label}"));
            assert!(parse_questions(&response).is_empty(), "label {label:?}");
        }
    }

    #[test]
    fn stray_line_consumes_an_option_slot() {
        // The stray line is skipped rather than aborting the block, but the
        // candidate window stays at four lines, so D) falls outside it.
        let response = "Q: X?\n\
            A) a\n\
            (note)\n\
            B) b\n\
            C) c\n\
            D) d\n\
            Answer: A\n\
            Explanation: e\n";
        assert!(parse_questions(response).is_empty());
    }

    #[test]
    fn mixed_good_and_malformed_blocks_yield_only_the_good_one() {
        let malformed = "Q: Broken?\nA) a\nB) b\nAnswer: A\nExplanation: e\n";
        let response = format!("{WELL_FORMED}{malformed}");
        let questions = parse_questions(&response);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].prompt(), "What is phishing?");
    }

    #[test]
    fn every_emitted_record_is_well_shaped() {
        let response = format!(
            "{WELL_FORMED}Q: Another?\nA) w\nB) x\nC) y\nD) z\nAnswer: D\nExplanation: because\n"
        );
        for q in parse_questions(&response) {
            assert_eq!(q.options().len(), OPTION_COUNT);
            assert!(q.correct_index() < OPTION_COUNT);
            assert!(!q.prompt().is_empty());
            assert!(!q.explanation().is_empty());
        }
    }
}
