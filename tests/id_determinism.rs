//! Property-based tests for identifier determinism guarantees

use proptest::prelude::*;
use quizsmith::quiz::{derive_id, QuestionRecord, OPTION_COUNT};

fn record(stem: &str, options: [&str; 4], correct: usize, explanation: &str) -> QuestionRecord {
    QuestionRecord::new(
        stem,
        options.iter().map(|s| s.to_string()).collect(),
        correct,
        explanation,
    )
    .unwrap()
}

#[test]
fn equal_sequences_always_share_an_id() {
    let questions = vec![
        record("What is DNS?", ["a", "b", "c", "d"], 1, "name resolution"),
        record("What is ARP?", ["w", "x", "y", "z"], 2, "address resolution"),
    ];
    assert_eq!(derive_id(&questions), derive_id(&questions.clone()));
}

#[test]
fn handcrafted_near_duplicates_get_distinct_ids() {
    let base = record("What is DNS?", ["a", "b", "c", "d"], 1, "name resolution");
    let changed_answer = record("What is DNS?", ["a", "b", "c", "d"], 2, "name resolution");
    let changed_option = record("What is DNS?", ["a", "b", "c", "e"], 1, "name resolution");
    let changed_stem = record("What is DNS ?", ["a", "b", "c", "d"], 1, "name resolution");
    let changed_explanation = record("What is DNS?", ["a", "b", "c", "d"], 1, "resolution");

    let base_id = derive_id(std::slice::from_ref(&base));
    for near in [changed_answer, changed_option, changed_stem, changed_explanation] {
        assert_ne!(base_id, derive_id(std::slice::from_ref(&near)));
    }
}

#[test]
fn option_order_is_part_of_the_content() {
    let a = record("Pick one", ["a", "b", "c", "d"], 0, "why");
    let b = record("Pick one", ["b", "a", "c", "d"], 0, "why");
    assert_ne!(
        derive_id(std::slice::from_ref(&a)),
        derive_id(std::slice::from_ref(&b))
    );
}

prop_compose! {
    fn arb_question()(
        stem in "[a-zA-Z ]{1,40}",
        options in prop::array::uniform4("[a-z0-9]{1,12}"),
        correct in 0..OPTION_COUNT,
        explanation in "[a-zA-Z ]{1,40}",
    ) -> Option<QuestionRecord> {
        QuestionRecord::new(
            stem.trim().to_string(),
            options.to_vec(),
            correct,
            explanation.trim().to_string(),
        )
    }
}

proptest! {
    #[test]
    fn derive_id_is_deterministic(questions in prop::collection::vec(arb_question(), 1..6)) {
        let questions: Vec<QuestionRecord> = questions.into_iter().flatten().collect();
        prop_assume!(!questions.is_empty());

        let first = derive_id(&questions);
        let second = derive_id(&questions);
        prop_assert_eq!(&first, &second);

        prop_assert_eq!(first.as_str().len(), 8);
        prop_assert!(first
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn reordering_questions_changes_the_id(
        questions in prop::collection::vec(arb_question(), 2..5)
    ) {
        let questions: Vec<QuestionRecord> = questions.into_iter().flatten().collect();
        prop_assume!(questions.len() >= 2);
        prop_assume!(questions.first() != questions.last());

        let mut reversed = questions.clone();
        reversed.reverse();
        prop_assert_ne!(derive_id(&questions), derive_id(&reversed));
    }
}
