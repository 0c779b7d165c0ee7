//! Integration tests for the sled-backed quiz store.

use chrono::Utc;
use quizsmith::quiz::{derive_id, parse_questions, QuizId};
use quizsmith::store::{QuizStore, SledQuizStore, StoredQuiz};
use tempfile::TempDir;

fn quiz_from_response(response: &str, source: &str) -> StoredQuiz {
    let questions = parse_questions(response);
    assert!(!questions.is_empty());
    StoredQuiz {
        id: derive_id(&questions),
        questions,
        source: Some(source.to_string()),
        created_at: Utc::now(),
    }
}

const RESPONSE: &str = "Q: What is phishing?\n\
    A) A hardware fault\n\
    B) A social engineering attack\n\
    C) A routing protocol\n\
    D) A compression scheme\n\
    Answer: B\n\
    Explanation: Phishing tricks people into revealing credentials.\n";

#[test]
fn put_then_get_round_trips_the_full_record() {
    let temp_dir = TempDir::new().unwrap();
    let store = SledQuizStore::new(temp_dir.path()).unwrap();

    let quiz = quiz_from_response(RESPONSE, "slides.pptx");
    store.put(&quiz).unwrap();

    let loaded = store.get(&quiz.id).unwrap().unwrap();
    assert_eq!(loaded.id, quiz.id);
    assert_eq!(loaded.questions, quiz.questions);
    assert_eq!(loaded.source.as_deref(), Some("slides.pptx"));
}

#[test]
fn absent_id_is_none_not_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let store = SledQuizStore::new(temp_dir.path()).unwrap();

    assert!(store.get(&QuizId::new("nosuchid")).unwrap().is_none());
}

#[test]
fn same_content_maps_to_the_same_slot() {
    let temp_dir = TempDir::new().unwrap();
    let store = SledQuizStore::new(temp_dir.path()).unwrap();

    // Regenerating identical content upserts rather than duplicating.
    let first = quiz_from_response(RESPONSE, "monday.pptx");
    let second = quiz_from_response(RESPONSE, "tuesday.pptx");
    assert_eq!(first.id, second.id);

    store.put(&first).unwrap();
    store.put(&second).unwrap();

    assert_eq!(store.list().unwrap().len(), 1);
    let loaded = store.get(&first.id).unwrap().unwrap();
    assert_eq!(loaded.source.as_deref(), Some("tuesday.pptx"));
}

#[test]
fn list_orders_newest_first() {
    let temp_dir = TempDir::new().unwrap();
    let store = SledQuizStore::new(temp_dir.path()).unwrap();

    let older = quiz_from_response(RESPONSE, "old.pptx");
    let mut newer = quiz_from_response(
        &RESPONSE.replace("What is phishing?", "What is spear phishing?"),
        "new.pptx",
    );
    newer.created_at = older.created_at + chrono::Duration::seconds(5);

    store.put(&older).unwrap();
    store.put(&newer).unwrap();

    let all = store.list().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].source.as_deref(), Some("new.pptx"));
}

#[test]
fn quizzes_survive_process_restarts() {
    let temp_dir = TempDir::new().unwrap();
    let quiz = quiz_from_response(RESPONSE, "slides.pptx");
    {
        let store = SledQuizStore::new(temp_dir.path()).unwrap();
        store.put(&quiz).unwrap();
    }

    let reopened = SledQuizStore::new(temp_dir.path()).unwrap();
    let loaded = reopened.get(&quiz.id).unwrap().unwrap();
    assert_eq!(loaded.questions.len(), 1);
}
