//! Content-addressed quiz identifiers.
//!
//! QuizId = first 8 URL-safe base64 characters of a 128-bit blake3 digest
//! over the canonical JSON serialization of the question sequence. Object
//! keys are sorted in the canonical form; question and option order is
//! preserved, so reordering either changes the id. Collisions across
//! distinct content are an accepted risk of the truncated digest; no
//! resolution scheme exists.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::quiz::QuestionRecord;

/// Length of the printable identifier, in characters.
pub const ID_LEN: usize = 8;

/// Bytes of the blake3 digest fed into the encoding (128 bits).
const DIGEST_LEN: usize = 16;

/// Short, printable, URL-safe identifier for a stored quiz.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuizId(String);

impl QuizId {
    /// Wrap an externally supplied id, e.g. one typed on the command line.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuizId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the content-addressed id for a question sequence.
///
/// Deterministic and pure: byte-identical sequences always map to the same
/// id. The upstream contract guarantees a non-empty sequence.
pub fn derive_id(questions: &[QuestionRecord]) -> QuizId {
    let canonical = canonical_json(questions);
    let digest = blake3::hash(canonical.as_bytes());
    let encoded = URL_SAFE_NO_PAD.encode(&digest.as_bytes()[..DIGEST_LEN]);
    QuizId(encoded[..ID_LEN].to_string())
}

/// Canonical serialization: `serde_json` maps keep keys in sorted order,
/// array order is the given question/option order.
fn canonical_json(questions: &[QuestionRecord]) -> String {
    let records: Vec<serde_json::Value> = questions
        .iter()
        .map(|q| {
            json!({
                "prompt": q.prompt(),
                "options": q.options(),
                "correct_index": q.correct_index(),
                "explanation": q.explanation(),
            })
        })
        .collect();
    serde_json::Value::Array(records).to_string()
}
