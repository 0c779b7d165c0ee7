//! Instruction rendering for the question generator.

/// Render the instruction block sent to the text generator.
///
/// The `Format:` section is a syntactic contract: the response parser
/// splits on these exact markers, so the grammar here must stay in lockstep
/// with [`crate::quiz::parse::parse_questions`].
pub fn build_prompt(normalized_text: &str, num_questions: usize) -> String {
    format!(
        "You are an experienced course instructor. Based on the following content, \
         generate {num_questions} high-quality, conceptual multiple-choice questions (MCQs) for students. \
         Each question should have 4 options (A, B, C, D), only one correct answer, and a short explanation. \
         Do NOT use fill-in-the-blank or word replacement. Make the questions conceptual and relevant to the content. \
         Format:\n\
         Q: <question>\n\
         A) <option1>\n\
         B) <option2>\n\
         C) <option3>\n\
         D) <option4>\n\
         Answer: <A/B/C/D>\n\
         Explanation: <short explanation>\n\
         Content:\n\
         {normalized_text}\n"
    )
}
