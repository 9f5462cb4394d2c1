//! Grounding prompt for document question answering.

/// Sentence the model is instructed to lead with when the context does not
/// contain the answer.
pub const FALLBACK_NOTICE: &str =
    "The answer isn't in the provided data, but here is the closest match (in point form).";

/// Builds the fixed prompt that constrains the model to the retrieved
/// context. When the answer is absent the model must still produce the
/// closest approximation in point form rather than refusing.
pub fn build_grounding_prompt(context: &str, question: &str) -> String {
    format!(
        "You are a highly knowledgeable assistant. \
         Answer the user's question based on the provided context. \
         If the answer is missing, say:\n\
         \"{FALLBACK_NOTICE}\"\n\n\
         Context:\n{context}\n\n\
         Question:\n{question}\n\n\
         Answer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_context_question_and_fallback_instruction() {
        let prompt = build_grounding_prompt("Python is a programming language.", "What is Python?");

        assert!(prompt.contains("Python is a programming language."));
        assert!(prompt.contains("What is Python?"));
        assert!(prompt.contains(FALLBACK_NOTICE));
    }

    #[test]
    fn context_precedes_question() {
        let prompt = build_grounding_prompt("ctx-marker", "question-marker");
        let ctx_pos = prompt.find("ctx-marker").unwrap();
        let question_pos = prompt.find("question-marker").unwrap();
        assert!(ctx_pos < question_pos);
    }
}
