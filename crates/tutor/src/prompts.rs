//! Prompt templates.
//!
//! All of the gateway's behaviour lives in these strings: the output formats
//! below are instructions to the model, not grammars the gateway checks.

use crate::{QuestionCount, Seconds};

/// System turn for quiz generation.
pub const QUIZ_SYSTEM_PROMPT: &str = "You're a quiz generation assistant.";

/// System turn for quiz evaluation.
pub const EVALUATION_SYSTEM_PROMPT: &str = "You are a tutor that gives quiz feedback.";

/// Phrase used in the explain persona when the student states no goal.
const UNSTATED_GOAL: &str = "to understand this topic";

/// Teaching persona for `/explain`, parameterised by the student's goal.
pub fn explain_system_prompt(goal: Option<&str>) -> String {
    let goal = goal
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .unwrap_or(UNSTATED_GOAL);

    format!(
        "You are an expert teacher who makes learning fun, simple, and motivating. \
         Your job is to explain the student's topic in a step-by-step, clear, and engaging way. \
         The student’s goal is: '{goal}'. Use relatable examples and a friendly tone like a teacher \
         who truly cares about the student’s success."
    )
}

/// User turn for quiz generation: the notes plus the multiple-choice format.
pub fn quiz_prompt(notes: &str, num_questions: QuestionCount) -> String {
    format!(
        "
You are an AI quiz generator.
Based on the following content:

{notes}

Generate {num_questions} multiple-choice questions.
Format:
- Question N: [difficulty]
- New line for question
- A) ...
  B) ...
  C) ...
  D) ...
  E) ...
- Answer: X
"
    )
}

/// User turn for quiz evaluation: grading instructions, timings, answers, quiz.
pub fn evaluation_prompt(
    quiz_text: &str,
    user_answers: &str,
    time_per_question: Seconds,
    total_time_taken: Seconds,
) -> String {
    format!(
        "
Evaluate the quiz below. For each question, show:
- Question
- Correct answer
- User answer
- Correct/Incorrect
- Explanation
Then summary:
• 🧠 Total Questions
• ✅ Correct Answers
• ❌ Incorrect Answers
• ⏱️ Time per Question: {time_per_question}
• ⌛ Total Time Taken: {total_time_taken}
• 📈 Accuracy
• 🌟 Feedback

User Answers:
{user_answers}

Quiz:
{quiz_text}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_prompt_embeds_the_goal() {
        let prompt = explain_system_prompt(Some("pass my biology exam"));
        assert!(prompt.contains("The student’s goal is: 'pass my biology exam'."));
        assert!(prompt.ends_with("cares about the student’s success."));
    }

    #[test]
    fn explain_prompt_without_goal_uses_neutral_wording() {
        for goal in [None, Some(""), Some("  ")] {
            let prompt = explain_system_prompt(goal);
            assert!(prompt.contains("'to understand this topic'"));
            assert!(!prompt.contains("None"));
        }
    }

    #[test]
    fn quiz_prompt_embeds_notes_and_count() {
        let prompt = quiz_prompt("Photosynthesis", QuestionCount::new(3));
        assert!(prompt.starts_with("\nYou are an AI quiz generator.\n"));
        assert!(prompt.contains("\n\nPhotosynthesis\n\n"));
        assert!(prompt.contains("Generate 3 multiple-choice questions."));
        assert!(prompt.contains("  E) ..."));
        assert!(prompt.contains("- Answer: X"));
    }

    #[test]
    fn evaluation_prompt_embeds_timings_answers_and_quiz() {
        let prompt = evaluation_prompt(
            "Question 1: [easy]\nWhat is 2+2?",
            "1: B",
            Seconds::new(45),
            Seconds::new(200),
        );
        assert!(prompt.starts_with("\nEvaluate the quiz below."));
        assert!(prompt.contains("Time per Question: 45 sec"));
        assert!(prompt.contains("Total Time Taken: 200 sec"));
        assert!(prompt.contains("User Answers:\n1: B\n"));
        assert!(prompt.ends_with("Quiz:\nQuestion 1: [easy]\nWhat is 2+2?\n"));
    }
}
