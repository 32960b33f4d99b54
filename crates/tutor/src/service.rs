//! The tutor service: the three gateway operations.
//!
//! Each operation checks that its required text is present, renders one prompt
//! pair from [`crate::prompts`], makes a single call through the injected
//! [`CompletionProvider`], and hands back the reply text untouched.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::prompts::{
    evaluation_prompt, explain_system_prompt, quiz_prompt, EVALUATION_SYSTEM_PROMPT,
    QUIZ_SYSTEM_PROMPT,
};
use crate::{
    Completion, CompletionProvider, CompletionRequest, QuestionCount, Seconds, TutorError,
};

/// Input for quiz generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    /// Study notes the questions are drawn from.
    pub notes: String,
    /// How many questions to ask the model for.
    pub num_questions: QuestionCount,
    /// Echoed back to the client; not sent upstream.
    pub time_per_question: Seconds,
}

/// A generated quiz, exactly as the model wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuiz {
    /// Raw model output; not parsed.
    pub quiz_text: String,
    /// The allowance from the request, unchanged.
    pub time_per_question: Seconds,
}

/// Input for quiz evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    /// The quiz text previously returned by quiz generation.
    pub quiz_text: String,
    /// The student's answers, rendered as text. Not checked against the quiz.
    pub user_answers: String,
    /// Allowance per question, quoted in the summary.
    pub time_per_question: Seconds,
    /// Time the student actually spent, quoted in the summary.
    pub total_time_taken: Seconds,
}

/// Stateless front for the three operations.
///
/// Cloning is cheap; clones share the same provider handle.
#[derive(Clone)]
pub struct TutorService {
    provider: Arc<dyn CompletionProvider>,
}

impl TutorService {
    /// Creates a service that sends every completion through `provider`.
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Explains `text` in a teaching persona shaped by the student's `goal`.
    ///
    /// Fails with [`TutorError::Validation`] (`"No text provided."`) when
    /// `text` is empty.
    #[instrument(name = "tutor.explain", skip_all, fields(text_len = text.len(), has_goal = goal.is_some()))]
    pub async fn explain(&self, text: &str, goal: Option<&str>) -> Result<String, TutorError> {
        if text.is_empty() {
            return Err(TutorError::validation("No text provided."));
        }

        let request = CompletionRequest::new(explain_system_prompt(goal), text);
        self.complete(request).await
    }

    /// Generates a multiple-choice quiz from the notes.
    #[instrument(
        name = "tutor.generate_quiz",
        skip_all,
        fields(notes_len = request.notes.len(), num_questions = request.num_questions.as_u32())
    )]
    pub async fn generate_quiz(&self, request: QuizRequest) -> Result<GeneratedQuiz, TutorError> {
        if request.notes.is_empty() {
            return Err(TutorError::validation("No notes provided."));
        }

        let prompt = quiz_prompt(&request.notes, request.num_questions);
        let quiz_text = self
            .complete(CompletionRequest::new(QUIZ_SYSTEM_PROMPT, prompt))
            .await?;

        Ok(GeneratedQuiz {
            quiz_text,
            time_per_question: request.time_per_question,
        })
    }

    /// Grades the student's answers and summarises the attempt.
    #[instrument(
        name = "tutor.evaluate_quiz",
        skip_all,
        fields(quiz_len = request.quiz_text.len(), answers_len = request.user_answers.len())
    )]
    pub async fn evaluate_quiz(&self, request: EvaluationRequest) -> Result<String, TutorError> {
        if request.quiz_text.is_empty() {
            return Err(TutorError::validation("No quiz text provided."));
        }

        let prompt = evaluation_prompt(
            &request.quiz_text,
            &request.user_answers,
            request.time_per_question,
            request.total_time_taken,
        );
        self.complete(CompletionRequest::new(EVALUATION_SYSTEM_PROMPT, prompt))
            .await
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, TutorError> {
        let Completion { text, model, usage } = self.provider.complete(request).await?;

        debug!(
            model = model.as_ref().map(|m| m.as_str()),
            total_tokens = usage.map(|u| u.total().as_u64()),
            reply_len = text.len(),
            "Completion received"
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ChatMessage, CompletionError, Role};

    /// Records every request and answers with a fixed reply or failure.
    struct RecordingProvider {
        reply: Result<String, String>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl RecordingProvider {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionProvider for RecordingProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<Completion, CompletionError> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Ok(text) => Ok(Completion::text(text.clone())),
                Err(message) => Err(CompletionError::Transport {
                    message: message.clone(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn explain_sends_persona_then_text() {
        let provider = RecordingProvider::replying("R");
        let service = TutorService::new(provider.clone());

        let explanation = service
            .explain("What is osmosis?", Some("ace the test"))
            .await
            .unwrap();

        assert_eq!(explanation, "R");
        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let messages = &requests[0].messages;
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("'ace the test'"));
        assert_eq!(messages[1], ChatMessage::user("What is osmosis?"));
    }

    #[tokio::test]
    async fn explain_rejects_empty_text_without_calling_upstream() {
        let provider = RecordingProvider::replying("R");
        let service = TutorService::new(provider.clone());

        let err = service.explain("", None).await.unwrap_err();

        assert!(matches!(err, TutorError::Validation { .. }));
        assert_eq!(err.to_string(), "No text provided.");
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn generate_quiz_echoes_time_per_question() {
        let provider = RecordingProvider::replying("Q");
        let service = TutorService::new(provider.clone());

        let quiz = service
            .generate_quiz(QuizRequest {
                notes: "Photosynthesis".into(),
                num_questions: QuestionCount::new(3),
                time_per_question: Seconds::new(90),
            })
            .await
            .unwrap();

        assert_eq!(
            quiz,
            GeneratedQuiz {
                quiz_text: "Q".into(),
                time_per_question: Seconds::new(90),
            }
        );
        let messages = &provider.requests()[0].messages;
        assert_eq!(messages[0], ChatMessage::system(QUIZ_SYSTEM_PROMPT));
        assert!(messages[1].content.contains("Generate 3 multiple-choice questions."));
    }

    #[tokio::test]
    async fn evaluate_quiz_passes_reply_through_verbatim() {
        let reply = "Question 1 ✅ Correct\n\n📈 Accuracy: 100%";
        let provider = RecordingProvider::replying(reply);
        let service = TutorService::new(provider.clone());

        let result = service
            .evaluate_quiz(EvaluationRequest {
                quiz_text: "Question 1: [easy]".into(),
                user_answers: "1: A".into(),
                time_per_question: Seconds::PER_QUESTION_DEFAULT,
                total_time_taken: Seconds::TOTAL_DEFAULT,
            })
            .await
            .unwrap();

        assert_eq!(result, reply);
        let messages = &provider.requests()[0].messages;
        assert_eq!(messages[0], ChatMessage::system(EVALUATION_SYSTEM_PROMPT));
        assert!(messages[1].content.contains("Total Time Taken: 300 sec"));
    }

    #[tokio::test]
    async fn upstream_failures_surface_as_upstream_errors() {
        let service = TutorService::new(RecordingProvider::failing("connection refused"));

        let err = service
            .generate_quiz(QuizRequest {
                notes: "Cells".into(),
                num_questions: QuestionCount::default(),
                time_per_question: Seconds::PER_QUESTION_DEFAULT,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TutorError::Upstream(_)));
        assert_eq!(err.to_string(), "Upstream request failed: connection refused");
    }
}
