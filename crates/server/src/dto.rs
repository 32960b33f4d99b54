//! JSON request and response bodies.
//!
//! Field names match what the browser client already sends. Integer fields
//! accept either JSON numbers or numeric strings (`5`, `5.0` or `"5"`).

use std::fmt::Display;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tutor::{EvaluationRequest, QuestionCount, QuizRequest, Seconds};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// `POST /explain`
#[derive(Debug, Default, Deserialize)]
pub struct ExplainBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
}

/// `POST /quiz`
#[derive(Debug, Deserialize)]
pub struct QuizBody {
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_num_questions", deserialize_with = "lenient_int")]
    pub num_questions: u32,
    #[serde(default = "default_time_per_question", deserialize_with = "lenient_int")]
    pub time_per_question: u64,
}

impl From<QuizBody> for QuizRequest {
    fn from(body: QuizBody) -> Self {
        Self {
            notes: body.notes.unwrap_or_default(),
            num_questions: QuestionCount::new(body.num_questions),
            time_per_question: Seconds::new(body.time_per_question),
        }
    }
}

/// `POST /quiz/evaluate`
#[derive(Debug, Deserialize)]
pub struct EvaluateBody {
    #[serde(default)]
    pub quiz_text: Option<String>,
    /// Free text or any JSON structure; kept opaque.
    #[serde(default)]
    pub user_answers: Value,
    #[serde(default = "default_time_per_question", deserialize_with = "lenient_int")]
    pub time_per_question: u64,
    #[serde(default = "default_total_time_taken", deserialize_with = "lenient_int")]
    pub total_time_taken: u64,
}

impl From<EvaluateBody> for EvaluationRequest {
    fn from(body: EvaluateBody) -> Self {
        Self {
            quiz_text: body.quiz_text.unwrap_or_default(),
            user_answers: answers_as_text(body.user_answers),
            time_per_question: Seconds::new(body.time_per_question),
            total_time_taken: Seconds::new(body.total_time_taken),
        }
    }
}

/// Strings are embedded as-is, `null` as nothing, anything else as compact JSON.
fn answers_as_text(answers: Value) -> String {
    match answers {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn default_num_questions() -> u32 {
    QuestionCount::DEFAULT.as_u32()
}

fn default_time_per_question() -> u64 {
    Seconds::PER_QUESTION_DEFAULT.as_u64()
}

fn default_total_time_taken() -> u64 {
    Seconds::TOTAL_DEFAULT.as_u64()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Integer(u64),
    Float(f64),
    Text(String),
}

/// Accepts `3`, `3.0` and `"3"`; rejects negatives, fractions and values out
/// of range for `T`.
fn lenient_int<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
    T::Error: Display,
{
    let raw = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Integer(n) => n,
        NumberOrText::Float(f) => {
            if f.fract() != 0.0 || f < 0.0 || f > u64::MAX as f64 {
                return Err(D::Error::custom(format!("invalid integer {f}")));
            }
            f as u64
        }
        NumberOrText::Text(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| D::Error::custom(format!("invalid integer {s:?}: {e}")))?,
    };

    T::try_from(raw).map_err(|e| D::Error::custom(format!("integer {raw} out of range: {e}")))
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub quiz_text: String,
    pub time_per_question: Seconds,
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub evaluation_result: String,
}

/// The envelope every failure is reported in.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn quiz_defaults_apply_when_fields_are_absent() {
        let body: QuizBody = serde_json::from_value(json!({"notes": "Cells"})).unwrap();
        let request = QuizRequest::from(body);

        assert_eq!(request.num_questions, QuestionCount::new(5));
        assert_eq!(request.time_per_question, Seconds::new(60));
    }

    #[test]
    fn integers_may_be_sent_as_strings() {
        let body: QuizBody = serde_json::from_value(json!({
            "notes": "Cells",
            "num_questions": "3",
            "time_per_question": " 45 "
        }))
        .unwrap();

        assert_eq!(body.num_questions, 3);
        assert_eq!(body.time_per_question, 45);
    }

    #[test]
    fn non_numeric_strings_are_rejected() {
        let result = serde_json::from_value::<QuizBody>(json!({"num_questions": "many"}));
        assert!(result.is_err());
    }

    #[test]
    fn whole_floats_are_accepted() {
        let body: QuizBody = serde_json::from_value(json!({
            "notes": "Cells",
            "num_questions": 3.0,
            "time_per_question": 45.0
        }))
        .unwrap();

        assert_eq!(body.num_questions, 3);
        assert_eq!(body.time_per_question, 45);

        let body: EvaluateBody =
            serde_json::from_str(r#"{"quiz_text":"q","time_per_question":45.0}"#).unwrap();
        assert_eq!(body.time_per_question, 45);
    }

    #[test]
    fn fractional_floats_are_rejected() {
        for value in [json!(3.5), json!(-2.0)] {
            let result = serde_json::from_value::<QuizBody>(json!({"num_questions": value}));
            assert!(result.is_err(), "{value} was accepted");
        }
    }

    #[test]
    fn counts_out_of_range_are_rejected() {
        let result = serde_json::from_value::<QuizBody>(json!({"num_questions": 5_000_000_000u64}));
        assert!(result.is_err());
    }

    #[test]
    fn negative_counts_are_rejected() {
        let result = serde_json::from_value::<QuizBody>(json!({"num_questions": -1}));
        assert!(result.is_err());
    }

    #[test]
    fn evaluation_defaults_and_string_answers() {
        let body: EvaluateBody = serde_json::from_value(json!({
            "quiz_text": "Question 1",
            "user_answers": "1: A"
        }))
        .unwrap();
        let request = EvaluationRequest::from(body);

        assert_eq!(request.user_answers, "1: A");
        assert_eq!(request.time_per_question, Seconds::new(60));
        assert_eq!(request.total_time_taken, Seconds::new(300));
    }

    #[test]
    fn structured_answers_are_embedded_as_json() {
        let body: EvaluateBody = serde_json::from_value(json!({
            "quiz_text": "Question 1",
            "user_answers": {"1": "A"}
        }))
        .unwrap();

        assert_eq!(EvaluationRequest::from(body).user_answers, r#"{"1":"A"}"#);
    }

    #[test]
    fn missing_answers_render_as_empty_text() {
        assert_eq!(answers_as_text(Value::Null), "");
    }

    #[test]
    fn quiz_response_echoes_seconds_as_integer() {
        let body = serde_json::to_value(QuizResponse {
            quiz_text: "Q".into(),
            time_per_question: Seconds::new(60),
        })
        .unwrap();
        assert_eq!(body, json!({"quiz_text": "Q", "time_per_question": 60}));
    }
}
