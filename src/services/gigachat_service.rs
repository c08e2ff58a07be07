use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde_json::Value as JsonValue;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Error, Result};

const OAUTH_URL: &str = "https://ngw.devices.sberbank.ru:9443/api/v2/oauth";
const CHAT_URL: &str = "https://gigachat.devices.sberbank.ru/api/v1/chat/completions";

/// Refresh the cached token this long before it actually expires.
const TOKEN_REFRESH_MARGIN_MS: i64 = 60_000;

#[derive(Debug, Clone)]
struct AccessToken {
    token: String,
    expires_at_ms: i64,
}

#[derive(Clone)]
pub struct GigaChatService {
    client: Client,
    credentials: Option<String>,
    scope: String,
    model: String,
    token: Arc<RwLock<Option<AccessToken>>>,
}

impl GigaChatService {
    pub fn new(credentials: Option<String>, scope: String, model: String) -> Self {
        // The GigaChat endpoints present certificates from the Russian
        // national CA, which is absent from the default trust store.
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap();

        Self {
            client,
            credentials,
            scope,
            model,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Grades a user answer against the reference answer, returning a
    /// score in [0, 1] and feedback text. Never fails: any transport or
    /// format problem degrades to a zero score with a generic message so
    /// the interview flow keeps moving.
    pub async fn evaluate_answer(
        &self,
        question: &str,
        reference_answer: &str,
        user_answer: &str,
    ) -> (f64, String) {
        if user_answer.trim().is_empty() {
            return (
                0.0,
                "You did not provide an answer to the question. Please try again.".to_string(),
            );
        }

        let prompt = build_evaluation_prompt(question, reference_answer, user_answer);
        let raw = match self.chat(&prompt).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(error = ?e, "GigaChat evaluation request failed");
                return (
                    0.0,
                    "Could not evaluate the answer automatically. Please try again.".to_string(),
                );
            }
        };

        match parse_evaluation(&raw) {
            Some((score, feedback)) => (score, feedback),
            None => {
                tracing::error!(raw = %raw, "Unusable evaluation payload from GigaChat");
                (
                    0.0,
                    "Could not process the evaluation. Please try again.".to_string(),
                )
            }
        }
    }

    async fn chat(&self, prompt: &str) -> Result<String> {
        let token = self.access_token().await?;
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.2
        });

        let res = self
            .client
            .post(CHAT_URL)
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("GigaChat API error {}: {}", status, text).into());
        }

        let body: JsonValue = res.json().await?;

        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Invalid GigaChat response format").into())
    }

    /// Returns a cached OAuth token, requesting a fresh one when the
    /// cache is empty or about to expire. GigaChat reports `expires_at`
    /// as a millisecond Unix timestamp.
    async fn access_token(&self) -> Result<String> {
        {
            let guard = self.token.read().await;
            if let Some(cached) = guard.as_ref() {
                if cached.expires_at_ms - TOKEN_REFRESH_MARGIN_MS > Utc::now().timestamp_millis() {
                    return Ok(cached.token.clone());
                }
            }
        }

        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| Error::Config("GIGACHAT_CREDENTIALS is not set".to_string()))?;

        let res = self
            .client
            .post(OAUTH_URL)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Basic {}", credentials),
            )
            .header("RqUID", Uuid::new_v4().to_string())
            .form(&[("scope", self.scope.as_str())])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("GigaChat OAuth error {}: {}", status, text).into());
        }

        let body: JsonValue = res.json().await?;
        let token = body
            .get("access_token")
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("GigaChat OAuth response missing access_token"))?;
        let expires_at_ms = body.get("expires_at").and_then(|t| t.as_i64()).unwrap_or(0);

        let mut guard = self.token.write().await;
        *guard = Some(AccessToken {
            token: token.clone(),
            expires_at_ms,
        });

        Ok(token)
    }
}

fn build_evaluation_prompt(question: &str, reference_answer: &str, user_answer: &str) -> String {
    format!(
        r#"You are a strict technical interviewer. Evaluate the candidate's answer to an interview question.

Question: {question}
Reference answer: {reference_answer}
Candidate's answer: {user_answer}

Scoring criteria:
1. Empty answer or no useful content: score 0
2. Only generic statements with no specifics: score 0
3. Partially correct but incomplete: score 0.3-0.4
4. Correct with minor inaccuracies: score 0.5-0.7
5. Fully correct: score 0.8-1.0

Also weigh technical accuracy, completeness, structure, concrete examples and correct use of terminology.

Return a single JSON object, no other text:
{{
    "score": <number between 0 and 1>,
    "feedback": "<detailed comment on what was wrong or missing>",
    "recommendations": ["<specific suggestions for improvement>"],
    "strengths": ["<what the answer did well>"],
    "weaknesses": ["<what the answer should improve>"]
}}

Be strict: answers like "I don't know" must score 0. If the answer contains code, check it for correctness. All text values must be written in Russian."#
    )
}

/// Parses the model's JSON evaluation into a clamped score and a
/// composed feedback text. Returns None when the payload is not the
/// expected shape.
fn parse_evaluation(raw: &str) -> Option<(f64, String)> {
    let mut text = raw.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(stripped) = text.strip_prefix("```json") {
        text = stripped;
    } else if let Some(stripped) = text.strip_prefix("```") {
        text = stripped;
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped;
    }

    let value: JsonValue = serde_json::from_str(text.trim()).ok()?;
    let score = value.get("score")?.as_f64()?.clamp(0.0, 1.0);
    let feedback = value.get("feedback")?.as_str()?;
    let recommendations = bullet_list(value.get("recommendations")?)?;
    let strengths = bullet_list(value.get("strengths")?)?;
    let weaknesses = bullet_list(value.get("weaknesses")?)?;

    let full = format!(
        "{}\n\nСильные стороны:\n{}\n\nЧто нужно улучшить:\n{}\n\nРекомендации:\n{}",
        feedback, strengths, weaknesses, recommendations
    );

    Some((score, full))
}

fn bullet_list(value: &JsonValue) -> Option<String> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| format!("- {}", s))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json_evaluation() {
        let raw = r#"{
            "score": 0.7,
            "feedback": "Ответ в целом верный.",
            "recommendations": ["Добавьте пример кода"],
            "strengths": ["Правильная терминология"],
            "weaknesses": ["Нет примеров"]
        }"#;

        let (score, feedback) = parse_evaluation(raw).unwrap();
        assert_eq!(score, 0.7);
        assert!(feedback.starts_with("Ответ в целом верный."));
        assert!(feedback.contains("Сильные стороны:\n- Правильная терминология"));
        assert!(feedback.contains("Что нужно улучшить:\n- Нет примеров"));
        assert!(feedback.contains("Рекомендации:\n- Добавьте пример кода"));
    }

    #[test]
    fn strips_markdown_fences() {
        let raw = "```json\n{\"score\": 1, \"feedback\": \"ok\", \"recommendations\": [], \"strengths\": [], \"weaknesses\": []}\n```";
        let (score, _) = parse_evaluation(raw).unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn clamps_out_of_range_scores() {
        let raw = r#"{"score": 1.4, "feedback": "x", "recommendations": [], "strengths": [], "weaknesses": []}"#;
        let (score, _) = parse_evaluation(raw).unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn rejects_payload_with_missing_fields() {
        let raw = r#"{"score": 0.5, "feedback": "x"}"#;
        assert!(parse_evaluation(raw).is_none());
    }

    #[test]
    fn rejects_non_json_payload() {
        assert!(parse_evaluation("the answer is fine").is_none());
        assert!(parse_evaluation("").is_none());
    }

    #[test]
    fn prompt_embeds_all_three_texts() {
        let prompt = build_evaluation_prompt("What is GIL?", "A mutex.", "No idea");
        assert!(prompt.contains("What is GIL?"));
        assert!(prompt.contains("A mutex."));
        assert!(prompt.contains("No idea"));
    }
}
