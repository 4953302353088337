//! Generative advice service
//!
//! Calls an external generative-language API for free-text dietary advice
//! built from the computed metrics plus the user's free-text lists. The
//! provider sits behind the [`AdviceGenerator`] trait so routes and services
//! test without any network; a failure of the real provider is caught at this
//! boundary, logged, and replaced with a fixed fallback string. It is never
//! propagated and never invalidates the locally computed metrics.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AdviceConfig;
use bmi_insight_shared::types::{AdviceRequest, AdviceResponse, AdviceSource};

/// Fixed user-facing text returned when the generative call fails
pub const FALLBACK_ADVICE: &str =
    "Unable to generate personalized recommendations at this time. Please try again later.";

/// Errors from the generative advice provider
#[derive(Error, Debug)]
pub enum AdviceError {
    #[error("advice generation is disabled")]
    Disabled,

    #[error("advice provider is not configured: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

/// Capability interface for generating advice text
///
/// One method, injected into the application state, so the deterministic
/// engine and the routes can be exercised with a stub.
#[async_trait]
pub trait AdviceGenerator: Send + Sync {
    async fn generate(&self, context: &AdviceRequest) -> Result<String, AdviceError>;
}

/// Provider used when the advice service is disabled or misconfigured
///
/// Always fails, which the service layer turns into the fallback text.
pub struct DisabledAdviceGenerator;

#[async_trait]
impl AdviceGenerator for DisabledAdviceGenerator {
    async fn generate(&self, _context: &AdviceRequest) -> Result<String, AdviceError> {
        Err(AdviceError::Disabled)
    }
}

// ============================================================================
// Gemini Client
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
}

/// Content structure for the Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

/// Text part of a content block
#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

/// API error body from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

/// Client for the Google Generative Language API
///
/// Single outbound request per call, no retries; the request timeout is the
/// only enforcement beyond the network stack.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

impl GeminiClient {
    /// Build a client from the advice configuration
    ///
    /// Fails when no API key is configured.
    pub fn new(config: &AdviceConfig) -> Result<Self, AdviceError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AdviceError::Config("advice API key is not set".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: SecretString::new(api_key),
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            self.api_key.expose_secret()
        )
    }

    /// Render the nutritionist prompt from the advice context
    fn build_prompt(context: &AdviceRequest) -> String {
        let join_or_none = |items: &[String]| {
            let joined = items
                .iter()
                .map(String::as_str)
                .filter(|s| !s.trim().is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            if joined.is_empty() {
                "None".to_string()
            } else {
                joined
            }
        };

        format!(
            "User Information:\n\
             - Age: {age}\n\
             - Gender: {gender:?}\n\
             - BMI: {bmi} ({category})\n\
             - Activity Level: {activity} ({activity_desc})\n\
             - Health Conditions: {conditions}\n\
             - Dietary Restrictions: {restrictions}\n\
             - Allergies: {allergies}\n\
             \n\
             Please provide:\n\
             1. A brief analysis of the user's BMI and overall health status\n\
             2. Personalized health advice considering their conditions and restrictions\n\
             3. 3-5 specific food recommendations with brief explanations why they're suitable\n\
             4. General lifestyle recommendations\n\
             \n\
             Format the response in markdown with clear sections.",
            age = context.age,
            gender = context.gender,
            bmi = context.bmi,
            category = context.bmi_category.description(),
            activity = context.activity_level.label(),
            activity_desc = context.activity_level.description(),
            conditions = join_or_none(&context.health_conditions),
            restrictions = join_or_none(&context.dietary_restrictions),
            allergies = join_or_none(&context.allergies),
        )
    }
}

#[async_trait]
impl AdviceGenerator for GeminiClient {
    async fn generate(&self, context: &AdviceRequest) -> Result<String, AdviceError> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![ContentPart {
                    text: Self::build_prompt(context),
                }],
            }],
            system_instruction: Some(GeminiContent {
                role: None,
                parts: vec![ContentPart {
                    text: "You are a nutritionist providing personalized health advice and food \
                           recommendations."
                        .to_string(),
                }],
            }),
        };

        debug!(model = %self.model, "Requesting generated advice");

        let response = self
            .client
            .post(self.request_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Try to surface the upstream error message, fall back to the body
            let message = serde_json::from_str::<GeminiResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map_or(body, |e| e.message);
            return Err(AdviceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| AdviceError::Malformed(format!("invalid JSON: {e}")))?;

        if let Some(error) = parsed.error {
            return Err(AdviceError::Api {
                status: status.as_u16(),
                message: error.message,
            });
        }

        parsed
            .candidates
            .and_then(|mut c| if c.is_empty() { None } else { Some(c.remove(0)) })
            .and_then(|c| c.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| AdviceError::Malformed("response contains no text".to_string()))
    }
}

// ============================================================================
// Service Layer
// ============================================================================

/// Advice service: generation with fallback
pub struct AdviceService;

impl AdviceService {
    /// Get advice for the given context, falling back to the fixed string on
    /// any provider failure. Never returns an error.
    pub async fn get_advice(
        generator: &dyn AdviceGenerator,
        context: &AdviceRequest,
    ) -> AdviceResponse {
        match generator.generate(context).await {
            Ok(advice) => AdviceResponse {
                advice,
                source: AdviceSource::Generated,
            },
            Err(err) => {
                warn!(error = %err, "Advice generation failed, using fallback");
                AdviceResponse {
                    advice: FALLBACK_ADVICE.to_string(),
                    source: AdviceSource::Fallback,
                }
            }
        }
    }
}
