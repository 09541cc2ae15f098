use super::llm::TextGenerator;
use crate::error::ParseFailure;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Returned by [`ClassifierGateway::classify`] when no usable text came back.
pub const UNKNOWN: &str = "unknown";

/// Single entry point to the external text-generation service.
///
/// Every call is one request. Transport errors never leave this type: the
/// plain variant answers [`UNKNOWN`], the structured variant a
/// [`ParseFailure`].
#[derive(Clone)]
pub struct ClassifierGateway {
    generator: Arc<dyn TextGenerator>,
}

impl ClassifierGateway {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Substitutes `{name}` placeholders in a single pass over the template,
    /// so substituted values are never expanded again. Unknown placeholders
    /// are left as is.
    pub fn render(template: &str, substitutions: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            let value = tail.find('}').and_then(|close| {
                let name = &tail[1..close];
                substitutions
                    .iter()
                    .find(|(candidate, _)| *candidate == name)
                    .map(|(_, value)| (*value, close))
            });
            match value {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &tail[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    pub async fn classify(&self, template: &str, substitutions: &[(&str, &str)]) -> String {
        let prompt = Self::render(template, substitutions);
        match self.generator.generate(&prompt).await {
            Ok(text) => {
                let text = strip_code_fences(&text).trim();
                if text.is_empty() {
                    UNKNOWN.to_string()
                } else {
                    text.to_string()
                }
            }
            Err(e) => {
                warn!("Classifier call failed: {}", e);
                UNKNOWN.to_string()
            }
        }
    }

    pub async fn classify_json<T>(&self, template: &str, substitutions: &[(&str, &str)]) -> Result<T, ParseFailure>
    where
        T: DeserializeOwned,
    {
        let prompt = Self::render(template, substitutions);
        let raw = match self.generator.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Classifier call failed: {}", e);
                return Err(ParseFailure::ServiceUnavailable);
            }
        };

        // the reply may echo profile data, so only its shape is logged
        serde_json::from_str(strip_code_fences(&raw)).map_err(|e| {
            debug!(error = %e, len = raw.len(), "Unparsable classifier response");
            ParseFailure::Malformed(e.to_string())
        })
    }
}

/// Removes a surrounding markdown code fence (```` ```json ```` or bare
/// ```` ``` ````) from a model response.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the language tag on the opening fence line
    let rest = match rest.find('\n') {
        Some(newline) if !rest[..newline].contains('{') && !rest[..newline].contains('[') => &rest[newline + 1..],
        _ => rest.strip_prefix("json").unwrap_or(rest),
    };
    match rest.rfind("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}
