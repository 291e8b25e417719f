//! Bill-extraction collaborator: a vision model reads the uploaded bill.
//!
//! The «intelligence» lives entirely on the other side of this boundary;
//! everything coming back is untrusted and goes through
//! [`crate::bill::normalize`].

use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{api::client, bill::extracted::ExtractedBill, prelude::*};

const ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

const EXTRACTION_PROMPT: &str = r#"This is a Greek household electricity bill.
Extract the following fields and reply with ONLY a JSON object, no markdown and no other text:

{
  "kwh": <total kWh consumed in the current period, number or null>,
  "billingDays": <billed days in the current period, number or null>,
  "periodStart": <period start date as YYYY-MM-DD, string or null>,
  "periodEnd": <period end date as YYYY-MM-DD, string or null>,
  "provider": <supplier name exactly as printed, string or null>,
  "tariffName": <tariff or package name as printed, string or null>,
  "billAmount": <total payable amount in euros, VAT included, number or null>,
  "colorZones": {"blue": <kWh or null>, "green": <kWh or null>, "yellow": <kWh or null>, "red": <kWh or null>},
  "confidence": <"high" | "medium" | "low">
}

Hints:
- kwh: look for «Καταναλωθείσα ενέργεια», «Ενεργός ενέργεια», «Κατανάλωση (kWh)», «Σύνολο kWh».
- provider: ΔΕΗ, Elpedison, NRG, Protergia, Volton, ZeniΘ, WATT+VOLT and the like.
- tariffName: look for «Τιμολόγιο Προμήθειας», «Πακέτο», «Πρόγραμμα».
- billAmount: look for «Σύνολο», «Πληρωτέο», «Σύνολο Λογαριασμού».
- colorZones: only when the bill itemises the colored time zones, otherwise null everywhere.
- confidence: "high" when everything is clearly legible, "medium" for 2-3 fields, "low" otherwise."#;

pub struct Api {
    client: Client,
    api_key: String,
}

impl Api {
    pub fn try_new(api_key: String) -> Result<Self> {
        Ok(Self { client: client::try_new()?, api_key })
    }

    /// Upload the bill and parse the model's answer.
    ///
    /// Model output that cannot be parsed is not an error: it degrades to an
    /// empty low-confidence extraction.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn extract(&self, path: &Path) -> Result<ExtractedBill> {
        let mime_type = mime_type(path)?;
        let contents = std::fs::read(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        ensure!(
            contents.len() as u64 <= MAX_FILE_BYTES,
            "`{}` exceeds the {} MB limit",
            path.display(),
            MAX_FILE_BYTES / 1024 / 1024,
        );

        info!(n_bytes = contents.len(), mime_type, "uploading…");
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData { mime_type, data: STANDARD.encode(&contents) },
                    },
                    Part::Text { text: EXTRACTION_PROMPT },
                ],
            }],
        };
        let response = self
            .client
            .post(ENDPOINT)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .context("failed to call the extraction model")?
            .error_for_status()
            .context("the extraction model request failed")?
            .json::<GenerateContentResponse>()
            .await
            .context("failed to deserialize the model response")?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .context("the model returned no candidates")?;
        Ok(parse_extraction(&text))
    }
}

/// Pull the JSON object out of the model answer, tolerating markdown fences
/// and surrounding prose. Unparsable answers degrade to an empty
/// low-confidence extraction.
pub fn parse_extraction(text: &str) -> ExtractedBill {
    let Some(start) = text.find('{') else {
        warn!("no JSON object in the model answer");
        return ExtractedBill::default();
    };
    let Some(end) = text.rfind('}').filter(|end| start < *end) else {
        warn!("no JSON object in the model answer");
        return ExtractedBill::default();
    };
    serde_json::from_str(&text[start..=end]).unwrap_or_else(|error| {
        warn!("unparsable extraction: {error:#}");
        ExtractedBill::default()
    })
}

/// The collaborator accepts PDF and the common photo formats only.
fn mime_type(path: &Path) -> Result<&'static str> {
    let extension =
        path.extension().and_then(|extension| extension.to_str()).map(str::to_lowercase);
    match extension.as_deref() {
        Some("pdf") => Ok("application/pdf"),
        Some("jpg" | "jpeg") => Ok("image/jpeg"),
        Some("png") => Ok("image/png"),
        Some("webp") => Ok("image/webp"),
        _ => bail!("unsupported bill file type: `{}`", path.display()),
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: &'static str,
    },

    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: &'static str,

    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::extracted::Confidence;

    #[test]
    fn test_parse_extraction_fenced() {
        let bill = parse_extraction(
            "```json\n{\"kwh\": 250, \"billingDays\": 30, \"confidence\": \"high\"}\n```",
        );
        assert_eq!(bill.kwh, Some(250.0));
        assert_eq!(bill.confidence, Confidence::High);
    }

    #[test]
    fn test_parse_extraction_garbage_degrades() {
        for text in ["I could not read the bill, sorry.", "{not json}", "}{"] {
            let bill = parse_extraction(text);
            assert_eq!(bill.kwh, None);
            assert_eq!(bill.confidence, Confidence::Low);
        }
    }

    #[test]
    fn test_mime_type_allowlist() {
        assert!(mime_type(Path::new("bill.pdf")).is_ok());
        assert!(mime_type(Path::new("bill.JPG")).is_ok());
        assert!(mime_type(Path::new("bill.webp")).is_ok());
        assert!(mime_type(Path::new("bill.gif")).is_err());
        assert!(mime_type(Path::new("bill")).is_err());
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn test_extract_ok() -> Result {
        let api_key = std::env::var("GEMINI_API_KEY")?;
        let bill = Api::try_new(api_key)?.extract(Path::new("bill.pdf")).await?;
        assert!(bill.kwh.is_some());
        Ok(())
    }
}
