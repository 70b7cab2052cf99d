use crate::error::ProviderError;
use crate::models::FactCheckResult;
use crate::pipeline::traits::SpeechSynthesizer;

/// Render a result as a short spoken summary.
pub fn format_for_speech(claim: &str, result: &FactCheckResult) -> String {
    let mut text = format!("The tweet claims that {claim}. ");
    text.push_str(&format!(
        "After fact check, it has been determined that this post is {}. ",
        result.label.as_str().to_lowercase()
    ));
    text.push_str(&format!("{} ", result.explanation));

    if result.sources.is_empty() {
        text.push_str("No sources were found to verify this claim.");
        return text;
    }

    text.push_str("This information is based on the following sources: ");
    for (i, source) in result.sources.iter().enumerate() {
        text.push_str(&format!("Source {}: {}. ", i + 1, source.title));
        if let Some(age) = &source.published_age {
            text.push_str(&format!("Published {age}. "));
        }
    }
    text
}

pub async fn speak_result<T: SpeechSynthesizer + ?Sized>(
    synthesizer: &T,
    claim: &str,
    result: &FactCheckResult,
) -> Result<Vec<u8>, ProviderError> {
    synthesizer
        .synthesize_speech(&format_for_speech(claim, result))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EvidenceItem, EvidenceSet, VerdictLabel};
    use crate::pipeline::mock::EchoSpeech;

    fn result_with_sources(sources: Vec<EvidenceItem>) -> FactCheckResult {
        FactCheckResult {
            label: VerdictLabel::Misleading,
            explanation: "Missing context per AP.".into(),
            sources: EvidenceSet::from_items(sources, 3),
            confidence: 0.7,
            bias: None,
        }
    }

    #[test]
    fn lists_sources_with_ages() {
        let text = format_for_speech(
            "gas prices doubled",
            &result_with_sources(vec![
                EvidenceItem {
                    title: "AP".into(),
                    url: "https://apnews.com/x".into(),
                    snippet: String::new(),
                    published_age: Some("2 days ago".into()),
                },
                EvidenceItem {
                    title: "Blog".into(),
                    url: "https://b.example".into(),
                    snippet: String::new(),
                    published_age: None,
                },
            ]),
        );
        assert_eq!(
            text,
            "The tweet claims that gas prices doubled. \
After fact check, it has been determined that this post is misleading. \
Missing context per AP. \
This information is based on the following sources: \
Source 1: AP. Published 2 days ago. Source 2: Blog. "
        );
    }

    #[test]
    fn mentions_missing_sources() {
        let text = format_for_speech("x", &FactCheckResult::unverifiable("Nothing found."));
        assert!(text.ends_with("Nothing found. No sources were found to verify this claim."));
    }

    #[tokio::test]
    async fn speak_result_sends_formatted_text() {
        let result = FactCheckResult::unverifiable("Nothing found.");
        let audio = speak_result(&EchoSpeech, "x", &result).await.unwrap();
        assert_eq!(String::from_utf8(audio).unwrap(), format_for_speech("x", &result));
    }
}
