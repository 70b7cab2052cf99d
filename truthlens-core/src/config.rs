use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TRUSTED_DOMAINS: &[&str] = &[
    // wire services
    "reuters.com",
    "apnews.com",
    "afp.com",
    // fact-checkers
    "snopes.com",
    "factcheck.org",
    "politifact.com",
    "fullfact.org",
    // international
    "bbc.com",
    "bbc.co.uk",
    "theguardian.com",
    "aljazeera.com",
    "dw.com",
    // US national
    "npr.org",
    "pbs.org",
    "cbsnews.com",
    "nbcnews.com",
    "abcnews.go.com",
    "nytimes.com",
    "washingtonpost.com",
    "usatoday.com",
    "latimes.com",
    // business
    "bloomberg.com",
    "wsj.com",
    "cnbc.com",
    // science / medical
    "nature.com",
    "sciencemag.org",
    "nejm.org",
];

/// Which media-detection service answers `run_media_check`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DetectorKind {
    /// AI or Not: `report.verdict` plus per-verdict confidence.
    AiOrNot,
    /// Hive: nested arrays of scored classes.
    Hive,
}

impl FromStr for DetectorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aiornot" | "ai-or-not" | "ai_or_not" => Ok(DetectorKind::AiOrNot),
            "hive" => Ok(DetectorKind::Hive),
            other => Err(format!("unknown detector {other:?} (expected aiornot or hive)")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GenerationSettings {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct SearchSettings {
    pub api_key: String,
    pub endpoint: String,
    pub result_count: u32,
    pub freshness: String,
    pub max_sources: usize,
    pub trusted_domains: Vec<String>,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct DetectorSettings {
    pub kind: DetectorKind,
    /// `None` leaves media detection unavailable; checks then fail as unconfigured.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct SpeechSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub voice_id: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub generation: GenerationSettings,
    pub search: SearchSettings,
    pub detector: DetectorSettings,
    pub speech: SpeechSettings,
    pub max_workers: usize,
    pub host: String,
    pub port: u16,
}

/// Rejects blanks and copy-pasted placeholders such as `sk-...`.
pub fn valid_api_key(key: &str) -> bool {
    let trimmed = key.trim();
    !trimmed.is_empty() && !trimmed.contains("...")
}

impl Settings {
    /// Load from the process environment. Call `dotenv().ok()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = |name: &str| lookup(name).filter(|v| valid_api_key(v)).map(|v| v.trim().to_string());
        let text = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let mut missing = Vec::new();
        let gemini_key = key("GEMINI_API_KEY");
        if gemini_key.is_none() {
            missing.push(ConfigError::Missing("GEMINI_API_KEY").to_string());
        }
        let brave_key = key("BRAVE_API_KEY");
        if brave_key.is_none() {
            missing.push(ConfigError::Missing("BRAVE_API_KEY").to_string());
        }
        if !missing.is_empty() {
            return Err(ConfigError::Multiple(missing));
        }

        let detector_kind = match lookup("TRUTHLENS_DETECTOR") {
            Some(raw) if !raw.trim().is_empty() => {
                raw.parse::<DetectorKind>()
                    .map_err(|reason| ConfigError::Invalid {
                        key: "TRUTHLENS_DETECTOR",
                        value: raw.clone(),
                        reason,
                    })?
            }
            _ => DetectorKind::AiOrNot,
        };
        let (detector_key, detector_endpoint) = match detector_kind {
            DetectorKind::AiOrNot => (
                key("AIORNOT_API_KEY"),
                text("AIORNOT_API_URL", "https://api.aiornot.com/v1/reports/image"),
            ),
            DetectorKind::Hive => (
                key("HIVE_API_KEY"),
                text("HIVE_API_URL", "https://api.thehive.ai/api/v2/task/sync"),
            ),
        };

        let trusted_domains = match lookup("TRUSTED_DOMAINS") {
            Some(raw) if !raw.trim().is_empty() => raw
                .split(',')
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
            _ => DEFAULT_TRUSTED_DOMAINS.iter().map(|d| d.to_string()).collect(),
        };

        let max_sources: usize = number(&lookup, "MAX_SOURCES", 3)?;
        if max_sources == 0 {
            return Err(ConfigError::Invalid {
                key: "MAX_SOURCES",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            generation: GenerationSettings {
                api_key: gemini_key.unwrap_or_default(),
                api_base: text(
                    "GEMINI_API_BASE",
                    "https://generativelanguage.googleapis.com/v1beta/openai",
                ),
                model: text("GEMINI_MODEL", "gemini-2.0-flash-lite"),
                timeout: Duration::from_secs(number(&lookup, "GENERATION_TIMEOUT_SECS", 30)?),
            },
            search: SearchSettings {
                api_key: brave_key.unwrap_or_default(),
                endpoint: text("BRAVE_SEARCH_URL", "https://api.search.brave.com/res/v1/web/search"),
                result_count: number(&lookup, "SEARCH_RESULT_COUNT", 20)?,
                freshness: text("SEARCH_FRESHNESS", "pw"),
                max_sources,
                trusted_domains,
                timeout: Duration::from_secs(number(&lookup, "SEARCH_TIMEOUT_SECS", 10)?),
            },
            detector: DetectorSettings {
                kind: detector_kind,
                api_key: detector_key,
                endpoint: detector_endpoint,
                timeout: Duration::from_secs(number(&lookup, "DETECTOR_TIMEOUT_SECS", 30)?),
            },
            speech: SpeechSettings {
                api_key: key("ELEVENLABS_API_KEY"),
                endpoint: text(
                    "ELEVENLABS_API_URL",
                    "https://api.elevenlabs.io/v1/text-to-speech",
                ),
                voice_id: text("ELEVENLABS_VOICE_ID", "21m00Tcm4TlvDq8ikWAM"),
                timeout: Duration::from_secs(30),
            },
            max_workers: number(&lookup, "MAX_WORKERS", 5)?,
            host: text("HOST", "0.0.0.0"),
            port: number(&lookup, "PORT", 8000)?,
        })
    }

    pub fn media_detection_enabled(&self) -> bool {
        self.detector.api_key.is_some()
    }
}

fn number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_keys_are_set() {
        let settings =
            Settings::from_lookup(lookup(&[("GEMINI_API_KEY", "g"), ("BRAVE_API_KEY", "b")]))
                .unwrap();
        assert_eq!(settings.search.max_sources, 3);
        assert_eq!(settings.search.result_count, 20);
        assert_eq!(settings.search.freshness, "pw");
        assert_eq!(settings.search.timeout, Duration::from_secs(10));
        assert_eq!(settings.max_workers, 5);
        assert_eq!(settings.generation.model, "gemini-2.0-flash-lite");
        assert_eq!(settings.detector.kind, DetectorKind::AiOrNot);
        assert!(!settings.media_detection_enabled());
        assert!(settings.search.trusted_domains.contains(&"reuters.com".to_string()));
    }

    #[test]
    fn missing_required_keys_are_all_reported() {
        let err = Settings::from_lookup(lookup(&[("BRAVE_API_KEY", "sk-...")])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("GEMINI_API_KEY"));
        assert!(msg.contains("BRAVE_API_KEY"));
    }

    #[test]
    fn hive_detector_and_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "g"),
            ("BRAVE_API_KEY", "b"),
            ("TRUTHLENS_DETECTOR", "Hive"),
            ("HIVE_API_KEY", "h"),
            ("TRUSTED_DOMAINS", "Example.org, ,news.test"),
            ("MAX_SOURCES", "5"),
        ]))
        .unwrap();
        assert_eq!(settings.detector.kind, DetectorKind::Hive);
        assert_eq!(settings.detector.api_key.as_deref(), Some("h"));
        assert_eq!(settings.search.trusted_domains, vec!["example.org", "news.test"]);
        assert_eq!(settings.search.max_sources, 5);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = Settings::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "g"),
            ("BRAVE_API_KEY", "b"),
            ("MAX_WORKERS", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "MAX_WORKERS", .. }));
    }
}
