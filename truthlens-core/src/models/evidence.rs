use serde::{Deserialize, Serialize};

/// Snippet budget for evidence rendered into the synthesis prompt.
pub const PROMPT_SNIPPET_CHARS: usize = 1000;
/// Snippet budget for sources returned to the caller.
pub const SOURCE_SNIPPET_CHARS: usize = 200;

/// One raw hit from the search provider. Every field may be absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
}

/// One retrieved reference cited by a verdict.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub title: String,
    pub url: String,
    pub snippet: String,
    #[serde(rename = "published_date")]
    pub published_age: Option<String>,
}

impl EvidenceItem {
    pub fn from_hit(hit: &SearchHit, snippet_chars: usize) -> Self {
        Self {
            title: hit.title.clone().unwrap_or_else(|| "N/A".to_string()),
            url: hit.url.clone().unwrap_or_default(),
            snippet: truncate_chars(hit.description.as_deref().unwrap_or(""), snippet_chars),
            published_age: hit.age.clone(),
        }
    }

    /// Copy with the snippet cut down to `max_chars`.
    pub fn with_snippet_budget(&self, max_chars: usize) -> Self {
        Self {
            snippet: truncate_chars(&self.snippet, max_chars),
            ..self.clone()
        }
    }
}

/// Ranked evidence, trusted sources first, capped at the configured maximum.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceSet(Vec<EvidenceItem>);

impl EvidenceSet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn from_items(items: Vec<EvidenceItem>, max_sources: usize) -> Self {
        let mut items = items;
        items.truncate(max_sources);
        Self(items)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EvidenceItem> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[EvidenceItem] {
        &self.0
    }

    /// Re-cap to `max_sources`, shrinking each snippet to `snippet_chars`.
    pub fn capped(&self, max_sources: usize, snippet_chars: usize) -> Self {
        Self(
            self.0
                .iter()
                .take(max_sources)
                .map(|item| item.with_snippet_budget(snippet_chars))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a EvidenceSet {
    type Item = &'a EvidenceItem;
    type IntoIter = std::slice::Iter<'a, EvidenceItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Truncate to at most `max_chars` characters without splitting a code point.
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    input.chars().take(max_chars).collect()
}
