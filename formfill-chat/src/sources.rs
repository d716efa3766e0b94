use serde::{Deserialize, Serialize};

/// A document chunk the assistant cited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<serde_json::Value>,
    pub document_title: String,
    pub document_type: String,
    #[serde(default)]
    pub relevance_score: f64,
}

impl Source {
    pub fn new(title: impl Into<String>, kind: impl Into<String>, score: f64) -> Self {
        Self {
            document_id: None,
            document_title: title.into(),
            document_type: kind.into(),
            relevance_score: score,
        }
    }

    /// Label shown in the citation list, `"{title} ({type})"`.
    pub fn key(&self) -> String {
        format!("{} ({})", self.document_title, self.document_type)
    }
}

/// One entry of a deduplicated citation list.
#[derive(Debug, Clone, PartialEq)]
pub struct CitedSource {
    pub key: String,
    pub source: Source,
}

impl CitedSource {
    pub fn relevance_score(&self) -> f64 {
        self.source.relevance_score
    }
}

/// Collapse sources sharing a title and type.
///
/// Keys keep the order in which they first appear; each keeps its highest
/// scoring source.
pub fn dedupe_sources<'a, I>(sources: I) -> Vec<CitedSource>
where
    I: IntoIterator<Item = &'a Source>,
{
    let mut cited: Vec<CitedSource> = Vec::new();
    for source in sources {
        let key = source.key();
        match cited.iter_mut().find(|c| c.key == key) {
            Some(existing) if source.relevance_score > existing.relevance_score() => {
                existing.source = source.clone();
            }
            Some(_) => {}
            None => cited.push(CitedSource {
                key,
                source: source.clone(),
            }),
        }
    }
    cited
}
