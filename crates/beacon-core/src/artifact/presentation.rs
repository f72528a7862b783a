//! Presentation artifact: embedded slides or video

use super::{require, Artifact, ArtifactKind, ArtifactMeta, Targeted};
use crate::condition::ConditionSet;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Presentation definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    #[serde(flatten)]
    pub meta: ArtifactMeta,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub object_type: String,

    /// URL loaded into the overlay iframe
    #[serde(default)]
    pub embed_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub conditions: ConditionSet,
}

impl Presentation {
    pub fn new(
        name: impl Into<String>,
        object_type: impl Into<String>,
        embed_url: impl Into<String>,
    ) -> Self {
        Presentation {
            meta: ArtifactMeta::default(),
            name: name.into(),
            object_type: object_type.into(),
            embed_url: embed_url.into(),
            description: None,
            conditions: ConditionSet::default(),
        }
    }

    pub fn with_conditions(mut self, conditions: ConditionSet) -> Self {
        self.conditions = conditions;
        self
    }
}

/// Rewrite well-known share links to their embeddable form.
///
/// Google Slides `/edit` links become `/embed`, YouTube `watch?v=` and
/// `youtu.be` links become `/embed/<id>`, Loom `/share/` becomes `/embed/`.
/// Anything else is returned unchanged.
pub fn to_embed_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| ValidationError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    let host = url.host_str().unwrap_or_default();
    let segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();

    let rewritten = match (host, segments.as_slice()) {
        ("docs.google.com", ["presentation", "d", id, ..]) => {
            Some(format!("https://docs.google.com/presentation/d/{}/embed", id))
        }
        ("www.youtube.com" | "youtube.com", ["watch"]) => url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| format!("https://www.youtube.com/embed/{}", v)),
        ("youtu.be", [id]) => Some(format!("https://www.youtube.com/embed/{}", id)),
        ("www.loom.com" | "loom.com", ["share", id]) => {
            Some(format!("https://www.loom.com/embed/{}", id))
        }
        _ => None,
    };

    Ok(rewritten.unwrap_or_else(|| trimmed.to_string()))
}

impl Artifact for Presentation {
    const KIND: ArtifactKind = ArtifactKind::Presentation;

    fn meta(&self) -> &ArtifactMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ArtifactMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(Self::KIND, "name", &self.name)?;
        require(Self::KIND, "embedUrl", &self.embed_url)?;
        to_embed_url(&self.embed_url).map(|_| ())
    }

    fn normalize(&mut self) {
        self.conditions.prune();
        if let Ok(embed) = to_embed_url(&self.embed_url) {
            self.embed_url = embed;
        }
    }
}

impl Targeted for Presentation {
    fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    fn object_type(&self) -> &str {
        &self.object_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_slides_edit_link() {
        let url = to_embed_url("https://docs.google.com/presentation/d/abc123/edit#slide=id.p").unwrap();
        assert_eq!(url, "https://docs.google.com/presentation/d/abc123/embed");
    }

    #[test]
    fn test_youtube_links() {
        assert_eq!(
            to_embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10").unwrap(),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
        assert_eq!(
            to_embed_url("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_loom_share_link() {
        assert_eq!(
            to_embed_url("https://www.loom.com/share/f00").unwrap(),
            "https://www.loom.com/embed/f00"
        );
    }

    #[test]
    fn test_other_urls_unchanged() {
        assert_eq!(
            to_embed_url(" https://example.com/deck ").unwrap(),
            "https://example.com/deck"
        );
    }

    #[test]
    fn test_rejects_non_http() {
        assert!(matches!(
            to_embed_url("javascript:alert(1)"),
            Err(ValidationError::InvalidUrl { .. })
        ));
        assert!(to_embed_url("not a url").is_err());
    }

    #[test]
    fn test_presentation_validation() {
        assert!(Presentation::new("Deck", "deals", "").validate().is_err());
        assert!(Presentation::new("Deck", "deals", "https://example.com").validate().is_ok());
    }
}
