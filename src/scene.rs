//! Scene deck: the ordered, tagged list of full-screen sections of the scroll narrative.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{CineloreError, CineloreResult};

/// Opening title card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LandingScene {
    /// Scene id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Subtitle.
    pub subtitle: String,
    /// Tagline under the title.
    pub tagline: String,
}

/// Title over a background image or the scroll-scrubbed video.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroScene {
    /// Scene id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Optional subtitle.
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Optional quote under the title.
    #[serde(default)]
    pub quote: Option<String>,
    /// Background image or video URL.
    #[serde(default)]
    pub background: Option<String>,
    /// `background` is a video to scrub.
    #[serde(default)]
    pub is_video: bool,
}

/// Text over a drifting background image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxScene {
    /// Scene id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Subtitle.
    pub subtitle: String,
    /// Body text.
    pub text: String,
    /// Background image URL.
    pub background: String,
}

/// Image side of a [`SplitScene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    /// Image on the left.
    Left,
    /// Image on the right.
    Right,
}

/// Image beside a text column.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SplitScene {
    /// Scene id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Subtitle.
    pub subtitle: String,
    /// Body text.
    pub text: String,
    /// Image side.
    pub side: Side,
    /// Image URL.
    pub image: String,
}

/// Large words revealed one after another.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FullscreenTextScene {
    /// Scene id.
    pub id: String,
    /// Words, in reveal order.
    pub words: Vec<String>,
}

/// Closing card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FinaleScene {
    /// Scene id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Subtitle.
    pub subtitle: String,
    /// Body text.
    pub text: String,
}

/// One section of the narrative, discriminated by its `type` tag.
///
/// Unrecognized tags deserialize to [`Scene::Unknown`] and render nothing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Scene {
    /// Opening title card.
    Landing(LandingScene),
    /// Hero title, optionally over the scrubbed video.
    Hero(HeroScene),
    /// Parallax background section.
    Parallax(ParallaxScene),
    /// Image/text split section.
    Split(SplitScene),
    /// Word-by-word reveal.
    FullscreenText(FullscreenTextScene),
    /// Closing card.
    Finale(FinaleScene),
    /// Tag this build does not know.
    #[serde(other)]
    Unknown,
}

impl Scene {
    /// Scene id; `None` for unknown scenes.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Landing(s) => Some(&s.id),
            Self::Hero(s) => Some(&s.id),
            Self::Parallax(s) => Some(&s.id),
            Self::Split(s) => Some(&s.id),
            Self::FullscreenText(s) => Some(&s.id),
            Self::Finale(s) => Some(&s.id),
            Self::Unknown => None,
        }
    }

    /// Discriminant as written in JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Landing(_) => "landing",
            Self::Hero(_) => "hero",
            Self::Parallax(_) => "parallax",
            Self::Split(_) => "split",
            Self::FullscreenText(_) => "fullscreen-text",
            Self::Finale(_) => "finale",
            Self::Unknown => "unknown",
        }
    }

    /// Still images this scene displays.
    pub fn image_urls(&self) -> Vec<&str> {
        match self {
            Self::Hero(h) if !h.is_video => h.background.as_deref().into_iter().collect(),
            Self::Parallax(p) => vec![p.background.as_str()],
            Self::Split(s) => vec![s.image.as_str()],
            _ => Vec::new(),
        }
    }
}

/// Ordered scene list.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SceneDeck {
    scenes: Vec<Scene>,
}

impl SceneDeck {
    /// Wrap scenes in display order.
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self { scenes }
    }

    /// Parse a JSON array of scenes.
    pub fn from_reader<R: std::io::Read>(r: R) -> CineloreResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CineloreError::serde(format!("parse scene deck JSON: {e}")))
    }

    /// Parse a JSON file and validate.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> CineloreResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CineloreError::validation(format!("open scene deck JSON '{}': {e}", path.display()))
        })?;
        let deck = Self::from_reader(BufReader::new(f))?;
        deck.validate()?;
        let unknown = deck.scenes.iter().filter(|s| **s == Scene::Unknown).count();
        if unknown > 0 {
            tracing::warn!(unknown, "scene deck contains unknown scene types; they render nothing");
        }
        tracing::debug!(scenes = deck.scenes.len(), "scene deck loaded");
        Ok(deck)
    }

    /// Scenes in display order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Reject duplicate ids and empty word lists.
    pub fn validate(&self) -> CineloreResult<()> {
        let mut ids = HashSet::new();
        for scene in &self.scenes {
            let Some(id) = scene.id() else {
                continue;
            };
            if id.is_empty() {
                return Err(CineloreError::validation(format!(
                    "{} scene has an empty id",
                    scene.kind()
                )));
            }
            if !ids.insert(id) {
                return Err(CineloreError::validation(format!("duplicate scene id '{id}'")));
            }
            if let Scene::FullscreenText(t) = scene
                && (t.words.is_empty() || t.words.iter().any(|w| w.trim().is_empty()))
            {
                return Err(CineloreError::validation(format!(
                    "fullscreen-text scene '{id}' needs non-empty words"
                )));
            }
        }
        Ok(())
    }

    /// Background of the first hero scene, when it is a video.
    pub fn hero_video(&self) -> Option<&str> {
        let hero = self.scenes.iter().find_map(|s| match s {
            Scene::Hero(h) => Some(h),
            _ => None,
        })?;
        hero.is_video.then_some(hero.background.as_deref()).flatten()
    }

    /// Every still image the deck displays, deduplicated, in first-use order.
    pub fn asset_urls(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.scenes
            .iter()
            .flat_map(Scene::image_urls)
            .filter(|u| seen.insert(*u))
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/scene.rs"]
mod tests;
