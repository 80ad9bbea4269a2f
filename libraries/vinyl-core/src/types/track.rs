/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// A playable track resolved from a streaming provider
///
/// Immutable once created. Duration is carried in the provider's display
/// form (`"m:ss"`); use [`Track::duration_seconds`] for arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Duration as displayed (`"m:ss"`)
    pub duration: String,

    /// Artwork image URL
    pub artwork_url: Option<String>,

    /// Platform the track was resolved from
    pub platform: SourcePlatform,
}

impl Track {
    /// Create a new track with a generated id
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        duration: impl Into<String>,
        platform: SourcePlatform,
    ) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            artist: artist.into(),
            duration: duration.into(),
            artwork_url: None,
            platform,
        }
    }

    /// Attach an artwork URL
    pub fn with_artwork(mut self, url: impl Into<String>) -> Self {
        self.artwork_url = Some(url.into());
        self
    }

    /// Total duration in seconds
    ///
    /// Parses the `"m:ss"` display string (also accepts `"h:mm:ss"`).
    /// A malformed duration yields 0 so downstream time math formats as
    /// `"0:00"` instead of failing.
    pub fn duration_seconds(&self) -> u64 {
        parse_duration(&self.duration).unwrap_or(0)
    }
}

fn parse_duration(display: &str) -> Option<u64> {
    let mut total = 0u64;
    for part in display.split(':') {
        let value: u64 = part.trim().parse().ok()?;
        total = total.checked_mul(60)?.checked_add(value)?;
    }
    if display.contains(':') {
        Some(total)
    } else {
        None
    }
}

/// Format a second count as a `"m:ss"` display string
pub fn format_seconds(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Streaming platform a track originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcePlatform {
    /// Resolved via Spotify
    Spotify,
    /// Resolved via SoundCloud
    SoundCloud,
    /// Resolved via YouTube
    YouTube,
}

impl SourcePlatform {
    /// Convert platform tag to string for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            SourcePlatform::Spotify => "spotify",
            SourcePlatform::SoundCloud => "soundcloud",
            SourcePlatform::YouTube => "youtube",
        }
    }

    /// Parse platform tag from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "spotify" => Some(SourcePlatform::Spotify),
            "soundcloud" => Some(SourcePlatform::SoundCloud),
            "youtube" => Some(SourcePlatform::YouTube),
            _ => None,
        }
    }
}
