use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(pub String);

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolution variants served for a single photo, largest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrls {
    pub raw: String,
    pub full: String,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,
    pub username: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub image_urls: ImageUrls,
    pub alt_text: Option<String>,
    pub creator: Creator,
    pub dimensions: Dimensions,
    pub like_count: u64,
    pub view_count: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// One page of normalized results from a photo source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageResult {
    pub photos: Vec<Photo>,
    pub has_more: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryLayout {
    #[default]
    Grid,
    Carousel,
    List,
    Cards,
}

impl GalleryLayout {
    pub const ALL: [GalleryLayout; 4] = [
        GalleryLayout::Grid,
        GalleryLayout::Carousel,
        GalleryLayout::List,
        GalleryLayout::Cards,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryLayout::Grid => "grid",
            GalleryLayout::Carousel => "carousel",
            GalleryLayout::List => "list",
            GalleryLayout::Cards => "cards",
        }
    }
}

impl fmt::Display for GalleryLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gallery layout '{0}'")]
pub struct UnknownLayout(pub String);

impl FromStr for GalleryLayout {
    type Err = UnknownLayout;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        GalleryLayout::ALL
            .into_iter()
            .find(|layout| layout.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownLayout(value.to_string()))
    }
}
