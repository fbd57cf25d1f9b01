//! Wire shapes of the photo API and their mapping onto domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Creator, Dimensions, ImageUrls, Photo, PhotoId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiImageUrls {
    pub raw: String,
    pub full: String,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiProfileImage {
    pub small: String,
    pub medium: String,
    pub large: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiUser {
    #[serde(default)]
    pub name: Option<String>,
    pub username: String,
    pub profile_image: ApiProfileImage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPhoto {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_description: Option<String>,
    pub urls: ApiImageUrls,
    #[serde(default)]
    pub likes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    pub user: ApiUser,
}

/// Body of the keyword search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPhotosResponse {
    pub total: u64,
    pub total_pages: u32,
    pub results: Vec<ApiPhoto>,
}

/// Error body the API sends alongside non-2xx statuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

impl From<ApiPhoto> for Photo {
    fn from(value: ApiPhoto) -> Self {
        let alt_text = non_blank(value.alt_description).or_else(|| non_blank(value.description));
        let name = non_blank(value.user.name).unwrap_or_else(|| value.user.username.clone());
        Photo {
            id: PhotoId(value.id),
            image_urls: ImageUrls {
                raw: value.urls.raw,
                full: value.urls.full,
                regular: value.urls.regular,
                small: value.urls.small,
                thumb: value.urls.thumb,
            },
            alt_text,
            creator: Creator {
                name,
                username: value.user.username,
                avatar_url: value.user.profile_image.medium,
            },
            dimensions: Dimensions {
                width: value.width,
                height: value.height,
            },
            like_count: value.likes,
            view_count: value.views,
            created_at: value.created_at,
        }
    }
}
