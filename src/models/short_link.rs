use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validations::validate_url;

// DTO for creating a new short link
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateShortLinkDto {
    #[validate(custom(function = "validate_url"))]
    pub original_url: String,
}

/// Represents a shortened URL in the system
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ShortLink {
    /// The unique ID of the short link
    pub id: Uuid,

    /// The original, long URL that was shortened
    pub original_url: String,

    /// The generated short code that identifies this URL
    pub short_code: String,

    /// Number of times this short link has been resolved
    pub clicks: i64,

    /// When this short link was created
    pub created_at: DateTime<Utc>,
}

// DTO for response with short link details
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortLinkResponseDto {
    pub id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

// DTO for resolve responses: only the redirect target is exposed
#[derive(Debug, Serialize, Deserialize)]
pub struct ResolvedUrlDto {
    pub original_url: String,
}

impl From<ShortLink> for ShortLinkResponseDto {
    fn from(link: ShortLink) -> Self {
        ShortLinkResponseDto {
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code,
            clicks: link.clicks,
            created_at: link.created_at,
        }
    }
}

impl From<ShortLink> for ResolvedUrlDto {
    fn from(link: ShortLink) -> Self {
        ResolvedUrlDto {
            original_url: link.original_url,
        }
    }
}
