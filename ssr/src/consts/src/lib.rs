pub mod limits;

use once_cell::sync::Lazy;
use reqwest::Url;

pub const SITE_NAME: &str = "Roots & Rain Organic Collective";
pub const SITE_TAGLINE: &str = "Grown slow, picked fresh, delivered by neighbours";

/// Gemini v1beta root. Model calls and operation polls are resolved against it.
pub static GEMINI_API_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("https://generativelanguage.googleapis.com/v1beta/").unwrap());

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const GEMINI_API_KEY_HEADER: &str = "x-goog-api-key";
pub const GEMINI_API_KEY_DOCS: &str = "https://ai.google.dev/gemini-api/docs/api-key";

/// Provider error text meaning the selected key no longer resolves.
pub const CREDENTIAL_INVALID_SIGNAL: &str = "Requested entity was not found";

pub mod veo {
    pub const FAST_MODEL: &str = "veo-3.1-fast-generate-preview";
    pub const QUALITY_MODEL: &str = "veo-3.1-generate-preview";
    pub const VIDEO_MIME: &str = "video/mp4";
    pub const DOWNLOAD_FILE_NAME: &str = "roots-and-rain.mp4";
}

pub mod whatsapp {
    pub const BASE_URL: &str = "https://wa.me";
    /// International format, digits only.
    pub const ORDER_NUMBER: &str = "919845012345";
}

pub mod social {
    pub const INSTAGRAM: &str = "https://instagram.com/rootsandrain.organic";
    pub const EMAIL: &str = "hello@rootsandrain.org";
}
