//! Source type detection and display names.

use serde::{Deserialize, Serialize};

/// The kind of media source a library URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceType {
    LocalDirectory,
    LocalImage,
    Video,
    VideoPlaylist,
    List,
    Tumblr,
    Reddit,
    Imgur,
    Twitter,
    DeviantArt,
    Instagram,
    E621,
    Danbooru,
    Gelbooru,
    Luscious,
    Sexcom,
    ImageFap,
    Hydrus,
    Piwigo,
    Bdsmlr,
}

// ---------------------------------------------------------------------------
// Extension category constants
// ---------------------------------------------------------------------------

pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mov", "avi", "mkv", "wmv", "webm", "flv", "mpg", "mpeg", "ogv", "3gp", "ts",
    "mts", "m2ts",
];

pub const VIDEO_PLAYLIST_EXTENSIONS: &[&str] = &["asx", "m3u", "m3u8", "pls", "xspf"];

pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "svg", "tif", "tiff", "heic", "avif",
];

/// Hosted galleries recognised by host name. Entries starting with `.` match
/// any subdomain.
const HOSTED_SOURCES: &[(&str, SourceType)] = &[
    (".tumblr.com", SourceType::Tumblr),
    ("reddit.com", SourceType::Reddit),
    ("imgur.com", SourceType::Imgur),
    ("twitter.com", SourceType::Twitter),
    ("x.com", SourceType::Twitter),
    ("deviantart.com", SourceType::DeviantArt),
    ("instagram.com", SourceType::Instagram),
    ("e621.net", SourceType::E621),
    ("danbooru.donmai.us", SourceType::Danbooru),
    ("gelbooru.com", SourceType::Gelbooru),
    ("luscious.net", SourceType::Luscious),
    ("sex.com", SourceType::Sexcom),
    ("imagefap.com", SourceType::ImageFap),
    (".bdsmlr.com", SourceType::Bdsmlr),
];

/// Default port of the Hydrus client API.
const HYDRUS_PORT: &str = ":45869";

impl SourceType {
    /// Classifies a library URL or local path.
    pub fn from_url(url: &str) -> Self {
        let trimmed = url.trim();
        let extension = extension_of(trimmed);

        if let Some(extension) = extension.as_deref() {
            if VIDEO_EXTENSIONS.contains(&extension) {
                return Self::Video;
            }
            if VIDEO_PLAYLIST_EXTENSIONS.contains(&extension) {
                return Self::VideoPlaylist;
            }
        }

        if let Some(host) = remote_host(trimmed) {
            if host.ends_with(HYDRUS_PORT) {
                return Self::Hydrus;
            }
            let host = host.trim_start_matches("www.");
            for (pattern, source_type) in HOSTED_SOURCES {
                let matched = if pattern.starts_with('.') {
                    host.ends_with(pattern)
                } else {
                    host == *pattern || host.ends_with(&format!(".{pattern}"))
                };
                if matched {
                    return *source_type;
                }
            }
            if trimmed.to_ascii_lowercase().contains("/piwigo/") {
                return Self::Piwigo;
            }
            return Self::List;
        }

        match extension.as_deref() {
            Some("txt") => Self::List,
            Some(extension) if IMAGE_EXTENSIONS.contains(&extension) => Self::LocalImage,
            _ => Self::LocalDirectory,
        }
    }

    /// The name shown in the UI and matched by `{Type}` tokens.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::LocalDirectory => "Local Directory",
            Self::LocalImage => "Local Image",
            Self::Video => "Video",
            Self::VideoPlaylist => "Video Playlist",
            Self::List => "URL List",
            Self::Tumblr => "Tumblr",
            Self::Reddit => "Reddit",
            Self::Imgur => "Imgur",
            Self::Twitter => "Twitter",
            Self::DeviantArt => "DeviantArt",
            Self::Instagram => "Instagram",
            Self::E621 => "e621",
            Self::Danbooru => "Danbooru",
            Self::Gelbooru => "Gelbooru",
            Self::Luscious => "Luscious",
            Self::Sexcom => "Sex.com",
            Self::ImageFap => "ImageFap",
            Self::Hydrus => "Hydrus",
            Self::Piwigo => "Piwigo",
            Self::Bdsmlr => "BDSMlr",
        }
    }

    pub fn is_video(self) -> bool {
        self == Self::Video
    }
}

/// Returns the lowercase host (with port) of an `http(s)://` URL.
fn remote_host(url: &str) -> Option<String> {
    let lower = url.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(rest[..end].to_string())
}

/// Extension of the last path segment, lowercased, ignoring any query string.
fn extension_of(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let (stem, extension) = name.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}
