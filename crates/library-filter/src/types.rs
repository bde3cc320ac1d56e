//! Library record types.
//!
//! These mirror the host application's normalized entity stores. The filter
//! engine only ever reads them.

use serde::{Deserialize, Serialize};
use thin_vec::ThinVec;

pub type RecordId = u64;
pub type TagId = u64;

/// Which library a record (and therefore a token grammar) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryKind {
    Audio,
    Source,
}

impl LibraryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Source => "source",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    #[serde(default)]
    pub members: Vec<RecordId>,
}

impl Playlist {
    pub fn contains(&self, id: RecordId) -> bool {
        self.members.contains(&id)
    }
}

/// A clip cut from a video source, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: u64,
    pub start: f64,
    pub end: f64,
}

/// An entry in the audio library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioRecord {
    pub id: RecordId,
    pub url: String,
    pub name: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub comment: Option<String>,
    pub tags: ThinVec<TagId>,
    pub marked: bool,
    pub played_count: u64,
}

/// An entry in the media source library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceRecord {
    pub id: RecordId,
    pub url: String,
    pub name: Option<String>,
    pub tags: ThinVec<TagId>,
    pub marked: bool,
    pub offline: bool,
    pub clips: ThinVec<Clip>,
    /// Number of items found by the last background scan.
    pub count: u64,
    /// Whether the background scan behind `count` finished.
    pub count_complete: bool,
    /// Video length in seconds, when known.
    pub duration: Option<f64>,
    /// Video height in pixels, when known.
    pub resolution: Option<u64>,
}
