//! Read-only lookups the engine consults while filtering.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use fnv::FnvHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Playlist, RecordId, Tag, TagId};

pub trait RecordLookup<R> {
    fn record(&self, id: RecordId) -> Option<&R>;
}

pub trait TagLookup {
    fn tag(&self, id: TagId) -> Option<&Tag>;
}

pub trait PlaylistLookup {
    fn playlist(&self, name: &str) -> Option<&Playlist>;
}

impl<R, S: BuildHasher> RecordLookup<R> for HashMap<RecordId, R, S> {
    fn record(&self, id: RecordId) -> Option<&R> {
        self.get(&id)
    }
}

impl<R> RecordLookup<R> for BTreeMap<RecordId, R> {
    fn record(&self, id: RecordId) -> Option<&R> {
        self.get(&id)
    }
}

impl<S: BuildHasher> TagLookup for HashMap<TagId, Tag, S> {
    fn tag(&self, id: TagId) -> Option<&Tag> {
        self.get(&id)
    }
}

impl TagLookup for BTreeMap<TagId, Tag> {
    fn tag(&self, id: TagId) -> Option<&Tag> {
        self.get(&id)
    }
}

impl TagLookup for [Tag] {
    fn tag(&self, id: TagId) -> Option<&Tag> {
        self.iter().find(|tag| tag.id == id)
    }
}

impl TagLookup for Vec<Tag> {
    fn tag(&self, id: TagId) -> Option<&Tag> {
        self.as_slice().tag(id)
    }
}

impl<S: BuildHasher> PlaylistLookup for HashMap<String, Playlist, S> {
    fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.get(name)
    }
}

impl PlaylistLookup for BTreeMap<String, Playlist> {
    fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.get(name)
    }
}

impl PlaylistLookup for [Playlist] {
    fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.iter().find(|playlist| playlist.name == name)
    }
}

impl PlaylistLookup for Vec<Playlist> {
    fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.as_slice().playlist(name)
    }
}

/// Borrowed lookups for one filtering pass.
pub struct LibraryView<'a, R> {
    pub records: &'a dyn RecordLookup<R>,
    pub tags: &'a dyn TagLookup,
    pub playlists: &'a dyn PlaylistLookup,
}

impl<'a, R> LibraryView<'a, R> {
    pub fn new(
        records: &'a dyn RecordLookup<R>,
        tags: &'a dyn TagLookup,
        playlists: &'a dyn PlaylistLookup,
    ) -> Self {
        Self {
            records,
            tags,
            playlists,
        }
    }
}

/// Owned lookup tables, typically decoded from the host's entity stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
#[serde(default)]
pub struct LibrarySnapshot<R> {
    pub records: FnvHashMap<RecordId, R>,
    pub tags: FnvHashMap<TagId, Tag>,
    pub playlists: FnvHashMap<String, Playlist>,
}

impl<R> Default for LibrarySnapshot<R> {
    fn default() -> Self {
        Self {
            records: FnvHashMap::default(),
            tags: FnvHashMap::default(),
            playlists: FnvHashMap::default(),
        }
    }
}

impl<R> LibrarySnapshot<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_record(&mut self, id: RecordId, record: R) {
        self.records.insert(id, record);
    }

    pub fn insert_tag(&mut self, tag: Tag) {
        self.tags.insert(tag.id, tag);
    }

    pub fn insert_playlist(&mut self, playlist: Playlist) {
        self.playlists.insert(playlist.name.clone(), playlist);
    }

    pub fn view(&self) -> LibraryView<'_, R> {
        LibraryView::new(&self.records, &self.tags, &self.playlists)
    }
}

impl<R: DeserializeOwned> LibrarySnapshot<R> {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
