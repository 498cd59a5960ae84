//! The composed image set: uploaded files and remote URLs in one ordered,
//! tagged sequence.
//!
//! Entries are stored as a single `Vec<ImageEntry>` with every upload ahead
//! of every URL, so absolute position `i < upload_count()` is upload `i` and
//! position `upload_count() + j` is URL `j`. Each entry carries its own tag,
//! which keeps the tag sequence the same length as the image sequence after
//! any mutation.

use marketdesk_core::ViewTag;

/// Default tags for uploaded files, cycled by absolute position.
pub const FILE_DEFAULT_TAGS: [ViewTag; 6] = [
    ViewTag::Front,
    ViewTag::Back,
    ViewTag::Left,
    ViewTag::Right,
    ViewTag::Top,
    ViewTag::Bottom,
];

/// Default tags for URL slots, cycled by position within the URL collection.
pub const URL_DEFAULT_TAGS: [ViewTag; 8] = ViewTag::ALL;

/// A file picked by the user, held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub file_name: String,
    /// Explicit MIME type; inferred from `file_name` when `None`.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Upload(UploadedImage),
    /// May be blank while the user has not typed a URL yet.
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub source: ImageSource,
    pub tag: ViewTag,
}

impl ImageEntry {
    #[must_use]
    pub fn is_upload(&self) -> bool {
        matches!(self.source, ImageSource::Upload(_))
    }
}

/// Which of the two source collections an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageCollection {
    Uploads,
    Urls,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    entries: Vec<ImageEntry>,
}

impl ImageSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn upload_count(&self) -> usize {
        self.entries.iter().take_while(|e| e.is_upload()).count()
    }

    #[must_use]
    pub fn url_count(&self) -> usize {
        self.entries.len() - self.upload_count()
    }

    pub fn uploads(&self) -> impl Iterator<Item = &UploadedImage> {
        self.entries.iter().filter_map(|e| match &e.source {
            ImageSource::Upload(file) => Some(file),
            ImageSource::Url(_) => None,
        })
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match &e.source {
            ImageSource::Url(url) => Some(url.as_str()),
            ImageSource::Upload(_) => None,
        })
    }

    /// The flat tag sequence, indexed by absolute position.
    #[must_use]
    pub fn tags(&self) -> Vec<ViewTag> {
        self.entries.iter().map(|e| e.tag).collect()
    }

    /// Images that will actually be submitted: every upload plus every URL
    /// that is not blank.
    #[must_use]
    pub fn submittable_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| match &e.source {
                ImageSource::Upload(_) => true,
                ImageSource::Url(url) => !url.trim().is_empty(),
            })
            .count()
    }

    /// Absolute position of `index` within `collection`.
    #[must_use]
    pub fn absolute_index(&self, collection: ImageCollection, index: usize) -> usize {
        match collection {
            ImageCollection::Uploads => index,
            ImageCollection::Urls => self.upload_count() + index,
        }
    }

    /// Appends files after the existing uploads (and ahead of any URLs).
    ///
    /// Each new file is tagged from [`FILE_DEFAULT_TAGS`] by its absolute
    /// position, modulo 6.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = UploadedImage>) {
        let start = self.upload_count();
        let new_entries: Vec<ImageEntry> = files
            .into_iter()
            .enumerate()
            .map(|(offset, file)| ImageEntry {
                tag: FILE_DEFAULT_TAGS[(start + offset) % FILE_DEFAULT_TAGS.len()],
                source: ImageSource::Upload(file),
            })
            .collect();
        self.entries.splice(start..start, new_entries);
    }

    /// Appends an empty URL slot and returns its index within the URL
    /// collection.
    ///
    /// The slot is tagged from [`URL_DEFAULT_TAGS`] by its position among
    /// URLs only, modulo 8. Uploads do not shift the cycle, unlike
    /// [`ImageSet::add_files`].
    pub fn add_url_slot(&mut self) -> usize {
        let url_index = self.url_count();
        self.entries.push(ImageEntry {
            source: ImageSource::Url(String::new()),
            tag: URL_DEFAULT_TAGS[url_index % URL_DEFAULT_TAGS.len()],
        });
        url_index
    }

    /// Sets the text of URL slot `index`. Returns `false` if there is no such slot.
    pub fn set_url(&mut self, index: usize, url: impl Into<String>) -> bool {
        if index >= self.url_count() {
            return false;
        }
        let position = self.absolute_index(ImageCollection::Urls, index);
        self.entries[position].source = ImageSource::Url(url.into());
        true
    }

    /// Removes element `index` of `collection` together with its tag; later
    /// entries shift down by one. Returns `None` when out of range.
    pub fn remove_at(&mut self, collection: ImageCollection, index: usize) -> Option<ImageEntry> {
        let in_range = match collection {
            ImageCollection::Uploads => index < self.upload_count(),
            ImageCollection::Urls => index < self.url_count(),
        };
        if !in_range {
            tracing::debug!(?collection, index, "ignoring out-of-range image removal");
            return None;
        }
        let position = self.absolute_index(collection, index);
        Some(self.entries.remove(position))
    }

    /// Overwrites the tag at an absolute position. Returns `false` when out of range.
    pub fn set_tag(&mut self, absolute_index: usize, tag: ViewTag) -> bool {
        match self.entries.get_mut(absolute_index) {
            Some(entry) => {
                entry.tag = tag;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "image_set_test.rs"]
mod tests;
