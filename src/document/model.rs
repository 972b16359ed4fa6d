use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Rect, Size, Vec2, ensure_positive_size};
use crate::foundation::error::{PagecraftError, PagecraftResult};

/// Tag key marking a container stamped by watermark injection.
pub const WATERMARK_TAG: &str = "isWatermark";
/// Tag value the idempotency gate looks for.
pub const TAG_TRUE: &str = "true";

/// Stable page handle, unique within a document.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PageId(pub u64);

/// Stable container handle, unique within a document.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ContainerId(pub u64);

impl ContainerId {
    /// Placeholder carried by containers that have not been appended yet.
    pub const UNASSIGNED: ContainerId = ContainerId(0);
}

/// Media held by a container, in container-local coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaPlacement {
    natural_size: Size,
    /// Offset of the media's top-left corner inside the container's clip region.
    pub offset: Vec2,
    /// Displayed media size.
    pub size: Size,
}

impl MediaPlacement {
    fn new(natural_size: Size) -> Self {
        Self {
            natural_size,
            offset: Vec2::ZERO,
            size: natural_size,
        }
    }

    /// Size of the media as it was decoded. Fixed at creation time.
    pub fn natural_size(&self) -> Size {
        self.natural_size
    }

    /// Aspect ratio of the unscaled media.
    pub fn natural_aspect(&self) -> f64 {
        self.natural_size.width / self.natural_size.height
    }
}

/// A positioned, sized node holding imported media or a watermark image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Container {
    /// Handle assigned by the runtime on append.
    #[serde(default = "unassigned_container")]
    pub id: ContainerId,
    /// Top-left position inside the frame.
    pub translation: Vec2,
    /// Size of the container's clip region.
    pub size: Size,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Media placement within the clip region.
    pub media: MediaPlacement,
    /// Free-form string tags (idempotency markers live here).
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

fn unassigned_container() -> ContainerId {
    ContainerId::UNASSIGNED
}

impl Container {
    /// Unpositioned, fully opaque container showing media at its natural size.
    pub fn with_media(natural_size: Size) -> PagecraftResult<Self> {
        let natural_size = ensure_positive_size(natural_size.width, natural_size.height)?;
        Ok(Self {
            id: ContainerId::UNASSIGNED,
            translation: Vec2::ZERO,
            size: natural_size,
            opacity: 1.0,
            media: MediaPlacement::new(natural_size),
            tags: BTreeMap::new(),
        })
    }

    /// Set `key = value`, replacing any previous value.
    pub fn tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    /// Frame-space bounds of the clip region.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.translation.to_point(), self.size)
    }

    /// Scale the clip region and its media together to `size`, media pinned at the origin.
    pub(crate) fn scale_to(&mut self, size: Size) {
        self.size = size;
        self.media.size = size;
        self.media.offset = Vec2::ZERO;
    }
}

/// The visible artboard of a page. Its size is the page size.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Children in scene-graph order.
    #[serde(default)]
    pub containers: Vec<Container>,
}

impl Frame {
    /// Look up a child by handle.
    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    /// Mutable lookup by handle.
    pub fn container_mut(&mut self, id: ContainerId) -> Option<&mut Container> {
        self.containers.iter_mut().find(|c| c.id == id)
    }
}

/// One page of a document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Page {
    /// Handle assigned by the document.
    pub id: PageId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Page (and frame) size.
    pub size: Size,
    /// The single artboard.
    #[serde(default)]
    pub frame: Frame,
}

/// Ordered sequence of pages; never empty.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    pages: Vec<Page>,
    #[serde(default)]
    next_id: u64,
}

impl Document {
    /// One empty page of `size`.
    pub fn new(size: Size) -> PagecraftResult<Self> {
        let size = ensure_positive_size(size.width, size.height)?;
        let mut doc = Self {
            pages: Vec::new(),
            next_id: 1,
        };
        doc.push_page(size, String::new());
        Ok(doc)
    }

    /// Parse a document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PagecraftResult<Self> {
        let mut doc: Self = serde_json::from_reader(r)
            .map_err(|e| PagecraftError::validation(format!("parse document JSON: {e}")))?;
        doc.validate()?;
        doc.reseed_ids();
        Ok(doc)
    }

    /// Parse a document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PagecraftResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PagecraftError::validation(format!("open document JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check structural invariants.
    pub fn validate(&self) -> PagecraftResult<()> {
        if self.pages.is_empty() {
            return Err(PagecraftError::validation(
                "document must contain at least one page",
            ));
        }
        let mut page_ids = BTreeSet::new();
        let mut container_ids = BTreeSet::new();
        for page in &self.pages {
            if !page_ids.insert(page.id) {
                return Err(PagecraftError::validation(format!(
                    "duplicate page id {}",
                    page.id.0
                )));
            }
            ensure_positive_size(page.size.width, page.size.height)?;
            for c in &page.frame.containers {
                if c.id != ContainerId::UNASSIGNED && !container_ids.insert(c.id) {
                    return Err(PagecraftError::validation(format!(
                        "duplicate container id {}",
                        c.id.0
                    )));
                }
                let natural = c.media.natural_size();
                ensure_positive_size(natural.width, natural.height)?;
                ensure_positive_size(c.size.width, c.size.height)?;
                if !c.translation.is_finite() {
                    return Err(PagecraftError::validation(format!(
                        "container {} translation must be finite",
                        c.id.0
                    )));
                }
                if !(0.0..=1.0).contains(&c.opacity) {
                    return Err(PagecraftError::validation(format!(
                        "container {} opacity must be within [0, 1]",
                        c.id.0
                    )));
                }
            }
        }
        Ok(())
    }

    /// Pages in document order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Lookup by handle.
    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub(crate) fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    /// Total containers across all frames.
    pub fn container_count(&self) -> usize {
        self.pages.iter().map(|p| p.frame.containers.len()).sum()
    }

    /// Append an empty page. Authoring helper; batch edits go through a runtime.
    pub fn add_page(&mut self, size: Size, name: impl Into<String>) -> PagecraftResult<PageId> {
        let size = ensure_positive_size(size.width, size.height)?;
        Ok(self.push_page(size, name.into()))
    }

    /// Append `container` to the frame of `page`, assigning its handle.
    pub fn add_container(
        &mut self,
        page: PageId,
        mut container: Container,
    ) -> PagecraftResult<ContainerId> {
        let id = ContainerId(self.alloc_id());
        let target = self
            .page_mut(page)
            .ok_or_else(|| PagecraftError::validation(format!("unknown page {}", page.0)))?;
        container.id = id;
        target.frame.containers.push(container);
        Ok(id)
    }

    pub(crate) fn push_page(&mut self, size: Size, name: String) -> PageId {
        let id = PageId(self.alloc_id());
        self.pages.push(Page {
            id,
            name,
            size,
            frame: Frame::default(),
        });
        id
    }

    pub(crate) fn remove_pages(&mut self, ids: &[PageId]) {
        self.pages.retain(|p| !ids.contains(&p.id));
    }

    pub(crate) fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn reseed_ids(&mut self) {
        let max_page = self.pages.iter().map(|p| p.id.0).max().unwrap_or(0);
        let max_container = self
            .pages
            .iter()
            .flat_map(|p| p.frame.containers.iter().map(|c| c.id.0))
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(max_page.max(max_container) + 1);
        for page in &mut self.pages {
            for c in &mut page.frame.containers {
                if c.id == ContainerId::UNASSIGNED {
                    c.id = ContainerId(self.next_id);
                    self.next_id += 1;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
