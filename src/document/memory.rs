use crate::{
    assets::decode::{MeasuredImage, decode_image},
    document::model::{Container, ContainerId, Document, Page, PageId},
    document::runtime::{ContainerHandle, DocumentRuntime, ResizeBehavior, ResizeRequest},
    foundation::core::{Rect, Size, Vec2, ensure_positive_size},
    foundation::error::{PagecraftError, PagecraftResult},
};

/// Host runtime over an owned [`Document`].
///
/// Writes are only accepted inside [`DocumentRuntime::run_atomic`]. A failed edit restores
/// the snapshot taken when the edit began, so a failed transaction leaves no trace.
#[derive(Clone, Debug)]
pub struct InMemoryRuntime {
    doc: Document,
    current_page: Option<PageId>,
    preferred_resize: bool,
    in_edit: bool,
    commits: u64,
}

impl InMemoryRuntime {
    /// Wrap `doc`; the first page is the current one.
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            current_page: None,
            preferred_resize: true,
            in_edit: false,
            commits: 0,
        }
    }

    /// Declare whether the preferred sizing primitive is available.
    pub fn with_preferred_resize(mut self, available: bool) -> Self {
        self.preferred_resize = available;
        self
    }

    /// Select the page reported by `current_page_dimensions`.
    pub fn set_current_page(&mut self, page: PageId) -> PagecraftResult<()> {
        self.doc.page(page).ok_or_else(|| unknown_page(page))?;
        self.current_page = Some(page);
        Ok(())
    }

    /// Current document state.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Give the document back.
    pub fn into_document(self) -> Document {
        self.doc
    }

    /// Number of atomic edits committed so far.
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    fn ensure_in_edit(&self, what: &str) -> PagecraftResult<()> {
        if self.in_edit {
            Ok(())
        } else {
            Err(PagecraftError::validation(format!(
                "{what} attempted outside of an atomic edit"
            )))
        }
    }

    fn page_mut(&mut self, id: PageId) -> PagecraftResult<&mut Page> {
        self.doc.page_mut(id).ok_or_else(|| unknown_page(id))
    }

    fn container_mut(&mut self, handle: ContainerHandle) -> PagecraftResult<&mut Container> {
        self.page_mut(handle.page)?
            .frame
            .container_mut(handle.container)
            .ok_or_else(|| unknown_container(handle))
    }
}

impl DocumentRuntime for InMemoryRuntime {
    fn list_pages(&self) -> Vec<PageId> {
        self.doc.pages().iter().map(|p| p.id).collect()
    }

    fn page(&self, id: PageId) -> PagecraftResult<&Page> {
        self.doc.page(id).ok_or_else(|| unknown_page(id))
    }

    fn container(&self, handle: ContainerHandle) -> PagecraftResult<&Container> {
        self.page(handle.page)?
            .frame
            .container(handle.container)
            .ok_or_else(|| unknown_container(handle))
    }

    fn current_page_dimensions(&self) -> PagecraftResult<Size> {
        let page = match self.current_page.and_then(|id| self.doc.page(id)) {
            Some(page) => page,
            None => self
                .doc
                .pages()
                .first()
                .ok_or_else(|| PagecraftError::validation("document has no pages"))?,
        };
        Ok(page.size)
    }

    fn create_page(&mut self, size: Size, name: &str) -> PagecraftResult<PageId> {
        self.ensure_in_edit("create_page")?;
        self.doc.add_page(size, name)
    }

    fn delete_pages(&mut self, pages: &[PageId]) -> PagecraftResult<()> {
        self.ensure_in_edit("delete_pages")?;
        for id in pages {
            self.page(*id)?;
        }
        let remaining = self
            .doc
            .pages()
            .iter()
            .filter(|p| !pages.contains(&p.id))
            .count();
        if remaining == 0 {
            return Err(PagecraftError::validation(
                "cannot delete every page; a document keeps at least one",
            ));
        }
        self.doc.remove_pages(pages);
        if self.current_page.is_some_and(|id| pages.contains(&id)) {
            self.current_page = None;
        }
        Ok(())
    }

    fn set_page_size(&mut self, page: PageId, size: Size) -> PagecraftResult<()> {
        self.ensure_in_edit("set_page_size")?;
        let size = ensure_positive_size(size.width, size.height)?;
        self.page_mut(page)?.size = size;
        Ok(())
    }

    fn append_container(
        &mut self,
        page: PageId,
        container: Container,
    ) -> PagecraftResult<ContainerId> {
        self.ensure_in_edit("append_container")?;
        self.doc.add_container(page, container)
    }

    fn remove_containers(
        &mut self,
        page: PageId,
        containers: &[ContainerId],
    ) -> PagecraftResult<()> {
        self.ensure_in_edit("remove_containers")?;
        self.page_mut(page)?
            .frame
            .containers
            .retain(|c| !containers.contains(&c.id));
        Ok(())
    }

    fn set_translation(
        &mut self,
        handle: ContainerHandle,
        translation: Vec2,
    ) -> PagecraftResult<()> {
        self.ensure_in_edit("set_translation")?;
        self.container_mut(handle)?.translation = translation;
        Ok(())
    }

    fn resize_container(
        &mut self,
        handle: ContainerHandle,
        request: ResizeRequest,
    ) -> PagecraftResult<()> {
        self.ensure_in_edit("resize_container")?;
        if !self.preferred_resize {
            return Err(PagecraftError::validation(
                "preferred resize primitive is unavailable",
            ));
        }
        let container = self.container_mut(handle)?;
        let size = resolve_resize(container.media.natural_size(), request)?;
        container.scale_to(size);
        Ok(())
    }

    fn set_clip_and_media(
        &mut self,
        handle: ContainerHandle,
        clip: Size,
        media: Rect,
    ) -> PagecraftResult<()> {
        self.ensure_in_edit("set_clip_and_media")?;
        let clip = ensure_positive_size(clip.width, clip.height)?;
        let media_size = ensure_positive_size(media.width(), media.height())?;
        let container = self.container_mut(handle)?;
        container.size = clip;
        container.media.size = media_size;
        container.media.offset = media.origin().to_vec2();
        Ok(())
    }

    fn decode_image(&self, bytes: &[u8]) -> PagecraftResult<MeasuredImage> {
        decode_image(bytes)
    }

    fn run_atomic<F>(&mut self, edit: F) -> PagecraftResult<()>
    where
        F: FnOnce(&mut Self) -> PagecraftResult<()>,
    {
        if self.in_edit {
            return Err(PagecraftError::validation(
                "atomic edits cannot be nested",
            ));
        }
        let snapshot = self.doc.clone();
        let current = self.current_page;
        self.in_edit = true;
        let result = edit(self);
        self.in_edit = false;
        match result {
            Ok(()) => {
                self.commits += 1;
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "atomic edit failed; restoring snapshot");
                self.doc = snapshot;
                self.current_page = current;
                Err(e)
            }
        }
    }
}

/// How the host's own sizing primitive interprets a request against the media aspect.
fn resolve_resize(natural: Size, request: ResizeRequest) -> PagecraftResult<Size> {
    let aspect = natural.width / natural.height;
    let size = match (request.width, request.height, request.behavior) {
        (Some(w), Some(h), ResizeBehavior::Contain) => {
            let scale = (w / natural.width).min(h / natural.height);
            natural * scale
        }
        (Some(w), Some(h), ResizeBehavior::Cover) => {
            let scale = (w / natural.width).max(h / natural.height);
            natural * scale
        }
        (Some(w), _, ResizeBehavior::Proportional) => Size::new(w, w / aspect),
        (None, Some(h), ResizeBehavior::Proportional) => Size::new(h * aspect, h),
        _ => {
            return Err(PagecraftError::validation(format!(
                "resize request {request:?} is missing a dimension"
            )));
        }
    };
    ensure_positive_size(size.width, size.height)
}

fn unknown_page(id: PageId) -> PagecraftError {
    PagecraftError::validation(format!("unknown page {}", id.0))
}

fn unknown_container(handle: ContainerHandle) -> PagecraftError {
    PagecraftError::container_mutation(
        handle.container.0,
        format!("not found on page {}", handle.page.0),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/document/memory.rs"]
mod tests;
