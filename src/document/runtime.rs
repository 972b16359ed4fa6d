use crate::{
    assets::decode::MeasuredImage,
    document::model::{Container, ContainerId, Page, PageId},
    foundation::core::{FitMode, Rect, Size, Vec2},
    foundation::error::PagecraftResult,
};

/// Addresses one container inside one page's frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContainerHandle {
    /// Owning page.
    pub page: PageId,
    /// Container within that page's frame.
    pub container: ContainerId,
}

/// Aspect handling requested from the host's sizing primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeBehavior {
    /// Fit the media inside the requested box.
    Contain,
    /// Cover the requested box with the media.
    Cover,
    /// Scale from a single dimension, keeping the media aspect.
    Proportional,
}

impl From<FitMode> for ResizeBehavior {
    fn from(mode: FitMode) -> Self {
        match mode {
            FitMode::Contain => ResizeBehavior::Contain,
            FitMode::Fill => ResizeBehavior::Cover,
        }
    }
}

/// Arguments of the preferred sizing primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeRequest {
    /// Target width, if constrained.
    pub width: Option<f64>,
    /// Target height, if constrained.
    pub height: Option<f64>,
    /// How the media aspect is treated.
    pub behavior: ResizeBehavior,
}

impl ResizeRequest {
    /// Resize into an explicit box.
    pub fn boxed(size: Size, behavior: ResizeBehavior) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
            behavior,
        }
    }
}

/// Host document runtime the engine mutates.
///
/// Implementations own the scene graph. Every mutating method is only valid inside
/// [`DocumentRuntime::run_atomic`]; reads are valid anywhere. `resize_container` is the
/// preferred sizing primitive and may fail or be unavailable, in which case the engine falls
/// back to `set_clip_and_media`.
pub trait DocumentRuntime {
    /// Page handles in document order.
    fn list_pages(&self) -> Vec<PageId>;

    /// Read one page.
    fn page(&self, id: PageId) -> PagecraftResult<&Page>;

    /// Read one container.
    fn container(&self, handle: ContainerHandle) -> PagecraftResult<&Container>;

    /// Size of the page the user is currently looking at.
    fn current_page_dimensions(&self) -> PagecraftResult<Size>;

    /// Append a new empty page at the end of the document.
    fn create_page(&mut self, size: Size, name: &str) -> PagecraftResult<PageId>;

    /// Delete pages. The document must keep at least one page.
    fn delete_pages(&mut self, pages: &[PageId]) -> PagecraftResult<()>;

    /// Change a page's (and therefore its frame's) size.
    fn set_page_size(&mut self, page: PageId, size: Size) -> PagecraftResult<()>;

    /// Append a container to the end of a page's frame and return its handle.
    fn append_container(&mut self, page: PageId, container: Container)
    -> PagecraftResult<ContainerId>;

    /// Remove containers from a page's frame.
    fn remove_containers(&mut self, page: PageId, containers: &[ContainerId])
    -> PagecraftResult<()>;

    /// Move a container.
    fn set_translation(&mut self, handle: ContainerHandle, translation: Vec2)
    -> PagecraftResult<()>;

    /// Preferred sizing primitive.
    fn resize_container(
        &mut self,
        handle: ContainerHandle,
        request: ResizeRequest,
    ) -> PagecraftResult<()>;

    /// Low-level edit: set the clip region size and the media rectangle inside it.
    fn set_clip_and_media(
        &mut self,
        handle: ContainerHandle,
        clip: Size,
        media: Rect,
    ) -> PagecraftResult<()>;

    /// Decode and measure encoded image bytes.
    fn decode_image(&self, bytes: &[u8]) -> PagecraftResult<MeasuredImage>;

    /// Run `edit` as one atomic unit: all of its writes land, or none are trusted.
    fn run_atomic<F>(&mut self, edit: F) -> PagecraftResult<()>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> PagecraftResult<()>;
}
