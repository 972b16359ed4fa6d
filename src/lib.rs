//! Pagecraft applies geometric batch mutations to paginated visual documents.
//!
//! A batch operation (fit-to-frame, watermark, page layout resize, reset, bulk import)
//! targets every page of a document or a contiguous 1-indexed [`PageRange`], and lands as a
//! single atomic edit on a host [`DocumentRuntime`].
//!
//! # Operation flow
//!
//! 1. **Prepare**: validate settings, resolve the range, decode assets (bulk import decodes
//!    in parallel on a rayon pool).
//! 2. **Mutate**: one [`DocumentRuntime::run_atomic`] call applies every write. Per-item
//!    problems are collected as [`ItemFailure`]s; anything escaping the edit is a fatal
//!    [`PagecraftError::TransactionFailed`] and the host rolls back.
//! 3. **Report**: a [`BatchSummary`] with processed, skipped and failed items.
//!
//! Engine-created content (watermarks) is tagged so later passes leave it alone.
//!
//! [`InMemoryRuntime`] is a complete host over an owned [`Document`], with snapshot rollback.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod batch;
mod config;
mod document;
mod foundation;
mod layout;

pub use assets::decode::{MeasuredImage, decode_image};
pub use batch::gate::{is_previously_processed, mark_processed};
pub use batch::lifecycle::{BatchKind, BatchLifecycle, BatchPhase, BatchSummary, ItemFailure};
pub use batch::ops::fit::fit_to_frame;
pub use batch::ops::import::{ImportAsset, bulk_import};
pub use batch::ops::layout::resize_page_layout;
pub use batch::ops::pages::{PageInfo, list_pages};
pub use batch::ops::reset::reset_document;
pub use batch::ops::watermark::{WatermarkSettings, inject_watermark};
pub use config::{DEFAULT_WATERMARK_MARGIN, EngineConfig};
pub use document::memory::InMemoryRuntime;
pub use document::model::{
    Container, ContainerId, Document, Frame, MediaPlacement, Page, PageId, TAG_TRUE,
    WATERMARK_TAG,
};
pub use document::runtime::{ContainerHandle, DocumentRuntime, ResizeBehavior, ResizeRequest};
pub use foundation::core::{Anchor, FitMode, PageRange, Point, Rect, Size, Vec2};
pub use foundation::error::{PagecraftError, PagecraftResult};
pub use layout::anchor::compute_position;
pub use layout::fit::compute_fit_size;
pub use layout::preset::{AspectRatio, LayoutPreset, PageLayoutSettings};
pub use layout::range::resolve_range;
