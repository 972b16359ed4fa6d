pub(crate) mod fit;
pub(crate) mod import;
pub(crate) mod layout;
pub(crate) mod pages;
pub(crate) mod reset;
pub(crate) mod watermark;
