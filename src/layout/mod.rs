pub(crate) mod anchor;
pub(crate) mod fit;
pub(crate) mod preset;
pub(crate) mod range;
