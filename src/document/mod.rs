pub(crate) mod memory;
pub(crate) mod model;
pub(crate) mod runtime;
