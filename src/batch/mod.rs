pub(crate) mod gate;
pub(crate) mod lifecycle;
pub(crate) mod ops;
pub(crate) mod transaction;
