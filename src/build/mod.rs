pub(crate) mod builder;
pub(crate) mod options;
pub(crate) mod result;
