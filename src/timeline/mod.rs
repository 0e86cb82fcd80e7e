pub(crate) mod duration;
pub(crate) mod segment;
