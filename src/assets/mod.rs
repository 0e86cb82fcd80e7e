pub(crate) mod color;
pub(crate) mod media;
pub(crate) mod text;
