pub(crate) mod mention;
pub(crate) mod sticker;
