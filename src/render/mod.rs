pub(crate) mod ffmpeg;
pub(crate) mod outputs;
pub(crate) mod recording;
pub(crate) mod scene;
