pub(crate) mod ffmpeg;
pub(crate) mod frames;
pub(crate) mod output;
pub(crate) mod sink;
pub(crate) mod video;
