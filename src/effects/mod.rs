pub(crate) mod engine;
pub(crate) mod geometry;
pub(crate) mod lens;
pub(crate) mod mirror;
pub(crate) mod photometric;
pub(crate) mod warp;
