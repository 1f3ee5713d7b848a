pub(crate) mod debug;
pub(crate) mod pipeline;
pub(crate) mod session;
