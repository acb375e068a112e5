pub(crate) mod job;
pub(crate) mod opts;
pub(crate) mod scanline;
pub(crate) mod scheduler;
