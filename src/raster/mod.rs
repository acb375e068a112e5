pub(crate) mod image;
pub(crate) mod mask;
