pub(crate) mod decode;
pub(crate) mod mask_source;
