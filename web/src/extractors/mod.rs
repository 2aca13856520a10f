pub(crate) mod negotiated_format;
