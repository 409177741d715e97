pub(crate) mod narrative;
pub(crate) mod select;
pub(crate) mod synth;
