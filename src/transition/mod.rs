pub(crate) mod curve;
pub(crate) mod plan;
pub(crate) mod run;
