pub(crate) mod bridge;
pub(crate) mod model;
pub(crate) mod rig;
