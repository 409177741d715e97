pub(crate) mod load;
pub(crate) mod model;
pub(crate) mod repository;
pub(crate) mod resolve;
