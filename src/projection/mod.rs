pub(crate) mod observer;
pub(crate) mod screen;
pub(crate) mod state;
