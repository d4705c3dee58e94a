pub(crate) mod grid;
pub mod model;
pub mod store;
