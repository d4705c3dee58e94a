pub mod ascii;
pub mod backend;
pub mod context;
pub mod motion;
pub mod pipeline;
pub(crate) mod text;
