pub mod library;
pub mod pass;

pub use library::PassLibrary;
pub use pass::{PassFactory, RenderPass};
