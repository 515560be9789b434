//! Pass factories and pass libraries shipped with the engine.

mod descriptor;
mod opaque;
pub mod standard;

pub use descriptor::PassDescriptor;
pub use opaque::OpaquePass;
pub use standard::StandardLibrary;
