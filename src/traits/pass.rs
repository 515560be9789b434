use std::any::Any;
use std::sync::Arc;

use crate::graph::{ParameterSchema, Parameters, Port};

/// The opaque compute body of a pass instance.
///
/// The engine never calls into a pass body; it only hands bodies to the host
/// in a dependency-respecting order. Hosts recover their concrete pass types
/// through [`RenderPass::as_any`].
pub trait RenderPass: Send + Sync {
    /// The pass type this body was created for
    fn name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}

/// Creates instances of one pass type.
///
/// The registry checks parameters against [`PassFactory::schema`] before
/// calling any other method, so `reflect` and `instantiate` always receive a
/// complete, well-formed parameter dictionary.
pub trait PassFactory: Send + Sync {
    /// One-line human readable description of the pass type
    fn description(&self) -> &str {
        ""
    }

    fn schema(&self) -> &ParameterSchema;

    /// Declare the ports an instance configured with `params` exposes
    fn reflect(&self, params: &Parameters) -> Vec<Port>;

    /// Default scheduling priority for instances of this type
    fn priority(&self) -> Option<i32> {
        None
    }

    /// Build a fresh body. Each call must return an independent instance.
    fn instantiate(&self, type_name: &str, params: &Parameters) -> Arc<dyn RenderPass>;
}
