use std::sync::Arc;

use crate::graph::{ParamSpec, ParameterSchema, Parameters, Port};
use crate::library::OpaquePass;
use crate::traits::{PassFactory, RenderPass};

/// A declarative [`PassFactory`]: a fixed port list, a parameter schema and
/// an opaque body.
///
/// ```
/// use the_render_graph::graph::{ParamKind, ParamSpec, Parameters, Port};
/// use the_render_graph::library::PassDescriptor;
/// use the_render_graph::registry::PassRegistry;
///
/// let mut registry = PassRegistry::new();
/// registry
///     .register(
///         "Blit",
///         PassDescriptor::new("Copies a texture")
///             .port(Port::input("src"))
///             .port(Port::output("dst"))
///             .param(ParamSpec::optional("filter", ParamKind::enumeration(["Point", "Linear"]), "Linear")),
///     )
///     .unwrap();
///
/// let blit = registry.create("Blit", &Parameters::new()).unwrap();
/// assert_eq!(blit.parameters().get_str("filter"), Some("Linear"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PassDescriptor {
    description: String,
    ports: Vec<Port>,
    schema: ParameterSchema,
    priority: Option<i32>,
}

impl PassDescriptor {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn port(mut self, port: Port) -> Self {
        self.ports.push(port);
        self
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.schema = self.schema.param(spec);
        self
    }

    pub fn params(self, specs: impl IntoIterator<Item = ParamSpec>) -> Self {
        specs.into_iter().fold(self, PassDescriptor::param)
    }

    /// Default priority hint for every instance of this type
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }
}

impl PassFactory for PassDescriptor {
    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    fn reflect(&self, _params: &Parameters) -> Vec<Port> {
        self.ports.clone()
    }

    fn priority(&self) -> Option<i32> {
        self.priority
    }

    fn instantiate(&self, type_name: &str, _params: &Parameters) -> Arc<dyn RenderPass> {
        Arc::new(OpaquePass::new(type_name))
    }
}
