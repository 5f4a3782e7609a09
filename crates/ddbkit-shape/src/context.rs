//! The API context: shared shapes, operations and the wire protocol.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use tracing::debug;

use crate::definition::{ApiDefinition, ApiMetadata, HttpBinding, OperationSpec, Protocol};
use crate::error::{ShapeError, ShapeResult};
use crate::factory::{self, ShapeSource};
use crate::lazy::LazyShape;
use crate::shape::Shape;
use crate::spec::ShapeSpec;

/// Options applied to every shape built in a context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeOptions {
    /// Keep `documentation` and `documentationUrl` on materialized shapes.
    pub documentation: bool,
}

struct SharedShape {
    spec: ShapeSpec,
    cell: OnceLock<Arc<Shape>>,
}

/// An operation of the API with lazily built input and output shapes.
#[derive(Debug)]
pub struct Operation {
    name: String,
    http: Option<HttpBinding>,
    documentation: Option<String>,
    input: LazyShape,
    output: LazyShape,
}

impl Operation {
    fn new(
        name: String,
        spec: OperationSpec,
        context: &Weak<ApiContext>,
        options: ShapeOptions,
    ) -> Self {
        let empty = || ShapeSpec::of_type("structure");
        Self {
            name: spec.name.unwrap_or(name),
            http: spec.http,
            documentation: spec.documentation.filter(|_| options.documentation),
            input: LazyShape::new(spec.input.unwrap_or_else(empty), None, context.clone()),
            output: LazyShape::new(spec.output.unwrap_or_else(empty), None, context.clone()),
        }
    }

    /// The operation name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The HTTP binding, if declared.
    #[must_use]
    pub fn http(&self) -> Option<&HttpBinding> {
        self.http.as_ref()
    }

    /// Documentation, kept only when the documentation option is on.
    #[must_use]
    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    /// The input shape; an empty structure when the operation declares none.
    ///
    /// # Errors
    ///
    /// Returns any factory error raised while building the shape.
    pub fn input(&self) -> ShapeResult<Arc<Shape>> {
        self.input.get()
    }

    /// The output shape; an empty structure when the operation declares none.
    ///
    /// # Errors
    ///
    /// Returns any factory error raised while building the shape.
    pub fn output(&self) -> ShapeResult<Arc<Shape>> {
        self.output.get()
    }
}

/// Shared-shape table and protocol that every shape of one API resolves against.
///
/// Always lives behind an [`Arc`]; shapes keep a weak handle back to it for
/// building their children lazily.
pub struct ApiContext {
    this: Weak<ApiContext>,
    protocol: Protocol,
    metadata: Option<ApiMetadata>,
    shapes: Vec<(String, SharedShape)>,
    shape_index: HashMap<String, usize>,
    operations: Vec<Operation>,
    operation_index: HashMap<String, usize>,
    options: ShapeOptions,
}

impl ApiContext {
    /// Build a context from a parsed API definition.
    #[must_use]
    pub fn new(definition: ApiDefinition, options: ShapeOptions) -> Arc<Self> {
        let ApiDefinition {
            metadata,
            operations,
            shapes,
        } = definition;
        Self::build(metadata.protocol, Some(metadata), shapes, operations, options)
    }

    /// Build a context from a bare shared-shape table.
    #[must_use]
    pub fn from_shapes(
        protocol: Protocol,
        shapes: impl IntoIterator<Item = (String, ShapeSpec)>,
        options: ShapeOptions,
    ) -> Arc<Self> {
        Self::build(protocol, None, shapes.into_iter().collect(), Vec::new(), options)
    }

    fn build(
        protocol: Protocol,
        metadata: Option<ApiMetadata>,
        shapes: Vec<(String, ShapeSpec)>,
        operations: Vec<(String, OperationSpec)>,
        options: ShapeOptions,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| {
            let shape_index = shapes
                .iter()
                .enumerate()
                .map(|(i, (name, _))| (name.clone(), i))
                .collect();
            let shapes = shapes
                .into_iter()
                .map(|(name, spec)| {
                    let shared = SharedShape {
                        spec,
                        cell: OnceLock::new(),
                    };
                    (name, shared)
                })
                .collect();

            let operations: Vec<Operation> = operations
                .into_iter()
                .map(|(name, spec)| Operation::new(name, spec, this, options))
                .collect();
            let operation_index = operations
                .iter()
                .enumerate()
                .map(|(i, op)| (op.name.clone(), i))
                .collect();

            Self {
                this: this.clone(),
                protocol,
                metadata,
                shapes,
                shape_index,
                operations,
                operation_index,
                options,
            }
        })
    }

    /// The wire protocol.
    #[must_use]
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Service metadata, when built from a full definition.
    #[must_use]
    pub fn metadata(&self) -> Option<&ApiMetadata> {
        self.metadata.as_ref()
    }

    /// Shape options.
    #[must_use]
    pub fn options(&self) -> ShapeOptions {
        self.options
    }

    pub(crate) fn weak(&self) -> Weak<ApiContext> {
        self.this.clone()
    }

    /// Whether a shared shape with this name exists.
    #[must_use]
    pub fn has_shape(&self, name: &str) -> bool {
        self.shape_index.contains_key(name)
    }

    /// Names of the shared shapes in document order.
    pub fn shape_names(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().map(|(name, _)| name.as_str())
    }

    /// The materialized shared shape with this name, built at most once.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::UnknownShapeReference`] if no shared shape has this
    /// name, or any factory error raised while building it.
    pub fn shape(&self, name: &str) -> ShapeResult<Arc<Shape>> {
        let shared = self
            .shape_index
            .get(name)
            .map(|&i| &self.shapes[i].1)
            .ok_or_else(|| ShapeError::UnknownShapeReference(name.to_owned()))?;

        if let Some(shape) = shared.cell.get() {
            return Ok(Arc::clone(shape));
        }

        debug!(shape = name, "materializing shared shape");
        let shape = factory::create(self, &shared.spec, None)?;
        Ok(Arc::clone(shared.cell.get_or_init(|| shape)))
    }

    /// Materialize a spec, or hand back an already materialized shape.
    ///
    /// # Errors
    ///
    /// See [`factory::create`].
    pub fn create<'a>(
        &self,
        source: impl Into<ShapeSource<'a>>,
        member_name: Option<&str>,
    ) -> ShapeResult<Arc<Shape>> {
        factory::create(self, source, member_name)
    }

    /// The shared shape a spec references, if any.
    ///
    /// # Errors
    ///
    /// See [`factory::resolve`].
    pub fn resolve(&self, spec: &ShapeSpec) -> ShapeResult<Option<Arc<Shape>>> {
        factory::resolve(self, spec)
    }

    /// The operation with this name.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::UnknownOperation`] if the API has no such operation.
    pub fn operation(&self, name: &str) -> ShapeResult<&Operation> {
        self.operation_index
            .get(name)
            .map(|&i| &self.operations[i])
            .ok_or_else(|| ShapeError::UnknownOperation(name.to_owned()))
    }

    /// Operation names in document order.
    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().map(Operation::name)
    }
}

impl fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiContext")
            .field("protocol", &self.protocol)
            .field("shapes", &self.shapes.len())
            .field("operations", &self.operations.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
