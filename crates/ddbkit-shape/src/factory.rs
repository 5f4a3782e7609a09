//! The shape factory.
//!
//! [`create`] turns a [`ShapeSpec`] into a [`Shape`]. A spec that references a
//! shared shape becomes an inline extension of it: the shared shape's variant,
//! rebuilt with the referencing spec's fields layered over the shared shape's
//! resolved attributes.

use std::sync::Arc;

use tracing::trace;

use crate::context::ApiContext;
use crate::error::{ShapeError, ShapeResult};
use crate::registry::{infer_type, lookup, normalize};
use crate::shape::Shape;
use crate::spec::ShapeSpec;

/// Input to the factory: a raw spec or an already materialized shape.
#[derive(Debug, Clone)]
pub enum ShapeSource<'a> {
    /// A raw spec to materialize.
    Spec(&'a ShapeSpec),
    /// A materialized shape, returned unchanged.
    Shape(Arc<Shape>),
}

impl<'a> From<&'a ShapeSpec> for ShapeSource<'a> {
    fn from(spec: &'a ShapeSpec) -> Self {
        Self::Spec(spec)
    }
}

impl From<Arc<Shape>> for ShapeSource<'_> {
    fn from(shape: Arc<Shape>) -> Self {
        Self::Shape(shape)
    }
}

impl From<&Arc<Shape>> for ShapeSource<'_> {
    fn from(shape: &Arc<Shape>) -> Self {
        Self::Shape(Arc::clone(shape))
    }
}

/// Materialize a shape.
///
/// `member_name` is the name the shape is bound to inside its parent structure
/// and is the last fallback of the name chain.
///
/// # Errors
///
/// Returns [`ShapeError::UnknownShapeReference`] if `spec` references a shared
/// shape the context does not define, and [`ShapeError::UnrecognizedShapeType`]
/// if its type tag is not in the registry.
pub fn create<'a>(
    context: &ApiContext,
    source: impl Into<ShapeSource<'a>>,
    member_name: Option<&str>,
) -> ShapeResult<Arc<Shape>> {
    let spec = match source.into() {
        ShapeSource::Shape(shape) => return Ok(shape),
        ShapeSource::Spec(spec) => spec,
    };

    if let Some(base) = resolve(context, spec)? {
        trace!(
            reference = spec.reference.as_deref(),
            member = member_name,
            "extending shared shape inline"
        );
        let shape = Shape::build(spec, Some(&base), base.shape_type(), member_name, context)?;
        return Ok(Arc::new(shape));
    }

    let tag = infer_type(spec);
    let shape_type = lookup(normalize(tag))
        .ok_or_else(|| ShapeError::UnrecognizedShapeType(tag.to_owned()))?;
    trace!(%shape_type, member = member_name, "creating shape");
    let shape = Shape::build(spec, None, shape_type, member_name, context)?;
    Ok(Arc::new(shape))
}

/// The shared shape a spec references, or `None` when it references nothing.
///
/// # Errors
///
/// Returns [`ShapeError::UnknownShapeReference`] carrying the missing name.
pub fn resolve(context: &ApiContext, spec: &ShapeSpec) -> ShapeResult<Option<Arc<Shape>>> {
    spec.reference
        .as_deref()
        .map(|name| context.shape(name))
        .transpose()
}
