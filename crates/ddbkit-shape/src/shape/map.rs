//! Map shapes.

use std::sync::Arc;

use super::Shape;
use crate::context::ApiContext;
use crate::error::ShapeResult;
use crate::lazy::LazyShape;
use crate::registry::ShapeType;
use crate::spec::ShapeSpec;

/// A map: key and value shapes, each built once. Both default to plain strings.
#[derive(Debug)]
pub struct MapShape {
    key: Arc<LazyShape>,
    value: Arc<LazyShape>,
}

impl MapShape {
    pub(super) fn build(
        spec: &ShapeSpec,
        base: Option<&Self>,
        context: &ApiContext,
    ) -> ShapeResult<Self> {
        let child = |own: Option<&ShapeSpec>, inherited: Option<&Arc<LazyShape>>| {
            match (own, inherited) {
                (Some(spec), _) => Ok(Arc::new(LazyShape::new(spec.clone(), None, context.weak()))),
                (None, Some(lazy)) => Ok(Arc::clone(lazy)),
                (None, None) => plain_string(context),
            }
        };

        Ok(Self {
            key: child(spec.key.as_deref(), base.map(|b| &b.key))?,
            value: child(spec.value.as_deref(), base.map(|b| &b.value))?,
        })
    }

    /// The key shape.
    ///
    /// # Errors
    ///
    /// Returns any factory error raised while building the key shape.
    pub fn key(&self) -> ShapeResult<Arc<Shape>> {
        self.key.get()
    }

    /// The value shape.
    ///
    /// # Errors
    ///
    /// Returns any factory error raised while building the value shape.
    pub fn value(&self) -> ShapeResult<Arc<Shape>> {
        self.value.get()
    }
}

fn plain_string(context: &ApiContext) -> ShapeResult<Arc<LazyShape>> {
    let shape = Shape::build(
        &ShapeSpec::of_type("string"),
        None,
        ShapeType::String,
        None,
        context,
    )?;
    Ok(Arc::new(LazyShape::ready(Arc::new(shape))))
}
