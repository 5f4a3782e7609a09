//! Child shapes that are materialized on first access.

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use crate::context::ApiContext;
use crate::error::{ShapeError, ShapeResult};
use crate::shape::Shape;
use crate::spec::ShapeSpec;

/// A child shape built through the factory the first time it is read.
///
/// Two threads racing on the first read may both build the shape; the first
/// one stored wins and both receive it. Building is a pure function of the
/// spec and the context, so the losing copy is identical and simply dropped.
pub struct LazyShape {
    spec: Option<ShapeSpec>,
    member_name: Option<String>,
    context: Weak<ApiContext>,
    cell: OnceLock<Arc<Shape>>,
}

impl LazyShape {
    pub(crate) fn new(
        spec: ShapeSpec,
        member_name: Option<String>,
        context: Weak<ApiContext>,
    ) -> Self {
        Self {
            spec: Some(spec),
            member_name,
            context,
            cell: OnceLock::new(),
        }
    }

    /// A cell that already holds its shape.
    pub(crate) fn ready(shape: Arc<Shape>) -> Self {
        Self {
            spec: None,
            member_name: None,
            context: Weak::new(),
            cell: OnceLock::from(shape),
        }
    }

    /// The child shape, building it on first access.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::ContextReleased`] if the owning context is gone,
    /// or any factory error raised while building the child.
    pub fn get(&self) -> ShapeResult<Arc<Shape>> {
        if let Some(shape) = self.cell.get() {
            return Ok(Arc::clone(shape));
        }

        let context = self.context.upgrade().ok_or(ShapeError::ContextReleased)?;
        let spec = self.spec.as_ref().ok_or(ShapeError::ContextReleased)?;
        let shape = context.create(spec, self.member_name.as_deref())?;
        Ok(Arc::clone(self.cell.get_or_init(|| shape)))
    }

    /// Whether the child has been built.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl fmt::Debug for LazyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyShape")
            .field(
                "reference",
                &self.spec.as_ref().and_then(|s| s.reference.as_deref()),
            )
            .field("member_name", &self.member_name)
            .field("ready", &self.is_ready())
            .finish()
    }
}
