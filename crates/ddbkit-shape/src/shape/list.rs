//! List shapes.

use std::sync::{Arc, OnceLock};

use super::Shape;
use crate::context::ApiContext;
use crate::error::ShapeResult;
use crate::lazy::LazyShape;
use crate::spec::ShapeSpec;

/// A list: one element shape, built once and shared by every element.
#[derive(Debug)]
pub struct ListShape {
    member: Option<Arc<LazyShape>>,
    flattened_name: OnceLock<Option<String>>,
}

impl ListShape {
    pub(super) fn build(spec: &ShapeSpec, base: Option<&Self>, context: &ApiContext) -> Self {
        let member = match &spec.member {
            Some(member) => Some(Arc::new(LazyShape::new(
                member.as_ref().clone(),
                None,
                context.weak(),
            ))),
            None => base.and_then(|b| b.member.clone()),
        };
        Self {
            member,
            flattened_name: OnceLock::new(),
        }
    }

    /// The element shape, built on first access. `None` when the list declares
    /// no element.
    ///
    /// # Errors
    ///
    /// Returns any factory error raised while building the element.
    pub fn member(&self) -> ShapeResult<Option<Arc<Shape>>> {
        self.member.as_deref().map(LazyShape::get).transpose()
    }

    /// Name of a flattened list: the element's own name when it has one, else
    /// `own`. Computed on first read. An element that cannot be built leaves
    /// the list with `own`; [`ListShape::member`] reports the failure.
    pub(super) fn flattened_name(&self, own: Option<&str>) -> Option<&str> {
        self.flattened_name
            .get_or_init(|| {
                self.member()
                    .ok()
                    .flatten()
                    .and_then(|member| member.attributes().name.clone())
                    .or_else(|| own.map(str::to_owned))
            })
            .as_deref()
    }
}
