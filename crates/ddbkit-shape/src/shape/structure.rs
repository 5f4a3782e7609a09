//! Structure shapes.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use super::{Shape, ShapeAttributes};
use crate::context::ApiContext;
use crate::error::ShapeResult;
use crate::lazy::LazyShape;
use crate::spec::{ShapeSpec, XmlNamespace};

#[derive(Debug, Default)]
struct RequiredMembers {
    names: Vec<String>,
    set: OnceLock<HashSet<String>>,
}

impl RequiredMembers {
    fn contains(&self, name: &str) -> bool {
        self.set
            .get_or_init(|| self.names.iter().cloned().collect())
            .contains(name)
    }
}

/// A structure: named members built lazily, plus the required list and
/// serialization metadata.
///
/// Inline extensions share the member table and required list of the
/// structure they extend unless they declare their own.
#[derive(Debug)]
pub struct StructureShape {
    members: Arc<Vec<(String, LazyShape)>>,
    member_names: Arc<Vec<String>>,
    required: Arc<RequiredMembers>,
    result_wrapper: Option<String>,
    payload: Option<String>,
    xml_namespace: Option<XmlNamespace>,
    events: bool,
    event_payload: OnceLock<Option<String>>,
    event_headers: OnceLock<Vec<String>>,
}

impl StructureShape {
    pub(super) fn build(
        spec: &ShapeSpec,
        base: Option<&Self>,
        attributes: &ShapeAttributes,
        context: &ApiContext,
    ) -> Self {
        let (members, member_names) = match &spec.members {
            Some(members) => {
                let table: Vec<(String, LazyShape)> = members
                    .iter()
                    .map(|(name, member)| {
                        let lazy =
                            LazyShape::new(member.clone(), Some(name.clone()), context.weak());
                        (name.clone(), lazy)
                    })
                    .collect();
                let names = spec
                    .xml_order
                    .clone()
                    .unwrap_or_else(|| members.iter().map(|(name, _)| name.clone()).collect());
                (Arc::new(table), Arc::new(names))
            }
            None => base.map_or_else(Default::default, |b| {
                (Arc::clone(&b.members), Arc::clone(&b.member_names))
            }),
        };

        let required = match &spec.required {
            Some(names) => Arc::new(RequiredMembers {
                names: names.clone(),
                set: OnceLock::new(),
            }),
            None => base.map_or_else(Default::default, |b| Arc::clone(&b.required)),
        };

        Self {
            members,
            member_names,
            required,
            result_wrapper: spec
                .result_wrapper
                .clone()
                .or_else(|| base.and_then(|b| b.result_wrapper.clone())),
            payload: spec
                .payload
                .clone()
                .or_else(|| base.and_then(|b| b.payload.clone())),
            xml_namespace: spec
                .xml_namespace
                .clone()
                .or_else(|| base.and_then(|b| b.xml_namespace.clone())),
            events: attributes.is_event || base.is_some_and(|b| b.events),
            event_payload: OnceLock::new(),
            event_headers: OnceLock::new(),
        }
    }

    /// Member names in serialization order: `xmlOrder` when given, else
    /// declaration order.
    #[must_use]
    pub fn member_names(&self) -> &[String] {
        &self.member_names
    }

    /// Whether the structure declares this member.
    #[must_use]
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|(member, _)| member == name)
    }

    /// The member shape with this name, built on first access.
    ///
    /// # Errors
    ///
    /// Returns any factory error raised while building the member.
    pub fn member(&self, name: &str) -> ShapeResult<Option<Arc<Shape>>> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, lazy)| lazy.get())
            .transpose()
    }

    /// All members in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first factory error raised while building a member.
    pub fn members(&self) -> ShapeResult<Vec<(&str, Arc<Shape>)>> {
        self.members
            .iter()
            .map(|(name, lazy)| lazy.get().map(|shape| (name.as_str(), shape)))
            .collect()
    }

    /// Required member names in declaration order.
    #[must_use]
    pub fn required(&self) -> &[String] {
        &self.required.names
    }

    /// Whether a member is required.
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Name of the element wrapping the result in query responses.
    #[must_use]
    pub fn result_wrapper(&self) -> Option<&str> {
        self.result_wrapper.as_deref()
    }

    /// Name of the member bound to the HTTP payload.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// XML namespace URI.
    #[must_use]
    pub fn xml_namespace_uri(&self) -> Option<&str> {
        self.xml_namespace.as_ref().and_then(XmlNamespace::uri)
    }

    /// XML namespace prefix.
    #[must_use]
    pub fn xml_namespace_prefix(&self) -> Option<&str> {
        self.xml_namespace.as_ref().and_then(XmlNamespace::prefix)
    }

    /// The first member, in member-name order, flagged as the event payload.
    /// `None` for structures that are not events.
    ///
    /// # Errors
    ///
    /// Returns any factory error raised while building a member.
    pub fn event_payload_member_name(&self) -> ShapeResult<Option<&str>> {
        if !self.events {
            return Ok(None);
        }
        if let Some(name) = self.event_payload.get() {
            return Ok(name.as_deref());
        }

        let mut found = None;
        for name in &*self.member_names {
            if self.member(name)?.is_some_and(|m| m.attributes().is_event_payload) {
                found = Some(name.clone());
                break;
            }
        }
        Ok(self.event_payload.get_or_init(|| found).as_deref())
    }

    /// All members, in member-name order, flagged as event headers. Empty for
    /// structures that are not events.
    ///
    /// # Errors
    ///
    /// Returns any factory error raised while building a member.
    pub fn event_header_member_names(&self) -> ShapeResult<&[String]> {
        if !self.events {
            return Ok(&[]);
        }
        if let Some(names) = self.event_headers.get() {
            return Ok(names.as_slice());
        }

        let mut headers = Vec::new();
        for name in &*self.member_names {
            if self.member(name)?.is_some_and(|m| m.attributes().is_event_header) {
                headers.push(name.clone());
            }
        }
        Ok(self.event_headers.get_or_init(|| headers).as_slice())
    }
}
