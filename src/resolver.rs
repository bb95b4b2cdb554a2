//! `$ref` resolution against a document's `components` registry.
//!
//! Lookups never fail hard: an unresolvable reference is logged and reported
//! as `None`, and callers drop the subtree that needed it.

use serde_json::Value;
use tracing::warn;

use crate::document::OpenApiDocument;

/// Sections of `components` that references are followed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Schemas,
    Parameters,
    RequestBodies,
    Responses,
}

impl ComponentKind {
    /// Key of this registry under `components`.
    pub fn key(&self) -> &'static str {
        match self {
            ComponentKind::Schemas => "schemas",
            ComponentKind::Parameters => "parameters",
            ComponentKind::RequestBodies => "requestBodies",
            ComponentKind::Responses => "responses",
        }
    }

    /// Reference prefix accepted for this registry, e.g. `#/components/schemas/`.
    pub fn ref_prefix(&self) -> &'static str {
        match self {
            ComponentKind::Schemas => "#/components/schemas/",
            ComponentKind::Parameters => "#/components/parameters/",
            ComponentKind::RequestBodies => "#/components/requestBodies/",
            ComponentKind::Responses => "#/components/responses/",
        }
    }
}

/// Resolve a `#/components/schemas/<name>` reference.
///
/// Any other reference form, a document without `components.schemas`, or an
/// unknown name yields `None`.
pub fn resolve_schema_ref<'a>(reference: &str, document: &'a OpenApiDocument) -> Option<&'a Value> {
    resolve_component_ref(ComponentKind::Schemas, reference, document)
}

/// Resolve a reference into the given `components` registry.
pub fn resolve_component_ref<'a>(
    kind: ComponentKind,
    reference: &str,
    document: &'a OpenApiDocument,
) -> Option<&'a Value> {
    let Some(name) = reference.strip_prefix(kind.ref_prefix()) else {
        warn!(
            reference,
            document = document.source(),
            "unsupported {} reference format",
            kind.key()
        );
        return None;
    };

    let Some(registry) = document
        .root()
        .get("components")
        .and_then(|c| c.get(kind.key()))
        .and_then(Value::as_object)
    else {
        warn!(
            reference,
            document = document.source(),
            "no components/{} registry to resolve reference",
            kind.key()
        );
        return None;
    };

    // JSON Pointer escaping (~1 = /, ~0 = ~)
    let name = name.replace("~1", "/").replace("~0", "~");
    let resolved = registry.get(&name);
    if resolved.is_none() {
        warn!(reference, document = document.source(), "reference not found");
    }
    resolved
}

/// Follow one level of `$ref` on a component object (parameter, request
/// body, response). Objects without `$ref` are returned as-is.
pub fn deref_component<'a>(
    kind: ComponentKind,
    value: &'a Value,
    document: &'a OpenApiDocument,
) -> Option<&'a Value> {
    match value.get("$ref").and_then(Value::as_str) {
        Some(reference) => resolve_component_ref(kind, reference, document),
        None => Some(value),
    }
}
