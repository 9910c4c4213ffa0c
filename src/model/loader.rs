//! Type model loading
//!
//! The type-graph supplier hands us a single JSON document describing every
//! declaration to document plus any external ancestors it resolved. This
//! module deserializes that document and lowers it into the sealed
//! `TypeGraph`, enforcing the model invariants up front so the resolvers
//! never see a malformed identifier.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::types::{
    MemberEntity, MemberKind, Namespace, NamespaceEntity, Param, TypeEntity, TypeGraph, TypeKind,
};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file")]
    Io(#[from] std::io::Error),
    #[error("malformed model document")]
    Parse(#[from] serde_json::Error),
    #[error("invalid namespace identifier `{0}`")]
    InvalidNamespace(String),
    #[error("invalid qualified name `{0}`")]
    InvalidQualifiedName(String),
    #[error("duplicate type `{0}`")]
    DuplicateType(String),
    #[error("duplicate field `{field}` in `{type_name}`")]
    DuplicateField { type_name: String, field: String },
    #[error("duplicate method `{method}{signature}` in `{type_name}`")]
    DuplicateMethod {
        type_name: String,
        method: String,
        signature: String,
    },
}

#[derive(Deserialize)]
struct RawModel {
    #[serde(default)]
    namespaces: Vec<RawNamespace>,
    types: Vec<RawType>,
}

#[derive(Deserialize)]
struct RawNamespace {
    name: String,
    #[serde(default)]
    doc: Option<String>,
    #[serde(default)]
    since: Option<String>,
}

#[derive(Deserialize)]
struct RawType {
    qualified_name: String,
    kind: TypeKind,
    #[serde(default)]
    superclass: Option<String>,
    #[serde(default)]
    interfaces: Vec<String>,
    /// Present for traversal but gets no page of its own.
    #[serde(default)]
    external: bool,
    #[serde(default)]
    is_abstract: bool,
    #[serde(default)]
    is_final: bool,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    doc: Option<String>,
    #[serde(default)]
    since: Option<String>,
    #[serde(default)]
    line: Option<u32>,
    #[serde(default)]
    fields: Vec<RawField>,
    #[serde(default)]
    constructors: Vec<RawConstructor>,
    #[serde(default)]
    methods: Vec<RawMethod>,
    #[serde(default)]
    enum_constants: Vec<RawField>,
}

#[derive(Deserialize)]
struct RawParam {
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type", default)]
    ty: Option<String>,
    #[serde(default)]
    constant_value: Option<String>,
    #[serde(default)]
    is_static: bool,
    #[serde(default)]
    is_final: bool,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    doc: Option<String>,
    #[serde(default)]
    since: Option<String>,
    #[serde(default)]
    line: Option<u32>,
}

#[derive(Deserialize)]
struct RawConstructor {
    #[serde(default)]
    params: Vec<RawParam>,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    doc: Option<String>,
    #[serde(default)]
    since: Option<String>,
    #[serde(default)]
    line: Option<u32>,
}

#[derive(Deserialize)]
struct RawMethod {
    name: String,
    #[serde(default)]
    params: Vec<RawParam>,
    #[serde(default)]
    returns: Option<String>,
    #[serde(default)]
    is_static: bool,
    #[serde(default)]
    is_final: bool,
    #[serde(default)]
    is_abstract: bool,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    doc: Option<String>,
    #[serde(default)]
    since: Option<String>,
    #[serde(default)]
    line: Option<u32>,
}

/// Load a type model from disk.
pub fn load(path: &Path) -> Result<TypeGraph, ModelError> {
    let text = fs::read_to_string(path)?;
    from_json(&text)
}

/// Lower a JSON model document into a validated `TypeGraph`.
pub fn from_json(text: &str) -> Result<TypeGraph, ModelError> {
    let raw: RawModel = serde_json::from_str(text)?;
    let mut graph = TypeGraph::default();

    for ns in raw.namespaces {
        let name = parse_namespace(&ns.name)?;
        graph.namespaces.insert(
            name.clone(),
            NamespaceEntity {
                name,
                doc: ns.doc,
                since: ns.since,
            },
        );
    }

    for t in raw.types {
        let entity = lower_type(t)?;
        debug!("Loaded type: {}", entity.qualified_name);
        if entity.documented && !graph.namespaces.contains_key(&entity.namespace) {
            graph.namespaces.insert(
                entity.namespace.clone(),
                NamespaceEntity {
                    name: entity.namespace.clone(),
                    doc: None,
                    since: None,
                },
            );
        }
        if graph.types.contains_key(&entity.qualified_name) {
            return Err(ModelError::DuplicateType(entity.qualified_name));
        }
        graph.types.insert(entity.qualified_name.clone(), entity);
    }

    Ok(graph)
}

fn parse_namespace(s: &str) -> Result<Namespace, ModelError> {
    if s.is_empty() {
        return Ok(Namespace::root());
    }
    if s.split('.').any(|seg| seg.is_empty()) {
        return Err(ModelError::InvalidNamespace(s.to_string()));
    }
    Ok(Namespace::new(s))
}

/// Split a qualified name into owning namespace and simple name.
fn split_qualified(qualified: &str) -> Result<(Namespace, String), ModelError> {
    if qualified.is_empty() || qualified.split('.').any(|seg| seg.is_empty()) {
        return Err(ModelError::InvalidQualifiedName(qualified.to_string()));
    }
    match qualified.rsplit_once('.') {
        Some((ns, name)) => Ok((parse_namespace(ns)?, name.to_string())),
        None => Ok((Namespace::root(), qualified.to_string())),
    }
}

fn lower_type(raw: RawType) -> Result<TypeEntity, ModelError> {
    let (namespace, name) = split_qualified(&raw.qualified_name)?;

    let enum_constants: Vec<MemberEntity> = raw
        .enum_constants
        .into_iter()
        .map(|f| lower_field(f, true))
        .collect();
    let fields: Vec<MemberEntity> = raw.fields.into_iter().map(|f| lower_field(f, false)).collect();

    let mut seen = HashSet::new();
    for fld in enum_constants.iter().chain(&fields) {
        if !seen.insert(fld.name.clone()) {
            return Err(ModelError::DuplicateField {
                type_name: raw.qualified_name,
                field: fld.name.clone(),
            });
        }
    }

    let constructors: Vec<MemberEntity> = raw
        .constructors
        .into_iter()
        .map(|c| MemberEntity {
            name: name.clone(),
            kind: MemberKind::Constructor,
            params: lower_params(c.params),
            returns: None,
            ty: None,
            constant_value: None,
            is_static: false,
            is_final: false,
            is_abstract: false,
            deprecated: c.deprecated,
            doc: c.doc,
            since: c.since,
            line: c.line,
        })
        .collect();

    let methods: Vec<MemberEntity> = raw
        .methods
        .into_iter()
        .map(|m| MemberEntity {
            name: m.name,
            kind: MemberKind::Method,
            params: lower_params(m.params),
            returns: m.returns,
            ty: None,
            constant_value: None,
            is_static: m.is_static,
            is_final: m.is_final,
            is_abstract: m.is_abstract,
            deprecated: m.deprecated,
            doc: m.doc,
            since: m.since,
            line: m.line,
        })
        .collect();

    let mut seen = HashSet::new();
    for met in constructors.iter().chain(&methods) {
        if !seen.insert((met.name.clone(), met.signature())) {
            return Err(ModelError::DuplicateMethod {
                type_name: raw.qualified_name,
                method: met.name.clone(),
                signature: met.signature(),
            });
        }
    }

    Ok(TypeEntity {
        qualified_name: raw.qualified_name,
        name,
        namespace,
        kind: raw.kind,
        superclass: raw.superclass,
        interfaces: raw.interfaces,
        documented: !raw.external,
        is_abstract: raw.is_abstract,
        is_final: raw.is_final,
        deprecated: raw.deprecated,
        doc: raw.doc,
        since: raw.since,
        line: raw.line,
        enum_constants,
        fields,
        constructors,
        methods,
    })
}

fn lower_field(raw: RawField, enum_constant: bool) -> MemberEntity {
    MemberEntity {
        name: raw.name,
        kind: MemberKind::Field,
        params: vec![],
        returns: None,
        ty: raw.ty,
        constant_value: raw.constant_value,
        is_static: raw.is_static || enum_constant,
        is_final: raw.is_final || enum_constant,
        is_abstract: false,
        deprecated: raw.deprecated,
        doc: raw.doc,
        since: raw.since,
        line: raw.line,
    }
}

fn lower_params(params: Vec<RawParam>) -> Vec<Param> {
    params
        .into_iter()
        .map(|p| Param { name: p.name, ty: p.ty })
        .collect()
}
