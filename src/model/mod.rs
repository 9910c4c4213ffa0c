pub mod loader;
pub mod types;

pub use loader::ModelError;
pub use types::{
    MemberEntity, MemberKind, Namespace, NamespaceEntity, Param, TypeEntity, TypeGraph, TypeKind,
};
