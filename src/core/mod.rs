pub mod index;
pub mod inherit;
pub mod links;

pub use index::DocIndex;
pub use inherit::{
    MemberRef, MemberResolver, Provenance, ResolveError, ResolvedMember, ResolvedMembers,
};
pub use links::{relative_path, PageLinks};
