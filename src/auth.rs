//! Auth-domain identifiers, user identities, and group memberships.

pub mod group;
pub mod id;
pub mod identity;

pub use group::*;
pub use id::*;
pub use identity::*;
