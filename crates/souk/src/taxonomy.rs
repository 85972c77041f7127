//! The category taxonomy used to tag listings.
//!
//! A taxonomy is loaded once from a static [`Definition`] into an immutable
//! [`TaxonomyStore`], which is then queried by [`CategoryPath`].

mod breadcrumb;
mod definition;
mod global;
mod node;
mod outline;
mod path;
mod query;
mod store;

pub use breadcrumb::*;
pub use definition::*;
pub use global::*;
pub use node::*;
pub use outline::*;
pub use path::*;
pub use query::*;
pub use store::*;
