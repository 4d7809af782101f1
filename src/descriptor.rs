//! Descriptor-mutation layer: lookup, placement, dedup, operations

pub mod locate;
pub mod mutate;
pub mod ops;
pub mod order;

pub use locate::{find_first, find_first_where};
pub use mutate::normalized_eq;
pub use ops::{add_context_param, add_env_entry, add_servlet, apply, DescriptorEntry};
pub use order::EntryKind;
