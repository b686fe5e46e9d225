pub mod entity_kind;

pub use entity_kind::{EntityKind, SecondaryFilter};
