//! # IO Layer
//!
//! Boundary between the hosted database's row shapes and the application's
//! models. Only the entity mappers live here; the transport to and from the
//! database belongs to the database's own client.

pub mod mappers;

pub use mappers::{EntityKind, EntityMapper, EntityProfile};
