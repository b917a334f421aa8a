//! Independent synthetic-entity generators.
//!
//! Each generator draws from the shared [`synth_core::RandomSource`] and,
//! where it needs realistic strings, from a [`strings::StringSource`].

pub mod dates;
pub mod requests;
pub mod strings;
pub mod users;

pub use dates::DateRange;
pub use requests::{CrudRequestGenerator, Request, RequestGenerator, NOTHING};
pub use strings::{generate_uuid_v4, StringSource, SyntheticStrings};
pub use users::{SyntheticUser, UserKind, UserPool, ANONYMOUS_EMAIL};
