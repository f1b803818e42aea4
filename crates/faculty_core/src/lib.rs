//! Pure domain logic for faculty profile records: text normalization and
//! the fixed-schema record builder. No IO lives here.
mod normalize;
mod record;

pub use normalize::{clean, decode_email};
pub use record::{ExtractedFields, FacultyRecord, NOT_PROVIDED, UNIVERSITY};
