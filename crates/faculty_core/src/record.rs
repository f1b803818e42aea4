use serde::Serialize;

use crate::normalize::clean;

/// Placeholder for a field that could not be extracted. Distinct from a
/// genuinely empty value so downstream consumers can tell the two apart.
pub const NOT_PROVIDED: &str = "Not Provided";

/// Every record belongs to the same institution.
pub const UNIVERSITY: &str = "DA-IICT";

const ON_LEAVE_SUFFIX: &str = "(On Leave)";

/// Specialization text longer than this (in characters) is eligible for
/// reclassification as a biography. Threshold copied from observed site
/// data; changing it changes which real records get reclassified.
const NARRATIVE_MIN_LEN: usize = 50;

/// Honorifics and narrative openers that mark a biography mislabeled as a
/// specialization. The record's own first name token counts as well.
const NARRATIVE_MARKERS: &[&str] = &["dr.", "mr.", "ms.", "prof.", "i am", "he is", "she is"];

/// Raw per-field extraction output, before defaulting and disambiguation.
/// `None` means the field was absent or empty after cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub education: Option<String>,
    pub contact_no: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub biography: Option<String>,
    pub specialization: Option<String>,
    pub teaching: Option<String>,
    pub publications: Option<String>,
}

/// Normalized output unit of the pipeline. Immutable after construction;
/// identity, timestamps and embeddings are assigned later by the storage
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacultyRecord {
    pub name: String,
    pub image_url: String,
    pub education: String,
    pub contact_no: String,
    pub address: String,
    pub email: String,
    pub biography: String,
    pub specialization: String,
    pub teaching: String,
    pub publications: String,
    pub raw_source_file: String,
    pub university: String,
}

impl FacultyRecord {
    /// Assemble a record from extracted fields. Applies the "(On Leave)"
    /// name cleanup, the biography/specialization disambiguation heuristic
    /// and sentinel defaulting. Validation (a name-less record) is left to
    /// the pipeline boundary: the name comes back as [`NOT_PROVIDED`].
    pub fn from_fields(fields: ExtractedFields, source_file: &str) -> Self {
        let name = fields
            .name
            .map(|n| clean(&n.replace(ON_LEAVE_SUFFIX, "")))
            .filter(|n| !n.is_empty());

        let mut biography = nonempty(fields.biography);
        let mut specialization = nonempty(fields.specialization);

        // The site sometimes files a narrative biography under the
        // "Specialization" heading. Best-effort correction only; false
        // positives and negatives are accepted.
        if biography.is_none() {
            if let Some(text) = specialization.take() {
                if looks_like_biography(&text, name.as_deref()) {
                    biography = Some(text);
                } else {
                    specialization = Some(text);
                }
            }
        }

        FacultyRecord {
            name: or_sentinel(name),
            image_url: or_sentinel(nonempty(fields.image_url)),
            education: or_sentinel(nonempty(fields.education)),
            contact_no: or_sentinel(nonempty(fields.contact_no)),
            address: or_sentinel(nonempty(fields.address)),
            email: or_sentinel(nonempty(fields.email)),
            biography: or_sentinel(biography),
            specialization: or_sentinel(specialization),
            teaching: or_sentinel(nonempty(fields.teaching)),
            publications: or_sentinel(nonempty(fields.publications)),
            raw_source_file: source_file.to_string(),
            university: UNIVERSITY.to_string(),
        }
    }
}

fn looks_like_biography(text: &str, name: Option<&str>) -> bool {
    if text.chars().count() <= NARRATIVE_MIN_LEN {
        return false;
    }
    let lower = text.to_lowercase();
    if NARRATIVE_MARKERS.iter().any(|marker| lower.starts_with(marker)) {
        return true;
    }
    if let Some(first) = name.and_then(|n| n.split_whitespace().next()) {
        if lower.starts_with(&first.to_lowercase()) {
            return true;
        }
    }
    false
}

fn nonempty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn or_sentinel(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_PROVIDED.to_string())
}
