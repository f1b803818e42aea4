//! Declarative extraction rules: one entry per schema field instead of
//! per-field branching in the extractor. Markers are the Drupal field
//! classes the site renders; section titles cover profile layouts where
//! the field block is absent and the content sits under an `h2` heading.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Education,
    ContactNo,
    Address,
    Email,
    Biography,
    Specialization,
    Teaching,
    Publications,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    /// Primary lookup: first element carrying this class.
    pub class_marker: &'static str,
    /// Fallback lookup: `h2` whose text contains this title.
    pub section_title: Option<&'static str>,
}

pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::Name,
        class_marker: "field--name-field-faculty-names",
        section_title: None,
    },
    // The singular class really does hold the education line.
    FieldRule {
        field: Field::Education,
        class_marker: "field--name-field-faculty-name",
        section_title: None,
    },
    FieldRule {
        field: Field::ContactNo,
        class_marker: "field--name-field-contact-no",
        section_title: None,
    },
    FieldRule {
        field: Field::Address,
        class_marker: "field--name-field-address",
        section_title: None,
    },
    FieldRule {
        field: Field::Email,
        class_marker: "field--name-field-email",
        section_title: None,
    },
    FieldRule {
        field: Field::Biography,
        class_marker: "field--name-field-biography",
        section_title: Some("Biography"),
    },
    FieldRule {
        field: Field::Specialization,
        class_marker: "field--name-field-specialization",
        section_title: Some("Specialization"),
    },
    FieldRule {
        field: Field::Teaching,
        class_marker: "field--name-field-teaching",
        section_title: Some("Teaching"),
    },
    FieldRule {
        field: Field::Publications,
        class_marker: "field--name-field-publication",
        section_title: Some("Publications"),
    },
];

/// Image is not a text field; the extractor handles it separately.
pub const IMAGE_CLASS: &str = "field--name-field-faculty-image";
