use faculty_core::{clean, decode_email, ExtractedFields};
use scraper::{ElementRef, Html, Selector};

use crate::rules::{Field, FieldRule, FIELD_RULES, IMAGE_CLASS};

/// Extracts every schema field from one profile document using the static
/// rule table: class-marker primary lookup, section-header fallback, `h1`
/// fallback for the name. All values pass through [`clean`].
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    base_url: String,
}

impl FieldExtractor {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn extract(&self, html: &str) -> ExtractedFields {
        let document = Html::parse_document(html);
        let mut fields = ExtractedFields::default();

        for rule in FIELD_RULES {
            let mut value = extract_field(&document, rule);
            if rule.field == Field::Email {
                value = value.map(|v| decode_email(&v));
            }
            let slot = match rule.field {
                Field::Name => &mut fields.name,
                Field::Education => &mut fields.education,
                Field::ContactNo => &mut fields.contact_no,
                Field::Address => &mut fields.address,
                Field::Email => &mut fields.email,
                Field::Biography => &mut fields.biography,
                Field::Specialization => &mut fields.specialization,
                Field::Teaching => &mut fields.teaching,
                Field::Publications => &mut fields.publications,
            };
            *slot = value.filter(|v| !v.is_empty());
        }

        if fields.name.is_none() {
            fields.name = top_heading(&document);
        }
        fields.image_url = self.image_url(&document);

        fields
    }

    fn image_url(&self, document: &Html) -> Option<String> {
        let selector = Selector::parse(&format!(".{IMAGE_CLASS} img")).ok()?;
        let img = document.select(&selector).next()?;
        let src = img.value().attr("src")?.trim();
        if src.is_empty() {
            return None;
        }
        if src.starts_with("http") {
            Some(src.to_string())
        } else {
            Some(format!("{}{}", self.base_url, src))
        }
    }
}

fn extract_field(document: &Html, rule: &FieldRule) -> Option<String> {
    if let Some(text) = class_field_text(document, rule.class_marker) {
        if !text.is_empty() {
            return Some(text);
        }
    }
    rule.section_title
        .and_then(|title| section_text(document, title))
}

/// Primary lookup: the first element carrying the class, preferring a
/// nested `field__item` value element over the wrapper's own text.
fn class_field_text(document: &Html, class_marker: &str) -> Option<String> {
    let selector = Selector::parse(&format!(".{class_marker}")).ok()?;
    let element = document.select(&selector).next()?;
    let item_selector = Selector::parse(".field__item").ok()?;
    let text = match element.select(&item_selector).next() {
        Some(item) => element_text(item),
        None => element_text(element),
    };
    Some(text)
}

/// Fallback lookup: an `h2` whose text contains the section title
/// (case-insensitive), then the first following `div` or `p` sibling.
fn section_text(document: &Html, title: &str) -> Option<String> {
    let headers = Selector::parse("h2").ok()?;
    let needle = title.to_lowercase();
    for header in document.select(&headers) {
        if !element_text(header).to_lowercase().contains(&needle) {
            continue;
        }
        if let Some(text) = following_block_text(header) {
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

fn following_block_text(header: ElementRef) -> Option<String> {
    for sibling in header.next_siblings() {
        if let Some(element) = ElementRef::wrap(sibling) {
            if matches!(element.value().name(), "div" | "p") {
                return Some(element_text(element));
            }
        }
    }
    None
}

fn top_heading(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1").ok()?;
    let heading = document.select(&selector).next()?;
    Some(element_text(heading)).filter(|t| !t.is_empty())
}

fn element_text(element: ElementRef) -> String {
    clean(&element.text().collect::<String>())
}
