use faculty_engine::FieldExtractor;
use pretty_assertions::assert_eq;

const BASE: &str = "https://www.daiict.ac.in";

fn extractor() -> FieldExtractor {
    FieldExtractor::new(BASE)
}

#[test]
fn primary_lookup_prefers_the_nested_field_item() {
    let html = r#"
    <html><body>
      <div class="field--name-field-faculty-names">
        <div class="field__label">Name</div>
        <div class="field__item">  Jane&nbsp;Doe </div>
      </div>
    </body></html>
    "#;

    let fields = extractor().extract(html);
    assert_eq!(fields.name.as_deref(), Some("Jane Doe"));
}

#[test]
fn primary_lookup_uses_element_text_without_field_item() {
    let html = r#"
    <html><body>
      <div class="field--name-field-contact-no"> +91 79 1234 5678 </div>
    </body></html>
    "#;

    let fields = extractor().extract(html);
    assert_eq!(fields.contact_no.as_deref(), Some("+91 79 1234 5678"));
}

#[test]
fn section_header_fallback_takes_the_first_following_block() {
    let html = r#"
    <html><body>
      <h2>Research Specialization</h2>
      <div>Graph theory and combinatorics</div>
    </body></html>
    "#;

    let fields = extractor().extract(html);
    assert_eq!(
        fields.specialization.as_deref(),
        Some("Graph theory and combinatorics")
    );
}

#[test]
fn section_header_match_is_case_insensitive() {
    let html = r#"
    <html><body>
      <h2>BIOGRAPHY</h2>
      <p>Jane Doe is a professor.</p>
    </body></html>
    "#;

    let fields = extractor().extract(html);
    assert_eq!(fields.biography.as_deref(), Some("Jane Doe is a professor."));
}

#[test]
fn empty_primary_falls_back_to_the_section_header() {
    let html = r#"
    <html><body>
      <div class="field--name-field-teaching">   </div>
      <h2>Teaching</h2>
      <div>Discrete Mathematics, Algorithms</div>
    </body></html>
    "#;

    let fields = extractor().extract(html);
    assert_eq!(
        fields.teaching.as_deref(),
        Some("Discrete Mathematics, Algorithms")
    );
}

#[test]
fn email_is_deobfuscated() {
    let html = r#"
    <html><body>
      <div class="field--name-field-email">
        <div class="field__item">jane_doe[at]daiict[dot]ac[dot]in</div>
      </div>
    </body></html>
    "#;

    let fields = extractor().extract(html);
    assert_eq!(fields.email.as_deref(), Some("jane_doe@daiict.ac.in"));
}

#[test]
fn name_falls_back_to_the_top_level_heading() {
    let html = r#"
    <html><body>
      <h1> Prof. Jane Doe </h1>
      <p>No structured fields on this layout.</p>
    </body></html>
    "#;

    let fields = extractor().extract(html);
    assert_eq!(fields.name.as_deref(), Some("Prof. Jane Doe"));
}

#[test]
fn relative_image_src_resolves_against_the_base_host() {
    let html = r#"
    <html><body>
      <div class="field--name-field-faculty-image">
        <img src="/sites/default/files/jane-doe.jpg">
      </div>
    </body></html>
    "#;

    let fields = extractor().extract(html);
    assert_eq!(
        fields.image_url.as_deref(),
        Some("https://www.daiict.ac.in/sites/default/files/jane-doe.jpg")
    );
}

#[test]
fn absolute_image_src_is_kept_as_is() {
    let html = r#"
    <html><body>
      <div class="field--name-field-faculty-image">
        <img src="https://cdn.example.org/jane-doe.jpg">
      </div>
    </body></html>
    "#;

    let fields = extractor().extract(html);
    assert_eq!(
        fields.image_url.as_deref(),
        Some("https://cdn.example.org/jane-doe.jpg")
    );
}

#[test]
fn document_with_no_recognizable_fields_yields_nothing() {
    let html = "<html><body><p>Under construction.</p></body></html>";
    let fields = extractor().extract(html);
    assert_eq!(fields, Default::default());
}
