use deck_engine::{derive_filename, fallback_filename, filename_from_disposition};

#[test]
fn quoted_header_filename_is_extracted_exactly() {
    assert_eq!(
        filename_from_disposition("filename=\"deck.pptx\"").as_deref(),
        Some("deck.pptx")
    );
    assert_eq!(
        filename_from_disposition("attachment; filename=\"deck.pptx\"").as_deref(),
        Some("deck.pptx")
    );
}

#[test]
fn unquoted_header_filename_is_extracted() {
    assert_eq!(
        filename_from_disposition("attachment; filename=deck.pptx").as_deref(),
        Some("deck.pptx")
    );
    assert_eq!(
        filename_from_disposition("attachment; filename=deck.pptx; size=42").as_deref(),
        Some("deck.pptx")
    );
}

#[test]
fn headers_without_a_usable_name_yield_none() {
    assert_eq!(filename_from_disposition("attachment"), None);
    assert_eq!(filename_from_disposition("attachment; filename=\"\""), None);
    assert_eq!(filename_from_disposition("attachment; filename="), None);
}

#[test]
fn fallback_replaces_non_alphanumerics_and_appends_suffix() {
    assert_eq!(
        fallback_filename("Machine Learning!"),
        "Machine_Learning__presentation.pptx"
    );
    assert_eq!(fallback_filename("AI Basics"), "AI_Basics_presentation.pptx");
    assert_eq!(fallback_filename("rust"), "rust_presentation.pptx");
}

#[test]
fn derive_prefers_the_header_name() {
    assert_eq!(
        derive_filename(Some("attachment; filename=\"deck.pptx\""), "AI Basics"),
        "deck.pptx"
    );
    assert_eq!(
        derive_filename(None, "AI Basics"),
        "AI_Basics_presentation.pptx"
    );
    assert_eq!(
        derive_filename(Some("attachment"), "AI Basics"),
        "AI_Basics_presentation.pptx"
    );
}
