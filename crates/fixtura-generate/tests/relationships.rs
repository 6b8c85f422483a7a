use fixtura_core::ClassName;
use fixtura_generate::{FixtureError, ModelRegistry, ModelType, RelationshipDetector};

fn registry(classes: &[(&str, &str)]) -> ModelRegistry {
    let mut models = ModelRegistry::new();
    for (class_name, table) in classes {
        models.register(ModelType::record(class_name, *table));
    }
    models
}

#[test]
fn candidate_extracts_the_referenced_word() {
    let detector = RelationshipDetector::new();

    assert_eq!(detector.candidate("author_id"), Some("author"));
    assert_eq!(detector.candidate("blog_post_id"), Some("blog_post"));
    assert_eq!(detector.candidate("Author-ID"), Some("Author"));
    assert_eq!(detector.candidate("id"), None);
    assert_eq!(detector.candidate("_id"), None);
    assert_eq!(detector.candidate("identity"), None);
    assert_eq!(detector.candidate("author_idx"), None);
}

#[test]
fn bare_class_is_preferred() {
    let models = registry(&[("Author", "authors"), ("Blog::Author", "blog_authors")]);
    let detector = RelationshipDetector::new();

    let found = detector
        .detect("author_id", Some("Blog"), &models)
        .expect("related model");
    assert_eq!(found.canonical(), "Author");
}

#[test]
fn root_namespace_is_tried_second() {
    let models = registry(&[("Blog::Editor", "blog_editors")]);
    let detector = RelationshipDetector::new();

    let found = detector
        .detect("editor_id", Some("Blog"), &models)
        .expect("related model");
    assert_eq!(found, ClassName::parse("Blog::Editor").expect("class name"));

    assert_eq!(detector.detect("editor_id", None, &models), None);
}

#[test]
fn multi_word_candidates_are_studlied() {
    let models = registry(&[("BlogPost", "blog_posts")]);
    let detector = RelationshipDetector::new();

    let found = detector
        .detect("blog_post_id", None, &models)
        .expect("related model");
    assert_eq!(found.canonical(), "BlogPost");
}

#[test]
fn unloadable_candidates_are_ignored() {
    let models = registry(&[("Author", "authors")]);
    let detector = RelationshipDetector::new();

    assert_eq!(detector.detect("external_id", Some("Blog"), &models), None);
    assert_eq!(detector.detect("name", None, &models), None);
}

#[test]
fn custom_pattern_needs_a_capture_group() {
    let detector = RelationshipDetector::with_pattern(r"^fk_(\w+)$").expect("pattern");
    assert_eq!(detector.candidate("fk_author"), Some("author"));
    assert_eq!(detector.candidate("author_id"), None);

    let err = RelationshipDetector::with_pattern(r"_id$").expect_err("no group");
    assert!(matches!(err, FixtureError::InvalidConfig(_)));

    let err = RelationshipDetector::with_pattern(r"(").expect_err("invalid regex");
    assert!(matches!(err, FixtureError::InvalidConfig(_)));
}

#[test]
fn class_lookup_ignores_case() {
    let models = registry(&[("Author", "authors"), ("Blog::Editor", "blog_editors")]);
    let detector = RelationshipDetector::new();

    let found = detector
        .detect("AUTHOR_ID", None, &models)
        .expect("related model");
    assert_eq!(models.get(&found).map(|model| model.class_name()), Some("Author"));

    let found = detector
        .detect("EDITOR-ID", Some("Blog"), &models)
        .expect("related model");
    assert_eq!(models.resolve(&found).expect("resolves").table(), "blog_editors");
}
