use validator::Validate;

use folio_backend::entities::post::{NewPostRequest, PostInsert};

fn valid_request() -> NewPostRequest {
    NewPostRequest {
        title: "A Title".to_string(),
        slug: "a-title".to_string(),
        excerpt: "A short teaser.".to_string(),
        content_mdx: "Body text long enough to matter.".to_string(),
        tags: vec![],
        cover_image_url: None,
        reading_minutes: 3,
        published_at: None,
    }
}

fn field_messages(request: &NewPostRequest, field: &str) -> Vec<String> {
    let errors = request.validate().expect_err("validation should fail");
    errors
        .field_errors()
        .get(field)
        .map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn accepts_a_complete_payload() {
    assert!(valid_request().validate().is_ok());
}

#[test]
fn accepts_minimal_slug_and_cover_url_variants() {
    let mut request = valid_request();
    request.slug = "a".to_string();
    request.cover_image_url = Some("https://cdn.example.com/img.png".to_string());
    assert!(request.validate().is_ok());

    // Form payloads send empty strings for cleared URL fields.
    request.cover_image_url = Some(String::new());
    assert!(request.validate().is_ok());
}

#[test]
fn rejects_empty_title_with_field_message() {
    let mut request = valid_request();
    request.title = String::new();
    assert_eq!(field_messages(&request, "title"), vec!["Title is required"]);
}

#[test]
fn rejects_empty_excerpt_and_content() {
    let mut request = valid_request();
    request.excerpt = String::new();
    assert_eq!(field_messages(&request, "excerpt"), vec!["Excerpt is required"]);

    let mut request = valid_request();
    request.content_mdx = String::new();
    assert_eq!(field_messages(&request, "content_mdx"), vec!["Content is required"]);
}

#[test]
fn rejects_slugs_outside_the_lowercase_hyphen_alphabet() {
    for bad_slug in ["Upper-Case", "has space", "punctuated!", "dotted.slug", ""] {
        let mut request = valid_request();
        request.slug = bad_slug.to_string();
        let messages = field_messages(&request, "slug");
        assert!(
            !messages.is_empty(),
            "slug {bad_slug:?} should produce a field error"
        );
    }
}

#[test]
fn rejects_negative_reading_minutes() {
    let mut request = valid_request();
    request.reading_minutes = -1;
    assert!(!field_messages(&request, "reading_minutes").is_empty());
}

#[test]
fn rejects_malformed_cover_url() {
    let mut request = valid_request();
    request.cover_image_url = Some("not a url".to_string());
    assert!(!field_messages(&request, "cover_image_url").is_empty());

    let mut request = valid_request();
    request.cover_image_url = Some("ftp://example.com/img.png".to_string());
    assert!(!field_messages(&request, "cover_image_url").is_empty());
}

#[test]
fn insert_preserves_tag_order() {
    let mut request = valid_request();
    request.tags = vec!["a".to_string(), "b".to_string()];

    let insert = PostInsert::try_from(request).expect("payload is valid");
    assert_eq!(insert.tags, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn insert_derives_reading_minutes_when_unset() {
    let mut request = valid_request();
    request.reading_minutes = 0;
    request.content_mdx = vec!["word"; 450].join(" ");

    let insert = PostInsert::try_from(request).expect("payload is valid");
    assert_eq!(insert.reading_minutes, 3);
}

#[test]
fn insert_normalizes_empty_cover_url_to_none() {
    let mut request = valid_request();
    request.cover_image_url = Some(String::new());

    let insert = PostInsert::try_from(request).expect("payload is valid");
    assert_eq!(insert.cover_image_url, None);
}

#[test]
fn published_at_accepts_iso_strings_and_null() {
    let payload = serde_json::json!({
        "title": "A Title",
        "slug": "a-title",
        "excerpt": "A short teaser.",
        "content_mdx": "Body.",
        "published_at": "2024-05-01T12:00:00Z",
    });
    let request: NewPostRequest = serde_json::from_value(payload).unwrap();
    assert!(request.published_at.is_some());

    let payload = serde_json::json!({
        "title": "A Title",
        "slug": "a-title",
        "excerpt": "A short teaser.",
        "content_mdx": "Body.",
        "published_at": null,
    });
    let request: NewPostRequest = serde_json::from_value(payload).unwrap();
    assert!(request.published_at.is_none());
}
