use validator::Validate;

use folio_backend::entities::project::{NewProjectRequest, ProjectType};

fn valid_request() -> NewProjectRequest {
    NewProjectRequest {
        title: "Portfolio Site".to_string(),
        slug: "portfolio-site".to_string(),
        summary: "A personal site with an admin panel.".to_string(),
        project_type: ProjectType::Web,
        tech_stack: vec!["rust".to_string(), "actix-web".to_string()],
        repo_url: Some("https://github.com/example/portfolio".to_string()),
        live_url: None,
        video_url: None,
        cover_image_url: None,
        content_mdx: None,
        featured: false,
    }
}

#[test]
fn accepts_a_complete_payload() {
    assert!(valid_request().validate().is_ok());
}

#[test]
fn rejects_empty_required_fields() {
    let mut request = valid_request();
    request.title = String::new();
    assert!(request.validate().is_err());

    let mut request = valid_request();
    request.summary = String::new();
    assert!(request.validate().is_err());

    let mut request = valid_request();
    request.slug = String::new();
    assert!(request.validate().is_err());
}

#[test]
fn rejects_punctuated_slug() {
    let mut request = valid_request();
    request.slug = "my-app!!".to_string();

    let errors = request.validate().expect_err("slug should be rejected");
    assert!(errors.field_errors().contains_key("slug"));
}

#[test]
fn type_accepts_exactly_the_three_enum_values() {
    for (raw, expected) in [
        ("WEB", ProjectType::Web),
        ("LLM", ProjectType::Llm),
        ("AIVIDEO", ProjectType::AiVideo),
    ] {
        let parsed: ProjectType =
            serde_json::from_value(serde_json::json!(raw)).expect("known variant");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), raw);
    }
}

#[test]
fn type_rejects_anything_else() {
    for raw in ["MOBILE", "web", "Llm", "", "VIDEO"] {
        let result: Result<ProjectType, _> = serde_json::from_value(serde_json::json!(raw));
        assert!(result.is_err(), "{raw:?} should not deserialize");
        assert!(raw.parse::<ProjectType>().is_err(), "{raw:?} should not parse");
    }
}

#[test]
fn payload_uses_the_type_field_name() {
    let payload = serde_json::json!({
        "title": "Clip Generator",
        "slug": "clip-generator",
        "summary": "Automated highlight clips.",
        "type": "AIVIDEO",
    });

    let request: NewProjectRequest = serde_json::from_value(payload).unwrap();
    assert_eq!(request.project_type, ProjectType::AiVideo);
    assert!(request.tech_stack.is_empty());
    assert!(!request.featured);
}

#[test]
fn optional_urls_must_be_well_formed_when_present() {
    let mut request = valid_request();
    request.video_url = Some("definitely not a url".to_string());
    let errors = request.validate().expect_err("bad url should be rejected");
    assert!(errors.field_errors().contains_key("video_url"));

    // Empty strings mean the field was cleared in the form.
    let mut request = valid_request();
    request.video_url = Some(String::new());
    assert!(request.validate().is_ok());
}
