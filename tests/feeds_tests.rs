mod common;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use folio_backend::entities::project::{Project, ProjectType};
use folio_backend::handlers::feeds::{build_rss, build_sitemap};

fn sample_project(slug: &str) -> Project {
    let created = Utc.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap();

    Project {
        id: Uuid::new_v4(),
        title: "Clip Generator".to_string(),
        slug: slug.to_string(),
        summary: "Automated highlight clips.".to_string(),
        project_type: ProjectType::AiVideo,
        tech_stack: vec!["rust".to_string()],
        repo_url: None,
        live_url: None,
        video_url: None,
        cover_image_url: None,
        content_mdx: None,
        featured: true,
        created_at: created,
        updated_at: created,
    }
}

#[test]
fn sitemap_lists_static_routes_and_content_slugs() {
    let projects = vec![sample_project("clip-generator")];
    let posts = vec![common::sample_post("shipping-side-projects", true)];

    let xml = build_sitemap("https://example.com/", &projects, &posts);

    assert!(xml.starts_with("<?xml"));
    for route in ["/about", "/blog", "/projects", "/resume", "/contact"] {
        assert!(
            xml.contains(&format!("<loc>https://example.com{route}</loc>")),
            "sitemap should list {route}"
        );
    }
    assert!(xml.contains("<loc>https://example.com/projects/clip-generator</loc>"));
    assert!(xml.contains("<loc>https://example.com/blog/shipping-side-projects</loc>"));
    assert!(xml.contains("<lastmod>2024-05-01</lastmod>"));
}

#[test]
fn rss_carries_item_metadata_and_full_content() {
    let posts = vec![common::sample_post("shipping-side-projects", true)];

    let xml = build_rss("https://example.com", "Test Blog", "Testing feed output", &posts);

    assert!(xml.contains("<rss version=\"2.0\""));
    assert!(xml.contains("<title><![CDATA[Shipping a Side Project]]></title>"));
    assert!(xml.contains("<link>https://example.com/blog/shipping-side-projects</link>"));
    assert!(xml.contains("<guid isPermaLink=\"true\">https://example.com/blog/shipping-side-projects</guid>"));
    assert!(xml.contains("<pubDate>"));
    assert!(xml.contains("<description><![CDATA[Lessons from building in public.]]></description>"));
    // Full content is rendered to HTML inside content:encoded.
    assert!(xml.contains("<content:encoded><![CDATA["));
    assert!(xml.contains("<strong>bold</strong>"));
}

#[test]
fn rss_channel_uses_configured_metadata() {
    let xml = build_rss("https://example.com", "Test Blog", "Testing feed output", &[]);

    assert!(xml.contains("<title>Test Blog</title>"));
    assert!(xml.contains("<description>Testing feed output</description>"));
    assert!(xml.contains("<atom:link href=\"https://example.com/rss.xml\""));
}
