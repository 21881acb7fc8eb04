use actix_web::{get, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};

use crate::{
    constants::STATIC_ROUTES,
    entities::{post::Post, project::Project},
    errors::AppError,
    repositories::{post::PostFilter, project::ProjectFilter},
    utils::markdown::safe_markdown_to_html,
    AppState,
};

const FEED_CACHE_CONTROL: &str = "s-maxage=3600, stale-while-revalidate";

/// Sitemap covering the static site routes plus every project and every
/// published post.
#[get("/sitemap.xml")]
pub async fn sitemap(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_projects(&ProjectFilter::default()).await?;
    let posts = state.post_handler.list_posts(true, &PostFilter::default()).await?;

    let xml = build_sitemap(&state.config.site_base_url, &projects, &posts);

    Ok(HttpResponse::Ok()
        .content_type("application/xml")
        .insert_header(("Cache-Control", FEED_CACHE_CONTROL))
        .body(xml))
}

/// RSS 2.0 feed of published posts, newest first, with the full rendered
/// content inlined.
#[get("/rss.xml")]
pub async fn rss(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let posts = state.post_handler.list_posts(true, &PostFilter::default()).await?;

    let xml = build_rss(
        &state.config.site_base_url,
        &state.config.site_title,
        &state.config.site_description,
        &posts,
    );

    Ok(HttpResponse::Ok()
        .content_type("application/xml")
        .insert_header(("Cache-Control", FEED_CACHE_CONTROL))
        .body(xml))
}

// ───── XML builders ─────────────────────────────────────────────────

pub fn build_sitemap(base_url: &str, projects: &[Project], posts: &[Post]) -> String {
    let base = base_url.trim_end_matches('/');
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );

    for route in STATIC_ROUTES {
        push_url(&mut xml, &format!("{base}{route}"), Utc::now());
    }
    for project in projects {
        push_url(&mut xml, &format!("{base}/projects/{}", project.slug), project.updated_at);
    }
    for post in posts {
        push_url(&mut xml, &format!("{base}/blog/{}", post.slug), post.updated_at);
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_url(xml: &mut String, loc: &str, lastmod: DateTime<Utc>) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));
    xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod.format("%Y-%m-%d")));
    xml.push_str("  </url>\n");
}

pub fn build_rss(base_url: &str, title: &str, description: &str, posts: &[Post]) -> String {
    let base = base_url.trim_end_matches('/');

    let items: String = posts
        .iter()
        .map(|post| {
            let link = format!("{base}/blog/{}", post.slug);
            let pub_date = post
                .published_at
                .unwrap_or(post.created_at)
                .to_rfc2822();

            format!(
                r#"    <item>
      <title>{title}</title>
      <link>{link}</link>
      <guid isPermaLink="true">{link}</guid>
      <pubDate>{pub_date}</pubDate>
      <description>{description}</description>
      <content:encoded>{content}</content:encoded>
    </item>
"#,
                title = cdata(&post.title),
                link = link,
                pub_date = pub_date,
                description = cdata(&post.excerpt),
                content = cdata(&safe_markdown_to_html(&post.content_mdx)),
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>{title}</title>
    <link>{base}</link>
    <description>{description}</description>
    <language>en-us</language>
    <lastBuildDate>{build_date}</lastBuildDate>
    <atom:link href="{base}/rss.xml" rel="self" type="application/rss+xml" />
{items}  </channel>
</rss>
"#,
        title = escape_xml(title),
        base = base,
        description = escape_xml(description),
        build_date = Utc::now().to_rfc2822(),
        items = items,
    )
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// CDATA-wraps arbitrary text; an embedded `]]>` is split across sections.
fn cdata(value: &str) -> String {
    format!("<![CDATA[{}]]>", value.replace("]]>", "]]]]><![CDATA[>"))
}
