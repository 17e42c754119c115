use notion_sync::{parser, ProjectStatus};
use pretty_assertions::assert_eq;
use serde_json::json;

fn page_envelope(properties: serde_json::Value) -> serde_json::Value {
    json!({
        "object": "page",
        "id": "12345678-1234-1234-1234-123456789abc",
        "created_time": "2025-01-10T08:00:00.000Z",
        "last_edited_time": "2025-02-20T10:30:00.000Z",
        "properties": properties,
    })
}

#[test]
fn article_decodes_all_typed_properties() {
    let page = page_envelope(json!({
        "Title": {"type": "title", "title": [{"plain_text": "Sync pipelines"}]},
        "slug": {"type": "rich_text", "rich_text": [{"plain_text": "sync-pipelines"}]},
        "excerpt": {"type": "rich_text", "rich_text": [{"plain_text": "How it works"}]},
        "tags": {"type": "multi_select", "multi_select": [{"name": "rust"}, {"name": "notion"}]},
        "thumbnail": {"type": "url", "url": "https://img.example/t.png"},
        "published": {"type": "checkbox", "checkbox": true},
        "relatedProject": {"type": "relation", "relation": [{"id": "rel-1"}, {"id": "rel-2"}]},
    }));

    let article = parser::parse_article(&page).unwrap();
    assert_eq!(article.title, "Sync pipelines");
    assert_eq!(article.slug, "sync-pipelines");
    assert_eq!(article.excerpt, "How it works");
    assert_eq!(article.tags, vec!["rust", "notion"]);
    assert_eq!(article.thumbnail.as_deref(), Some("https://img.example/t.png"));
    assert!(article.published);
    assert_eq!(article.created_at, "2025-01-10T08:00:00.000Z");
    assert_eq!(article.updated_at, "2025-02-20T10:30:00.000Z");
    // Only the first relation is kept.
    assert_eq!(article.related_project.as_deref(), Some("rel-1"));
    assert_eq!(article.reading_time, None);
}

#[test]
fn article_with_empty_property_bag_decodes_to_defaults() {
    let page = page_envelope(json!({}));

    let article = parser::parse_article(&page).unwrap();
    assert_eq!(article.title, "");
    assert_eq!(article.slug, "");
    assert!(article.tags.is_empty());
    assert_eq!(article.thumbnail, None);
    assert!(!article.published);
    assert_eq!(article.related_project, None);
}

#[test]
fn page_without_id_is_a_malformed_response() {
    let page = json!({"object": "page", "properties": {}});
    assert!(parser::parse_article(&page).is_err());
}

#[test]
fn project_maps_status_labels_and_period() {
    let page = page_envelope(json!({
        "Title": {"type": "title", "title": [{"plain_text": "Blog"}]},
        "status": {"type": "select", "select": {"name": "진행중"}},
        "period": {"type": "date", "date": {"start": "2024-06-01", "end": "2024-12-31"}},
        "techStack": {"type": "multi_select", "multi_select": [{"name": "Rust"}]},
        "github": {"type": "url", "url": "https://github.com/example/blog"},
        "published": {"type": "checkbox", "checkbox": true},
    }));

    let project = parser::parse_project(&page).unwrap();
    assert_eq!(project.status, Some(ProjectStatus::InProgress));
    let period = project.period.unwrap();
    assert_eq!(period.start, "2024-06-01");
    assert_eq!(period.end.as_deref(), Some("2024-12-31"));
    assert_eq!(project.tech_stack, vec!["Rust"]);
    assert_eq!(project.github.as_deref(), Some("https://github.com/example/blog"));
}

#[test]
fn unknown_status_label_decodes_to_none() {
    let page = page_envelope(json!({
        "status": {"type": "select", "select": {"name": "paused"}},
    }));

    let project = parser::parse_project(&page).unwrap();
    assert_eq!(project.status, None);
}

#[test]
fn bookmark_decodes_url_and_category() {
    let page = page_envelope(json!({
        "Title": {"type": "title", "title": [{"plain_text": "A great read"}]},
        "url": {"type": "url", "url": "https://blog.example/post"},
        "category": {"type": "select", "select": {"name": "engineering"}},
        "tags": {"type": "multi_select", "multi_select": [{"name": "deep-dive"}]},
        "published": {"type": "checkbox", "checkbox": true},
    }));

    let bookmark = parser::parse_bookmark(&page).unwrap();
    assert_eq!(bookmark.title, "A great read");
    assert_eq!(bookmark.url, "https://blog.example/post");
    assert_eq!(bookmark.category.as_deref(), Some("engineering"));
    assert_eq!(bookmark.tags, vec!["deep-dive"]);
}

#[test]
fn bookmark_without_url_decodes_to_empty_string() {
    let page = page_envelope(json!({}));
    let bookmark = parser::parse_bookmark(&page).unwrap();
    assert_eq!(bookmark.url, "");
}
