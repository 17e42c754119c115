// src/output/sitemap.rs
//! Sitemap generation: fixed static routes plus one entry per article.

use crate::model::Article;
use chrono::Utc;

struct StaticRoute {
    loc: &'static str,
    priority: &'static str,
    changefreq: &'static str,
}

const STATIC_ROUTES: &[StaticRoute] = &[
    StaticRoute {
        loc: "/",
        priority: "1.0",
        changefreq: "daily",
    },
    StaticRoute {
        loc: "/posts",
        priority: "0.9",
        changefreq: "daily",
    },
    StaticRoute {
        loc: "/projects",
        priority: "0.8",
        changefreq: "weekly",
    },
    StaticRoute {
        loc: "/bookmarks",
        priority: "0.7",
        changefreq: "weekly",
    },
    StaticRoute {
        loc: "/about",
        priority: "0.6",
        changefreq: "monthly",
    },
];

/// Builds the sitemap XML for the static routes and every synced
/// article, keyed by its update timestamp.
pub fn generate(articles: &[Article], site_url: &str) -> String {
    let today = Utc::now().format("%Y-%m-%d").to_string();

    let static_entries: Vec<String> = STATIC_ROUTES
        .iter()
        .map(|route| {
            entry(
                &format!("{}{}", site_url, route.loc),
                &today,
                route.changefreq,
                route.priority,
            )
        })
        .collect();

    let article_entries: Vec<String> = articles
        .iter()
        .map(|article| {
            entry(
                &format!("{}/posts/{}", site_url, article.slug),
                date_part(&article.updated_at),
                "monthly",
                "0.8",
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}\n{}\n</urlset>\n",
        static_entries.join("\n"),
        article_entries.join("\n")
    )
}

fn entry(loc: &str, lastmod: &str, changefreq: &str, priority: &str) -> String {
    format!(
        "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>",
        loc, lastmod, changefreq, priority
    )
}

/// Date part of an ISO-8601 timestamp.
fn date_part(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PageId;

    fn article(slug: &str, updated_at: &str) -> Article {
        Article {
            id: PageId::new_v4(),
            title: slug.to_string(),
            slug: slug.to_string(),
            excerpt: String::new(),
            tags: vec![],
            thumbnail: None,
            published: true,
            created_at: updated_at.to_string(),
            updated_at: updated_at.to_string(),
            related_project: None,
            reading_time: None,
        }
    }

    #[test]
    fn sitemap_lists_static_routes_and_articles() {
        let articles = vec![article("hello-rust", "2025-04-01T12:30:00.000Z")];
        let xml = generate(&articles, "https://example.com");

        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/about</loc>"));
        assert!(xml.contains("<loc>https://example.com/posts/hello-rust</loc>"));
        assert!(xml.contains("<lastmod>2025-04-01</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 6);
    }
}
