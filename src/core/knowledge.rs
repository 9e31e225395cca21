//! Knowledge-base search and view tracking.

use crate::entities::KnowledgeArticle;
use chrono::{DateTime, Utc};

/// Splits a comma-separated tag list, trimming whitespace and dropping empty entries.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Case-insensitive search over title, content and tags.
///
/// A blank term matches every article. Results keep dataset order.
#[must_use]
pub fn search_articles<'a>(articles: &'a [KnowledgeArticle], term: &str) -> Vec<&'a KnowledgeArticle> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return articles.iter().collect();
    }

    articles
        .iter()
        .filter(|article| {
            article.title.to_lowercase().contains(&needle)
                || article.content.to_lowercase().contains(&needle)
                || article
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Records one read: bumps the view counter and stamps `last_accessed`.
pub fn record_view(article: &mut KnowledgeArticle, now: DateTime<Utc>) {
    article.views = article.views.saturating_add(1);
    article.last_accessed = Some(now);
}

/// Articles ordered by descending view count; ties keep dataset order.
#[must_use]
pub fn most_viewed(articles: &[KnowledgeArticle], limit: usize) -> Vec<&KnowledgeArticle> {
    let mut sorted: Vec<&KnowledgeArticle> = articles.iter().collect();
    sorted.sort_by(|a, b| b.views.cmp(&a.views));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{article, fixed_now};

    fn library() -> Vec<KnowledgeArticle> {
        vec![
            article(1, "Stable UI tests", "Prefer explicit waits", &["Selenium"]),
            article(2, "COBOL batch restart", "Checkpoint every 1000 records", &["legacy"]),
            article(3, "Release checklist", "Tag, build, sign", &[]),
        ]
    }

    #[test]
    fn test_parse_tags_trims_and_drops_empty() {
        assert_eq!(parse_tags(" ci, flaky ,,"), vec!["ci", "flaky"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn test_search_matches_title_content_and_tags() {
        let articles = library();
        let ids = |term: &str| -> Vec<u64> {
            search_articles(&articles, term).iter().map(|a| a.id).collect()
        };
        assert_eq!(ids("stable"), vec![1]);
        assert_eq!(ids("CHECKPOINT"), vec![2]);
        assert_eq!(ids("selen"), vec![1]);
        assert!(ids("kubernetes").is_empty());
    }

    #[test]
    fn test_blank_search_returns_all_in_order() {
        let articles = library();
        let ids: Vec<u64> = search_articles(&articles, "  ").iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_record_view_bumps_counter_and_timestamp() {
        let mut a = article(1, "t", "c", &[]);
        record_view(&mut a, fixed_now());
        record_view(&mut a, fixed_now());
        assert_eq!(a.views, 2);
        assert_eq!(a.last_accessed, Some(fixed_now()));
    }

    #[test]
    fn test_most_viewed() {
        let mut articles = library();
        articles[2].views = 9;
        articles[0].views = 4;
        let ids: Vec<u64> = most_viewed(&articles, 2).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
