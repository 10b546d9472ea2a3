// Fetch-analyze sequence.
// One run: get content, strip markup, compute statistics.

use crate::analysis::{self, Analysis, AnalysisOptions};
use crate::cache::LocalStore;
use crate::error::Result;
use crate::provider::{ContentOrigin, ContentProvider};
use crate::remote::RemoteSource;

/// Outcome of one fetch-analyze run.
#[derive(Debug, Clone)]
pub struct Report {
    pub analysis: Analysis,
    pub origin: ContentOrigin,
}

pub async fn run<R: RemoteSource, S: LocalStore>(
    provider: &ContentProvider<R, S>,
    options: &AnalysisOptions,
) -> Result<Report> {
    let content = provider.fetch_content().await?;
    let text = analysis::html_to_text(&content.body);

    Ok(Report {
        analysis: analysis::analyze(&text, options),
        origin: content.origin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CONTENT_KEY, MemoryStore};
    use crate::provider::tests::StubRemote;

    const PAGE: &str =
        "<html><body>Some example text here with enough content to test.</body></html>";

    #[tokio::test]
    async fn test_run_fresh_page() {
        let provider = ContentProvider::new(StubRemote::ok(PAGE), MemoryStore::new());

        let report = run(&provider, &AnalysisOptions::default()).await.unwrap();

        assert!(report.origin.is_fresh());
        assert!(!report.analysis.sampled.is_empty());
        assert!(!report.analysis.word_counts.is_empty());
        // "Someexampl" -> 'l', "etexthere" + 'w' -> 'w', ...
        assert!(report.analysis.sampled.starts_with("lw"));
        assert!(report.analysis.word_counts.lines().all(|l| l.ends_with("=1")));
    }

    #[tokio::test]
    async fn test_run_falls_back_to_cached_page() {
        let provider = ContentProvider::new(
            StubRemote::failing(),
            MemoryStore::with_entry(CONTENT_KEY, "<p>Cached cached copy</p>"),
        );

        let report = run(&provider, &AnalysisOptions::default()).await.unwrap();

        assert!(matches!(report.origin, ContentOrigin::Cached { .. }));
        assert_eq!(report.analysis.word_counts, "cached=2\ncopy=1");
        assert_eq!(report.analysis.sampled, "h");
    }

    #[tokio::test]
    async fn test_run_with_nothing_available() {
        let provider = ContentProvider::new(StubRemote::failing(), MemoryStore::new());

        let report = run(&provider, &AnalysisOptions::default()).await.unwrap();

        assert_eq!(report.origin, ContentOrigin::Empty);
        assert_eq!(report.analysis, Analysis::default());
    }
}
