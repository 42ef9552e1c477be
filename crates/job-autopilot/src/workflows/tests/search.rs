use std::sync::Arc;

use serde_json::json;

use super::common::*;
use crate::browser::Locator;
use crate::workflows::domain::{ExperienceLevel, SiteKind};
use crate::workflows::search::JobSearchAggregator;
use crate::workflows::sites::{LinkedInAdapter, NaukriAdapter, SiteAdapter};

const LINKEDIN_CARD: Locator = Locator::Css(".job-search-card");
const NAUKRI_CARD: Locator = Locator::Css(".jobTuple");

#[tokio::test]
async fn timed_out_site_does_not_block_the_other() {
    let linkedin_pages = Arc::new(ScriptedLauncher::new(
        PageScript::default()
            .with_present(&[LINKEDIN_CARD])
            .with_cards(cards(12, "2 days ago")),
    ));
    let naukri_pages = Arc::new(ScriptedLauncher::new(PageScript::default()));

    let aggregator = JobSearchAggregator::new(vec![
        Arc::new(LinkedInAdapter::new(linkedin_pages.clone(), instant())) as Arc<dyn SiteAdapter>,
        Arc::new(NaukriAdapter::new(naukri_pages.clone(), instant())),
    ]);

    let response = aggregator
        .search("Rust Engineer", ExperienceLevel::Senior)
        .await;

    assert_eq!(response.total_count, 10);
    assert_eq!(response.jobs.len(), 10);
    assert!(response
        .jobs
        .iter()
        .all(|job| job.source == SiteKind::LinkedIn));
    assert_eq!(response.jobs[0].title, "Rust Engineer 0");
    assert_eq!(response.jobs[9].title, "Rust Engineer 9");

    linkedin_pages.snapshot(|journal| {
        assert_eq!(
            journal.visited,
            vec![LinkedInAdapter::search_url("Rust Engineer", ExperienceLevel::Senior)]
        );
        assert_eq!(journal.closed, 1);
    });
    naukri_pages.snapshot(|journal| assert_eq!(journal.closed, 1));
}

#[tokio::test]
async fn stale_postings_are_filtered() {
    let launcher = Arc::new(ScriptedLauncher::new(
        PageScript::default().with_present(&[LINKEDIN_CARD]).with_cards(json!([
            card("Fresh", "/jobs/view/1", "3 days ago"),
            card("Stale", "/jobs/view/2", "3 weeks ago"),
            card("Hourly", "/jobs/view/3", "5 hours ago"),
        ])),
    ));
    let aggregator = JobSearchAggregator::new(vec![
        Arc::new(LinkedInAdapter::new(launcher, instant())) as Arc<dyn SiteAdapter>,
    ]);

    let response = aggregator.search("Platform", ExperienceLevel::Mid).await;

    let titles: Vec<&str> = response.jobs.iter().map(|job| job.title.as_str()).collect();
    assert_eq!(titles, vec!["Fresh", "Hourly"]);
    assert_eq!(response.total_count, 2);
    assert_eq!(response.jobs[0].url, "https://www.linkedin.com/jobs/view/1");
}

#[tokio::test]
async fn naukri_cards_resolve_relative_links() {
    let launcher = Arc::new(ScriptedLauncher::new(
        PageScript::default().with_present(&[NAUKRI_CARD]).with_cards(json!([
            {
                "title": "Go Developer",
                "company": "Umbrella",
                "location": "Hyderabad",
                "href": "/job-listings-go-developer-77",
                "postedDate": "Today",
                "experience": "2-5 Yrs"
            }
        ])),
    ));
    let adapter = NaukriAdapter::new(launcher, instant());

    let jobs = adapter.search("Go Developer", ExperienceLevel::Mid);

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].url, "https://www.naukri.com/job-listings-go-developer-77");
    assert_eq!(jobs[0].experience, "2-5 Yrs");
    assert_eq!(jobs[0].source, SiteKind::Naukri);
    assert!(jobs[0].description.is_empty());
}

#[tokio::test]
async fn malformed_card_payload_yields_no_results() {
    let launcher = Arc::new(ScriptedLauncher::new(
        PageScript::default()
            .with_present(&[LINKEDIN_CARD])
            .with_cards(json!({ "unexpected": true })),
    ));
    let adapter = LinkedInAdapter::new(launcher, instant());

    assert!(adapter.search("Anything", ExperienceLevel::Entry).is_empty());
}

#[tokio::test]
async fn results_keep_adapter_order() {
    let linkedin = Arc::new(RecordingAdapter::new(
        SiteKind::LinkedIn,
        vec![
            posting(SiteKind::LinkedIn, "L1", "1 day ago"),
            posting(SiteKind::LinkedIn, "L2", "yesterday"),
        ],
    ));
    let naukri = Arc::new(RecordingAdapter::new(
        SiteKind::Naukri,
        vec![posting(SiteKind::Naukri, "N1", "Just now 1 hour ago")],
    ));
    let aggregator = JobSearchAggregator::new(vec![
        naukri.clone() as Arc<dyn SiteAdapter>,
        linkedin.clone(),
    ]);

    let response = aggregator.search("Backend", ExperienceLevel::Entry).await;

    let titles: Vec<&str> = response.jobs.iter().map(|job| job.title.as_str()).collect();
    assert_eq!(titles, vec!["N1", "L1", "L2"]);
    assert_eq!(
        linkedin.searches.lock().expect("lock").as_slice(),
        &[("Backend".to_string(), ExperienceLevel::Entry)]
    );
}

#[tokio::test]
async fn adapter_results_are_capped_per_site() {
    let flood: Vec<_> = (0..15)
        .map(|index| posting(SiteKind::Naukri, &format!("N{index}"), "2 days ago"))
        .collect();
    let aggregator = JobSearchAggregator::new(vec![
        Arc::new(RecordingAdapter::new(SiteKind::Naukri, flood)) as Arc<dyn SiteAdapter>,
    ]);

    let response = aggregator.search("Any", ExperienceLevel::Mid).await;

    assert_eq!(response.total_count, 10);
}

#[tokio::test]
async fn panicking_adapter_contributes_nothing() {
    let aggregator = JobSearchAggregator::new(vec![
        Arc::new(PanickingAdapter(SiteKind::LinkedIn)) as Arc<dyn SiteAdapter>,
        Arc::new(RecordingAdapter::new(
            SiteKind::Naukri,
            vec![posting(SiteKind::Naukri, "Survivor", "today")],
        )),
    ]);

    let response = aggregator.search("Any", ExperienceLevel::Mid).await;

    assert_eq!(response.total_count, 1);
    assert_eq!(response.jobs[0].title, "Survivor");
}
