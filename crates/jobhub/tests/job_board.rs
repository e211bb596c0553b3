use std::io::Cursor;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use jobhub::formatting::parse_instant;
use jobhub::identity::{MemoryIdentityStore, VisitorIdentity};
use jobhub::postings::{JobDetailView, PostingBoard, PostingCsvImporter, PostingQuery};
use jobhub::tracking::{EventType, MemoryEventSink, PageContext, PageViewGuard, Tracker};

const EXPORT: &str = "\
id,slug,title,company,reference_number,employment_type,address,street_address,city,state,postal_code,min_wage,max_wage,created_at,posted_at,is_active,monday,tuesday,wednesday,thursday,friday,saturday,sunday
1,warehouse-associate,Warehouse Associate,Northwind,NW-100,Full-time,,400 Dock Rd,Joliet,IL,60431,18.5,22,2024-01-10T08:00:00Z,2024-01-12T08:00:00Z,true,Morning,Morning,Morning,Morning,Morning,,
2,store-manager,Store Manager,Contoso,CT-7,Full-time,\"77 Market St, Suite 2\",,,,94105,65000,80000,2024-01-03T08:00:00Z,2024-01-03T08:00:00Z,true,,,,,,Evening,Evening
3,night-auditor,Night Auditor,Contoso,,Part-time,,,Reno,NV,,,,2024-01-12T08:00:00Z,,true,Overnight,,Overnight,,,,
4,retired-role,Retired Role,Northwind,,,,,,,,,,2024-01-14T08:00:00Z,,false,,,,,,,
";

fn now() -> DateTime<Utc> {
    parse_instant("2024-01-15T12:00:00Z").expect("valid clock")
}

fn board(page_size: usize) -> Arc<PostingBoard> {
    let postings =
        PostingCsvImporter::from_reader(Cursor::new(EXPORT.as_bytes())).expect("export imports");
    Arc::new(PostingBoard::with_postings(page_size, postings))
}

#[test]
fn list_shows_active_postings_newest_first() {
    let board = board(2);
    let page = board.search(&PostingQuery::default()).cards(now());

    assert_eq!(page.total_count, 3);
    assert_eq!(page.total_pages, 2);
    let slugs: Vec<&str> = page.items.iter().map(|card| card.slug.as_str()).collect();
    assert_eq!(slugs, ["night-auditor", "warehouse-associate"]);
    assert!(page.items[0].is_new);
    assert_eq!(page.items[0].locality.as_deref(), Some("Reno, NV"));
}

#[test]
fn company_filter_and_paging() {
    let board = board(1);
    let query = PostingQuery {
        company: Some("CONTOSO".to_string()),
        page: Some(2),
        ..PostingQuery::default()
    };
    let page = board.search(&query);
    assert_eq!(page.total_count, 2);
    assert_eq!(page.items[0].slug, "store-manager");
}

#[test]
fn detail_views_render_every_formatter() {
    let board = board(10);

    let warehouse = board
        .find_by_slug("warehouse-associate")
        .expect("posting present");
    let view = JobDetailView::from_posting(&warehouse, now());
    assert_eq!(view.wage, "$18.5 - $22 per hour");
    assert_eq!(view.address, "400 Dock Rd\nJoliet, IL, 60431");
    assert_eq!(view.shift_days.as_deref(), Some("Weekdays"));
    assert_eq!(view.shift_times.as_deref(), Some("Mornings"));
    assert!(view.is_new);
    assert_eq!(view.posted_days_ago, Some(3));

    let manager = board.find_by_slug("store-manager").expect("posting present");
    let view = JobDetailView::from_posting(&manager, now());
    assert_eq!(view.wage, "$65,000 - $80,000 per year");
    assert_eq!(view.address, "77 Market St, Suite 2");
    assert_eq!(view.shift_days.as_deref(), Some("Weekends"));
    assert_eq!(view.shift_times.as_deref(), Some("Evenings"));
    assert!(!view.is_new);

    let auditor = board.find_by_slug("night-auditor").expect("posting present");
    let view = JobDetailView::from_posting(&auditor, now());
    assert_eq!(view.wage, "Competitive salary");
    assert_eq!(view.address, "Reno, NV");
    assert_eq!(view.shift_days.as_deref(), Some("Mon, Wed"));
    assert_eq!(view.shift_times, None);
    assert!(!view.is_new);
}

#[test]
fn detail_page_view_is_tracked_once_per_posting() {
    let board = board(10);
    let tracker = Tracker::new(
        VisitorIdentity::new(MemoryIdentityStore::default(), MemoryIdentityStore::default()),
        MemoryEventSink::default(),
    );
    let mut guard = PageViewGuard::default();
    let page = PageContext {
        page_path: Some("/jobs/warehouse-associate".to_string()),
        ..PageContext::default()
    };

    let posting = board
        .find_by_slug("warehouse-associate")
        .expect("posting present");
    for _ in 0..3 {
        if guard.should_track(Some(posting.slug.as_str()), true) {
            tracker.track_page_view("job_detail", &page, Some(&posting.job_context()), None);
        }
    }

    let events = tracker.sink().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::PageView);
    assert_eq!(events[0].job_reference_number.as_deref(), Some("NW-100"));
    assert_eq!(events[0].job_company.as_deref(), Some("Northwind"));
}
