use crate::common::{HistoryBuilder, UnavailableStore, date};
use hifz_review::{ReviewError, ReviewService};
use hifz_srs::Score;
use uuid::Uuid;

#[tokio::test]
async fn test_due_pages_keeps_overdue_and_today() {
    let today = date(2024, 9, 15);
    let (student, service) = HistoryBuilder::new()
        // Due yesterday
        .revision(10, date(2024, 9, 7), 0, 0, 7)
        // Due tomorrow
        .revision(11, date(2024, 9, 13), 1, 0, 3)
        // Due today
        .revision(12, date(2024, 9, 10), 0, 1, 5)
        .build();

    let due = service.due_pages(student, today).await.unwrap();

    assert_eq!(due.keys().copied().collect::<Vec<_>>(), vec![10, 12]);
    assert_eq!(due[&10].scheduled_due_date, Some(date(2024, 9, 14)));
    assert_eq!(due[&12].score, Some(Score::Fair));
}

#[tokio::test]
async fn test_due_pages_uses_latest_revision_of_each_page() {
    let today = date(2024, 9, 15);
    let (student, service) = HistoryBuilder::new()
        .revision(20, date(2024, 9, 14), 0, 0, 12)
        .revision(20, date(2024, 8, 1), 2, 0, 4)
        .revision(20, date(2024, 8, 20), 0, 0, 20)
        .build();

    let summaries = service.page_summaries(student, today).await.unwrap();
    let page = summaries[&20];

    assert_eq!(page.revision_number, 3);
    assert_eq!(page.current_interval, Some(12));
    assert_eq!(page.max_interval, Some(20));
    assert_eq!(page.revision_date, date(2024, 9, 14));
    assert!(service.due_pages(student, today).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_due_pages_ignores_other_students() {
    let today = date(2024, 9, 15);
    let (student, service) = HistoryBuilder::new()
        .revision(1, date(2024, 9, 1), 0, 0, 1)
        .build();

    assert_eq!(service.due_pages(student, today).await.unwrap().len(), 1);
    assert!(
        service
            .due_pages(Uuid::new_v4(), today)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_store_errors_propagate() {
    let service = ReviewService::new(UnavailableStore);

    let result = service.due_pages(Uuid::new_v4(), date(2024, 9, 15)).await;

    assert!(matches!(result, Err(ReviewError::Store(_))));
}
