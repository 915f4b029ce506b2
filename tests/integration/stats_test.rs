//! Integration tests for dashboard statistics.

mod helpers;

use chrono::{Duration, Utc};
use civic_core::ErrorKind;
use civic_core::types::{ReportId, UserId};
use civic_entity::notification::NotificationKind;
use civic_entity::report::{Location, Report, ReportCategory, ReportStatus};

use helpers::TestApp;

fn resolved_after(id: &str, days: i64) -> Report {
    let created_at = Utc::now() - Duration::days(30);
    Report {
        id: ReportId::new(id),
        title: format!("Report {id}"),
        description: "Resolved in a fixed number of days".to_string(),
        category: ReportCategory::Garbage,
        subcategory: None,
        area: None,
        status: ReportStatus::Resolved,
        image_url: None,
        location: Location::unknown(None),
        user_id: UserId::new("someone"),
        created_at,
        updated_at: created_at + Duration::days(days),
        urgent: false,
    }
}

#[tokio::test]
async fn test_empty_store_has_zero_stats() {
    let app = TestApp::new().await;
    let stats = app.api.stats.get().await.unwrap();
    assert_eq!(stats.total_reports, 0);
    assert_eq!(stats.resolved, 0);
    assert_eq!(stats.processing, 0);
    assert_eq!(stats.avg_response_time, 0.0);
}

#[tokio::test]
async fn test_average_response_time_over_resolved_reports() {
    let app = TestApp::new().await;
    let repo = &app.api.state().report_repo;
    assert!(repo.insert(&resolved_after("a", 2)).await.unwrap());
    assert!(repo.insert(&resolved_after("b", 4)).await.unwrap());

    let stats = app.api.stats.get().await.unwrap();
    assert_eq!(stats.total_reports, 2);
    assert_eq!(stats.resolved, 2);
    assert_eq!(stats.avg_response_time, 3.0);
    assert_eq!(stats.by_category.garbage, 2);
}

#[tokio::test]
async fn test_resolving_a_pothole() {
    let app = TestApp::new().await;
    let citizen = app.sign_up("alice").await;
    let report = app.submit("Pothole on Main Street", ReportCategory::Roads).await;

    app.sign_up_admin("officer").await;
    app.api
        .reports
        .update_status(report.id.as_str(), ReportStatus::Resolved)
        .await
        .unwrap();

    let stats = app.api.stats.get().await.unwrap();
    assert_eq!(stats.total_reports, 1);
    assert_eq!(stats.resolved, 1);
    assert_eq!(stats.by_category.roads, 1);

    let mine = app
        .api
        .stats
        .get_for_user(citizen.user.id.as_str())
        .await
        .unwrap();
    assert_eq!(mine.resolved, 1);

    app.sign_in("alice").await;
    let inbox = app.api.notifications.get_all().await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::ReportResolved);
    assert_eq!(inbox[0].report_id.as_ref(), Some(&report.id));
}

#[tokio::test]
async fn test_trends_cover_six_months_ending_now() {
    let app = TestApp::new().await;
    app.sign_up("alice").await;
    app.submit("Overflowing bin", ReportCategory::Garbage).await;

    let monthly = app.api.stats.monthly_trends().await.unwrap();
    assert_eq!(monthly.len(), 6);
    let current = monthly.last().unwrap();
    assert_eq!(current.month, Utc::now().format("%b %Y").to_string());
    assert_eq!(current.reported, 1);

    let by_category = app.api.stats.category_trends().await.unwrap();
    assert_eq!(by_category.len(), 6);
    assert_eq!(by_category.last().unwrap().counts.garbage, 1);

    let breakdown = app.api.stats.status_by_category().await.unwrap();
    assert_eq!(breakdown.garbage.reported, 1);
    assert_eq!(breakdown.roads.reported, 0);
}

#[tokio::test]
async fn test_profile_earns_badges() {
    let app = TestApp::new().await;

    let err = app.api.stats.profile().await.unwrap_err();
    assert!(err.is(ErrorKind::NotAuthenticated));

    app.sign_up("alice").await;
    for n in 0..5 {
        app.submit(&format!("Streetlight {n}"), ReportCategory::Safety).await;
    }

    let profile = app.api.stats.profile().await.unwrap();
    assert_eq!(profile.total, 5);
    assert_eq!(profile.active, 5);
    assert_eq!(profile.by_category.safety, 5);
    assert!(profile.badges.contains(&"Active Citizen".to_string()));
    assert!(!profile.badges.contains(&"Problem Solver".to_string()));
}
