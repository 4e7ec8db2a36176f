//! Tests for the news ingestion cron endpoint.

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request, StatusCode},
};
use huddle::{model::news::IngestionSummary, server::router};
use huddle_test_utils::fixtures::yahoo::data::rss_feed;
use serde_json::Value;
use tower::ServiceExt;

use super::*;
use crate::util::TEST_FEED_PATH;

fn cron_request(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/api/cron/news");
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }

    builder.body(Body::empty()).unwrap()
}

/// Expect 401 without a bearer token and no feed to be fetched
#[tokio::test]
async fn rejects_missing_secret() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_core_tables().build().await?;
    let feed = test
        .yahoo()
        .create_feed_endpoint(TEST_FEED_PATH, rss_feed("NBA", &[]), 0);

    let app = router::routes().with_state(test.to_app_state());
    let response = app.oneshot(cron_request(None)).await.unwrap();

    feed.assert();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 401 when the bearer token does not match the configured secret
#[tokio::test]
async fn rejects_wrong_secret() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;

    let app = router::routes().with_state(test.to_app_state());
    let response = app
        .oneshot(cron_request(Some("Bearer not_the_secret")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect matched news to be stored and summarized in the response
#[tokio::test]
async fn ingests_news_with_secret() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_core_tables().build().await?;
    let league = test.fantasy().insert_nba_league("466.l.1").await?;
    let team = test
        .fantasy()
        .insert_team(league.id, None, "466.l.1.t.1")
        .await?;
    test.fantasy()
        .insert_rostered_player(team.id, "466.p.1", "Luka Doncic")
        .await?;
    test.fantasy()
        .insert_rostered_player(team.id, "466.p.2", "Kyrie Irving")
        .await?;
    let feed = test.yahoo().create_feed_endpoint(
        TEST_FEED_PATH,
        rss_feed(
            "NBA",
            &[
                ("Luka Doncic posts triple-double", "Dallas rolls on the road."),
                ("Trade deadline roundup", "Quiet day around the league."),
            ],
        ),
        1,
    );

    let app = router::routes().with_state(test.to_app_state());
    let response = app
        .oneshot(cron_request(Some(&format!("Bearer {}", TEST_CRON_SECRET))))
        .await
        .unwrap();

    feed.assert();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response).await;
    assert_eq!(body["success"], Value::Bool(true));
    let summary: IngestionSummary = serde_json::from_value(body["result"].clone()).unwrap();
    assert_eq!(summary.feeds, 1);
    assert_eq!(summary.items, 2);
    assert_eq!(summary.inserted, 1);

    Ok(())
}
