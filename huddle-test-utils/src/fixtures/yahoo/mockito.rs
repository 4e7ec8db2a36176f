//! Mock endpoints for the Yahoo API, token endpoint and RSS feeds.
//!
//! Every endpoint expects to be hit exactly `expected_requests` times, checked by
//! `TestContext::assert_mocks` or the returned [`Mock`].

use mockito::{Matcher, Mock};

use crate::{
    constant::{TEST_API_PATH, TEST_REFRESHED_ACCESS_TOKEN, TEST_TOKEN_PATH},
    fixtures::yahoo::{
        data::{roster_payload, token_response, transactions_payload, MockPlayer, MockTransaction},
        YahooFixtures,
    },
};

impl<'a> YahooFixtures<'a> {
    /// Token endpoint returning [`TEST_REFRESHED_ACCESS_TOKEN`] with a rotated refresh token.
    pub fn create_token_endpoint(&mut self, expected_requests: usize) -> Mock {
        let body = token_response(TEST_REFRESHED_ACCESS_TOKEN, Some("rotated_refresh_token"), 3600);

        self.setup
            .server
            .mock("POST", TEST_TOKEN_PATH)
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::UrlEncoded(
                "grant_type".into(),
                "refresh_token".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Token endpoint rejecting the refresh with `status`.
    pub fn create_token_error_endpoint(&mut self, status: usize, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("POST", TEST_TOKEN_PATH)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"invalid_grant"}"#)
            .expect(expected_requests)
            .create()
    }

    /// Completed trades of a league.
    pub fn create_transactions_endpoint(
        &mut self,
        league_key: &str,
        transactions: &[MockTransaction],
        expected_requests: usize,
    ) -> Mock {
        let body = transactions_payload(league_key, transactions);

        self.api_endpoint(
            format!("league/{}/transactions;types=trade", league_key),
            200,
            body.to_string(),
            expected_requests,
        )
    }

    /// Pending trades of a team.
    pub fn create_pending_trades_endpoint(
        &mut self,
        league_key: &str,
        team_key: &str,
        transactions: &[MockTransaction],
        expected_requests: usize,
    ) -> Mock {
        let body = transactions_payload(league_key, transactions);

        self.api_endpoint(
            format!(
                "league/{}/transactions;type=pending_trade;team_key={}",
                league_key, team_key
            ),
            200,
            body.to_string(),
            expected_requests,
        )
    }

    pub fn create_roster_endpoint(
        &mut self,
        team_key: &str,
        players: &[MockPlayer],
        expected_requests: usize,
    ) -> Mock {
        let body = roster_payload(team_key, players);

        self.api_endpoint(
            format!("team/{}/roster", team_key),
            200,
            body.to_string(),
            expected_requests,
        )
    }

    /// Any API resource answering with `status` and an empty JSON object.
    pub fn create_api_status_endpoint(
        &mut self,
        resource: &str,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        self.api_endpoint(resource.to_string(), status, "{}".to_string(), expected_requests)
    }

    fn api_endpoint(
        &mut self,
        resource: String,
        status: usize,
        body: String,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", format!("{}/{}", TEST_API_PATH, resource).as_str())
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(expected_requests)
            .create()
    }

    /// RSS feed served at `path`.
    pub fn create_feed_endpoint(&mut self, path: &str, body: String, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("GET", path)
            .with_status(200)
            .with_header("content-type", "application/rss+xml")
            .with_body(body)
            .expect(expected_requests)
            .create()
    }
}
