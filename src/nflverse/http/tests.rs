//! Unit tests for the nflverse release client

use super::*;
use crate::cli::types::levels::SummaryLevel;
use crate::nflverse::frame::Cell;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn client_for(server: &MockServer) -> NflverseClient {
    NflverseClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

#[cfg(test)]
mod asset_path_tests {
    use super::*;

    #[test]
    fn test_per_season_assets() {
        let agg = Aggregation::default();
        let season = Season::new(2024);
        assert_eq!(
            asset_path(DatasetKind::TeamStats, season, agg),
            "stats_team/stats_team_reg_2024.csv"
        );
        assert_eq!(
            asset_path(DatasetKind::Rosters, season, agg),
            "rosters/roster_2024.csv"
        );
        assert_eq!(
            asset_path(DatasetKind::Injuries, season, agg),
            "injuries/injuries_2024.csv"
        );
        assert_eq!(
            asset_path(DatasetKind::PfrPass, season, agg),
            "pfr_advstats/advstats_week_pass_2024.csv"
        );
    }

    #[test]
    fn test_aggregation_changes_assets() {
        let agg = Aggregation::new(SummaryLevel::RegPost, AdvStatsSummary::Season);
        let season = Season::new(2023);
        assert_eq!(
            asset_path(DatasetKind::TeamStats, season, agg),
            "stats_team/stats_team_regpost_2023.csv"
        );
        assert_eq!(
            asset_path(DatasetKind::PfrDef, season, agg),
            "pfr_advstats/advstats_season_def.csv"
        );
        assert_eq!(
            asset_path(DatasetKind::Schedules, season, agg),
            "schedules/games.csv"
        );
    }

    #[test]
    fn test_covers_all_seasons() {
        let week = Aggregation::default();
        let season = Aggregation::new(SummaryLevel::Reg, AdvStatsSummary::Season);
        assert!(covers_all_seasons(DatasetKind::Schedules, week));
        assert!(!covers_all_seasons(DatasetKind::PfrRec, week));
        assert!(covers_all_seasons(DatasetKind::PfrRec, season));
        assert!(!covers_all_seasons(DatasetKind::Injuries, season));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = NflverseClient::with_client(Client::new(), "http://localhost:9000/download/");
        assert_eq!(client.base_url(), "http://localhost:9000/download");
        assert_eq!(
            client.asset_url(DatasetKind::Injuries, Season::new(2024), Aggregation::default()),
            "http://localhost:9000/download/injuries/injuries_2024.csv"
        );
    }
}

#[cfg(test)]
mod fetch_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_per_season_asset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/injuries/injuries_2024.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "season,team,week,full_name\n2024,KC,1,Patrick Mahomes\n2024,BAL,1,Lamar Jackson\n",
            ))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .fetch(DatasetKind::Injuries, Season::new(2024), Aggregation::default())
            .await
            .unwrap();

        match outcome {
            FetchOutcome::Rows(frame) => {
                assert_eq!(frame.len(), 2);
                assert_eq!(frame.rows()[0][1], Cell::Text("KC".to_string()));
            }
            other => panic!("Expected rows, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_not_available() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .fetch(DatasetKind::Injuries, Season::new(2025), Aggregation::default())
            .await
            .unwrap();

        match outcome {
            FetchOutcome::NotAvailable { reason } => {
                assert!(reason.contains("injuries_2025.csv"));
            }
            other => panic!("Expected NotAvailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .fetch(DatasetKind::Rosters, Season::new(2024), Aggregation::default())
            .await;

        match result {
            Err(ExportError::Status { status, url }) => {
                assert_eq!(status, 502);
                assert!(url.ends_with("/rosters/roster_2024.csv"));
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_schedules_filters_season() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schedules/games.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "game_id,season,week,home_team\n\
                 2023_01_DET_KC,2023,1,KC\n\
                 2024_01_BAL_KC,2024,1,KC\n\
                 2024_01_GB_PHI,2024,1,PHI\n",
            ))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .fetch(DatasetKind::Schedules, Season::new(2024), Aggregation::default())
            .await
            .unwrap();

        match outcome {
            FetchOutcome::Rows(frame) => {
                assert_eq!(frame.len(), 2);
                assert!(frame.rows().iter().all(|r| r[1] == Cell::Integer(2024)));
            }
            other => panic!("Expected rows, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_season_without_rows_is_not_available() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schedules/games.csv"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("game_id,season,week\n2024_01_BAL_KC,2024,1\n"),
            )
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .fetch(DatasetKind::Schedules, Season::new(2025), Aggregation::default())
            .await
            .unwrap();

        assert!(matches!(outcome, FetchOutcome::NotAvailable { .. }));
    }

    #[tokio::test]
    async fn test_fetch_empty_body_is_not_available() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .fetch(DatasetKind::PfrPass, Season::new(2024), Aggregation::default())
            .await
            .unwrap();

        match outcome {
            FetchOutcome::NotAvailable { reason } => assert_eq!(reason, "payload is empty"),
            other => panic!("Expected NotAvailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_error() {
        let client = NflverseClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let result = client
            .fetch(DatasetKind::Injuries, Season::new(2024), Aggregation::default())
            .await;

        assert!(matches!(result, Err(ExportError::Http(_))));
    }
}
