use chrono::NaiveDate;
use mlb_api::client::{ApiError, MlbApi};
use mlb_api::{GameBroadcastInfo, StatcastStatus};
use mockito::{Matcher, Server};
use std::io::Write;
use std::time::Duration;

fn api_for(server: &Server) -> MlbApi {
    MlbApi::new().with_base_urls(&server.url(), &server.url())
}

#[tokio::test]
async fn schedule_requests_the_selected_date() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/schedule")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sportId".into(), "1".into()),
            Matcher::UrlEncoded("date".into(), "2025-03-01".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"dates":[{"games":[
                {"gamePk":778001,"broadcasts":[{"type":"TV","name":"MLB.TV"}]},
                {"gamePk":778002,"broadcasts":[]}
            ]}]}"#,
        )
        .create_async()
        .await;

    let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let rows = api_for(&server).fetch_broadcasts(date).await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        rows,
        vec![
            GameBroadcastInfo { game_id: 778001, on_tv: true },
            GameBroadcastInfo { game_id: 778002, on_tv: false },
        ]
    );
}

#[tokio::test]
async fn missing_boxscore_is_none_not_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/game/42/boxscore")
        .with_status(404)
        .create_async()
        .await;

    let boxscore = api_for(&server).fetch_boxscore(42).await.unwrap();
    assert!(boxscore.is_none());
}

#[tokio::test]
async fn server_error_surfaces_as_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/game/42/boxscore")
        .with_status(503)
        .create_async()
        .await;

    let err = api_for(&server).fetch_boxscore(42).await.unwrap_err();
    assert!(matches!(err, ApiError::Api(..)), "got {err}");
}

#[tokio::test]
async fn garbage_body_surfaces_as_parse_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/gf")
        .match_query(Matcher::UrlEncoded("game_pk".into(), "7".into()))
        .with_header("content-type", "application/json")
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = api_for(&server).fetch_statcast_status(7).await.unwrap_err();
    assert!(matches!(err, ApiError::Parsing(..)), "got {err}");
}

#[tokio::test]
async fn savant_feed_reports_tracking() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/gf")
        .match_query(Matcher::UrlEncoded("game_pk".into(), "7".into()))
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"game_status_code":"F","scoreboard":{"stats":{"pitchVelocity":{"topPitches":[{"pitcher_name":"Cole","start_speed":99.2}]}}}}"#,
        )
        .create_async()
        .await;

    let status = api_for(&server).fetch_statcast_status(7).await.unwrap();
    assert_eq!(status, StatcastStatus::StatcastGames);
}

#[tokio::test]
async fn player_name_resolves_first_and_last() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/people/543037")
        .with_header("content-type", "application/json")
        .with_body(r#"{"people":[{"id":543037,"firstName":"Gerrit","useName":"Gerrit","lastName":"Cole"}]}"#)
        .create_async()
        .await;

    let name = api_for(&server).fetch_player_name(543037).await.unwrap();
    assert_eq!(name, "Gerrit Cole");
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let api = MlbApi::new().with_base_urls("http://127.0.0.1:9", "http://127.0.0.1:9");
    let err = api.fetch_player_name(1).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(..)), "got {err}");
}

#[tokio::test]
async fn silent_server_times_out_as_network_error() {
    // Accepted by the backlog but never answered.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let api = MlbApi::new()
        .with_base_urls(&base, &base)
        .with_timeout(Duration::from_millis(300));
    let err = api.fetch_statcast_status(7).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(..)), "got {err}");
    drop(listener);
}

#[tokio::test]
async fn stalled_body_times_out_as_network_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/gf")
        .match_query(Matcher::UrlEncoded("game_pk".into(), "7".into()))
        .with_header("content-type", "application/json")
        .with_chunked_body(|w| {
            w.write_all(br#"{"game_status_code":"#)?;
            std::thread::sleep(Duration::from_millis(1500));
            w.write_all(br#""F"}"#)
        })
        .create_async()
        .await;

    let api = api_for(&server).with_timeout(Duration::from_millis(300));
    let err = api.fetch_statcast_status(7).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(..)), "got {err}");
}
