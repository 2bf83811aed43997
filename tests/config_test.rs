//! Loading game configs from disk and playing what they describe.

use std::io::Write;
use strictly_turns::{CancelToken, GameConfig, TextFrameView, run_schedule};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
}

#[test]
fn test_malformed_file_is_a_config_error() {
    let file = write_config("rows = \"three\"");
    let err = GameConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
}

#[tokio::test]
async fn test_three_player_board_from_file() {
    let file = write_config(
        r#"
        rows = 4
        columns = 4
        k = 3
        players = ["random", "random", "random"]
        player_names = ["Ann", "Bo", "Cy"]
        pacing_ms = 0
        delay_between_games_ms = 0
        games = 4
        "#,
    );
    let config = GameConfig::from_file(file.path()).unwrap();
    let (mut engine, inputs) = config.build_engine().unwrap();
    assert!(inputs.iter().all(Option::is_none));
    assert_eq!(engine.game().player_names(), ["Ann", "Bo", "Cy"]);

    let view = TextFrameView::new(Some("Board 1".to_string()));
    engine.game_mut().subscribe(view.clone());

    let report = run_schedule(&mut engine, &config.schedule(), &CancelToken::new())
        .await
        .unwrap();
    assert_eq!(report.games, 4);
    assert_eq!(report.wins.len(), 3);
    let wins: u32 = report.wins.iter().sum();
    assert_eq!(wins + report.draws, 4);

    let frame = view.latest();
    assert!(frame.over);
    assert!(frame.text.starts_with("Board 1\n   1 2 3 4\n"));
}
