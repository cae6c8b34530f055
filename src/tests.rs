use chrono::Utc;
use teloxide_tests::{MockMessagePhoto, MockMessageText};
use tempfile::TempDir;

use crate::config::AppConfig;
use crate::service::health::{MilitaryRank, WeightStatus};
use crate::state::AppState;
use crate::storage::Record;
use crate::utils::test::{setup_test_bot, setup_test_state};
use crate::utils::time::local_now;

fn last_text(bot: &teloxide_tests::MockBot) -> Option<String> {
    bot.get_responses()
        .sent_messages
        .last()
        .and_then(|message| message.text().map(str::to_string))
}

#[tokio::test]
async fn test_start_command() {
    let temp_dir = TempDir::new().unwrap();
    let mut bot = setup_test_bot("/start", setup_test_state(&temp_dir));

    bot.dispatch().await;

    let text = last_text(&bot).expect("No sent messages were detected!");
    assert!(text.contains("/bmi"));
}

#[tokio::test]
async fn test_help_command() {
    let temp_dir = TempDir::new().unwrap();
    let mut bot = setup_test_bot("/help", setup_test_state(&temp_dir));

    bot.dispatch().await;

    assert_eq!(last_text(&bot), Some(t!("commands.help").to_string()));
}

#[tokio::test]
async fn test_bmi_flow_persists_record() {
    let temp_dir = TempDir::new().unwrap();
    let state = setup_test_state(&temp_dir);
    let mut bot = setup_test_bot("/bmi", state.clone());

    bot.dispatch().await;
    assert_eq!(last_text(&bot), Some(t!("messages.bmi.prompt").to_string()));

    bot.update(MockMessageText::new().text("182,52"));
    bot.dispatch().await;

    let text = last_text(&bot).expect("No result was sent");
    assert!(text.contains("15.7"));
    assert!(text.contains(&MilitaryRank::Alternative.label()));

    let now = local_now(state.config.timezone);
    let log = state.logs.read_week(&now).await.unwrap().expect("weekly file written");
    assert_eq!(log.items.len(), 1);

    let record: &Record = &log.items[0];
    assert_eq!(record.height, 182.0);
    assert_eq!(record.weight, 52.0);
    assert_eq!(record.bmi, 15.7);
    assert_eq!(record.weight_status, WeightStatus::Underweight);
    assert_eq!(record.military_rank, MilitaryRank::Alternative);
    assert!(record.created_at <= Utc::now());

    // the dialogue is over, plain text is ignored again
    bot.update(MockMessageText::new().text("170,60"));
    bot.dispatch().await;
    assert!(bot.get_responses().sent_messages.is_empty());
}

#[tokio::test]
async fn test_bmi_invalid_input_keeps_waiting() {
    let temp_dir = TempDir::new().unwrap();
    let state = setup_test_state(&temp_dir);
    let mut bot = setup_test_bot("/bmi", state.clone());

    bot.dispatch().await;

    bot.update(MockMessageText::new().text("tall, heavy"));
    bot.dispatch().await;
    assert_eq!(last_text(&bot), Some(t!("messages.bmi.invalid_format").to_string()));

    bot.update(MockMessageText::new().text("170 65"));
    bot.dispatch().await;
    assert!(last_text(&bot).unwrap().contains("22.5"));

    let now = local_now(state.config.timezone);
    assert_eq!(state.logs.read_week(&now).await.unwrap().unwrap().items.len(), 1);
}

#[tokio::test]
async fn test_stop_keyword_ends_dialogue() {
    let temp_dir = TempDir::new().unwrap();
    let state = setup_test_state(&temp_dir);
    let mut bot = setup_test_bot("/bmi", state.clone());

    bot.dispatch().await;

    bot.update(MockMessageText::new().text("取消"));
    bot.dispatch().await;
    assert_eq!(last_text(&bot), Some(t!("messages.cancelled").to_string()));

    bot.update(MockMessageText::new().text("182,52"));
    bot.dispatch().await;
    assert!(bot.get_responses().sent_messages.is_empty());

    let now = local_now(state.config.timezone);
    assert!(state.logs.read_week(&now).await.unwrap().is_none());
}

#[tokio::test]
async fn test_measure_flow() {
    let temp_dir = TempDir::new().unwrap();
    let state = setup_test_state(&temp_dir);
    let mut bot = setup_test_bot("/measure", state.clone());

    bot.dispatch().await;
    assert_eq!(last_text(&bot), Some(t!("messages.measure.ask_height").to_string()));

    bot.update(MockMessageText::new().text("-3"));
    bot.dispatch().await;
    assert_eq!(last_text(&bot), Some(t!("messages.measure.invalid_height").to_string()));

    bot.update(MockMessageText::new().text("175"));
    bot.dispatch().await;
    assert_eq!(last_text(&bot), Some(t!("messages.measure.ask_weight").to_string()));

    bot.update(MockMessageText::new().text("abc"));
    bot.dispatch().await;
    assert_eq!(last_text(&bot), Some(t!("messages.measure.invalid_weight").to_string()));

    bot.update(MockMessageText::new().text("70"));
    bot.dispatch().await;
    assert!(last_text(&bot).unwrap().contains("22.9"));

    let now = local_now(state.config.timezone);
    let log = state.logs.read_week(&now).await.unwrap().unwrap();
    assert_eq!(log.items[0].weight_status, WeightStatus::Normal);
    assert_eq!(log.items[0].military_rank, MilitaryRank::Active);
}

#[tokio::test]
async fn test_cancel_command_mid_measurement() {
    let temp_dir = TempDir::new().unwrap();
    let mut bot = setup_test_bot("/measure", setup_test_state(&temp_dir));

    bot.dispatch().await;

    bot.update(MockMessageText::new().text("/cancel"));
    bot.dispatch().await;
    assert_eq!(last_text(&bot), Some(t!("messages.cancelled").to_string()));

    bot.update(MockMessageText::new().text("175"));
    bot.dispatch().await;
    assert!(bot.get_responses().sent_messages.is_empty());
}

#[tokio::test]
async fn test_idle_text_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let mut bot = setup_test_bot("hello", setup_test_state(&temp_dir));

    bot.dispatch().await;

    assert!(bot.get_responses().sent_messages.is_empty());
}

#[tokio::test]
async fn test_today_command_counts_chat_records() {
    let temp_dir = TempDir::new().unwrap();
    let state = setup_test_state(&temp_dir);
    let mut bot = setup_test_bot("/today", state.clone());

    bot.dispatch().await;
    assert_eq!(last_text(&bot), Some(t!("commands.today", count = 0).to_string()));

    bot.update(MockMessageText::new().text("/bmi"));
    bot.dispatch().await;
    bot.update(MockMessageText::new().text("182,52"));
    bot.dispatch().await;

    bot.update(MockMessageText::new().text("/today"));
    bot.dispatch().await;
    assert_eq!(last_text(&bot), Some(t!("commands.today", count = 1).to_string()));
}

#[tokio::test]
async fn test_countdown_command() {
    let temp_dir = TempDir::new().unwrap();
    let state = setup_test_state(&temp_dir);
    let mut bot = setup_test_bot("/countdown", state);

    bot.dispatch().await;

    let text = last_text(&bot).expect("No sent messages were detected!");
    assert!(text.contains("12/25"));
}

#[tokio::test]
async fn test_non_text_message_keeps_waiting() {
    let temp_dir = TempDir::new().unwrap();
    let mut bot = setup_test_bot("/bmi", setup_test_state(&temp_dir));

    bot.dispatch().await;

    bot.update(MockMessagePhoto::new());
    bot.dispatch().await;
    assert_eq!(last_text(&bot), Some(t!("messages.text_required").to_string()));

    bot.update(MockMessageText::new().text("182,52"));
    bot.dispatch().await;
    assert!(last_text(&bot).unwrap().contains("15.7"));
}

#[tokio::test]
async fn test_overflowing_input_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let state = setup_test_state(&temp_dir);
    let mut bot = setup_test_bot("/bmi", state.clone());

    bot.dispatch().await;

    bot.update(MockMessageText::new().text(format!("170,{}", "9".repeat(400))));
    bot.dispatch().await;
    assert_eq!(last_text(&bot), Some(t!("messages.bmi.invalid_format").to_string()));

    let now = local_now(state.config.timezone);
    assert!(state.logs.read_week(&now).await.unwrap().is_none());

    // still waiting, and the week file works afterwards
    bot.update(MockMessageText::new().text("182,52"));
    bot.dispatch().await;
    assert!(last_text(&bot).unwrap().contains("15.7"));
    assert_eq!(state.logs.read_week(&now).await.unwrap().unwrap().items.len(), 1);
}

#[tokio::test]
async fn test_storage_failure_notifies_and_ends_dialogue() {
    let temp_dir = TempDir::new().unwrap();
    // a regular file where the log directory should be
    let blocked = temp_dir.path().join("logs");
    std::fs::write(&blocked, b"not a directory").unwrap();

    let state = AppState::new(AppConfig::new_test_config(blocked));
    let mut bot = setup_test_bot("/bmi", state);

    bot.dispatch().await;

    bot.update(MockMessageText::new().text("182,52"));
    bot.dispatch().await;

    let texts: Vec<String> = bot
        .get_responses()
        .sent_messages
        .iter()
        .filter_map(|message| message.text().map(str::to_string))
        .collect();
    assert_eq!(texts.len(), 2);
    assert!(texts[0].contains("15.7"));
    assert_eq!(texts[1], t!("messages.storage_error").to_string());

    bot.update(MockMessageText::new().text("170,60"));
    bot.dispatch().await;
    assert!(bot.get_responses().sent_messages.is_empty());
}
