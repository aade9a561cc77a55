use super::*;
use chrono::{Duration, TimeZone};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap()
}

fn ctx<'a>(state: &'a AppState, schedule: &'a ScheduleConfig, chat_id: i64) -> CommandContext<'a> {
    CommandContext {
        state,
        schedule,
        chat_id,
        now: t0(),
        last_check: None,
    }
}

#[test]
fn test_parse_all_commands() {
    assert_eq!(Command::parse("/start"), Command::Start);
    assert_eq!(Command::parse("/stop"), Command::Stop);
    assert_eq!(Command::parse("/help"), Command::Help);
    assert_eq!(Command::parse("/last"), Command::Last);
    assert_eq!(Command::parse("/next"), Command::Next);
    assert_eq!(Command::parse("/force"), Command::Force);
    assert_eq!(Command::parse("/stats"), Command::Stats);
}

#[test]
fn test_parse_normalizes_case_whitespace_and_botname() {
    assert_eq!(Command::parse("  /START  "), Command::Start);
    assert_eq!(Command::parse("/Help@MimWatchBot"), Command::Help);
    assert_eq!(Command::parse("/force now please"), Command::Force);
}

#[test]
fn test_parse_unknown_keeps_text() {
    assert_eq!(
        Command::parse(" ciao bot "),
        Command::Unknown("ciao bot".to_string())
    );
    assert_eq!(
        Command::parse("/subscribe@bot"),
        Command::Unknown("/subscribe@bot".to_string())
    );
    assert_eq!(Command::parse(""), Command::Unknown(String::new()));
    assert_eq!(Command::parse("   "), Command::Unknown(String::new()));
}

#[test]
fn test_start_twice_subscribes_once() {
    let state = AppState::new(t0());
    let schedule = ScheduleConfig::default();

    let first = handle_start(&ctx(&state, &schedule, 42));
    assert!(first.changed);
    assert!(first.text.contains("Benvenuto"));
    assert!(first.text.contains("<b>Iscritti totali:</b> 1"));

    let second = handle_start(&ctx(&state, &schedule, 42));
    assert!(!second.changed);
    assert!(second.text.contains("Sei già iscritto"));
    assert_eq!(state.registry.list(), vec![42]);
}

#[test]
fn test_stop_twice_reports_not_subscribed() {
    let state = AppState::new(t0());
    let schedule = ScheduleConfig::default();
    state.registry.add(42);
    state.registry.add(7);

    let first = handle_stop(&ctx(&state, &schedule, 42));
    assert!(first.changed);
    assert!(first.text.contains("Iscritti rimasti: 1"));

    let second = handle_stop(&ctx(&state, &schedule, 42));
    assert!(!second.changed);
    assert_eq!(second.text, crate::texts::NOT_SUBSCRIBED);
    assert_eq!(state.registry.list(), vec![7]);
}

#[test]
fn test_next_imminent_before_first_check() {
    let state = AppState::new(t0());
    let schedule = ScheduleConfig::default();
    let reply = handle_next(&ctx(&state, &schedule, 1));
    assert_eq!(reply, crate::texts::NEXT_IMMINENT);
}

#[test]
fn test_next_counts_down_from_last_check() {
    let state = AppState::new(t0());
    let schedule = ScheduleConfig::default();
    let mut c = ctx(&state, &schedule, 1);
    c.last_check = Some(t0() - Duration::seconds(1800 - 125));
    let reply = handle_next(&c);
    assert!(reply.contains("Prossimo controllo tra: 2m 5s"), "{reply}");

    c.last_check = Some(t0() - Duration::seconds(1801));
    assert_eq!(handle_next(&c), crate::texts::NEXT_IMMINENT);
}

#[test]
fn test_stats_reads_counters() {
    let state = AppState::new(t0() - Duration::seconds(90));
    let schedule = ScheduleConfig::default();
    state.registry.add(1);
    state.registry.add(2);
    state.seen.mark_seen("/news/a");
    state.record_command();
    state.record_broadcast(2, t0());

    let reply = handle_stats(&ctx(&state, &schedule, 1));
    assert!(reply.contains("<b>Uptime:</b> 1m 30s"));
    assert!(reply.contains("<b>Utenti iscritti:</b> 2"));
    assert!(reply.contains("<b>News inviate:</b> 2"));
    assert!(reply.contains("<b>Comandi processati:</b> 1"));
    assert!(reply.contains("<b>Notizie memorizzate:</b> 1"));
    assert!(!reply.contains(crate::texts::NO_NEWS_YET));
}

#[test]
fn test_help_mentions_every_command() {
    let state = AppState::new(t0());
    let schedule = ScheduleConfig::default();
    let reply = handle_help(&ctx(&state, &schedule, 1));
    for cmd in ["/start", "/stop", "/last", "/next", "/force", "/stats", "/help"] {
        assert!(reply.contains(cmd), "missing {cmd}");
    }
}
