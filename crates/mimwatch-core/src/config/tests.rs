use super::*;
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.source.url, "https://www.mim.gov.it/web/usr-lombardia");
    assert_eq!(cfg.source.request_timeout_secs, 20);
    assert_eq!(cfg.schedule.news_interval_secs, 1800);
    assert_eq!(cfg.schedule.poll_interval_secs, 5);
    assert_eq!(cfg.schedule.long_poll_timeout_secs, 10);
    assert_eq!(cfg.telegram.api_base, "https://api.telegram.org");
    assert!(cfg.api.enabled);
    assert_eq!(cfg.api.port, 8000);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let toml_str = r#"
        [schedule]
        news_interval_secs = 600

        [telegram]
        bot_token = "123:abc"
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.schedule.news_interval_secs, 600);
    assert_eq!(cfg.schedule.poll_interval_secs, 5);
    assert_eq!(cfg.telegram.bot_token, "123:abc");
    assert_eq!(cfg.telegram.api_base, "https://api.telegram.org");
    assert_eq!(cfg.watch.name, "MiM Watcher");
}

#[test]
fn test_env_overrides() {
    let mut cfg = Config::default();
    let rejected = cfg.apply_env_overrides(env(&[
        ("TELEGRAM_BOT_TOKEN", " 999:xyz "),
        ("NEWS_INTERVAL", "900"),
        ("PORT", "9090"),
        ("LOG_LEVEL", "DEBUG"),
        ("MIM_URL", "https://example.org/news"),
    ]));
    assert_eq!(cfg.telegram.bot_token, "999:xyz");
    assert_eq!(cfg.schedule.news_interval_secs, 900);
    assert_eq!(cfg.api.port, 9090);
    assert_eq!(cfg.watch.log_level, "debug");
    assert_eq!(cfg.source.url, "https://example.org/news");
    assert!(rejected.is_empty());
}

#[test]
fn test_invalid_env_overrides_are_ignored() {
    let mut cfg = Config::default();
    let rejected = cfg.apply_env_overrides(env(&[
        ("NEWS_INTERVAL", "soon"),
        ("PORT", "70000"),
        ("TELEGRAM_BOT_TOKEN", "   "),
    ]));
    assert_eq!(cfg.schedule.news_interval_secs, 1800);
    assert_eq!(cfg.api.port, 8000);
    assert!(cfg.telegram.bot_token.is_empty());
    // A blank token is simply absent; only unparsable values are reported.
    assert_eq!(rejected.len(), 2);
    assert!(rejected[0].contains("NEWS_INTERVAL"));
    assert!(rejected[1].contains("PORT"));
}

#[test]
fn test_zero_news_interval_env_is_ignored() {
    let mut cfg = Config::default();
    let rejected = cfg.apply_env_overrides(env(&[("NEWS_INTERVAL", "0")]));
    assert_eq!(cfg.schedule.news_interval_secs, 1800);
    assert_eq!(rejected, vec![r#"ignoring invalid NEWS_INTERVAL="0""#.to_string()]);
}

#[test]
fn test_validate_requires_token() {
    let cfg = Config::default();
    let err = cfg.validate().unwrap_err();
    assert!(matches!(err, WatchError::Config(_)));
    assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"));

    let mut cfg = Config::default();
    cfg.telegram.bot_token = "1:a".to_string();
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_intervals() {
    let mut cfg = Config::default();
    cfg.telegram.bot_token = "1:a".to_string();
    cfg.schedule.poll_interval_secs = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let cfg = load("/nonexistent/__mimwatch_config__.toml").unwrap();
    assert_eq!(cfg.schedule.news_interval_secs, 1800);
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[source]\nurl = \"https://example.org\"\n[api]\nenabled = false\n",
    )
    .unwrap();
    let cfg = load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.source.url, "https://example.org");
    assert!(!cfg.api.enabled);
}

#[test]
fn test_load_invalid_toml_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[schedule\nnews_interval_secs = ").unwrap();
    let err = load(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, WatchError::Config(_)));
}

#[test]
fn test_shellexpand_home() {
    if let Some(home) = std::env::var_os("HOME") {
        let expanded = shellexpand("~/.mimwatch/data");
        assert_eq!(
            expanded,
            format!("{}/.mimwatch/data", home.to_string_lossy())
        );
    }
    assert_eq!(shellexpand("/abs/path"), "/abs/path");
}
