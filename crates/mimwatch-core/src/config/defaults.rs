pub(super) fn default_name() -> String {
    "MiM Watcher".to_string()
}

pub(super) fn default_data_dir() -> String {
    "~/.mimwatch".to_string()
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_source_url() -> String {
    "https://www.mim.gov.it/web/usr-lombardia".to_string()
}

pub(super) fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; MiMWatcher/1.0)".to_string()
}

pub(super) fn default_request_timeout() -> u64 {
    20
}

pub(super) fn default_news_interval() -> u64 {
    1800
}

pub(super) fn default_poll_interval() -> u64 {
    5
}

pub(super) fn default_long_poll_timeout() -> u64 {
    10
}

pub(super) fn default_error_backoff() -> u64 {
    5
}

pub(super) fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

pub(super) fn default_db_path() -> String {
    "~/.mimwatch/data/mimwatch.db".to_string()
}

pub(super) fn default_true() -> bool {
    true
}

pub(super) fn default_api_host() -> String {
    "0.0.0.0".to_string()
}

pub(super) fn default_api_port() -> u16 {
    8000
}
