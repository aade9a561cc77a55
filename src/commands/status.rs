//! Read-only command handlers: /help, /next, /stats.

use super::CommandContext;
use crate::texts;
use chrono::{DateTime, Local, NaiveDateTime, Utc};

fn local(t: DateTime<Utc>) -> NaiveDateTime {
    t.with_timezone(&Local).naive_local()
}

pub fn handle_help(ctx: &CommandContext<'_>) -> String {
    texts::help(ctx.state.registry.len(), ctx.schedule.news_interval_secs)
}

/// Time left until the next scheduled check.
///
/// Imminent when no check has run yet or the interval has already elapsed.
pub fn handle_next(ctx: &CommandContext<'_>) -> String {
    let Some(last) = ctx.last_check else {
        return texts::NEXT_IMMINENT.to_string();
    };
    let elapsed = (ctx.now - last).num_seconds().max(0);
    let remaining = ctx.schedule.news_interval_secs as i64 - elapsed;
    if remaining <= 0 {
        return texts::NEXT_IMMINENT.to_string();
    }
    texts::next_check(remaining, local(last), ctx.schedule.news_interval_secs)
}

pub fn handle_stats(ctx: &CommandContext<'_>) -> String {
    let stats = ctx.state.stats();
    texts::stats_report(&texts::StatsReport {
        started: local(stats.start_time),
        uptime_secs: stats.uptime_secs(ctx.now),
        subscribers: ctx.state.registry.len(),
        news_sent: stats.total_news_sent,
        commands_processed: stats.total_commands_processed,
        last_news: stats.last_news_time.map(local),
        seen: ctx.state.seen.len(),
        interval_secs: ctx.schedule.news_interval_secs,
    })
}
