//! Subscription commands: /start, /stop.

use super::CommandContext;
use crate::texts;

/// Outcome of a subscription command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionReply {
    pub text: String,
    /// Whether the registry changed and must be persisted.
    pub changed: bool,
}

pub fn handle_start(ctx: &CommandContext<'_>) -> SubscriptionReply {
    let registry = &ctx.state.registry;
    let changed = registry.add(ctx.chat_id);
    let text = if changed {
        texts::welcome(registry.len(), ctx.schedule.news_interval_secs)
    } else {
        texts::already_subscribed(registry.len(), ctx.schedule.news_interval_secs)
    };
    SubscriptionReply { text, changed }
}

pub fn handle_stop(ctx: &CommandContext<'_>) -> SubscriptionReply {
    let registry = &ctx.state.registry;
    let changed = registry.remove(ctx.chat_id);
    let text = if changed {
        texts::unsubscribed(registry.len())
    } else {
        texts::NOT_SUBSCRIBED.to_string()
    };
    SubscriptionReply { text, changed }
}
