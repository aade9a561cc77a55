//! Format helpers for texts with interpolation.

use chrono::NaiveDateTime;
use mimwatch_core::{sanitize::escape_html, NewsItem};

const DATE_TIME: &str = "%d/%m/%Y %H:%M";

/// Countdown until the next scheduled check.
pub fn format_time_remaining(seconds: i64) -> String {
    if seconds <= 0 {
        return "⏰ Prossimo controllo imminente!".to_string();
    }
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("⏱️ Prossimo controllo tra: {hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("⏱️ Prossimo controllo tra: {minutes}m {secs}s")
    } else {
        format!("⏱️ Prossimo controllo tra: {secs}s")
    }
}

/// Compact duration: `Zs`, `Ym Zs` below one hour, `Xh Ym` above.
pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{seconds}s")
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    }
}

/// "30 minuti", or seconds when the interval is not a whole number of minutes.
pub fn interval_label(interval_secs: u64) -> String {
    if interval_secs >= 60 && interval_secs % 60 == 0 {
        format!("{} minuti", interval_secs / 60)
    } else {
        format!("{interval_secs} secondi")
    }
}

pub fn welcome(subscribers: usize, interval_secs: u64) -> String {
    format!(
        "🎉 <b>Benvenuto nel MiM Watcher!</b>\n\n\
         📢 Riceverai notifiche automatiche ogni volta che viene pubblicata una nuova notizia su USR Lombardia.\n\n\
         👥 <b>Iscritti totali:</b> {subscribers}\n\n\
         ⚙️ <b>Comandi disponibili:</b>\n\
         • /help - Mostra tutti i comandi\n\
         • /last - Mostra l'ultima notizia\n\
         • /next - Quando sarà il prossimo controllo\n\
         • /stats - Statistiche del bot\n\
         • /stop - Cancella iscrizione\n\n\
         🔄 Controllo notizie ogni {}",
        interval_label(interval_secs)
    )
}

/// Latest item sent to a new subscriber right after `/start`.
pub fn preview(item: &NewsItem) -> String {
    format!(
        "📰 <b>Ultima notizia USR Lombardia:</b>\n\n\
         📄 <b>{}</b>\n\n\
         🔗 {}\n\n\
         💡 <i>Da ora riceverai automaticamente le nuove notizie!</i>",
        escape_html(item.title()),
        escape_html(item.url()),
    )
}

pub fn already_subscribed(subscribers: usize, interval_secs: u64) -> String {
    format!(
        "✅ Sei già iscritto alle notifiche!\n\n\
         👥 Iscritti totali: {subscribers}\n\
         🔄 Controllo automatico ogni {}\n\
         📝 Usa /help per vedere tutti i comandi",
        interval_label(interval_secs)
    )
}

pub fn unsubscribed(remaining: usize) -> String {
    format!(
        "👋 <b>Iscrizione cancellata!</b>\n\n\
         ❌ Non riceverai più notifiche dalle news USR Lombardia.\n\n\
         👥 Iscritti rimasti: {remaining}\n\n\
         🔄 Puoi sempre riscriverti con /start"
    )
}

pub fn help(subscribers: usize, interval_secs: u64) -> String {
    format!(
        "📖 <b>Comandi disponibili:</b>\n\n\
         🔔 <b>/start</b> - Iscriviti alle notifiche automatiche\n\
         ❌ <b>/stop</b> - Cancella l'iscrizione\n\
         📰 <b>/last</b> - Mostra l'ultima notizia disponibile\n\
         ⏰ <b>/next</b> - Quando sarà il prossimo controllo automatico\n\
         🚀 <b>/force</b> - Forza il controllo notizie ora\n\
         📊 <b>/stats</b> - Statistiche del bot\n\
         ❓ <b>/help</b> - Mostra questo messaggio\n\n\
         🤖 <b>Come funziona:</b>\n\
         Il bot controlla automaticamente ogni {} se ci sono nuove notizie su USR Lombardia del MiM e ti avvisa immediatamente!\n\n\
         👥 <b>Community:</b> {subscribers} iscritti attivi\n\
         💡 <b>Suggerimento:</b> Usa /next per sapere quando sarà il prossimo controllo",
        interval_label(interval_secs)
    )
}

/// Reply to `/last`.
pub fn last_item(item: &NewsItem) -> String {
    format!(
        "📰 <b>Ultima notizia disponibile:</b>\n\n\
         📄 <b>{}</b>\n\n\
         🔗 {}",
        escape_html(item.title()),
        escape_html(item.url()),
    )
}

/// Broadcast text for a newly detected item, stamped with local time `at`.
pub fn news_notification(item: &NewsItem, at: NaiveDateTime) -> String {
    format!(
        "🔔 <b>Nuova notizia USR Lombardia!</b>\n\n\
         📰 <b>{}</b>\n\n\
         🔗 {}\n\n\
         ⏰ <i>{}</i>",
        escape_html(item.title()),
        escape_html(item.url()),
        at.format("%d/%m/%Y alle %H:%M"),
    )
}

pub fn next_check(remaining_secs: i64, last_check: NaiveDateTime, interval_secs: u64) -> String {
    format!(
        "⏱️ <b>Prossimo controllo automatico:</b>\n\n\
         {}\n\n\
         📅 Ultimo controllo: {}\n\
         🔄 Intervallo: ogni {}\n\n\
         💡 Usa /force per controllare subito",
        format_time_remaining(remaining_secs),
        last_check.format("%H:%M:%S"),
        interval_label(interval_secs),
    )
}

pub fn force_broadcast(item: &NewsItem, delivered: usize) -> String {
    format!(
        "✅ <b>Controllo forzato completato!</b>\n\n\
         🆕 Nuova notizia trovata: <b>{}</b>\n\
         📤 Inviata a {delivered} iscritti.\n\
         🔄 Il bot continua a monitorare automaticamente.",
        escape_html(item.title()),
    )
}

pub fn force_already_seen(item: &NewsItem) -> String {
    format!(
        "✅ <b>Controllo forzato completato!</b>\n\n\
         📭 Nessuna nuova notizia. L'ultima è già stata inviata:\n\
         📄 {}\n\
         🔄 Il bot continua a monitorare automaticamente.",
        escape_html(item.title()),
    )
}

pub fn force_nothing_found() -> String {
    "✅ <b>Controllo forzato completato!</b>\n\n\
     ❌ Nessuna notizia trovata sulla pagina.\n\
     🔄 Il bot continua a monitorare automaticamente."
        .to_string()
}

pub fn unknown_command(text: &str) -> String {
    format!(
        "❓ Comando non riconosciuto: <code>{}</code>\n\n\
         📝 Usa /help per vedere tutti i comandi disponibili",
        escape_html(text)
    )
}

/// Inputs of the `/stats` reply, with times already in local wall clock.
pub struct StatsReport {
    pub started: NaiveDateTime,
    pub uptime_secs: u64,
    pub subscribers: usize,
    pub news_sent: u64,
    pub commands_processed: u64,
    pub last_news: Option<NaiveDateTime>,
    pub seen: usize,
    pub interval_secs: u64,
}

pub fn stats_report(report: &StatsReport) -> String {
    let last_news = report
        .last_news
        .map(|t| t.format(DATE_TIME).to_string())
        .unwrap_or_else(|| super::NO_NEWS_YET.to_string());

    format!(
        "📊 <b>Statistiche Bot MiM Watcher</b>\n\n\
         🚀 <b>Avviato:</b> {}\n\
         ⏰ <b>Uptime:</b> {}\n\
         👥 <b>Utenti iscritti:</b> {}\n\
         📰 <b>News inviate:</b> {}\n\
         ⌨️ <b>Comandi processati:</b> {}\n\
         🕐 <b>Ultima news:</b> {last_news}\n\
         📄 <b>Notizie memorizzate:</b> {}\n\
         🔄 <b>Intervallo controlli:</b> {}\n\n\
         💡 Il bot sta monitorando USR Lombardia del MiM!",
        report.started.format(DATE_TIME),
        format_duration(report.uptime_secs),
        report.subscribers,
        report.news_sent,
        report.commands_processed,
        report.seen,
        interval_label(report.interval_secs),
    )
}
