//! User-facing message texts.
//!
//! The monitored page is Italian, and so is the audience: every reply is
//! Italian and uses Telegram HTML markup. Static strings live here; anything
//! with interpolation goes through the builders in `format.rs`.

mod format;


pub use format::*;

pub const PREVIEW_SEARCHING: &str = "🔍 Ti mostro subito l'ultima notizia disponibile...";

pub const PREVIEW_EMPTY: &str =
    "ℹ️ Al momento non ci sono notizie disponibili, ma ti avviserò non appena ne arriveranno!";

pub const PREVIEW_FAILED: &str =
    "⚠️ Non riesco a recuperare l'ultima notizia al momento, ma il monitoraggio è attivo!";

pub const NOT_SUBSCRIBED: &str =
    "ℹ️ Non risulti iscritto alle notifiche.\n\n📝 Usa /start per iscriverti";

pub const LAST_SEARCHING: &str = "🔍 Cerco l'ultima notizia disponibile...";

pub const LAST_NONE: &str = "❌ Nessuna notizia trovata al momento.";

pub const LAST_FAILED: &str = "⚠️ Errore nel recuperare l'ultima notizia. Riprova più tardi.";

pub const NEXT_IMMINENT: &str = "⏰ <b>Prossimo controllo imminente!</b>\n\n\
     🔄 Il controllo automatico dovrebbe iniziare a momenti.";

pub const FORCE_RUNNING: &str = "🚀 Controllo forzato in corso...";

pub const FORCE_FAILED: &str = "⚠️ Errore durante il controllo forzato. Riprova più tardi.";

/// Shown in `/stats` before the first broadcast.
pub const NO_NEWS_YET: &str = "Nessuna news inviata ancora";
