//! Log line layout: `12:04:31.208 r003  INFO follower_duel::game: Roster ready players=13`

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Round currently on screen; 0 before the first round is drawn
static CURRENT_ROUND: AtomicU64 = AtomicU64::new(0);

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:3]");

const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Tags every line with the wall-clock time and the round on screen.
pub struct RoundFormatter;

impl<S, N> FormatEvent<S, N> for RoundFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        paint(&mut writer, ansi, DIM, format_args!("{timestamp} r{:03}", current_round()))?;

        let (label, color) = level_style(meta.level());
        writer.write_char(' ')?;
        paint(&mut writer, ansi, color, label)?;

        writer.write_char(' ')?;
        paint(&mut writer, ansi, DIM, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Right-aligned label and ANSI color for a level.
fn level_style(level: &Level) -> (&'static str, &'static str) {
    match *level {
        Level::TRACE => ("TRACE", "\x1b[35m"),
        Level::DEBUG => ("DEBUG", "\x1b[34m"),
        Level::INFO => (" INFO", "\x1b[32m"),
        Level::WARN => (" WARN", "\x1b[33m"),
        Level::ERROR => ("ERROR", "\x1b[31m"),
    }
}

fn paint(writer: &mut Writer<'_>, ansi: bool, style: &str, text: impl fmt::Display) -> fmt::Result {
    if ansi {
        write!(writer, "{style}{text}{RESET}")
    } else {
        write!(writer, "{text}")
    }
}

/// Records the round now on screen, for tagging subsequent log lines
pub fn set_current_round(round: u64) {
    CURRENT_ROUND.store(round, Ordering::Relaxed);
}

pub fn current_round() -> u64 {
    CURRENT_ROUND.load(Ordering::Relaxed)
}
