//! Trading session clock
//!
//! Maps a point in time to a named trading session using a fixed market
//! timezone and fixed boundaries. Pure logic: no IO, no wall-clock reads.
//! Boundaries are configuration constants, not exchange calendars — there
//! is no holiday or weekend awareness.

use crate::config::SessionConfig;
use crate::error::{BotError, Result};
use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use std::fmt;

/// One of the four named trading sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionWindow {
    PreMarket,
    Regular,
    PostMarket,
    Closed,
}

impl fmt::Display for SessionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionWindow::PreMarket => "Pre-market",
            SessionWindow::Regular => "Regular",
            SessionWindow::PostMarket => "Post-market",
            SessionWindow::Closed => "Closed",
        };
        write!(f, "{}", name)
    }
}

/// Fixed-timezone, fixed-boundary session clock.
///
/// Every instant maps to exactly one session; boundaries are half-open on
/// the left (09:30 belongs to Regular, not PreMarket).
#[derive(Debug, Clone)]
pub struct SessionClock {
    offset: FixedOffset,
    premarket_open: NaiveTime,
    regular_open: NaiveTime,
    regular_close: NaiveTime,
    postmarket_close: NaiveTime,
}

impl SessionClock {
    pub fn from_config(cfg: &SessionConfig) -> Result<Self> {
        let offset = FixedOffset::east_opt(cfg.utc_offset_hours * 3600).ok_or_else(|| {
            BotError::Config(format!("invalid UTC offset: {}", cfg.utc_offset_hours))
        })?;

        let clock = Self {
            offset,
            premarket_open: parse_boundary(&cfg.premarket_open)?,
            regular_open: parse_boundary(&cfg.regular_open)?,
            regular_close: parse_boundary(&cfg.regular_close)?,
            postmarket_close: parse_boundary(&cfg.postmarket_close)?,
        };

        if clock.premarket_open >= clock.regular_open
            || clock.regular_open >= clock.regular_close
            || clock.regular_close >= clock.postmarket_close
        {
            return Err(BotError::Config(
                "session boundaries must be strictly increasing".to_string(),
            ));
        }

        Ok(clock)
    }

    /// Which session `at` falls into.
    pub fn session_at(&self, at: DateTime<Utc>) -> SessionWindow {
        let t = at.with_timezone(&self.offset).time();

        if t >= self.premarket_open && t < self.regular_open {
            SessionWindow::PreMarket
        } else if t >= self.regular_open && t < self.regular_close {
            SessionWindow::Regular
        } else if t >= self.regular_close && t < self.postmarket_close {
            SessionWindow::PostMarket
        } else {
            SessionWindow::Closed
        }
    }

    /// The half-open UTC time range `[start, end)` of the session active at
    /// `at`, on `at`'s local market date. `None` when the market is closed.
    pub fn active_range(&self, at: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let (start, end) = match self.session_at(at) {
            SessionWindow::PreMarket => (self.premarket_open, self.regular_open),
            SessionWindow::Regular => (self.regular_open, self.regular_close),
            SessionWindow::PostMarket => (self.regular_close, self.postmarket_close),
            SessionWindow::Closed => return None,
        };

        let date = at.with_timezone(&self.offset).date_naive();
        let to_utc = |t: NaiveTime| {
            date.and_time(t)
                .and_local_timezone(self.offset)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
        };
        Some((to_utc(start)?, to_utc(end)?))
    }
}

fn parse_boundary(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|e| BotError::Config(format!("invalid session boundary {:?}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock() -> SessionClock {
        SessionClock::from_config(&SessionConfig::default()).unwrap()
    }

    /// 09:30 ET = 14:30 UTC at the default -5 offset.
    fn et(hour: u32, min: u32) -> DateTime<Utc> {
        let local = FixedOffset::east_opt(-5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 10, hour, min, 0)
            .unwrap();
        local.with_timezone(&Utc)
    }

    #[test]
    fn boundaries_are_half_open() {
        let c = clock();
        assert_eq!(c.session_at(et(4, 0)), SessionWindow::PreMarket);
        assert_eq!(c.session_at(et(9, 29)), SessionWindow::PreMarket);
        assert_eq!(c.session_at(et(9, 30)), SessionWindow::Regular);
        assert_eq!(c.session_at(et(15, 59)), SessionWindow::Regular);
        assert_eq!(c.session_at(et(16, 0)), SessionWindow::PostMarket);
        assert_eq!(c.session_at(et(19, 59)), SessionWindow::PostMarket);
        assert_eq!(c.session_at(et(20, 0)), SessionWindow::Closed);
        assert_eq!(c.session_at(et(3, 59)), SessionWindow::Closed);
    }

    #[test]
    fn every_minute_maps_to_exactly_one_session() {
        let c = clock();
        for hour in 0..24 {
            for min in 0..60 {
                // Total: session_at never panics and always yields a label.
                let _ = c.session_at(et(hour, min));
            }
        }
    }

    #[test]
    fn active_range_covers_the_query_instant() {
        let c = clock();
        let at = et(10, 15);
        let (start, end) = c.active_range(at).unwrap();
        assert!(start <= at && at < end);
        assert_eq!(start, et(9, 30));
        assert_eq!(end, et(16, 0));
    }

    #[test]
    fn closed_session_has_no_range() {
        let c = clock();
        assert!(c.active_range(et(2, 0)).is_none());
        assert!(c.active_range(et(21, 0)).is_none());
    }

    #[test]
    fn midnight_is_closed() {
        let at = chrono::Utc.with_ymd_and_hms(2024, 6, 10, 5, 0, 0).unwrap(); // 00:00 ET
        assert_eq!(clock().session_at(at), SessionWindow::Closed);
    }

    #[test]
    fn rejects_unordered_boundaries() {
        let cfg = SessionConfig {
            regular_open: "16:30".to_string(),
            ..SessionConfig::default()
        };
        assert!(SessionClock::from_config(&cfg).is_err());
    }

    #[test]
    fn rejects_malformed_boundary() {
        let cfg = SessionConfig {
            premarket_open: "4am".to_string(),
            ..SessionConfig::default()
        };
        assert!(SessionClock::from_config(&cfg).is_err());
    }
}
