//! Session-windowed intraday gainer detection

use crate::client::MarketData;
use crate::session::{SessionClock, SessionWindow};
use crate::types::Ticker;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::warn;

/// Outcome of one detection. `session: None` means the check could not
/// establish a session because the data fetch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GainerCheck {
    pub is_gainer: bool,
    pub session: Option<SessionWindow>,
}

impl GainerCheck {
    fn negative(session: Option<SessionWindow>) -> Self {
        Self {
            is_gainer: false,
            session,
        }
    }
}

/// Detects whether a ticker's price rose by the threshold percent within
/// the currently active trading session.
#[derive(Debug, Clone)]
pub struct GainerDetector {
    clock: SessionClock,
    threshold_pct: Decimal,
}

impl GainerDetector {
    pub fn new(clock: SessionClock, threshold_pct: Decimal) -> Self {
        Self {
            clock,
            threshold_pct,
        }
    }

    /// Percent change from the session's first opening price to the most
    /// recent closing price, compared against the threshold.
    ///
    /// Definite negatives, never errors: closed market, fewer than two
    /// in-session bars, zero opening price, and any data-fetch failure.
    pub async fn detect<M: MarketData>(
        &self,
        market: &M,
        ticker: &Ticker,
        now: DateTime<Utc>,
    ) -> GainerCheck {
        let session = self.clock.session_at(now);
        let Some((start, end)) = self.clock.active_range(now) else {
            return GainerCheck::negative(Some(SessionWindow::Closed));
        };

        let bars = match market.intraday(ticker).await {
            Ok(bars) => bars,
            Err(e) => {
                warn!("Intraday fetch failed for {}: {}", ticker, e);
                return GainerCheck::negative(None);
            }
        };

        let in_session: Vec<_> = bars
            .iter()
            .filter(|b| b.timestamp >= start && b.timestamp < end)
            .collect();

        // Fewer than two samples means "not enough data yet".
        let (Some(first), Some(last)) = (in_session.first(), in_session.last()) else {
            return GainerCheck::negative(Some(session));
        };
        if in_session.len() < 2 || first.open.is_zero() {
            return GainerCheck::negative(Some(session));
        }

        let pct_change = (last.close - first.open) / first.open * Decimal::ONE_HUNDRED;
        GainerCheck {
            is_gainer: pct_change >= self.threshold_pct,
            session: Some(session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockMarketData;
    use crate::config::SessionConfig;
    use crate::types::IntradayBar;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn detector() -> GainerDetector {
        let clock = SessionClock::from_config(&SessionConfig::default()).unwrap();
        GainerDetector::new(clock, dec!(10))
    }

    fn ticker() -> Ticker {
        Ticker::parse("ACME").unwrap()
    }

    /// 2024-06-10, hour:min ET expressed in UTC (offset -5).
    fn et(hour: i64, min: i64) -> DateTime<Utc> {
        let midnight_et = Utc.with_ymd_and_hms(2024, 6, 10, 5, 0, 0).unwrap();
        midnight_et + chrono::Duration::minutes(hour * 60 + min)
    }

    fn bar(at: DateTime<Utc>, open: Decimal, close: Decimal) -> IntradayBar {
        IntradayBar {
            timestamp: at,
            open,
            close,
        }
    }

    #[tokio::test]
    async fn surge_within_session_is_a_gainer() {
        let market = MockMarketData::new().with_bars(
            &ticker(),
            vec![
                bar(et(9, 30), dec!(2.00), dec!(2.05)),
                bar(et(9, 55), dec!(2.10), dec!(2.30)), // +15% from 2.00 open
            ],
        );
        let check = detector().detect(&market, &ticker(), et(10, 0)).await;
        assert!(check.is_gainer);
        assert_eq!(check.session, Some(SessionWindow::Regular));
    }

    #[tokio::test]
    async fn below_threshold_is_not_a_gainer() {
        let market = MockMarketData::new().with_bars(
            &ticker(),
            vec![
                bar(et(9, 30), dec!(2.00), dec!(2.02)),
                bar(et(9, 55), dec!(2.03), dec!(2.10)), // +5%
            ],
        );
        let check = detector().detect(&market, &ticker(), et(10, 0)).await;
        assert!(!check.is_gainer);
    }

    #[tokio::test]
    async fn closed_market_is_never_a_gainer() {
        let market = MockMarketData::new().with_bars(
            &ticker(),
            vec![
                bar(et(9, 30), dec!(2.00), dec!(2.05)),
                bar(et(9, 55), dec!(2.10), dec!(2.30)),
            ],
        );
        let check = detector().detect(&market, &ticker(), et(23, 0)).await;
        assert!(!check.is_gainer);
        assert_eq!(check.session, Some(SessionWindow::Closed));
    }

    #[tokio::test]
    async fn out_of_session_bars_are_ignored() {
        // Big pre-market move, flat regular session: not a Regular gainer.
        let market = MockMarketData::new().with_bars(
            &ticker(),
            vec![
                bar(et(7, 0), dec!(1.00), dec!(1.50)),
                bar(et(9, 30), dec!(2.00), dec!(2.01)),
                bar(et(9, 55), dec!(2.01), dec!(2.02)),
            ],
        );
        let check = detector().detect(&market, &ticker(), et(10, 0)).await;
        assert!(!check.is_gainer);
        assert_eq!(check.session, Some(SessionWindow::Regular));
    }

    #[tokio::test]
    async fn fewer_than_two_samples_is_not_enough_data() {
        let market = MockMarketData::new()
            .with_bars(&ticker(), vec![bar(et(9, 30), dec!(2.00), dec!(2.50))]);
        let check = detector().detect(&market, &ticker(), et(10, 0)).await;
        assert!(!check.is_gainer);
        assert_eq!(check.session, Some(SessionWindow::Regular));
    }

    #[tokio::test]
    async fn zero_opening_price_is_not_a_gainer() {
        let market = MockMarketData::new().with_bars(
            &ticker(),
            vec![
                bar(et(9, 30), dec!(0), dec!(1.00)),
                bar(et(9, 55), dec!(1.00), dec!(2.00)),
            ],
        );
        let check = detector().detect(&market, &ticker(), et(10, 0)).await;
        assert!(!check.is_gainer);
    }

    #[tokio::test]
    async fn fetch_failure_is_negative_with_unknown_session() {
        let market = MockMarketData::new().with_failures();
        let check = detector().detect(&market, &ticker(), et(10, 0)).await;
        assert!(!check.is_gainer);
        assert_eq!(check.session, None);
    }
}
