//! 统计页面的排序与截取规则

use crate::{AirlineStats, DateStats, DestinationStats, FlightStats, OriginStats, RouteStats};
use std::cmp::Ordering;

/// 各"最差"榜单显示的条数
pub const TOP_RANKING: usize = 10;
/// 按日期显示的条数
pub const RECENT_DATES: usize = 15;

fn by_delay_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

impl FlightStats {
    /// 航空公司按航班总数降序
    pub fn airlines_by_volume(&self) -> Vec<AirlineStats> {
        let mut list = self.stats_by_airline.clone();
        list.sort_by(|a, b| b.tally.total_flights.cmp(&a.tally.total_flights));
        list
    }

    /// 延误率最高的出发机场
    pub fn worst_origins(&self, limit: usize) -> Vec<OriginStats> {
        let mut list = self.stats_by_origin.clone();
        list.sort_by(|a, b| by_delay_desc(a.tally.delay_percentage, b.tally.delay_percentage));
        list.truncate(limit);
        list
    }

    /// 延误率最高的到达机场
    pub fn worst_destinations(&self, limit: usize) -> Vec<DestinationStats> {
        let mut list = self.stats_by_destination.clone();
        list.sort_by(|a, b| by_delay_desc(a.tally.delay_percentage, b.tally.delay_percentage));
        list.truncate(limit);
        list
    }

    /// 延误率最高的航线
    pub fn worst_routes(&self, limit: usize) -> Vec<RouteStats> {
        let mut list = self.stats_by_route.clone();
        list.sort_by(|a, b| by_delay_desc(a.tally.delay_percentage, b.tally.delay_percentage));
        list.truncate(limit);
        list
    }

    /// 按后端给出的顺序取前若干天
    pub fn recent_dates(&self, limit: usize) -> &[DateStats] {
        let end = limit.min(self.stats_by_date.len());
        &self.stats_by_date[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DelayTally;

    fn tally(total: u64, pct: f64) -> DelayTally {
        DelayTally {
            total_flights: total,
            delayed_flights: 0,
            delay_percentage: pct,
        }
    }

    #[test]
    fn test_airlines_sorted_by_volume() {
        let stats = FlightStats {
            stats_by_airline: vec![
                AirlineStats { airline: "GLO".into(), tally: tally(5, 10.0) },
                AirlineStats { airline: "AZU".into(), tally: tally(12, 40.0) },
            ],
            ..Default::default()
        };
        let sorted = stats.airlines_by_volume();
        assert_eq!(sorted[0].airline, "AZU");
        assert_eq!(sorted[1].airline, "GLO");
    }

    #[test]
    fn test_worst_origins_truncates() {
        let stats = FlightStats {
            stats_by_origin: (0..15)
                .map(|i| OriginStats {
                    origin: format!("A{i}"),
                    tally: tally(1, i as f64),
                })
                .collect(),
            ..Default::default()
        };
        let worst = stats.worst_origins(TOP_RANKING);
        assert_eq!(worst.len(), 10);
        assert_eq!(worst[0].origin, "A14");
        assert_eq!(worst[9].origin, "A5");
    }

    #[test]
    fn test_recent_dates_shorter_than_limit() {
        let stats = FlightStats {
            stats_by_date: vec![DateStats { date: "2026-01-01".into(), tally: tally(1, 0.0) }],
            ..Default::default()
        };
        assert_eq!(stats.recent_dates(RECENT_DATES).len(), 1);
    }
}
