//! 历史记录页面的筛选与行格式

use flightontime_shared::date::format_history_datetime;
use flightontime_shared::format::{format_distance_km, format_probability_whole};
use flightontime_shared::{Airline, Airport, FlightRecord, airline_name, airport_name};

/// 按预测结果筛选
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    #[default]
    All,
    Delayed,
    OnTime,
}

impl HistoryFilter {
    pub const ALL: [HistoryFilter; 3] = [HistoryFilter::All, HistoryFilter::Delayed, HistoryFilter::OnTime];

    pub fn label(&self) -> &'static str {
        match self {
            HistoryFilter::All => "Todos",
            HistoryFilter::Delayed => "Atrasados",
            HistoryFilter::OnTime => "Pontuais",
        }
    }

    pub fn matches(&self, record: &FlightRecord) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Delayed => record.prediction_result.is_delayed(),
            HistoryFilter::OnTime => !record.prediction_result.is_delayed(),
        }
    }

    /// 保持后端给出的顺序
    pub fn apply<'a>(&self, records: &'a [FlightRecord]) -> Vec<&'a FlightRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// 表格中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub id: i64,
    pub airline: String,
    pub airline_title: String,
    pub origin: String,
    pub origin_title: String,
    pub destination: String,
    pub destination_title: String,
    pub departure: String,
    pub distance: String,
    pub status: &'static str,
    pub delayed: bool,
    pub probability: String,
}

impl HistoryRow {
    /// 代码原样显示，名称作为悬浮提示（找不到时退回代码）
    pub fn new(record: &FlightRecord, airlines: &[Airline], airports: &[Airport]) -> Self {
        Self {
            id: record.id,
            airline: record.airline.clone(),
            airline_title: airline_name(airlines, &record.airline).to_string(),
            origin: record.origin.clone(),
            origin_title: airport_name(airports, &record.origin).to_string(),
            destination: record.destination.clone(),
            destination_title: airport_name(airports, &record.destination).to_string(),
            departure: format_history_datetime(&record.scheduled_departure),
            distance: format_distance_km(record.distance_km),
            status: record.prediction_result.label(),
            delayed: record.prediction_result.is_delayed(),
            probability: format_probability_whole(record.prediction_probability),
        }
    }
}
