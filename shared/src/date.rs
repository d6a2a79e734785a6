//! 时间类型模块
//!
//! - `Departure`: 预测表单中的出发时间，序列化为后端要求的 ISO-8601 本地时间
//! - 历史记录 / 统计页面使用的日期解析与 pt-BR 显示格式

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// 后端使用的本地时间格式（无时区）
const ISO_LOCAL: &str = "%Y-%m-%dT%H:%M:%S";

// =========================================================
// Departure - 出发时间
// =========================================================

/// 出发时间（本地时间，不带时区）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Departure(NaiveDateTime);

impl Departure {
    /// 从表单的日期 (`YYYY-MM-DD`) 与时间 (`HH:MM`) 输入组装
    ///
    /// 返回 None 如果任一部分无法解析
    pub fn from_form(date: &str, time: &str) -> Option<Self> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
        let time = time.trim();
        let time = NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .ok()?;
        Some(Self(date.and_time(time)))
    }

    /// 后端格式：`2025-01-01T10:00:00`
    pub fn to_iso(&self) -> String {
        self.0.format(ISO_LOCAL).to_string()
    }

    /// 结果卡片使用的短格式：`01/01 10:00`
    pub fn display_short(&self) -> String {
        self.0.format("%d/%m %H:%M").to_string()
    }
}

// =========================================================
// 后端日期解析与显示
// =========================================================

/// 解析后端返回的日期时间，接受以空格或 `T` 分隔的写法
pub fn parse_backend_datetime(s: &str) -> Option<NaiveDateTime> {
    let normalized = s.trim().replacen(' ', "T", 1);
    NaiveDateTime::parse_from_str(&normalized, ISO_LOCAL)
        .or_else(|_| NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// 历史列表中的出发时间：`15/01/2026 14:30`
pub fn format_history_datetime(s: &str) -> String {
    if s.trim().is_empty() {
        return "N/A".to_string();
    }
    match parse_backend_datetime(s) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => "Data inválida".to_string(),
    }
}

/// 统计页的按日期分组：`2026-01-15` -> `15/01/2026`，无法解析时原样返回
pub fn format_stats_date(s: &str) -> String {
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| s.to_string())
}
