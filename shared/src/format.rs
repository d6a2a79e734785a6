//! 显示格式化
//!
//! 概率、百分比、距离与地名的统一格式，页面层只负责渲染。

/// 地名中保持小写的葡语介词与冠词
const LOWERCASE_PARTICLES: [&str; 6] = ["de", "da", "dos", "do", "das", "e"];

/// 预测概率 (0–1) 显示为一位小数的百分比
///
/// 非有限值（NaN、无穷）显示为 `0.0%`。
pub fn format_probability(prob: f64) -> String {
    if !prob.is_finite() {
        return "0.0%".to_string();
    }
    format!("{:.1}%", prob * 100.0)
}

/// 历史列表中的概率 (0–1)，取整百分比
pub fn format_probability_whole(prob: f64) -> String {
    if !prob.is_finite() {
        return "0%".to_string();
    }
    format!("{:.0}%", prob * 100.0)
}

/// 统计接口返回的百分比本身已是 0–100
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn format_distance_km(km: f64) -> String {
    format!("{:.0} km", km)
}

/// 延误率等级（统计页配色）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelaySeverity {
    Low,
    Medium,
    High,
}

impl DelaySeverity {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 20.0 {
            DelaySeverity::Low
        } else if percentage < 35.0 {
            DelaySeverity::Medium
        } else {
            DelaySeverity::High
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            DelaySeverity::Low => "badge-success",
            DelaySeverity::Medium => "badge-warning",
            DelaySeverity::High => "badge-error",
        }
    }
}

/// 后端的地名全为大写，转为标题格式
///
/// 规则：整体转小写后按空白与 `/` 切分；首个单词和 `/` 之后的单词总是首字母大写，
/// 其余单词除介词外首字母大写。
pub fn capitalize_place_name(s: &str) -> String {
    let lower = s.to_lowercase();
    let tokens = tokenize(&lower);

    let mut out = String::with_capacity(lower.len());
    for (index, token) in tokens.iter().enumerate() {
        let is_separator = *token == "/" || token.chars().all(char::is_whitespace);
        if is_separator {
            out.push_str(token);
        } else if index == 0 || tokens[index - 1] == "/" {
            out.push_str(&capitalize_first(token));
        } else if LOWERCASE_PARTICLES.contains(token) {
            out.push_str(token);
        } else {
            out.push_str(&capitalize_first(token));
        }
    }
    out
}

/// 切分为单词、空白串与 `/`，分隔符保留
fn tokenize(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space = false;

    for (i, c) in s.char_indices() {
        if c == '/' {
            if start < i {
                tokens.push(&s[start..i]);
            }
            tokens.push(&s[i..i + 1]);
            start = i + 1;
            in_space = false;
            continue;
        }
        let space = c.is_whitespace();
        if start < i && space != in_space {
            tokens.push(&s[start..i]);
            start = i;
        }
        if start == i {
            in_space = space;
        }
    }
    if start < s.len() {
        tokens.push(&s[start..]);
    }
    tokens
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
