use std::fmt;

use serde::{Serialize, Serializer};

use crate::{Error, Result};

/// 时间编码长度：1位星期 + 2位起始节次 + 2位结束节次
pub const SLOT_CODE_LEN: usize = 5;

/// 一天中的五个大节（不含第11-12节）
pub const DAILY_BLOCKS: [&str; 5] = ["0102", "0304", "0506", "0708", "0910"];

const DAY_LABELS: [&str; 7] = ["周一", "周二", "周三", "周四", "周五", "周六", "周日"];

/// 课表格子的键：(星期, 节次块)
///
/// 节次块保留原始的4位字符串（如 "0102"），不做数值换算。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub day: u8,
    pub block: String,
}

impl SlotKey {
    pub fn new(day: u8, block: impl Into<String>) -> Self {
        Self {
            day,
            block: block.into(),
        }
    }

    /// 起始节次
    pub fn start_period(&self) -> Option<u8> {
        self.block.get(0..2).and_then(parse_two_digits)
    }

    /// 结束节次
    pub fn end_period(&self) -> Option<u8> {
        self.block.get(2..4).and_then(parse_two_digits)
    }

    /// 第几大节，"0102" -> 1, "0910" -> 5, "1112" -> 6
    pub fn block_index(&self) -> Option<u8> {
        match self.start_period()? {
            0 => None,
            start => Some(start.div_ceil(2)),
        }
    }

    /// 重新编码为5位时间编码
    pub fn code(&self) -> String {
        format!("{}{}", self.day, self.block)
    }

    /// 中文节次描述，如 "第1-2节"
    pub fn period_label(&self) -> String {
        match (self.start_period(), self.end_period()) {
            (Some(start), Some(end)) if start == end => format!("第{}节", start),
            (Some(start), Some(end)) => format!("第{}-{}节", start, end),
            _ => self.block.clone(),
        }
    }

    pub fn day_label(&self) -> Option<&'static str> {
        day_label(self.day)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// 序列化为5位时间编码，JSON 对象的键必须是字符串
impl Serialize for SlotKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 解析时间编码，"30102" -> (3, "0102")
pub fn decode(code: &str) -> Result<SlotKey> {
    if code.len() != SLOT_CODE_LEN {
        return Err(malformed(code, "expected 5 characters"));
    }
    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(code, "expected only digits"));
    }

    Ok(SlotKey {
        day: code.as_bytes()[0] - b'0',
        block: code[1..].to_string(),
    })
}

/// 星期的中文名称，1=周一 ... 7=周日
pub fn day_label(day: u8) -> Option<&'static str> {
    match day {
        1..=7 => Some(DAY_LABELS[(day - 1) as usize]),
        _ => None,
    }
}

fn parse_two_digits(s: &str) -> Option<u8> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

fn malformed(code: &str, reason: &'static str) -> Error {
    Error::MalformedSlotCode {
        code: code.to_string(),
        reason,
    }
}
