use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::Result;

/// 学期切换器中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemesterChoice {
    pub semester: String,
    pub is_current: bool,
}

impl SemesterChoice {
    pub fn new(semester: impl Into<String>, is_current: bool) -> Self {
        Self {
            semester: semester.into(),
            is_current,
        }
    }
}

/// 生成学期列表，保持输入顺序，与 `current` 完全相同的项标记为当前学期
///
/// `current` 不在列表中时不报错，所有项都不是当前学期。
pub fn resolve<S: AsRef<str>>(current: &str, all_semesters: &[S]) -> Vec<SemesterChoice> {
    all_semesters
        .iter()
        .map(|s| {
            let s = s.as_ref();
            SemesterChoice::new(s, s == current)
        })
        .collect()
}

/// 最新的学期（列表最后一项）
pub fn latest<S: AsRef<str>>(all_semesters: &[S]) -> Option<&str> {
    all_semesters.last().map(AsRef::as_ref)
}

/// 学期校历：根据开学日期推算某天是第几周、星期几
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterCalendar {
    pub semester: String,
    /// 第一周的星期一
    pub start_date: NaiveDate,
}

impl SemesterCalendar {
    /// 开学日期会对齐到所在周的星期一
    pub fn new(semester: impl Into<String>, start: NaiveDate) -> Self {
        let days_since_monday = start.weekday().num_days_from_monday();
        Self {
            semester: semester.into(),
            start_date: start - chrono::Duration::days(i64::from(days_since_monday)),
        }
    }

    /// 从 `YYYY-MM-DD` 格式的开学日期创建
    pub fn from_date_str(semester: impl Into<String>, date_str: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?;
        Ok(Self::new(semester, date))
    }

    /// 获取指定周数的星期一
    pub fn week_start(&self, week: u32) -> NaiveDate {
        self.start_date + chrono::Duration::weeks(i64::from(week) - 1)
    }

    /// 某天所在的周次，开学前返回 `None`
    pub fn week_of(&self, date: NaiveDate) -> Option<u32> {
        let days = (date - self.start_date).num_days();
        if days < 0 {
            return None;
        }
        u32::try_from(days / 7 + 1).ok()
    }

    /// 某天的 (周次, 星期)，星期 1=周一 ... 7=周日
    pub fn locate(&self, date: NaiveDate) -> Option<(u32, u8)> {
        let week = self.week_of(date)?;
        let day = u8::try_from(date.weekday().number_from_monday()).ok()?;
        Some((week, day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_marks_current() {
        let choices = resolve("2023-1", &["2022-2", "2023-1", "2023-2"]);
        assert_eq!(
            choices,
            vec![
                SemesterChoice::new("2022-2", false),
                SemesterChoice::new("2023-1", true),
                SemesterChoice::new("2023-2", false),
            ]
        );
    }

    #[test]
    fn test_resolve_no_match() {
        let choices = resolve("9999-1", &["2022-2"]);
        assert_eq!(choices, vec![SemesterChoice::new("2022-2", false)]);
    }

    #[test]
    fn test_resolve_empty() {
        let empty: [&str; 0] = [];
        assert!(resolve("2023-1", &empty).is_empty());
    }

    #[test]
    fn test_resolve_exact_match_only() {
        let choices = resolve("2023-1", &["2023-1 ", "2023-10", "2023-1"]);
        let flags: Vec<_> = choices.iter().map(|c| c.is_current).collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn test_resolve_preserves_order() {
        let semesters = vec!["2019-2020-2".to_string(), "2018-2019-1".to_string()];
        let choices = resolve("2018-2019-1", &semesters);
        assert_eq!(choices[0].semester, "2019-2020-2");
        assert!(choices[1].is_current);
    }

    #[test]
    fn test_latest() {
        assert_eq!(latest(&["2022-2", "2023-1"]), Some("2023-1"));
        let empty: Vec<String> = Vec::new();
        assert_eq!(latest(&empty), None);
    }

    #[test]
    fn test_calendar_aligns_to_monday() {
        // 2024-09-04 是星期三
        let calendar = SemesterCalendar::from_date_str("2024-2025-1", "2024-09-04").unwrap();
        assert_eq!(
            calendar.start_date,
            NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
        );
        assert_eq!(
            calendar.week_start(3),
            NaiveDate::from_ymd_opt(2024, 9, 16).unwrap()
        );
    }

    #[test]
    fn test_calendar_locate() {
        let calendar = SemesterCalendar::from_date_str("2024-2025-1", "2024-09-02").unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        assert_eq!(calendar.locate(date), Some((1, 1)));

        let date = NaiveDate::from_ymd_opt(2024, 9, 15).unwrap();
        assert_eq!(calendar.locate(date), Some((2, 7)));

        let date = NaiveDate::from_ymd_opt(2024, 8, 30).unwrap();
        assert_eq!(calendar.locate(date), None);
    }

    #[test]
    fn test_calendar_invalid_date() {
        let result = SemesterCalendar::from_date_str("2024-2025-1", "2024/09/02");
        assert!(matches!(result, Err(crate::Error::DateTime(_))));
    }
}
