use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// 不在页面上展示课表
pub const SHOW_TABLE_ON_PAGE: &str = "show_table_on_page";
/// 不允许他人导入日历
pub const IMPORT_TO_CALENDER: &str = "import_to_calender";
/// 隐藏专业信息
pub const MAJOR: &str = "major";

/// 学生的隐私设置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrivacySettings {
    flags: BTreeSet<String>,
}

impl PrivacySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn insert(&mut self, flag: impl Into<String>) -> bool {
        self.flags.insert(flag.into())
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PrivacySettings {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            flags: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// 完整课表
    Full,
    /// 只展示基本信息
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewSelection {
    pub mode: ViewMode,
    pub suppress_calendar_import: bool,
}

/// 根据隐私设置决定学生页面的展示方式，未知的设置项会被忽略
pub fn select_view(settings: &PrivacySettings) -> ViewSelection {
    let mode = if settings.contains(SHOW_TABLE_ON_PAGE) {
        ViewMode::Blocked
    } else {
        ViewMode::Full
    };

    ViewSelection {
        mode,
        suppress_calendar_import: settings.contains(IMPORT_TO_CALENDER),
    }
}
