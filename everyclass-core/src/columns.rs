use serde::Serialize;

use crate::grid::Grid;

/// 课表列是否为空，用于折叠周末和晚上的列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmptinessFlags {
    pub weekend_empty: bool,
    pub period5_empty: bool,
    pub period6_empty: bool,
}

impl Default for EmptinessFlags {
    fn default() -> Self {
        Self {
            weekend_empty: true,
            period5_empty: true,
            period6_empty: true,
        }
    }
}

/// 检查周末、第5大节和第6大节是否有课
pub fn analyze<E>(grid: &Grid<E>) -> EmptinessFlags {
    let mut flags = EmptinessFlags::default();

    for key in grid.keys() {
        let Some(index) = key.block_index() else {
            continue;
        };

        if (6..=7).contains(&key.day) && (1..=6).contains(&index) {
            flags.weekend_empty = false;
        }
        if (1..=7).contains(&key.day) {
            match index {
                5 => flags.period5_empty = false,
                6 => flags.period6_empty = false,
                _ => {}
            }
        }
    }

    flags
}
