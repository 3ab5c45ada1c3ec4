//! 空闲教室查询
//!
//! 根据日期和节次块推算周次与时间编码，再把上游返回的空闲教室整理成列表。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    semester::SemesterCalendar,
    slot::{self, SlotKey},
};

/// 发往上游的空闲教室查询条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomQuery {
    pub campus: String,
    pub building: String,
    pub date: NaiveDate,
    pub week: u32,
    /// 5位时间编码，如 "30102"
    pub session: String,
}

impl RoomQuery {
    /// `block` 为4位节次块，如 "0102"
    pub fn new(
        campus: impl Into<String>,
        building: impl Into<String>,
        date: NaiveDate,
        block: &str,
        calendar: &SemesterCalendar,
    ) -> Result<Self> {
        let (week, day) = calendar.locate(date).ok_or_else(|| Error::OutOfSemester {
            date,
            semester: calendar.semester.clone(),
        })?;
        let session = SlotKey::new(day, block).code();
        // 节次块不合法时在发请求前就报错
        slot::decode(&session)?;

        Ok(Self {
            campus: campus.into(),
            building: building.into(),
            date,
            week,
            session,
        })
    }
}

/// 上游返回的空闲教室
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableRoom {
    pub name: String,
    #[serde(rename = "code")]
    pub room_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableRooms {
    #[serde(flatten)]
    pub query: RoomQuery,
    pub rooms: Vec<AvailableRoom>,
}

impl AvailableRooms {
    /// 按教室名排序，去掉重复的教室
    pub fn new(query: RoomQuery, mut rooms: Vec<AvailableRoom>) -> Self {
        rooms.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.room_id.cmp(&b.room_id)));
        rooms.dedup_by(|a, b| a.room_id == b.room_id);
        tracing::debug!(session = %query.session, week = query.week, count = rooms.len(), "空闲教室");

        Self { query, rooms }
    }
}
