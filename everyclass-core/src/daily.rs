use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    LessonRecord,
    semester::SemesterCalendar,
    slot::{self, DAILY_BLOCKS},
};

/// 某人某个时段的课程
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub name: String,
    pub room: String,
}

/// 一个人在当天的日程，键为节次块（如 "0102"），没课的时段为 `None`
pub type DaySchedule = BTreeMap<String, Option<Event>>;

/// 一个人的整学期课程
#[derive(Debug, Clone)]
pub struct PersonTimetable {
    /// 学号或教工号
    pub identifier: String,
    pub lessons: Vec<LessonRecord>,
}

/// 多人日程：输入多个人的课表和日期，输出这些人在当天的日程
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiPeopleSchedule {
    pub date: NaiveDate,
    /// 日期所在周次，开学前为 `None`
    pub week: Option<u32>,
    pub schedules: Vec<DaySchedule>,
    pub accessible_people: Vec<String>,
    pub inaccessible_people: Vec<String>,
}

impl MultiPeopleSchedule {
    /// `has_access` 判断当前用户能否查看某人的课表
    pub fn build<I, F>(people: I, date: NaiveDate, calendar: &SemesterCalendar, has_access: F) -> Self
    where
        I: IntoIterator<Item = PersonTimetable>,
        F: Fn(&str) -> bool,
    {
        let located = calendar.locate(date);
        if located.is_none() {
            tracing::warn!(%date, semester = %calendar.semester, "日期早于学期开始");
        }

        let mut schedules = Vec::new();
        let mut accessible_people = Vec::new();
        let mut inaccessible_people = Vec::new();

        for person in people {
            if !has_access(&person.identifier) {
                inaccessible_people.push(person.identifier);
                continue;
            }

            let mut schedule = DaySchedule::new();
            if let Some((week, day)) = located {
                fill_day(&mut schedule, &person, week, day, date);
            }
            for block in DAILY_BLOCKS {
                schedule.entry(block.to_string()).or_insert(None);
            }

            schedules.push(schedule);
            accessible_people.push(person.identifier);
        }

        Self {
            date,
            week: located.map(|(week, _)| week),
            schedules,
            accessible_people,
            inaccessible_people,
        }
    }
}

fn fill_day(schedule: &mut DaySchedule, person: &PersonTimetable, week: u32, day: u8, date: NaiveDate) {
    for lesson in &person.lessons {
        if !lesson.weeks.contains(&week) {
            continue;
        }
        let key = match slot::decode(&lesson.lesson) {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!(identifier = %person.identifier, "跳过课程: {}", e);
                continue;
            }
        };
        if key.day != day {
            continue;
        }

        if matches!(schedule.get(&key.block), Some(Some(_))) {
            tracing::warn!(
                identifier = %person.identifier,
                %date,
                block = %key.block,
                "课程时间重叠"
            );
            continue;
        }

        schedule.insert(
            key.block,
            Some(Event {
                name: lesson.name.clone(),
                room: lesson.room.clone(),
            }),
        );
    }
}
