use everyclass_core::{
    api::{StudentHit, TeacherHit},
    available::AvailableRooms,
    course::CoursePage,
    daily::MultiPeopleSchedule,
    page::{RoomPage, StudentView, TeacherPage, Timetable},
    semester::SemesterChoice,
    slot::{self, DAILY_BLOCKS, SlotKey},
    teacher::teacher_list_to_str,
};

const EVENING_BLOCK: &str = "1112";

/// 渲染课表，空的周末列和晚上的行会被折叠
pub fn render_timetable<E, F>(timetable: &Timetable<E>, label: F) -> String
where
    F: Fn(&E) -> String,
{
    let empty = &timetable.empty;
    let days: Vec<u8> = if empty.weekend_empty {
        (1..=5).collect()
    } else {
        (1..=7).collect()
    };

    let mut rows: Vec<&str> = DAILY_BLOCKS.to_vec();
    if empty.period5_empty {
        rows.retain(|b| *b != "0910");
    }
    if !empty.period6_empty {
        rows.push(EVENING_BLOCK);
    }

    let mut out = String::new();
    out.push_str("节次");
    for day in &days {
        out.push_str(&format!("\t{}", slot::day_label(*day).unwrap_or("?")));
    }
    out.push('\n');

    for block in &rows {
        out.push_str(&SlotKey::new(1, *block).period_label());
        for day in &days {
            let cell = timetable
                .classes
                .at(*day, block)
                .map(|entries| entries.iter().map(&label).collect::<Vec<_>>().join(" / "))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!("\t{}", cell));
        }
        out.push('\n');
    }

    let extras: Vec<_> = timetable
        .classes
        .iter()
        .filter(|(key, _)| !days.contains(&key.day) || !rows.contains(&key.block.as_str()))
        .collect();
    if !extras.is_empty() {
        out.push_str("其他时段:\n");
        for (key, entries) in extras {
            for entry in entries {
                out.push_str(&format!(
                    "  {} {} {}\n",
                    key.day_label().unwrap_or("?"),
                    key.period_label(),
                    label(entry)
                ));
            }
        }
    }

    out
}

pub fn render_semesters(choices: &[SemesterChoice]) -> String {
    choices
        .iter()
        .map(|c| {
            if c.is_current {
                format!("[{}]", c.semester)
            } else {
                c.semester.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_student(view: &StudentView) -> String {
    let profile = view.profile();
    let mut out = format!(
        "{} ({})  {} {}\n",
        profile.name, profile.sid, profile.faculty, profile.class_name
    );

    match view {
        StudentView::Full { timetable, .. } => {
            out.push_str(&format!("学期: {}\n", render_semesters(&timetable.available_semesters)));
            out.push_str(&render_timetable(timetable, |card| {
                let teachers = teacher_list_to_str(&card.teachers);
                if teachers.is_empty() {
                    format!("{}@{}", card.name, card.room)
                } else {
                    format!("{}@{}({})", card.name, card.room, teachers)
                }
            }));
        }
        StudentView::Blocked {
            available_semesters,
            no_import_to_calender,
            ..
        } => {
            out.push_str(&format!("学期: {}\n", render_semesters(available_semesters)));
            out.push_str("该学生设置了隐私保护，课表不公开。\n");
            if *no_import_to_calender {
                out.push_str("该学生不允许导入其课表到日历。\n");
            }
        }
    }

    out
}

pub fn render_teacher(page: &TeacherPage) -> String {
    let mut out = format!(
        "{} {} ({})  {}\n",
        page.name, page.title, page.tid, page.faculty
    );
    out.push_str(&format!(
        "学期: {}\n",
        render_semesters(&page.timetable.available_semesters)
    ));
    out.push_str(&render_timetable(&page.timetable, |lesson| {
        format!("{}@{}", lesson.name, lesson.room)
    }));
    out
}

pub fn render_room(page: &RoomPage) -> String {
    let mut out = format!(
        "{} ({})  {} {}\n",
        page.name, page.rid, page.campus, page.building
    );
    out.push_str(&format!(
        "学期: {}\n",
        render_semesters(&page.timetable.available_semesters)
    ));
    out.push_str(&render_timetable(&page.timetable, |lesson| {
        format!("{}({})", lesson.name, teacher_list_to_str(&lesson.teachers))
    }));
    out
}

pub fn render_course(page: &CoursePage) -> String {
    let mut out = format!("{} [{}]\n", page.course_name, page.course_type);
    out.push_str(&format!(
        "时间: {} {}  周次: {}  学时: {}\n",
        page.course_day, page.course_time, page.week, page.study_hour
    ));
    out.push_str(&format!("教室: {}  教师: {}\n", page.room, page.course_teacher));
    if page.show_heban {
        out.push_str(&format!("合班: {}\n", page.heban_name));
    }
    out.push_str(&format!("学生 ({}人):\n", page.student_count));
    for [name, sid, deputy, class_name] in &page.students {
        out.push_str(&format!("  {}\t{}\t{}\t{}\n", name, sid, deputy, class_name));
    }
    out
}

pub fn render_people(students: &[StudentHit], teachers: &[TeacherHit]) -> String {
    let mut out = format!("找到 {} 名学生、{} 名老师:\n", students.len(), teachers.len());
    for s in students {
        out.push_str(&format!(
            "  学生 {} ({}) {} {}\n",
            s.name, s.sid, s.deputy, s.class_name
        ));
    }
    for t in teachers {
        out.push_str(&format!("  老师 {} ({}) {} {}\n", t.name, t.tid, t.unit, t.title));
    }
    out
}

pub fn render_daily(schedule: &MultiPeopleSchedule, unresolved: &[String]) -> String {
    let mut out = match schedule.week {
        Some(week) => format!("{} (第{}周)\n", schedule.date, week),
        None => format!("{} (不在学期内)\n", schedule.date),
    };

    for (identifier, day) in schedule.accessible_people.iter().zip(&schedule.schedules) {
        out.push_str(identifier);
        for event in day.values() {
            match event {
                Some(event) => out.push_str(&format!("\t{}@{}", event.name, event.room)),
                None => out.push_str("\t-"),
            }
        }
        out.push('\n');
    }

    if !schedule.inaccessible_people.is_empty() {
        out.push_str(&format!(
            "无权查看: {}\n",
            schedule.inaccessible_people.join(", ")
        ));
    }
    if !unresolved.is_empty() {
        out.push_str(&format!("未找到: {}\n", unresolved.join(", ")));
    }
    out
}

pub fn render_available_rooms(result: &AvailableRooms) -> String {
    let query = &result.query;
    let key = slot::decode(&query.session).ok();
    let mut out = format!(
        "{} {} {} (第{}周 {} {}) 空闲教室 {} 间\n",
        query.campus,
        query.building,
        query.date,
        query.week,
        key.as_ref().and_then(SlotKey::day_label).unwrap_or("?"),
        key.as_ref().map(SlotKey::period_label).unwrap_or_default(),
        result.rooms.len()
    );
    for room in &result.rooms {
        out.push_str(&format!("  {}\n", room.name));
    }
    out
}
