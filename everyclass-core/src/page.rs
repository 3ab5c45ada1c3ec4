//! 学生、教师、教室课表页面的数据组装
//!
//! 每个页面都走同样的流程：构建课表 → 检查空列 → 生成学期列表，
//! 学生页面额外修复教师列表并按隐私设置选择展示方式。

use serde::Serialize;

use crate::{
    LessonCard, LessonRecord, TeacherEntry,
    api::{RoomResponse, StudentResponse, TeacherResponse},
    columns::{self, EmptinessFlags},
    grid::{self, Grid},
    privacy::{self, PrivacySettings, ViewMode},
    semester::{self, SemesterChoice},
    teacher,
};

/// 课表部分，三种页面共用
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timetable<E = LessonCard> {
    pub classes: Grid<E>,
    pub empty: EmptinessFlags,
    pub available_semesters: Vec<SemesterChoice>,
    pub current_semester: String,
}

impl<E> Timetable<E> {
    fn assemble<F>(records: &[LessonRecord], current: &str, semesters: &[String], to_entry: F) -> Self
    where
        F: FnMut(&LessonRecord) -> E,
    {
        let classes = grid::build_with(records, to_entry);
        let empty = columns::analyze(&classes);

        Self {
            classes,
            empty,
            available_semesters: semester::resolve(current, semesters),
            current_semester: current.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentProfile {
    pub name: String,
    pub sid: String,
    pub faculty: String,
    pub class_name: String,
}

/// 学生页面
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum StudentView {
    Full {
        profile: StudentProfile,
        timetable: Timetable,
    },
    /// 学生开启了隐私保护，不展示课表
    Blocked {
        profile: StudentProfile,
        available_semesters: Vec<SemesterChoice>,
        current_semester: String,
        no_import_to_calender: bool,
    },
}

impl StudentView {
    /// `sid` 使用请求中的学号，而不是响应中的
    pub fn assemble(
        response: &StudentResponse,
        sid: &str,
        current: &str,
        settings: &PrivacySettings,
    ) -> Self {
        let profile = StudentProfile {
            name: response.name.clone(),
            sid: sid.to_string(),
            faculty: response.deputy.clone(),
            class_name: response.class_name.clone(),
        };

        let selection = privacy::select_view(settings);
        match selection.mode {
            ViewMode::Blocked => {
                tracing::info!(sid, "学生开启了隐私保护");
                Self::Blocked {
                    profile,
                    available_semesters: semester::resolve(current, &response.semester_list),
                    current_semester: current.to_string(),
                    no_import_to_calender: selection.suppress_calendar_import,
                }
            }
            ViewMode::Full => Self::Full {
                profile,
                timetable: Timetable::assemble(
                    &response.courses,
                    current,
                    &response.semester_list,
                    |record| LessonCard {
                        teachers: teacher::dedupe(record.teachers.iter().cloned()),
                        ..LessonCard::from(record)
                    },
                ),
            },
        }
    }

    pub fn profile(&self) -> &StudentProfile {
        match self {
            Self::Full { profile, .. } | Self::Blocked { profile, .. } => profile,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}

/// 教师页面的课程，不展示教师
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherLesson {
    pub name: String,
    pub week: String,
    pub room: String,
    pub room_id: String,
    pub cid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherPage {
    pub name: String,
    pub tid: String,
    pub faculty: String,
    pub title: String,
    pub timetable: Timetable<TeacherLesson>,
}

impl TeacherPage {
    pub fn assemble(response: &TeacherResponse, tid: &str, current: &str) -> Self {
        Self {
            name: response.name.clone(),
            tid: tid.to_string(),
            faculty: response.unit.clone(),
            title: response.title.clone(),
            timetable: Timetable::assemble(
                &response.courses,
                current,
                &response.semester_list,
                |record| TeacherLesson {
                    name: record.name.clone(),
                    week: record.week_string.clone(),
                    room: record.room.clone(),
                    room_id: record.room_id.clone(),
                    cid: record.cid.clone(),
                },
            ),
        }
    }
}

/// 教室页面的课程
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomLesson {
    pub name: String,
    pub week: String,
    pub teachers: Vec<TeacherEntry>,
    pub location: String,
    pub cid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomPage {
    pub name: String,
    pub rid: String,
    pub campus: String,
    pub building: String,
    pub timetable: Timetable<RoomLesson>,
}

impl RoomPage {
    pub fn assemble(response: &RoomResponse, rid: &str, current: &str) -> Self {
        Self {
            name: response.name.clone(),
            rid: rid.to_string(),
            campus: response.campus.clone(),
            building: response.building.clone(),
            timetable: Timetable::assemble(
                &response.courses,
                current,
                &response.semester_list,
                |record| RoomLesson {
                    name: record.name.clone(),
                    week: record.week_string.clone(),
                    teachers: record.teachers.clone(),
                    location: record.room.clone(),
                    cid: record.cid.clone(),
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::privacy::{IMPORT_TO_CALENDER, SHOW_TABLE_ON_PAGE};

    fn lesson(name: &str, code: &str, teachers: Vec<TeacherEntry>) -> LessonRecord {
        LessonRecord {
            name: name.to_string(),
            room: "A101".to_string(),
            room_id: "r1".to_string(),
            lesson: code.to_string(),
            week_string: "1-16".to_string(),
            weeks: (1..=16).collect(),
            teachers,
            cid: format!("C-{}", name),
        }
    }

    fn student_response() -> StudentResponse {
        StudentResponse {
            name: "张三".to_string(),
            sid: "3901160407".to_string(),
            deputy: "计算机学院".to_string(),
            class_name: "计科1801".to_string(),
            courses: vec![
                lesson(
                    "高等数学",
                    "10102",
                    vec![
                        TeacherEntry::new("李四", "t1", "未定"),
                        TeacherEntry::new("李四", "t1", "教授"),
                    ],
                ),
                lesson("体育", "60304", vec![]),
                lesson("坏数据", "1x102", vec![]),
            ],
            semester_list: vec!["2022-2".to_string(), "2023-1".to_string()],
        }
    }

    #[test]
    fn test_student_full_view() {
        let view = StudentView::assemble(
            &student_response(),
            "3901160407",
            "2023-1",
            &PrivacySettings::new(),
        );

        let StudentView::Full { profile, timetable } = view else {
            panic!("expected full view");
        };
        assert_eq!(profile.faculty, "计算机学院");
        assert_eq!(timetable.classes.len(), 2);
        assert!(!timetable.empty.weekend_empty);
        assert!(timetable.empty.period5_empty);
        assert!(timetable.available_semesters[1].is_current);

        let cards = timetable.classes.at(1, "0102").unwrap();
        assert_eq!(cards[0].teachers, vec![TeacherEntry::new("李四", "t1", "")]);
    }

    #[test]
    fn test_student_blocked_view() {
        let settings: PrivacySettings = [SHOW_TABLE_ON_PAGE, IMPORT_TO_CALENDER]
            .into_iter()
            .collect();
        let view = StudentView::assemble(&student_response(), "3901160407", "2023-1", &settings);

        assert!(view.is_blocked());
        assert_eq!(view.profile().name, "张三");
        match view {
            StudentView::Blocked {
                available_semesters,
                no_import_to_calender,
                ..
            } => {
                assert!(no_import_to_calender);
                assert_eq!(available_semesters.len(), 2);
            }
            StudentView::Full { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_teacher_page() {
        let response = TeacherResponse {
            name: "李四".to_string(),
            tid: "t1".to_string(),
            unit: "数学学院".to_string(),
            title: "教授".to_string(),
            courses: vec![lesson("线性代数", "30910", vec![])],
            semester_list: vec!["2023-1".to_string()],
        };

        let page = TeacherPage::assemble(&response, "t1", "2023-1");
        assert_eq!(page.faculty, "数学学院");
        assert!(!page.timetable.empty.period5_empty);
        assert!(page.timetable.empty.weekend_empty);
        assert_eq!(page.timetable.classes.at(3, "0910").unwrap()[0].name, "线性代数");
    }

    #[test]
    fn test_room_page_unknown_semester() {
        let response = RoomResponse {
            name: "A101".to_string(),
            rid: "r1".to_string(),
            campus: "南校区".to_string(),
            building: "A座".to_string(),
            courses: vec![lesson(
                "大学物理",
                "51112",
                vec![TeacherEntry::new("王五", "t9", "讲师")],
            )],
            semester_list: vec!["2022-2".to_string()],
        };

        let page = RoomPage::assemble(&response, "r1", "2099-1");
        assert!(page.timetable.available_semesters.iter().all(|s| !s.is_current));
        assert!(!page.timetable.empty.period6_empty);
        let lesson = &page.timetable.classes.at(5, "1112").unwrap()[0];
        assert_eq!(lesson.location, "A101");
        assert_eq!(lesson.teachers.len(), 1);
    }

    #[test]
    fn test_pages_serialize_to_json() {
        let view = StudentView::assemble(
            &student_response(),
            "3901160407",
            "2023-1",
            &PrivacySettings::new(),
        );
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["view"], "full");
        assert_eq!(
            json["timetable"]["classes"]["buckets"]["10102"][0]["name"],
            "高等数学"
        );

        let teacher = TeacherResponse {
            name: "李四".to_string(),
            tid: "t1".to_string(),
            unit: String::new(),
            title: String::new(),
            courses: vec![lesson("线性代数", "10102", vec![])],
            semester_list: vec!["2023-1".to_string()],
        };
        let page = TeacherPage::assemble(&teacher, "t1", "2023-1");
        assert!(serde_json::to_string_pretty(&page).unwrap().contains("\"10102\""));

        let room = RoomResponse {
            name: "A101".to_string(),
            rid: "r1".to_string(),
            campus: String::new(),
            building: String::new(),
            courses: vec![lesson("大学物理", "51112", vec![])],
            semester_list: vec![],
        };
        let page = RoomPage::assemble(&room, "r1", "2023-1");
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json["timetable"]["classes"]["buckets"]["51112"][0]["location"],
            "A101"
        );
    }
}
