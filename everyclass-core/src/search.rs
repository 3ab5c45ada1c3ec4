use serde::Serialize;

use crate::{
    api::{SearchResponse, StudentHit, TeacherHit},
    semester,
};

/// 搜索结果对应的资源
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// 教室，跳转到最新学期
    Room { rid: String, semester: String },
    /// 唯一的学生
    Student { sid: String, semester: String },
    /// 唯一的老师
    Teacher { tid: String, semester: String },
    /// 同名的多个学生/老师，由用户选择
    People {
        students: Vec<StudentHit>,
        teachers: Vec<TeacherHit>,
    },
    /// 找到了资源但没有可用学期
    NoSemester,
    /// 什么也没找到
    Nothing,
}

impl SearchOutcome {
    /// 埋点用的资源类型名
    pub fn resource_type(&self) -> &'static str {
        match self {
            Self::Room { .. } => "classroom",
            Self::Student { .. } => "single_student",
            Self::Teacher { .. } => "single_teacher",
            Self::People { .. } => "multiple_people",
            Self::NoSemester => "no_semester",
            Self::Nothing => "nothing",
        }
    }
}

/// 根据搜索结果决定查询哪种资源
///
/// 教室优先；只有一个学生或一个老师时直接跳转到其最新学期；
/// 其余有人员的情况交给用户选择。
pub fn resolve_search(response: &SearchResponse) -> SearchOutcome {
    let outcome = match (
        response.room.first(),
        response.student.as_slice(),
        response.teacher.as_slice(),
    ) {
        (Some(room), _, _) => match semester::latest(&room.semester) {
            Some(sem) => SearchOutcome::Room {
                rid: room.rid.clone(),
                semester: sem.to_string(),
            },
            None => SearchOutcome::NoSemester,
        },
        (None, [student], []) => match semester::latest(&student.semester) {
            Some(sem) => SearchOutcome::Student {
                sid: student.sid.clone(),
                semester: sem.to_string(),
            },
            None => SearchOutcome::NoSemester,
        },
        (None, [], [teacher]) => match semester::latest(&teacher.semester) {
            Some(sem) => SearchOutcome::Teacher {
                tid: teacher.tid.clone(),
                semester: sem.to_string(),
            },
            None => SearchOutcome::NoSemester,
        },
        (None, [], []) => SearchOutcome::Nothing,
        (None, students, teachers) => SearchOutcome::People {
            students: students.to_vec(),
            teachers: teachers.to_vec(),
        },
    };

    tracing::debug!(resource_type = outcome.resource_type(), "搜索结果已解析");
    outcome
}
