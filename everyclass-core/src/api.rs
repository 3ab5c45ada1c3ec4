//! 上游 API 响应结构
//!
//! 上游返回的 JSON 在进入核心逻辑前一次性反序列化为这些类型，
//! 字段缺失或类型不符会直接得到 [`crate::Error::Json`]。

use serde::{Deserialize, Serialize};

use crate::{LessonRecord, Result, TeacherEntry};

/// 学生课表响应（`/v1/student/{sid}/{semester}`）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentResponse {
    pub name: String,
    pub sid: String,
    /// 院系
    #[serde(default)]
    pub deputy: String,
    #[serde(rename = "class", default)]
    pub class_name: String,
    #[serde(rename = "course", default)]
    pub courses: Vec<LessonRecord>,
    #[serde(default)]
    pub semester_list: Vec<String>,
}

/// 教师课表响应（`/v1/teacher/{tid}/{semester}`）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherResponse {
    pub name: String,
    pub tid: String,
    /// 所属单位
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "course", default)]
    pub courses: Vec<LessonRecord>,
    #[serde(default)]
    pub semester_list: Vec<String>,
}

/// 教室课表响应（`/v1/room/{rid}/{semester}`）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomResponse {
    pub name: String,
    pub rid: String,
    #[serde(default)]
    pub campus: String,
    #[serde(default)]
    pub building: String,
    #[serde(rename = "course", default)]
    pub courses: Vec<LessonRecord>,
    #[serde(default)]
    pub semester_list: Vec<String>,
}

/// 课程详情中的学生
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseStudent {
    pub name: String,
    pub sid: String,
    #[serde(default)]
    pub deputy: String,
    #[serde(rename = "class", default)]
    pub class_name: String,
}

/// 课程详情响应（`/v1/course/{cid}/{semester}`）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseResponse {
    pub name: String,
    pub cid: String,
    pub lesson: String,
    /// 学时
    #[serde(default)]
    pub hour: u32,
    /// 合班名称
    #[serde(rename = "class", default)]
    pub class_name: String,
    #[serde(rename = "type", default)]
    pub course_type: String,
    #[serde(default)]
    pub week_string: String,
    #[serde(default)]
    pub room: String,
    #[serde(rename = "teacher", default)]
    pub teachers: Vec<TeacherEntry>,
    #[serde(rename = "student", default)]
    pub students: Vec<CourseStudent>,
}

/// 搜索结果中的教室
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomHit {
    pub rid: String,
    pub name: String,
    #[serde(default)]
    pub semester: Vec<String>,
}

/// 搜索结果中的学生
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentHit {
    pub sid: String,
    pub name: String,
    #[serde(default)]
    pub deputy: String,
    #[serde(rename = "class", default)]
    pub class_name: String,
    #[serde(default)]
    pub semester: Vec<String>,
}

/// 搜索结果中的教师
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherHit {
    pub tid: String,
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub semester: Vec<String>,
}

/// 搜索响应（`/v1/search/{keyword}`）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub room: Vec<RoomHit>,
    #[serde(default)]
    pub student: Vec<StudentHit>,
    #[serde(default)]
    pub teacher: Vec<TeacherHit>,
}

/// 从 JSON 文本解析任意上游响应
pub fn from_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

/// 从 JSON 字节解析任意上游响应
pub fn from_slice<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}
