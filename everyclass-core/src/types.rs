use serde::{Deserialize, Serialize};

/// 课程记录，对应上游接口返回的一节课
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRecord {
    /// 课程名称
    pub name: String,
    /// 教室名称
    pub room: String,
    /// 教室 ID
    #[serde(rename = "rid")]
    pub room_id: String,
    /// 时间编码，如 "10102" 表示周一第1-2节
    pub lesson: String,
    /// 周次描述，如 "1-16/全周"
    #[serde(rename = "week_string", default)]
    pub week_string: String,
    /// 上课周次列表
    #[serde(rename = "week", default)]
    pub weeks: Vec<u32>,
    /// 授课教师（教师视图中为空）
    #[serde(rename = "teacher", default)]
    pub teachers: Vec<TeacherEntry>,
    /// 课程 ID
    pub cid: String,
}

/// 教师条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherEntry {
    /// 教师姓名
    pub name: String,
    /// 教工号
    pub tid: String,
    /// 职称
    #[serde(default)]
    pub title: String,
}

impl TeacherEntry {
    pub fn new(name: impl Into<String>, tid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tid: tid.into(),
            title: title.into(),
        }
    }
}

/// 课表格子中展示的一节课
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonCard {
    pub name: String,
    pub teachers: Vec<TeacherEntry>,
    pub week: String,
    pub room: String,
    pub room_id: String,
    pub cid: String,
}

impl From<&LessonRecord> for LessonCard {
    fn from(record: &LessonRecord) -> Self {
        Self {
            name: record.name.clone(),
            teachers: record.teachers.clone(),
            week: record.week_string.clone(),
            room: record.room.clone(),
            room_id: record.room_id.clone(),
            cid: record.cid.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_record_from_upstream_json() {
        let json = r#"{
            "name": "高等数学A",
            "room": "A座101",
            "rid": "0310101",
            "lesson": "10102",
            "week_string": "1-16/全周",
            "week": [1, 2, 3],
            "teacher": [{"name": "张三", "tid": "t1", "title": "教授"}],
            "cid": "C0001"
        }"#;

        let record: LessonRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.room_id, "0310101");
        assert_eq!(record.weeks, vec![1, 2, 3]);
        assert_eq!(record.teachers[0].title, "教授");
    }

    #[test]
    fn test_lesson_record_optional_fields() {
        let json = r#"{"name": "体育", "room": "操场", "rid": "r1", "lesson": "30506", "cid": "C2"}"#;

        let record: LessonRecord = serde_json::from_str(json).unwrap();
        assert!(record.teachers.is_empty());
        assert!(record.weeks.is_empty());
        assert_eq!(record.week_string, "");
    }
}
