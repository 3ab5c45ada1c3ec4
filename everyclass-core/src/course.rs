use serde::Serialize;

use crate::{Result, api::CourseResponse, slot, teacher};

/// 课程详情页面
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoursePage {
    pub course_name: String,
    pub course_day: String,
    pub course_time: String,
    pub study_hour: u32,
    /// 合班名称为纯数字时不展示
    pub show_heban: bool,
    pub heban_name: String,
    pub course_type: String,
    pub week: String,
    pub room: String,
    pub course_teacher: String,
    pub students: Vec<[String; 4]>,
    pub student_count: usize,
    pub current_semester: String,
}

impl CoursePage {
    pub fn from_response(response: &CourseResponse, current: &str) -> Result<Self> {
        let key = slot::decode(&response.lesson)?;

        let students: Vec<[String; 4]> = response
            .students
            .iter()
            .map(|s| {
                [
                    s.name.clone(),
                    s.sid.clone(),
                    s.deputy.clone(),
                    s.class_name.clone(),
                ]
            })
            .collect();

        Ok(Self {
            course_name: response.name.clone(),
            course_day: key.day_label().unwrap_or_default().to_string(),
            course_time: key.period_label(),
            study_hour: response.hour,
            show_heban: !is_all_digits(&response.class_name),
            heban_name: response.class_name.clone(),
            course_type: with_course_suffix(&response.course_type),
            week: response.week_string.clone(),
            room: response.room.clone(),
            course_teacher: teacher::teacher_list_to_str(&response.teachers),
            student_count: students.len(),
            students,
            current_semester: current.to_string(),
        })
    }
}

/// 给"文化素质类"等课程类型加上"课"后缀
fn with_course_suffix(course_type: &str) -> String {
    if course_type.is_empty() || course_type.ends_with('课') {
        course_type.to_string()
    } else {
        format!("{}课", course_type)
    }
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TeacherEntry, api::CourseStudent};

    fn response(class_name: &str, course_type: &str) -> CourseResponse {
        CourseResponse {
            name: "数据结构".to_string(),
            cid: "C1".to_string(),
            lesson: "20304".to_string(),
            hour: 64,
            class_name: class_name.to_string(),
            course_type: course_type.to_string(),
            week_string: "1-16".to_string(),
            room: "A101".to_string(),
            teachers: vec![
                TeacherEntry::new("张三", "t1", "教授"),
                TeacherEntry::new("李四", "t2", ""),
            ],
            students: vec![CourseStudent {
                name: "王五".to_string(),
                sid: "s1".to_string(),
                deputy: "计算机学院".to_string(),
                class_name: "计科1801".to_string(),
            }],
        }
    }

    #[test]
    fn test_course_page() {
        let page = CoursePage::from_response(&response("计科1801-02", "专业必修"), "2023-1").unwrap();
        assert_eq!(page.course_day, "周二");
        assert_eq!(page.course_time, "第3-4节");
        assert_eq!(page.course_type, "专业必修课");
        assert!(page.show_heban);
        assert_eq!(page.course_teacher, "张三 教授、李四");
        assert_eq!(page.student_count, 1);
        assert_eq!(page.students[0][3], "计科1801");
    }

    #[test]
    fn test_course_type_suffix_not_doubled() {
        let page = CoursePage::from_response(&response("x", "文化素质课"), "2023-1").unwrap();
        assert_eq!(page.course_type, "文化素质课");
    }

    #[test]
    fn test_numeric_heban_hidden() {
        let page = CoursePage::from_response(&response("0012345", "选修"), "2023-1").unwrap();
        assert!(!page.show_heban);
    }

    #[test]
    fn test_malformed_lesson_is_error() {
        let mut resp = response("x", "选修");
        resp.lesson = "abc".to_string();
        assert!(matches!(
            CoursePage::from_response(&resp, "2023-1"),
            Err(crate::Error::MalformedSlotCode { .. })
        ));
    }
}
