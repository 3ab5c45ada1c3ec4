use std::collections::HashSet;

use crate::TeacherEntry;

/// 上游用来表示"职称未定"的占位值
pub const UNDETERMINED_TITLE: &str = "未定";

/// 修复教师列表：清除"未定"职称，并按教工号去重（保留第一次出现的条目）
pub fn dedupe<I>(teachers: I) -> Vec<TeacherEntry>
where
    I: IntoIterator<Item = TeacherEntry>,
{
    let mut seen = HashSet::new();

    teachers
        .into_iter()
        .map(|mut teacher| {
            if teacher.title == UNDETERMINED_TITLE {
                teacher.title.clear();
            }
            teacher
        })
        .filter(|teacher| seen.insert(teacher.tid.clone()))
        .collect()
}

/// 教师列表的展示文本，如 "张三 教授、李四"
pub fn teacher_list_to_str(teachers: &[TeacherEntry]) -> String {
    teachers
        .iter()
        .map(|t| {
            if t.title.is_empty() || t.title == UNDETERMINED_TITLE {
                t.name.clone()
            } else {
                format!("{} {}", t.name, t.title)
            }
        })
        .collect::<Vec<_>>()
        .join("、")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_first_occurrence_wins() {
        let teachers = vec![
            TeacherEntry::new("张三", "t1", "未定"),
            TeacherEntry::new("张三", "t1", "教授"),
            TeacherEntry::new("李四", "t2", "讲师"),
        ];

        let fixed = dedupe(teachers);
        assert_eq!(
            fixed,
            vec![
                TeacherEntry::new("张三", "t1", ""),
                TeacherEntry::new("李四", "t2", "讲师"),
            ]
        );
    }

    #[test]
    fn test_dedupe_preserves_order() {
        let teachers = vec![
            TeacherEntry::new("王五", "t3", "副教授"),
            TeacherEntry::new("李四", "t2", "讲师"),
            TeacherEntry::new("王五", "t3", "教授"),
            TeacherEntry::new("赵六", "t4", "未定"),
        ];

        let tids: Vec<_> = dedupe(teachers).into_iter().map(|t| t.tid).collect();
        assert_eq!(tids, vec!["t3", "t2", "t4"]);
    }

    #[test]
    fn test_dedupe_empty() {
        assert!(dedupe(Vec::new()).is_empty());
    }

    #[test]
    fn test_teacher_list_to_str() {
        let teachers = vec![
            TeacherEntry::new("张三", "t1", "教授"),
            TeacherEntry::new("李四", "t2", ""),
            TeacherEntry::new("王五", "t3", "未定"),
        ];
        assert_eq!(teacher_list_to_str(&teachers), "张三 教授、李四、王五");
        assert_eq!(teacher_list_to_str(&[]), "");
    }
}
