use super::*;
use crate::{TeacherEntry, slot::SlotKey};

fn record(name: &str, lesson: &str) -> LessonRecord {
    LessonRecord {
        name: name.to_string(),
        room: "A座101".to_string(),
        room_id: "0310101".to_string(),
        lesson: lesson.to_string(),
        week_string: "1-16/全周".to_string(),
        weeks: (1..=16).collect(),
        teachers: vec![TeacherEntry::new("张老师", "t1", "讲师")],
        cid: format!("C-{}", name),
    }
}

#[test]
fn test_empty_input() {
    let grid = build(&Vec::<LessonRecord>::new());
    assert!(grid.is_empty());
    assert_eq!(grid.len(), 0);
    assert_eq!(grid.skipped(), 0);
}

#[test]
fn test_single_record() {
    let records = vec![record("高等数学", "30102")];
    let grid = build(&records);

    assert_eq!(grid.len(), 1);
    assert_eq!(grid.bucket_count(), 1);

    let cards = grid.at(3, "0102").expect("周三第1-2节应有课");
    assert_eq!(cards[0].name, "高等数学");
    assert_eq!(cards[0].room_id, "0310101");
    assert_eq!(cards[0].week, "1-16/全周");
}

#[test]
fn test_overlapping_records_share_bucket_in_input_order() {
    let records = vec![
        record("大学英语", "10304"),
        record("线性代数", "20102"),
        record("大学英语(合班)", "10304"),
    ];
    let grid = build(&records);

    assert_eq!(grid.len(), 3);
    assert_eq!(grid.bucket_count(), 2);

    let cards = grid.get(&SlotKey::new(1, "0304")).unwrap();
    let names: Vec<_> = cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["大学英语", "大学英语(合班)"]);

    let overlapping: Vec<_> = grid.overlapping().map(|(k, _)| k.clone()).collect();
    assert_eq!(overlapping, vec![SlotKey::new(1, "0304")]);
}

#[test]
fn test_malformed_codes_are_skipped() {
    let records = vec![
        record("正常课程", "40506"),
        record("坏编码", "abc"),
        record("四位编码", "1010"),
        record("另一门正常课程", "40506"),
    ];
    let grid = build(&records);

    assert_eq!(grid.len(), 2);
    assert_eq!(grid.skipped(), 2);
    assert!(grid.iter().all(|(_, cards)| cards.iter().all(|c| !c.name.contains("编码"))));
}

#[test]
fn test_entry_count_matches_well_formed_records() {
    let codes = ["10102", "10102", "20304", "70910", "61112", "x", "50506", "3010"];
    let records: Vec<_> = codes
        .iter()
        .enumerate()
        .map(|(i, code)| record(&format!("课程{}", i), code))
        .collect();
    let grid = build(&records);

    let well_formed = codes
        .iter()
        .filter(|c| crate::slot::decode(c).is_ok())
        .count();
    assert_eq!(grid.len(), well_formed);
    assert_eq!(grid.len() + grid.skipped(), records.len());
}

#[test]
fn test_build_with_custom_entry() {
    let records = vec![record("操作系统", "20506"), record("编译原理", "20708")];
    let grid = build_with(&records, |r| r.cid.clone());

    assert_eq!(grid.at(2, "0506"), Some(&["C-操作系统".to_string()][..]));
    assert_eq!(grid.at(2, "0708"), Some(&["C-编译原理".to_string()][..]));
    assert_eq!(grid.at(2, "0910"), None);
}

#[test]
fn test_iteration_is_ordered() {
    let records = vec![
        record("c", "50102"),
        record("a", "10910"),
        record("b", "10102"),
    ];
    let grid = build(&records);

    let keys: Vec<_> = grid.keys().map(SlotKey::code).collect();
    assert_eq!(keys, vec!["10102", "10910", "50102"]);
}
