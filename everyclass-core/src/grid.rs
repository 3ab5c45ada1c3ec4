use std::collections::BTreeMap;

use serde::Serialize;

use crate::{LessonCard, LessonRecord, slot::SlotKey};

#[cfg(test)]
mod tests;

/// 课表：以 (星期, 节次块) 为键，每个格子可以有多节课（合班、重叠）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid<E = LessonCard> {
    buckets: BTreeMap<SlotKey, Vec<E>>,
    #[serde(skip)]
    skipped: usize,
}

impl<E> Grid<E> {
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
            skipped: 0,
        }
    }

    pub fn insert(&mut self, key: SlotKey, entry: E) {
        self.buckets.entry(key).or_default().push(entry);
    }

    pub fn get(&self, key: &SlotKey) -> Option<&[E]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// 按星期和节次块查找
    pub fn at(&self, day: u8, block: &str) -> Option<&[E]> {
        self.get(&SlotKey::new(day, block))
    }

    pub fn contains(&self, key: &SlotKey) -> bool {
        self.buckets.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &SlotKey> {
        self.buckets.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SlotKey, &[E])> {
        self.buckets.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// 所有格子中的课程总数
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// 因时间编码无法解析而被跳过的记录数
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// 有多节课的格子
    pub fn overlapping(&self) -> impl Iterator<Item = (&SlotKey, &[E])> {
        self.iter().filter(|(_, entries)| entries.len() > 1)
    }
}

impl<E> Default for Grid<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// 用默认的 [`LessonCard`] 构建课表
pub fn build<'a, I>(records: I) -> Grid<LessonCard>
where
    I: IntoIterator<Item = &'a LessonRecord>,
{
    build_with(records, LessonCard::from)
}

/// 构建课表，由 `to_entry` 决定每个格子里展示的内容
///
/// 时间编码无法解析的记录会被跳过并记录日志，不会中断整个课表的构建。
pub fn build_with<'a, I, E, F>(records: I, mut to_entry: F) -> Grid<E>
where
    I: IntoIterator<Item = &'a LessonRecord>,
    F: FnMut(&'a LessonRecord) -> E,
{
    let mut grid = Grid::new();

    for record in records {
        match crate::slot::decode(&record.lesson) {
            Ok(key) => grid.insert(key, to_entry(record)),
            Err(e) => {
                tracing::warn!(cid = %record.cid, name = %record.name, "跳过课程: {}", e);
                grid.skipped += 1;
            }
        }
    }

    for (key, entries) in grid.overlapping() {
        tracing::debug!("格子 {} 有 {} 节课重叠", key, entries.len());
    }

    grid
}
