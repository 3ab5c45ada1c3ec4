use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 每个类别展示的课程数
pub const TOP_CLASSES_PER_CATEGORY: usize = 3;

/// 课程元信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseMeta {
    pub course_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// 课程类别，如 "经济"、"法律"
    pub main_category: String,
    /// 开课单位
    #[serde(default)]
    pub unit: Option<String>,
}

/// 教学班
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Klass {
    pub klass_id: String,
    pub course: CourseMeta,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub classes: Vec<Klass>,
}

/// 课程类别索引
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryIndex {
    pub categories: Vec<Category>,
    pub total_classes: usize,
}

impl CategoryIndex {
    /// 按类别分组，每个类别只保留评分最高的几门课，类别按首次出现的顺序排列
    pub fn build<I>(classes: I) -> Self
    where
        I: IntoIterator<Item = Klass>,
    {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut categories: Vec<Category> = Vec::new();
        let mut total_classes = 0;

        for klass in classes {
            total_classes += 1;
            let name = &klass.course.main_category;
            let index = match positions.get(name) {
                Some(&index) => index,
                None => {
                    positions.insert(name.clone(), categories.len());
                    categories.push(Category {
                        name: name.clone(),
                        classes: Vec::new(),
                    });
                    categories.len() - 1
                }
            };
            categories[index].classes.push(klass);
        }

        for category in &mut categories {
            category.classes.sort_by(|a, b| b.score.total_cmp(&a.score));
            category.classes.truncate(TOP_CLASSES_PER_CATEGORY);
        }

        Self {
            categories,
            total_classes,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }
}
