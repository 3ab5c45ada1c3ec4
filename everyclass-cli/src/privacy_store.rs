use std::{collections::HashMap, path::PathBuf};

use async_trait::async_trait;
use everyclass_core::{Error, Result, privacy::PrivacySettings};

/// 隐私设置存储
#[async_trait]
pub trait PrivacyStore: Send + Sync {
    /// 没有任何设置的学生返回空集合
    async fn get_privacy_settings(&self, sid: &str) -> Result<PrivacySettings>;
}

/// 内存中的隐私设置，未配置存储文件时使用
#[derive(Debug, Clone, Default)]
pub struct MemoryPrivacyStore {
    settings: HashMap<String, PrivacySettings>,
}

impl MemoryPrivacyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, sid: impl Into<String>, settings: PrivacySettings) {
        self.settings.insert(sid.into(), settings);
    }
}

#[async_trait]
impl PrivacyStore for MemoryPrivacyStore {
    async fn get_privacy_settings(&self, sid: &str) -> Result<PrivacySettings> {
        Ok(self.settings.get(sid).cloned().unwrap_or_default())
    }
}

/// JSON 文件中的隐私设置：`{"<学号>": ["show_table_on_page", ...]}`
#[derive(Debug, Clone)]
pub struct JsonPrivacyStore {
    path: PathBuf,
}

impl JsonPrivacyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<HashMap<String, PrivacySettings>> {
        let content = tokio::fs::read(&self.path).await.map_err(|e| {
            Error::Config(format!(
                "Failed to read privacy settings {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(serde_json::from_slice(&content)?)
    }
}

#[async_trait]
impl PrivacyStore for JsonPrivacyStore {
    async fn get_privacy_settings(&self, sid: &str) -> Result<PrivacySettings> {
        let mut all = self.load().await?;
        let settings = all.remove(sid).unwrap_or_default();
        tracing::debug!(sid, flags = settings.iter().count(), "已读取隐私设置");
        Ok(settings)
    }
}
