use std::path::PathBuf;

use everyclass_core::{Error, Result};

use crate::{
    privacy_store::{JsonPrivacyStore, MemoryPrivacyStore, PrivacyStore},
    source::{ApiClientBuilder, FileSource, ScheduleSource},
};

/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 数据来源配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Api { base_url: String, timeout_secs: u64 },
    Files { root: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: SourceConfig,
    pub privacy_file: Option<PathBuf>,
}

impl Config {
    /// 本地目录优先于 API 地址；两者都没有时报错
    pub fn resolve(
        api_server: Option<String>,
        data_dir: Option<PathBuf>,
        timeout_secs: Option<u64>,
        privacy_file: Option<PathBuf>,
    ) -> Result<Self> {
        let source = match (data_dir, api_server) {
            (Some(root), _) => SourceConfig::Files { root },
            (None, Some(base_url)) if !base_url.trim().is_empty() => SourceConfig::Api {
                base_url: base_url.trim().to_string(),
                timeout_secs: timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
            _ => {
                return Err(Error::Config(
                    "either --api-server (EVERYCLASS_API_SERVER) or --data-dir is required"
                        .to_string(),
                ));
            }
        };

        Ok(Self {
            source,
            privacy_file,
        })
    }

    pub fn build_source(&self) -> Result<Box<dyn ScheduleSource>> {
        match &self.source {
            SourceConfig::Api {
                base_url,
                timeout_secs,
            } => {
                tracing::info!("使用 API 服务器: {}", base_url);
                let client = ApiClientBuilder::new(base_url.as_str())
                    .timeout(*timeout_secs)
                    .build()?;
                Ok(Box::new(client))
            }
            SourceConfig::Files { root } => {
                tracing::info!("使用本地数据目录: {}", root.display());
                Ok(Box::new(FileSource::new(root.clone())))
            }
        }
    }

    pub fn build_privacy_store(&self) -> Box<dyn PrivacyStore> {
        match &self.privacy_file {
            Some(path) => Box::new(JsonPrivacyStore::new(path.clone())),
            None => {
                tracing::debug!("未配置隐私设置文件，所有学生按无隐私设置处理");
                Box::new(MemoryPrivacyStore::new())
            }
        }
    }
}
