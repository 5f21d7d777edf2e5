//! 对局配置
//!
//! 提供配置数据结构与 JSON 持久化

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use ttt_ai::BotConfig;
use ttt_core::{GameError, CLASSIC_SIZE};

/// 人机对局配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 棋盘边长
    pub board_size: usize,
    /// AI 配置
    pub bot: BotConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_size: CLASSIC_SIZE,
            bot: BotConfig::default(),
        }
    }
}

impl SessionConfig {
    /// 校验配置
    pub fn validate(&self) -> ttt_core::Result<()> {
        if self.board_size == 0 {
            return Err(GameError::InvalidSize {
                size: self.board_size,
            });
        }
        Ok(())
    }

    /// 从 JSON 字符串解析并校验
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content).context("解析配置失败")?;
        config.validate().context("配置无效")?;
        Ok(config)
    }

    /// 从文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;
        let config = Self::from_json_str(&content)
            .with_context(|| format!("配置文件无效: {:?}", path))?;

        tracing::info!("已加载配置: {:?}", path);
        Ok(config)
    }

    /// 从文件加载，失败时使用默认配置
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{:#}，使用默认配置", e);
                Self::default()
            }
        }
    }

    /// 保存到文件（格式化 JSON）
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("序列化配置失败")?;
        std::fs::write(path, content).with_context(|| format!("写入配置文件失败: {:?}", path))?;

        tracing::info!("配置已保存: {:?}", path);
        Ok(())
    }
}
