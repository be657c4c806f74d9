//! 游戏错误处理模块
//!
//! 处理遭遇生成、序列战斗状态机、最高分存储与配置加载过程中可能出现的错误。

use thiserror::Error;

/// 游戏运行过程中可能出现的错误类型
#[derive(Debug, Error)]
pub enum GameError {
    /// 存储系统错误
    #[error("Storage error: {0}")]
    StorageError(#[from] anyhow::Error),

    /// IO操作错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// 配置文件错误
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),

    /// 最高分文件内容不是十进制整数
    #[error("Invalid high score record: {0:?}")]
    InvalidHighScore(String),

    /// 关卡怪物池为空
    #[error("Monster pool for level {level} is empty")]
    EmptyMonsterPool { level: u32 },

    /// 关卡主题表为空
    #[error("No level themes configured")]
    NoLevelThemes,

    /// 当前没有进行中的遭遇
    #[error("No active encounter")]
    NoActiveEncounter,

    /// 对手动作尚未全部展示，玩家暂不能出招
    #[error("Player input is locked")]
    InputLocked,

    /// 没有可用的楼梯
    #[error("Stairs are not available")]
    StairsUnavailable,

    /// 本局已结束
    #[error("The run has already ended")]
    RunEnded,

    /// 挑战码无法解析
    #[error("Malformed challenge code: {0:?}")]
    MalformedChallenge(String),

    /// 用户输入错误
    #[error("Input error: {0}")]
    InputError(String),
}

/// 处理游戏错误并转换为用户友好的消息
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::MalformedChallenge(_) => "Unverified challenge link, score hidden.".to_string(),
        GameError::InvalidHighScore(_) => "High score record is unreadable, starting from 0".to_string(),
        GameError::IoError(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "Save file not found".to_string(),
            std::io::ErrorKind::PermissionDenied => "No permission to access the save file".to_string(),
            _ => format!("IO error: {}", e),
        },
        GameError::StairsUnavailable => "There are no stairs here yet".to_string(),
        _ => error.to_string(),
    }
}
