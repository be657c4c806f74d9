// src/save/src/lib.rs
//! 最高分存储与挑战码
//!
//! 只持久化一个十进制整数：本机的最高分。存储失败不会影响游戏，
//! 调用方拿到的是一条警告而不是错误。

pub mod challenge;

pub use crate::challenge::{Challenge, decode_score, encode_score};

use anyhow::Context;
use error::GameError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// 最高分记录的固定键名
pub const HIGH_SCORE_KEY: &str = "dd_high_score";

/// 最高分存储
pub trait HighScoreStore {
    /// 读取最高分，没有记录时为 0
    fn load(&self) -> Result<u64, GameError>;

    fn save(&mut self, score: u64) -> Result<(), GameError>;
}

/// 一局结束后最高分的变化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreUpdate {
    pub previous: u64,
    pub best: u64,
    pub is_new_best: bool,
    /// 读写失败时的提示，不影响结果
    pub warning: Option<String>,
}

/// 比较并保存最终得分（尽力而为）
///
/// 只有严格大于旧记录时才写入。读取失败按 0 处理。
pub fn record_final_score(store: &mut dyn HighScoreStore, score: u64) -> HighScoreUpdate {
    let mut warning = None;
    let previous = match store.load() {
        Ok(v) => v,
        Err(e) => {
            warning = Some(format!("Could not read high score: {}", e));
            0
        }
    };

    let is_new_best = score > previous;
    if is_new_best {
        if let Err(e) = store.save(score) {
            warning = Some(format!("Could not save high score: {}", e));
        }
    }

    HighScoreUpdate {
        previous,
        best: previous.max(score),
        is_new_best,
        warning,
    }
}

/// 读取最高分，失败时返回 0
pub fn load_or_zero(store: &dyn HighScoreStore) -> u64 {
    store.load().unwrap_or(0)
}

/// 以文件形式保存在 `<dir>/dd_high_score`
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    dir: PathBuf,
}

impl FileHighScoreStore {
    /// 创建存储，目录不存在时自动创建
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, GameError> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir).context("Failed to create save directory")?;
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(HIGH_SCORE_KEY)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<u64, GameError> {
        let path = self.path();
        if !path.exists() {
            return Ok(0);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read high score file: {:?}", path))?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }
        trimmed
            .parse::<u64>()
            .map_err(|_| GameError::InvalidHighScore(trimmed.to_string()))
    }

    fn save(&mut self, score: u64) -> Result<(), GameError> {
        let path = self.path();
        let temp_path = path.with_extension("tmp");
        let mut file =
            fs::File::create(&temp_path).context("Failed to create temporary high score file")?;
        write!(file, "{}", score).context("Failed to write high score")?;
        file.flush().context("Failed to flush high score")?;

        // 原子性重命名
        fs::rename(temp_path, path).context("Failed to commit high score file")?;
        Ok(())
    }
}

/// 仅存在于内存中的最高分，用于测试和无存档目录的情况
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    score: Option<u64>,
    fail_writes: bool,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self {
            score: Some(score),
            fail_writes: false,
        }
    }

    /// 之后的写入全部失败
    pub fn failing() -> Self {
        Self {
            score: None,
            fail_writes: true,
        }
    }

    pub fn stored(&self) -> Option<u64> {
        self.score
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<u64, GameError> {
        Ok(self.score.unwrap_or(0))
    }

    fn save(&mut self, score: u64) -> Result<(), GameError> {
        if self.fail_writes {
            return Err(GameError::StorageError(anyhow::anyhow!("storage is read-only")));
        }
        self.score = Some(score);
        Ok(())
    }
}
