// src/save/src/challenge.rs
//! 挑战码
//!
//! 把最终得分和玩家名字混淆成一串字母数字，朋友拿到名字和挑战码就能还原得分。
//! 只能防止随手改数字，算不上加密。

use serde::{Deserialize, Serialize};

const MODULUS: u128 = 1_000_000_007;
const MULTIPLIER: u128 = 1_299_827;
const OFFSET: u128 = 764_321;
const PEPPER: u128 = 0x5a3c_7f1d;
const NAME_MASK_FACTOR: u128 = 12_345;
/// 超过这个长度的挑战码不可能由编码产生
const MAX_CODE_LEN: usize = 12;

/// 没有名字时使用的发起人
pub const ANONYMOUS_SENDER: &str = "A friend";

/// 名字的 UTF-16 码元之和
fn name_sum(name: &str) -> u128 {
    name.encode_utf16().map(u128::from).sum()
}

fn name_mask(nsum: u128) -> u128 {
    (nsum * NAME_MASK_FACTOR + PEPPER) % MODULUS
}

fn mod_pow(mut base: u128, mut exp: u128, modulus: u128) -> u128 {
    base %= modulus;
    let mut result = 1;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % modulus;
        }
        base = base * base % modulus;
        exp >>= 1;
    }
    result
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        let d = (value % 36) as u32;
        digits.push(char::from_digit(d, 36).unwrap_or('0'));
        value /= 36;
    }
    digits.iter().rev().collect()
}

/// 数字 0-9 换成大写字母 K-T，其余保持小写
fn digits_to_letters(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from(b'K' + d as u8),
            None => c,
        })
        .collect()
}

fn letters_to_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'K'..='T' => char::from(b'0' + (c as u8 - b'K')),
            _ => c,
        })
        .collect()
}

/// 把得分编码成挑战码
///
/// 得分需小于 1000000007 才能被正确还原。
pub fn encode_score(score: u64, name: &str) -> String {
    let nsum = name_sum(name);
    let seed = (u128::from(score) * MULTIPLIER + OFFSET + nsum) % MODULUS;
    let obfuscated = seed ^ name_mask(nsum);
    digits_to_letters(&to_base36(obfuscated))
}

/// 用发起人名字还原得分，无法解析时返回 `None`
pub fn decode_score(code: &str, name: &str) -> Option<u64> {
    let normalized = letters_to_digits(code.trim());
    if normalized.is_empty() || normalized.len() > MAX_CODE_LEN {
        return None;
    }
    let mut obfuscated: u128 = 0;
    for c in normalized.chars() {
        obfuscated = obfuscated * 36 + u128::from(c.to_digit(36)?);
    }

    let nsum = name_sum(name);
    let seed = obfuscated ^ name_mask(nsum);
    let value = (seed % MODULUS + 2 * MODULUS - OFFSET - nsum % MODULUS) % MODULUS;
    let inverse = mod_pow(MULTIPLIER, MODULUS - 2, MODULUS);
    u64::try_from(value * inverse % MODULUS).ok()
}

/// 一局结束后可以分享的挑战
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub code: String,
    pub from: String,
}

impl Challenge {
    /// 为本局得分生成挑战，名字为空时使用匿名发起人
    pub fn issue(score: u64, name: &str) -> Self {
        let from = match name.trim() {
            "" => ANONYMOUS_SENDER.to_string(),
            trimmed => trimmed.to_string(),
        };
        Self {
            code: encode_score(score, &from),
            from,
        }
    }

    pub fn new(code: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            from: from.into(),
        }
    }

    pub fn score(&self) -> Option<u64> {
        decode_score(&self.code, &self.from)
    }

    /// 展示给收到挑战的玩家
    pub fn message(&self) -> String {
        match self.score() {
            Some(score) => format!("{} has challenged you to beat a score of {}", self.from, score),
            None => "Unverified challenge link, score hidden.".to_string(),
        }
    }
}
