use std::fmt;

use super::DomainError;

/// 1日あたりの基本延滞料金（セント）
pub const BASE_FEE_PER_DAY_CENTS: u64 = 50;

/// ベストセラー書籍の割増率（%）
pub const BESTSELLER_MULTIPLIER_PERCENT: u64 = 150;

/// プレミアム会員の割引率（%）
pub const PREMIUM_MULTIPLIER_PERCENT: u64 = 80;

/// 延滞料金
///
/// 浮動小数点の誤差を避けるため、セント単位の整数で保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct LateFee(u64);

impl LateFee {
    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    /// 小数表現（例: 4.20 → `4.2`）
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for LateFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// 純粋関数：延滞料金を計算する
///
/// ビジネスルール：
/// - 基本料金は延滞日数 × 0.50
/// - ベストセラーは1.5倍
/// - プレミアム会員は0.8倍
/// - 小数第2位で四捨五入（half-up）
///
/// # エラー
/// 延滞日数が負の場合は`DomainError::NegativeOverdueDays`を返す
pub fn calculate_dynamic_late_fee(
    overdue_days: i64,
    is_bestseller: bool,
    is_premium_user: bool,
) -> Result<LateFee, DomainError> {
    if overdue_days < 0 {
        return Err(DomainError::NegativeOverdueDays);
    }

    let bestseller_percent = if is_bestseller {
        BESTSELLER_MULTIPLIER_PERCENT
    } else {
        100
    };
    let premium_percent = if is_premium_user {
        PREMIUM_MULTIPLIER_PERCENT
    } else {
        100
    };

    // 百分率2回分（10_000）で割り戻す前の値。u128なら桁あふれしない。
    let scaled = overdue_days as u128
        * u128::from(BASE_FEE_PER_DAY_CENTS)
        * u128::from(bestseller_percent)
        * u128::from(premium_percent);
    let cents = (scaled + 5_000) / 10_000;

    Ok(LateFee(u64::try_from(cents).unwrap_or(u64::MAX)))
}
