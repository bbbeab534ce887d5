//! 進捗の計算と進捗バーの表示内容

use serde::Serialize;

/// 進捗バーのアニメーション
const PROGRESS_TRANSITION: &str = "width 1s ease-in-out";

/// 完了数と総数から進捗率（%）を計算する（四捨五入）
///
/// 総数が 0 の場合は 0。
#[must_use]
pub fn calculate_progress(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let completed = u64::from(completed);
    let total = u64::from(total);
    u32::try_from((completed * 100 + total / 2) / total).unwrap_or(u32::MAX)
}

/// 進捗バーの表示内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    /// `.progress-fill` の幅（例: "40%"）
    pub fill_width: String,
    /// `.progress-text` の文言
    pub label: String,
    /// アニメーションする場合の CSS transition
    pub transition: Option<&'static str>,
}

/// 進捗率から進捗バーの表示内容を作る
#[must_use]
pub fn render_progress(percentage: u32, animated: bool) -> ProgressView {
    ProgressView {
        fill_width: format!("{percentage}%"),
        label: format!("{percentage}% completed"),
        transition: animated.then_some(PROGRESS_TRANSITION),
    }
}
