//! ページ共通のユーティリティ
//!
//! 通知、進捗表示、フォーム検証、処理時間の計測。

pub mod notification;
pub mod perf;
pub mod progress;
pub mod validate;
