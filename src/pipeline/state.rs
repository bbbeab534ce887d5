//! パイプラインの状態と読み込み結果

use std::sync::atomic::{
    AtomicU64,
    AtomicUsize,
    Ordering,
};

use crate::fetch::FetchError;
use crate::input::LanguageCode;
use crate::page::ApplyReport;

/// パイプラインの状態
///
/// エラー状態は持たない。失敗しても `Idle` に戻り、以前の翻訳はそのまま残る。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// 読み込み中のリクエストがない
    Idle,
    /// 1 件以上の読み込みが進行中
    Loading,
}

/// 1 回の読み込みの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// 翻訳を取得し、ページに適用した
    Applied { language: LanguageCode, report: ApplyReport },
    /// 取得に失敗した（状態は変更されていない）
    Failed { language: LanguageCode, error: FetchError },
    /// より新しいリクエストが開始済みのため破棄した
    Discarded { language: LanguageCode },
}

impl LoadOutcome {
    /// 対象の言語
    #[must_use]
    pub const fn language(&self) -> &LanguageCode {
        match self {
            Self::Applied { language, .. }
            | Self::Failed { language, .. }
            | Self::Discarded { language } => language,
        }
    }

    /// 翻訳が適用されたかどうか
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// 進行中の読み込み数とリクエスト世代
#[derive(Debug, Default)]
pub(crate) struct LoadTracker {
    /// 進行中の読み込み数
    in_flight: AtomicUsize,
    /// 最後に開始したリクエストの世代
    generation: AtomicU64,
}

impl LoadTracker {
    /// 読み込みを開始し、その世代を返す
    pub(crate) fn begin(&self) -> (InFlightGuard<'_>, u64) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        (InFlightGuard { tracker: self }, generation)
    }

    /// `generation` が最新のリクエストかどうか
    pub(crate) fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// 進行中の読み込み数から状態を求める
    pub(crate) fn state(&self) -> PipelineState {
        if self.in_flight.load(Ordering::SeqCst) == 0 {
            PipelineState::Idle
        } else {
            PipelineState::Loading
        }
    }
}

/// ドロップ時に進行中カウントを減らす（future がキャンセルされた場合も含む）
#[derive(Debug)]
pub(crate) struct InFlightGuard<'a> {
    /// 対象のトラッカー
    tracker: &'a LoadTracker,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.tracker.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
