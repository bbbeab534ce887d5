//! edureach-i18n
//!
//! EduReach ページの多言語化パイプライン。
//! 言語設定の永続化、翻訳の取得、ページへの適用、変更通知を提供する。

pub mod api;
pub mod config;
pub mod fetch;
pub mod input;
pub mod notify;
pub mod page;
pub mod pipeline;
pub mod storage;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;

pub use pipeline::{
    I18nAccessor,
    LoadOutcome,
    PipelineState,
    TranslationPipeline,
};
