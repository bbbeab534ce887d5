//! 翻訳の読み込みと適用のパイプライン

mod context;
mod runner;
mod state;

pub use context::I18nAccessor;
pub use runner::TranslationPipeline;
pub use state::{
    LoadOutcome,
    PipelineState,
};
