//! 翻訳パイプラインの入力データ定義

pub mod language;
pub mod translation;

pub use language::{
    LanguageCode,
    LanguageCodeError,
};
pub use translation::TranslationMap;
