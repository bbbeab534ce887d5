//! ページモデルと翻訳の適用

pub mod applier;
pub mod document;

pub use applier::{
    ApplyReport,
    apply_translations,
};
pub use document::{
    Document,
    Element,
};
