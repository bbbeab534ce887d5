//! 処理時間の計測

use std::time::Instant;

/// `f` を実行し、かかった時間を debug ログに出力する
pub fn measure<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    tracing::debug!("{name} took {:?}", start.elapsed());
    result
}
