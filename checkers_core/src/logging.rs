use tracing::Level;

/// ログの出力形式。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum LogFormat {
    /// 1行1イベントの JSON。
    Json,
    /// 人が読むためのテキスト。
    #[default]
    Text,
}

/// 購読者の初期化に失敗した理由。
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LogInitError {
    /// すでにグローバルな購読者が設定されている。
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInstalled(String),
}

/// グローバルな `tracing` 購読者を設定する。
///
/// エンジンは着手の拒否を `debug`、取りと昇格を `info` で記録する。
///
/// # Errors
///
/// すでに購読者が設定されている場合、`LogInitError::AlreadyInstalled` を返す。
#[inline]
pub fn init(format: LogFormat, max_level: Level) -> Result<(), LogInitError> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_target(false);

    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    installed.map_err(|err| LogInitError::AlreadyInstalled(err.to_string()))
}
