//! 設定ファイルの読み込み

use std::io;
use std::path::Path;

use super::{
    ConfigError,
    ResolverSettings,
};

/// ワークスペースルート直下の設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".i18n-resolver.json";

/// `workspace_root` の [`CONFIG_FILE_NAME`] を読み込む
///
/// 検証はしない。呼び出し側で [`ResolverSettings::validate`] を行う。
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルを読み込めた
/// - `Ok(None)`: 設定ファイルがない
///
/// # Errors
/// - ファイル読み込みエラー（存在しない場合を除く）
/// - JSON パースエラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<ResolverSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %config_path.display(), "No configuration file");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let settings = serde_json::from_str(&content)?;
    tracing::debug!(path = %config_path.display(), "Read configuration file");

    Ok(Some(settings))
}
