//! ワークスペース単位の設定と翻訳ファイル読み込みの管理

use std::path::PathBuf;

use super::{
    ConfigError,
    ResolverSettings,
    loader,
};
use crate::input::translation::{
    self,
    LoadError,
};
use crate::storage::Storage;
use crate::translator::Translator;

/// 検証済みの設定と、その設定を読み込んだワークスペースを保持する
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定（常に検証済み）
    current_settings: ResolverSettings,

    /// 設定を読み込んだワークスペースのルート
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    /// デフォルト設定、ワークスペースなしで作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: ResolverSettings::default(), workspace_root: None }
    }

    /// ワークスペースの設定ファイルを読み込む
    ///
    /// ワークスペースも設定ファイルもなければデフォルト設定になる。
    /// 失敗した場合は以前の設定とワークスペースを保持する。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        let settings = workspace_root
            .as_deref()
            .map(loader::load_from_workspace)
            .transpose()?
            .flatten()
            .unwrap_or_default();

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(?workspace_root, ?settings, "Settings loaded");
        self.current_settings = settings;
        self.workspace_root = workspace_root;

        Ok(())
    }

    /// 設定を差し替える。ワークスペースはそのまま
    ///
    /// # Errors
    /// バリデーションエラー（以前の設定を保持）
    pub fn update_settings(&mut self, new_settings: ResolverSettings) -> Result<(), ConfigError> {
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(settings = ?new_settings, "Settings updated");
        self.current_settings = new_settings;

        Ok(())
    }

    /// 現在の設定
    #[must_use]
    pub const fn get_settings(&self) -> &ResolverSettings {
        &self.current_settings
    }

    /// 設定を読み込んだワークスペースのルート
    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }

    /// 現在の読み込み戦略とフォールバックで `storage` 上の Translator を作成
    #[must_use]
    pub fn build_translator<S: Storage>(&self, storage: S) -> Translator<S> {
        Translator::from_settings(storage, &self.current_settings)
    }

    /// ワークスペースの翻訳ファイルを `translator` に書き込む
    ///
    /// 読み込んだファイル数を返す。ワークスペースがなければ何もせず 0。
    ///
    /// # Errors
    /// 最初に読み込めなかったファイル、またはストレージの書き込みエラー
    pub fn load_translations<S: Storage>(
        &self,
        translator: &mut Translator<S>,
    ) -> Result<usize, LoadError> {
        let Some(root) = self.workspace_root() else {
            tracing::debug!("No workspace, skipping translation files");
            return Ok(0);
        };

        translation::load_into(translator, root, &self.current_settings)
    }

    /// Translator を作成し、ワークスペースの翻訳ファイルを読み込む
    ///
    /// # Errors
    /// [`Self::load_translations`] と同じ
    pub fn load_translator<S: Storage>(&self, storage: S) -> Result<Translator<S>, LoadError> {
        let mut translator = self.build_translator(storage);
        self.load_translations(&mut translator)?;
        Ok(translator)
    }
}
