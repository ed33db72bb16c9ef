/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - コンパイル時定数として定義される静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に読み込まれる動的設定
///
/// バックエンドURLはこの2層と環境変数・CLIフラグから `BackendUrl` として解決されます。
///
/// # 使用例
///
/// ```rust,ignore
/// use crate::config::{APP_CONFIG, BackendUrl, UserConfig};
///
/// let field = APP_CONFIG.upload.field_name;
/// let user_config = UserConfig::load()?;
/// let backend = BackendUrl::resolve(None, &user_config)?;
/// ```
pub mod app;
pub mod backend;
pub mod error;
pub mod permissions;
pub mod user;

pub use app::{APP_CONFIG, BYTES_PER_MB};
pub use backend::{BackendSource, BackendUrl};
pub use user::UserConfig;
