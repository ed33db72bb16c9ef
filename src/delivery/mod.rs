/// 受信ファイルの受け渡し
///
/// 変換サービスから受け取ったスプレッドシートをユーザーのディレクトリに保存する。
pub mod file_sink;

pub use file_sink::FileDownloadSink;
