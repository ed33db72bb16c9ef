/// プレゼンテーション層モジュール
///
/// ドメイン層の結果とUI表示の橋渡しを行います。
/// プレゼンテーション層はドメイン層に依存しますが、その逆はありません。
///
/// # モジュール
/// - `input`: 標準入力からのファイル一覧読み取り
/// - `output`: コマンド結果とエラーの出力（人間向け・機械向け）
/// - `progress`: 変換進捗の表示とビジー表示
pub mod input;
pub mod output;
pub mod progress;
