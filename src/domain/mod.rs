/// ドメイン層
///
/// ファイル選択、送信ワークフロー、レスポンス分類、終端結果を扱う。
/// HTTPやファイル保存の具体的な実装には依存しない。
pub mod error;
pub mod outcome;
pub mod progress;
pub mod selection;
pub mod workflow;
