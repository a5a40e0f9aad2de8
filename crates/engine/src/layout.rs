//! Fixed shape of the result page: which groups, which labels, which columns.

use serde::{Deserialize, Serialize};

/// One displayed field: a label and the column its value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub label: String,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupLayout {
    pub title: String,
    pub fields: Vec<FieldLayout>,
}

impl GroupLayout {
    pub fn new<'a>(title: &str, fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            title: title.to_string(),
            fields: fields
                .into_iter()
                .map(|(label, column)| FieldLayout {
                    label: label.to_string(),
                    column: column.to_string(),
                })
                .collect(),
        }
    }
}

/// Groups always shown, plus the backup landing device group that is
/// inserted after the first one when the device is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLayout {
    pub groups: Vec<GroupLayout>,
    pub backup_group: GroupLayout,
}

impl ResultLayout {
    /// The contactor inspection page: motor contactor, two brake contactors.
    pub fn contactors() -> Self {
        Self {
            groups: vec![
                GroupLayout::new(
                    "電動機用接触器",
                    [
                        ("名称", "電動機主回路用接触器名称"),
                        ("フェールセーフ", "主回路電磁接触器フェールセーフ該当有無"),
                        ("型式", "電動機主回路用接触器型式"),
                        ("判定結果", "電動機主回路用接触器目視確認判定結果"),
                        ("判定基準用コメント", "電動機主回路用接触器判定基準用コメント"),
                        ("判定基準", "電動機主回路用接触器判定基準"),
                    ],
                ),
                GroupLayout::new(
                    "ブレーキ用接触器①",
                    [
                        ("名称", "ブレーキ用接触器名称"),
                        ("フェールセーフ", "ブレーキ電磁接触器フェールセーフ該当有無"),
                        ("型式", "ブレーキ用接触器型式"),
                        ("判定結果", "ブレーキ用接触器目視確認判定結果"),
                        ("判定基準用コメント", "ブレーキ用接触器判定基準用コメント"),
                        ("判定基準", "ブレーキ用接触器判定基準"),
                    ],
                ),
                GroupLayout::new(
                    "ブレーキ用接触器②",
                    [
                        ("名称", "ブレーキ用接触器名称②"),
                        ("フェールセーフ", "ブレーキ電磁接触器②フェールセーフ該当有無"),
                        ("型式", "ブレーキ用接触器型式②"),
                        ("判定結果", "ブレーキ用接触器②目視確認判定結果"),
                        ("判定基準用コメント", "ブレーキ用接触器②判定基準用コメント"),
                        ("判定基準", "ブレーキ用接触器②判定基準"),
                    ],
                ),
            ],
            backup_group: GroupLayout::new(
                "停電時自動着床装置用接触器",
                [
                    ("名称", "電動機主回路用接触器名称"),
                    ("フェールセーフ", "UPS主回路電磁接触器フェールセーフ該当有無"),
                    ("型式", "電動機主回路用接触器型式"),
                    ("判定結果", "電動機主回路用接触器目視確認可否"),
                    ("判定基準", "電動機主回路用接触器判定基準"),
                ],
            ),
        }
    }
}

impl Default for ResultLayout {
    fn default() -> Self {
        Self::contactors()
    }
}
