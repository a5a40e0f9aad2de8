//! Equipment master list: management number to site, maker and model.

use liftcheck_core::table::Table;
use serde::Serialize;

pub const KANRI_COLUMN: &str = "管理番号";
pub const SITE_COLUMN: &str = "現場名";
pub const MAKER_COLUMN: &str = "メーカー";
pub const MODEL_COLUMN: &str = "機種";
const DELETED_COLUMN: &str = "削除";
const DELETED_MARK: &str = "削除";

/// Shown when a management number has no site on record.
pub const UNKNOWN_SITE: &str = "不明";

/// One piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Equipment {
    #[serde(rename = "genba")]
    pub site_name: String,
    pub maker: String,
    pub model: String,
}

/// Lookup over the equipment list. Rows flagged as deleted are dropped.
#[derive(Debug, Clone, Default)]
pub struct EquipmentRegistry {
    table: Table,
}

impl EquipmentRegistry {
    pub fn from_table(table: Table) -> Self {
        let table = match table.column_index(DELETED_COLUMN) {
            Some(_) => {
                let kept: Vec<Vec<String>> = table
                    .rows()
                    .filter(|row| row.value(DELETED_COLUMN) != DELETED_MARK)
                    .map(|row| row.cells().to_vec())
                    .collect();
                Table::new(table.columns().to_vec(), kept)
            }
            None => table,
        };
        Self { table }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// First entry with the given management number.
    pub fn lookup(&self, kanri: &str) -> Option<Equipment> {
        if kanri.is_empty() || !self.table.has_column(KANRI_COLUMN) {
            return None;
        }
        self.table
            .rows()
            .find(|row| row.value(KANRI_COLUMN) == kanri)
            .map(|row| Equipment {
                site_name: row.value(SITE_COLUMN).to_string(),
                maker: row.value(MAKER_COLUMN).to_string(),
                model: row.value(MODEL_COLUMN).to_string(),
            })
    }

    /// Site name for display, [`UNKNOWN_SITE`] when unavailable.
    pub fn site_name(&self, kanri: &str) -> String {
        if !self.table.has_column(SITE_COLUMN) {
            return UNKNOWN_SITE.to_string();
        }
        self.lookup(kanri)
            .map(|e| e.site_name)
            .unwrap_or_else(|| UNKNOWN_SITE.to_string())
    }

    /// Distinct non-empty management numbers, first-seen order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for row in self.table.rows() {
            let key = row.value(KANRI_COLUMN);
            if !key.is_empty() && !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> EquipmentRegistry {
        EquipmentRegistry::from_table(Table::from_records(
            ["管理番号", "現場名", "メーカー", "機種", "削除"],
            [
                vec!["E-001", "本社ビル", "東芝", "SPACEL", ""],
                vec!["E-002", "旧館", "東芝", "ELBIC", "削除"],
                vec!["E-003", "", "三菱", "AXIEZ", ""],
                vec!["E-001", "重複", "東芝", "SPACEL", ""],
                vec!["", "番号なし", "", "", ""],
            ],
        ))
    }

    #[test]
    fn lookup_returns_first_match() {
        let hit = registry().lookup("E-001").unwrap();
        assert_eq!(hit.site_name, "本社ビル");
        assert_eq!(hit.maker, "東芝");
        assert_eq!(hit.model, "SPACEL");
    }

    #[test]
    fn deleted_rows_are_dropped() {
        let reg = registry();
        assert!(reg.lookup("E-002").is_none());
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn site_name_defaults_to_unknown() {
        let reg = registry();
        assert_eq!(reg.site_name("E-999"), UNKNOWN_SITE);
        assert_eq!(reg.site_name(""), UNKNOWN_SITE);
        // Empty site cell is shown as-is
        assert_eq!(reg.site_name("E-003"), "");
    }

    #[test]
    fn keys_are_unique_and_ordered() {
        assert_eq!(registry().keys(), ["E-001", "E-003"]);
    }

    #[test]
    fn empty_registry_degrades() {
        let reg = EquipmentRegistry::default();
        assert!(reg.lookup("E-001").is_none());
        assert_eq!(reg.site_name("E-001"), UNKNOWN_SITE);
        assert!(reg.keys().is_empty());
    }

    #[test]
    fn equipment_serializes_with_site_key() {
        let json = serde_json::to_value(registry().lookup("E-001").unwrap()).unwrap();
        assert_eq!(json["genba"], "本社ビル");
        assert_eq!(json["model"], "SPACEL");
    }
}
