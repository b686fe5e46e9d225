//! Построение CSV для выгрузки списка.
//!
//! Каждое поле берётся в кавычки, кавычки внутри удваиваются,
//! разделитель полей запятая, строк `\n`. Скачивание файла делает frontend.

use crate::domain::common::CsvExportable;
use crate::domain::EntityRecord;
use crate::enums::EntityKind;

/// Экранирует ячейку: кавычки вокруг значения, внутренние кавычки удваиваются
pub fn quote_cell(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn join_row<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|cell| quote_cell(cell.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// CSV из заголовков и строк; без завершающего перевода строки
pub fn build_csv(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(join_row(headers));
    for row in rows {
        if row.len() != headers.len() {
            log::warn!(
                "Строка CSV содержит {} полей при {} заголовках",
                row.len(),
                headers.len()
            );
        }
        lines.push(join_row(row));
    }
    lines.join("\n")
}

pub fn records_to_csv<T: CsvExportable>(records: &[T]) -> String {
    let rows: Vec<Vec<String>> = records.iter().map(|r| r.to_csv_row()).collect();
    build_csv(&T::headers(), &rows)
}

pub fn entity_records_to_csv(kind: EntityKind, records: &[EntityRecord]) -> String {
    let rows: Vec<Vec<String>> = records.iter().map(|r| r.csv_row()).collect();
    build_csv(&EntityRecord::headers_for(kind), &rows)
}

/// Имя файла выгрузки, например `miners_2024-03-01.csv`
pub fn export_filename(kind: EntityKind, date: chrono::NaiveDate) -> String {
    format!("{}_{}.csv", kind.api_segment(), date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_support::miner;

    #[test]
    fn test_comma_inside_field_stays_in_one_cell() {
        let rows = vec![
            vec!["1".to_string(), "Alice".to_string()],
            vec!["2".to_string(), "Bob, Jr.".to_string()],
        ];
        assert_eq!(
            build_csv(&["ID", "Name"], &rows),
            "\"ID\",\"Name\"\n\"1\",\"Alice\"\n\"2\",\"Bob, Jr.\""
        );
    }

    #[test]
    fn test_embedded_quotes_survive_csv_parser() {
        let original = "He said \"hi\"";
        assert_eq!(quote_cell(original), "\"He said \"\"hi\"\"\"");

        let text = build_csv(&["Note"], &[vec![original.to_string()]]);
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let parsed: Vec<String> = reader
            .records()
            .map(|r| r.unwrap().get(0).unwrap().to_string())
            .collect();
        assert_eq!(parsed, vec![original.to_string()]);
    }

    #[test]
    fn test_records_export_uses_entity_headers() {
        let text = records_to_csv(&[miner("m-1", None, 0, "Driller")]);
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(0), Some("ID"));
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.len(), headers.len());
        assert_eq!(row.get(0), Some("m-1"));
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let text = entity_records_to_csv(EntityKind::Mill, &[]);
        assert!(!text.contains('\n'));
        assert!(text.starts_with("\"ID\""));
        assert_eq!(
            export_filename(
                EntityKind::OreTransport,
                chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
            ),
            "ore-transports_2024-03-01.csv"
        );
    }
}
