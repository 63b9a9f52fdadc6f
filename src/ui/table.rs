use crate::record::{AnswerRecord, AnswerSettings};
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
pub struct KeyValueRow {
    #[tabled(rename = "Setting")]
    pub setting: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<KeyValueRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(KeyValueRow {
            setting: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn settings_table(settings: &AnswerSettings) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Max words", &settings.max_words.to_string());
    builder.add_row("Verbosity", settings.verbosity_level.as_str());
    builder.add_row("Font size", &settings.font_size.to_string());
    builder.add_row("Include references", &settings.include_references.to_string());
    builder.add_row("Show full clause", &settings.show_full_clause.to_string());
    builder.build()
}

#[derive(Tabled)]
pub struct FavoriteRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Question")]
    pub question: String,
    #[tabled(rename = "Region")]
    pub region: String,
    #[tabled(rename = "Citation")]
    pub citation: String,
}

impl From<&AnswerRecord> for FavoriteRow {
    fn from(record: &AnswerRecord) -> Self {
        Self {
            id: record.id.clone(),
            question: truncate(&record.question, 48),
            region: record.region.to_string(),
            citation: record.citation().unwrap_or_default(),
        }
    }
}

pub fn favorites_table(records: &[&AnswerRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let rows: Vec<FavoriteRow> = records.iter().map(|record| FavoriteRow::from(*record)).collect();
    Table::new(&rows).with(Style::rounded()).to_string()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a rather long question", 8), "a rather…");
    }

    #[test]
    fn test_favorites_table_empty() {
        assert_eq!(favorites_table(&[]), "");
    }

    #[test]
    fn test_favorites_table_renders_citation() {
        let record = AnswerRecord::new("1", "outlet height?", "answer", Region::default(), 0)
            .with_standard("AS/NZS 3000:2018")
            .with_clause("4.4.2.2");

        let table = favorites_table(&[&record]);
        assert!(table.contains("outlet height?"));
        assert!(table.contains("AS/NZS 3000:2018 § 4.4.2.2"));
    }
}
