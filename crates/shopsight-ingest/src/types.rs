use std::collections::HashMap;

/// One raw CSV row, keyed by header name.
///
/// Cell values are trimmed at construction; [`RawRow::get`] treats a blank
/// cell the same as a missing column, which matches how the exports encode
/// absent data.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from `(column, value)` pairs. Values are trimmed.
    #[must_use]
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut row = Self::new();
        for (column, value) in pairs {
            row.insert(column, value);
        }
        row
    }

    pub fn insert(&mut self, column: &str, value: &str) {
        self.fields
            .insert(column.to_owned(), value.trim().to_owned());
    }

    /// Returns the cell for `column`, or `None` when the column is absent
    /// or the cell is blank.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// One named source file and its decoded rows, e.g. one category export.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File name including extension, e.g. `"us-shein-kids-wear.csv"`.
    pub name: String,
    pub rows: Vec<RawRow>,
}
