use std::borrow::Cow;

const COLUMN_GAP: &str = "  ";
const RULE: char = '-';

#[derive(Default)]
pub struct TextTableBuilder<'a, Seq> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Seq>,
    alignments: Cow<'a, [Alignment]>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl<'a, Seq> TextTableBuilder<'a, Seq>
where
    Seq: AsRef<[Cow<'a, str>]> + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &'a [Alignment]) -> Self {
        self.alignments = Cow::Borrowed(alignments);
        self
    }

    pub fn headers(mut self, headers: &'a [Cow<'a, str>]) -> Self {
        self.headers = headers;
        if self.alignments.is_empty() {
            self.alignments = Cow::Owned(vec![Alignment::default(); self.headers.len()]);
        }
        self
    }

    pub fn row(mut self, row: Seq) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Seq>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Renders the header, a rule line and one line per row. Cells beyond
    /// the header count are dropped; trailing spaces are trimmed.
    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<usize> = self.headers.iter().map(|h| text_width(h)).collect();
        for row in &self.rows {
            for (width, cell) in col_widths.iter_mut().zip(row.as_ref()) {
                *width = (*width).max(text_width(cell));
            }
        }

        let mut table = String::with_capacity(
            (col_widths.iter().sum::<usize>() + col_count * COLUMN_GAP.len() + 1)
                * (self.rows.len() + 2),
        );

        self.push_line(&mut table, &col_widths, self.headers);
        let rule: Vec<Cow<'_, str>> = col_widths
            .iter()
            .map(|&width| Cow::Owned(RULE.to_string().repeat(width)))
            .collect();
        self.push_line(&mut table, &col_widths, &rule);
        for row in &self.rows {
            self.push_line(&mut table, &col_widths, row.as_ref());
        }

        table
    }

    fn push_line(&self, out: &mut String, col_widths: &[usize], cells: &[Cow<'_, str>]) {
        let mut line = String::new();
        for (idx, width) in col_widths.iter().enumerate() {
            if idx > 0 {
                line.push_str(COLUMN_GAP);
            }
            let cell = cells.get(idx).map(|cell| cell.as_ref()).unwrap_or_default();
            let alignment = self.alignments.get(idx).copied().unwrap_or_default();
            pad_cell(&mut line, cell, *width, alignment);
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

fn pad_cell(out: &mut String, cell: &str, width: usize, alignment: Alignment) {
    let padding = width.saturating_sub(text_width(cell));
    let (left, right) = match alignment {
        Alignment::Left => (0, padding),
        Alignment::Center => (padding / 2, padding - padding / 2),
        Alignment::Right => (padding, 0),
    };
    out.extend(std::iter::repeat_n(' ', left));
    out.push_str(cell);
    out.extend(std::iter::repeat_n(' ', right));
}

/// Joins rendered tables with a blank line between them.
pub fn combine_tables_vertically(tables: &[&str]) -> Option<String> {
    if tables.is_empty() {
        return None;
    }

    let mut combined = String::with_capacity(tables.iter().map(|t| t.len() + 1).sum());
    for (idx, table) in tables.iter().enumerate() {
        if idx > 0 {
            combined.push('\n');
        }
        combined.push_str(table);
        if !table.ends_with('\n') {
            combined.push('\n');
        }
    }
    Some(combined)
}
