use crate::parsers::lines::split_lines;

/// A literal `|` inside a cell, written so it does not split the row
pub const ESCAPED_PIPE: &str = "&#124;";

/// Displayed width of a cell; an escaped pipe shows as one character
fn cell_width(cell: &str) -> usize {
    let escapes = cell.matches(ESCAPED_PIPE).count();
    cell.chars().count() - escapes * (ESCAPED_PIPE.len() - 1)
}

/// Rows of trimmed cells parsed from the pipe-delimited form of one table.
///
/// Rows may have different cell counts. The table's column count is the
/// largest count seen in any row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRows {
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl TableRows {
    /// Parse pipe-delimited rows, one per physical line.
    ///
    /// Each line is trimmed and loses one leading and one trailing `|`.
    /// Lines left empty are skipped.
    pub fn parse(intermediate: &str) -> Self {
        let mut table = Self::default();

        for line in split_lines(intermediate) {
            let trimmed = line.text.trim();
            let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
            let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
            if trimmed.is_empty() {
                continue;
            }

            let cells = trimmed
                .split('|')
                .map(|cell| cell.trim().to_string())
                .collect();
            table.push_row(cells);
        }

        table
    }

    fn push_row(&mut self, cells: Vec<String>) {
        for (index, cell) in cells.iter().enumerate() {
            let len = cell_width(cell);
            match self.widths.get_mut(index) {
                Some(width) => *width = (*width).max(len),
                None => self.widths.push(len),
            }
        }
        self.rows.push(cells);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Width of every column: the longest cell ever seen at that index
    pub fn column_widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn column_count(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Flatten into one line: cells joined by `, `, rows by `; `
    pub fn to_inline(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .filter(|cell| !cell.is_empty())
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .filter(|row| !row.is_empty())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Render as an aligned pipe table with a separator after the header row
    pub fn render(&self, caption: Option<&str>) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        if let Some(caption) = caption.map(str::trim).filter(|c| !c.is_empty()) {
            lines.push(caption.to_string());
        }

        for (index, row) in self.rows.iter().enumerate() {
            lines.push(self.render_row(row));
            if index == 0 {
                lines.push(self.render_separator());
            }
        }

        lines.join("\n")
    }

    fn render_row(&self, row: &[String]) -> String {
        let mut line = String::from("|");
        for (index, width) in self.widths.iter().enumerate() {
            let cell = row.get(index).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell_width(cell));
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
            line.push_str(" |");
        }
        line
    }

    fn render_separator(&self) -> String {
        let mut line = String::from("|");
        for width in &self.widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('|');
        }
        line
    }
}

/// Re-align the pipe-delimited form of one table.
///
/// Returns `None` when no non-empty row survives, meaning the table should
/// produce no output at all.
pub fn format_table(intermediate: &str, caption: Option<&str>) -> Option<String> {
    let table = TableRows::parse(intermediate);
    if table.is_empty() {
        ::log::trace!("Dropping table with no rows");
        return None;
    }

    ::log::trace!(
        "Formatting table with {} rows and {} columns",
        table.rows().len(),
        table.column_count()
    );
    Some(table.render(caption))
}
