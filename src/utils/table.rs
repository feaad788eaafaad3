//! Table rendering utilities for CLI outputs.
//! Column widths are computed on display width so CJK subject names
//! stay aligned.

use unicode_width::UnicodeWidthStr;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn col_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.width());
                }
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.col_widths();
        let mut out = String::new();

        push_row(&mut out, &self.headers, &widths);

        let total: usize = widths.iter().sum::<usize>() + widths.len() * 3;
        out.push_str(&"-".repeat(total));
        out.push('\n');

        for row in &self.rows {
            push_row(&mut out, row, &widths);
        }

        out
    }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    for (i, cell) in cells.iter().enumerate() {
        let pad = widths[i].saturating_sub(cell.width());
        out.push_str(cell);
        out.push_str(&" ".repeat(pad));
        out.push_str("   ");
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_and_rows() {
        let mut t = Table::new(&["ID", "Subject"]);
        t.add_row(vec!["1".into(), "Math".into()]);
        let s = t.render();
        assert!(s.contains("ID"));
        assert!(s.contains("Math"));
    }
}
