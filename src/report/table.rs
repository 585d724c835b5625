use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Plain-text table with a title, ruled header and aligned columns.
#[derive(Debug, Clone)]
pub struct Table {
    title: String,
    headers: Vec<(String, Align)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn column(mut self, header: &str, align: Align) -> Self {
        self.headers.push((header.to_string(), align));
        self
    }

    /// Appends a row. Missing cells render empty, extra cells are dropped.
    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, (h, _))| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn write_line(&self, out: &mut String, cells: &[&str], widths: &[usize]) {
        let mut line = String::new();
        for (i, ((_, align), width)) in self.headers.iter().zip(widths).enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            let cell = cells.get(i).copied().unwrap_or("");
            let pad = width.saturating_sub(cell.chars().count());
            match align {
                Align::Left => {
                    line.push_str(cell);
                    line.push_str(&" ".repeat(pad));
                }
                Align::Right => {
                    line.push_str(&" ".repeat(pad));
                    line.push_str(cell);
                }
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);

        let mut out = String::new();
        if !self.title.is_empty() {
            let _ = writeln!(out, "{}", self.title);
        }
        let _ = writeln!(out, "{}", "=".repeat(total));
        let headers: Vec<&str> = self.headers.iter().map(|(h, _)| h.as_str()).collect();
        self.write_line(&mut out, &headers, &widths);
        let _ = writeln!(out, "{}", "-".repeat(total));
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            self.write_line(&mut out, &cells, &widths);
        }
        let _ = writeln!(out, "{}", "=".repeat(total));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_aligns_columns() {
        let mut t = Table::new("Demo")
            .column("Device", Align::Left)
            .column("kWh", Align::Right);
        t.push_row(vec!["Kettle".into(), "219.0".into()]);
        t.push_row(vec!["TV".into(), "1,234.5".into()]);
        let s = t.render();
        let lines: Vec<&str> = s.lines().collect();

        assert_eq!(lines[0], "Demo");
        assert_eq!(lines[2], "Device      kWh");
        assert_eq!(lines[4], "Kettle    219.0");
        assert_eq!(lines[5], "TV      1,234.5");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_missing_cells_render_empty() {
        let mut t = Table::new("")
            .column("A", Align::Left)
            .column("B", Align::Left);
        t.push_row(vec!["x".into()]);
        let s = t.render();
        assert!(s.lines().any(|l| l == "x"));
    }
}
