/// Output grid indexed `[row][column]`.
///
/// Cells left unfilled are written as the `vacant` text passed to
/// [`Grid::render`].
#[derive(Debug)]
pub(crate) struct Grid {
    cells: Vec<Vec<Option<String>>>,
}

impl Grid {
    pub(crate) fn new(rows: usize, width: usize) -> Self {
        Grid {
            cells: vec![vec![None; width]; rows],
        }
    }

    pub(crate) fn place(&mut self, row: usize, column: usize, text: String) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|cells| cells.get_mut(column)) {
            *cell = Some(text);
        }
    }

    pub(crate) fn fill_column(&mut self, column: usize, text: &str) {
        for row in 0..self.cells.len() {
            self.place(row, column, text.to_string());
        }
    }

    /// Header line, then one line per row, each followed by `eol`.
    pub(crate) fn render(self, header: &[String], delimiter: &str, eol: &str, vacant: &str) -> String {
        let mut text = header.join(delimiter);
        text.push_str(eol);

        if header.is_empty() {
            return text;
        }

        for row in self.cells {
            let line = row
                .into_iter()
                .map(|cell| cell.unwrap_or_else(|| vacant.to_string()))
                .collect::<Vec<String>>()
                .join(delimiter);
            text.push_str(&line);
            text.push_str(eol);
        }

        text
    }
}
