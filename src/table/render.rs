// src/table/render.rs

use std::io::{self, Write};

use prettytable::{format, Attr, Cell as PtCell, Row, Table};

use super::{Cell, VisitorsTable};

const HEADER_STYLE: &str = "bc"; // Bold, centred
const TIME_STYLE: &str = "cFc"; // Centred, cyan foreground
const COUNT_STYLE: &str = "cFm"; // Centred, magenta foreground

fn styled_cell(col: usize, cell: &Cell) -> PtCell {
    let style = if col == 0 { TIME_STYLE } else { COUNT_STYLE };
    let styled = PtCell::new(&cell.text).style_spec(style);
    if cell.dimmed {
        styled.with_style(Attr::Dim)
    } else {
        styled
    }
}

/// Box-drawn table with per-column styles; zero counts carry `Attr::Dim`.
pub fn styled_table(table: &VisitorsTable) -> Table {
    let mut pt = Table::new();
    pt.set_format(*format::consts::FORMAT_BOX_CHARS);
    pt.set_titles(Row::new(
        table
            .headers
            .iter()
            .map(|h| PtCell::new(h).style_spec(HEADER_STYLE))
            .collect(),
    ));
    for row in &table.rows {
        pt.add_row(Row::new(
            row.iter()
                .enumerate()
                .map(|(col, cell)| styled_cell(col, cell))
                .collect(),
        ));
    }
    pt
}

/// Write the title line and the table to `out`. Styles are applied only when
/// `color` is set and a terminfo entry is available; otherwise plain text.
pub fn write_table<W: Write + Send>(
    out: &mut W,
    table: &VisitorsTable,
    color: bool,
) -> io::Result<()> {
    writeln!(out, "{}", table.title)?;
    let pt = styled_table(table);
    if color {
        if let Some(mut terminal) = term::TerminfoTerminal::new(&mut *out) {
            pt.print_term(&mut terminal)?;
            return Ok(());
        }
    }
    pt.print(out)?;
    Ok(())
}
