//! Plain-text rendering of sheets. Sheets are separated by a form feed so printers page-break.

use crate::catalog::Operation;
use crate::render::sheet::{ProblemCell, RenderedDocument, Sheet, SheetKind};

const COLUMNS: usize = 3;
const CELL_WIDTH: usize = 16;
const GUTTER: &str = "    ";
const PAGE_BREAK: &str = "\u{000C}\n";

/// Self-assessment and sign-off block closing every worksheet page.
const WORKSHEET_FOOTER: [&str; 3] = [
    "Wie fandest du dieses Blatt?  [ ] Super!  [ ] O.K.  [ ] Schwer",
    "Bewertung: ____________________",
    "Unterschrift: __________________________",
];

pub fn render_text(document: &RenderedDocument) -> String {
    document
        .sheets
        .iter()
        .map(render_sheet)
        .collect::<Vec<_>>()
        .join(PAGE_BREAK)
}

pub fn render_sheet(sheet: &Sheet) -> String {
    let mut out = String::new();
    out.push_str(&sheet.title);
    out.push('\n');
    if let Some(subtitle) = &sheet.subtitle {
        out.push_str(subtitle);
        out.push('\n');
    }
    out.push_str(&sheet.label);
    out.push('\n');

    match sheet.kind {
        SheetKind::Worksheet => {
            out.push_str("Name: ____________________    Date: ____________________\n");
            out.push_str(&rule('='));
            out.push_str("\n\n");
            for row in sheet.cells.chunks(COLUMNS) {
                let cells: Vec<[String; 4]> = row.iter().map(cell_lines).collect();
                for line in 0..4 {
                    let joined = cells
                        .iter()
                        .map(|c| c[line].as_str())
                        .collect::<Vec<_>>()
                        .join(GUTTER);
                    out.push_str(joined.trim_end());
                    out.push('\n');
                }
                out.push('\n');
            }
            out.push_str(&rule('-'));
            out.push('\n');
            for line in WORKSHEET_FOOTER {
                out.push_str(line);
                out.push('\n');
            }
        }
        SheetKind::AnswerKey => {
            out.push('\n');
            for line in &sheet.answers {
                out.push_str(&format!(
                    "{:>4}) {} = {}\n",
                    line.number, line.expression, line.answer
                ));
            }
        }
    }
    out
}

/// Four fixed-width lines: number, top operand, operator with bottom operand, rule.
/// Division uses the long-division bracket instead.
fn cell_lines(cell: &ProblemCell) -> [String; 4] {
    let number = pad(format!("{})", cell.number));
    if cell.operation == Operation::Division {
        return [
            number,
            pad(String::new()),
            pad(format!("{} ) {}", cell.operand2, cell.operand1)),
            pad(String::new()),
        ];
    }
    [
        number,
        format!("{:>width$}", cell.operand1, width = CELL_WIDTH),
        format!(
            "{}{:>width$}",
            cell.symbol,
            cell.operand2,
            width = CELL_WIDTH - 1
        ),
        "-".repeat(CELL_WIDTH),
    ]
}

fn rule(c: char) -> String {
    c.to_string().repeat(COLUMNS * CELL_WIDTH + (COLUMNS - 1) * GUTTER.len())
}

fn pad(s: String) -> String {
    format!("{s:<width$}", width = CELL_WIDTH)
}
