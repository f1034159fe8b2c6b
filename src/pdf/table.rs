use crate::error::{Error, Result};
use crate::fonts::FontBook;
use crate::markup;
use crate::model::{Alignment, CellVAlign, TableCommand, TableNode};
use crate::style::ParagraphStyle;

use super::Flow;
use super::layout::{
    TextLine, build_paragraph_lines, line_ascent, max_font_size, render_paragraph_lines,
};

type Border = Option<(f32, [u8; 3])>;

#[derive(Clone, Debug)]
struct CellStyle {
    background: Option<[u8; 3]>,
    text_color: [u8; 3],
    font: String,
    font_size: f32,
    align: Alignment,
    valign: CellVAlign,
    padding: f32,
    top: Border,
    bottom: Border,
    left: Border,
    right: Border,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            background: None,
            text_color: [0, 0, 0],
            font: "Helvetica".to_string(),
            font_size: 10.0,
            align: Alignment::Left,
            valign: CellVAlign::Bottom,
            padding: 6.0,
            top: None,
            bottom: None,
            left: None,
            right: None,
        }
    }
}

impl CellStyle {
    fn paragraph_style(&self) -> ParagraphStyle {
        let mut style = ParagraphStyle::new("cell", &self.font, self.font_size);
        style.color = self.text_color;
        style.alignment = self.align;
        style
    }
}

/// Apply the table's commands in order; later commands override earlier ones.
fn resolve_cell_styles(table: &TableNode, ncols: usize, nrows: usize) -> Vec<Vec<CellStyle>> {
    let mut styles = vec![vec![CellStyle::default(); ncols]; nrows];
    for cmd in &table.commands {
        let range = match cmd {
            TableCommand::Background(r, _)
            | TableCommand::RowBackgrounds(r, _)
            | TableCommand::TextColor(r, _)
            | TableCommand::Font(r, _, _)
            | TableCommand::Align(r, _)
            | TableCommand::VAlign(r, _)
            | TableCommand::Grid(r, _, _)
            | TableCommand::Box(r, _, _)
            | TableCommand::Padding(r, _) => r,
        };
        let Some((cols, rows)) = range.resolve(ncols, nrows) else {
            continue;
        };
        let (first_col, last_col) = (*cols.start(), *cols.end());
        let (first_row, last_row) = (*rows.start(), *rows.end());
        for r in rows.clone() {
            for c in cols.clone() {
                let cell = &mut styles[r][c];
                match cmd {
                    TableCommand::Background(_, color) => cell.background = Some(*color),
                    TableCommand::RowBackgrounds(_, colors) => {
                        if !colors.is_empty() {
                            cell.background = Some(colors[(r - first_row) % colors.len()]);
                        }
                    }
                    TableCommand::TextColor(_, color) => cell.text_color = *color,
                    TableCommand::Font(_, font, size) => {
                        cell.font = font.clone();
                        cell.font_size = *size;
                    }
                    TableCommand::Align(_, align) => cell.align = *align,
                    TableCommand::VAlign(_, valign) => cell.valign = *valign,
                    TableCommand::Grid(_, width, color) => {
                        let border = Some((*width, *color));
                        cell.top = border;
                        cell.bottom = border;
                        cell.left = border;
                        cell.right = border;
                    }
                    TableCommand::Box(_, width, color) => {
                        let border = Some((*width, *color));
                        if r == first_row {
                            cell.top = border;
                        }
                        if r == last_row {
                            cell.bottom = border;
                        }
                        if c == first_col {
                            cell.left = border;
                        }
                        if c == last_col {
                            cell.right = border;
                        }
                    }
                    TableCommand::Padding(_, padding) => cell.padding = *padding,
                }
            }
        }
    }
    styles
}

/// Column widths from hints, or from content: natural widths when they fit,
/// otherwise each column keeps its longest word and the rest of the frame is
/// shared in proportion to what each column would like to have.
fn fit_columns(
    table: &TableNode,
    styles: &[Vec<CellStyle>],
    ncols: usize,
    fonts: &mut FontBook,
    frame_width: f32,
) -> Result<Vec<f32>> {
    if let Some(hints) = &table.col_widths {
        if hints.len() != ncols {
            return Err(Error::Layout(format!(
                "table has {} column widths for {} columns",
                hints.len(),
                ncols
            )));
        }
        let total: f32 = hints.iter().sum();
        if total > frame_width + 0.01 {
            return Err(Error::Layout(format!(
                "table width {total:.1}pt exceeds frame width {frame_width:.1}pt"
            )));
        }
        return Ok(hints.clone());
    }

    let mut min_widths = vec![0.0f32; ncols];
    let mut natural = vec![0.0f32; ncols];
    for (r, row) in table.rows.iter().enumerate() {
        for (c, text) in row.iter().enumerate() {
            let cs = &styles[r][c];
            let font = fonts.resolve_for_text(&cs.font, false, false, text);
            let pad = 2.0 * cs.padding;
            for line in text.split('\n') {
                natural[c] = natural[c].max(fonts.text_width(font, line, cs.font_size) + pad);
            }
            for word in text.split_whitespace() {
                min_widths[c] = min_widths[c].max(fonts.text_width(font, word, cs.font_size) + pad);
            }
        }
    }

    let natural_total: f32 = natural.iter().sum();
    if natural_total <= frame_width {
        return Ok(natural);
    }
    let min_total: f32 = min_widths.iter().sum();
    if min_total >= frame_width {
        let scale = frame_width / min_total;
        return Ok(min_widths.iter().map(|w| w * scale).collect());
    }
    let wanted: f32 = natural_total - min_total;
    let spare = frame_width - min_total;
    Ok(min_widths
        .iter()
        .zip(&natural)
        .map(|(min, nat)| min + (nat - min) / wanted * spare)
        .collect())
}

struct RowLayout {
    height: f32,
    cells: Vec<(Vec<TextLine>, f32)>, // (lines, leading) per cell
}

fn compute_row_layouts(
    table: &TableNode,
    styles: &[Vec<CellStyle>],
    col_widths: &[f32],
    fonts: &mut FontBook,
) -> Result<Vec<RowLayout>> {
    table
        .rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let mut max_h: f32 = 0.0;
            let mut cells = Vec::with_capacity(row.len());
            for (c, text) in row.iter().enumerate() {
                let cs = &styles[r][c];
                let text_w = (col_widths[c] - 2.0 * cs.padding).max(0.0);
                let parsed = markup::parse(&text.replace('\n', "<br/>"))?;
                let lines = build_paragraph_lines(&parsed, &cs.paragraph_style(), fonts, text_w);
                let leading = max_font_size(&lines, cs.font_size) * 1.2;
                max_h = max_h.max(lines.len() as f32 * leading + 2.0 * cs.padding);
                cells.push((lines, leading));
            }
            Ok(RowLayout { height: max_h, cells })
        })
        .collect()
}

fn draw_row(
    flow: &mut Flow,
    styles: &[CellStyle],
    layout: &RowLayout,
    col_widths: &[f32],
    table_left: f32,
    row_top: f32,
) -> Result<()> {
    let row_h = layout.height;
    let row_bottom = row_top - row_h;
    let mut cell_x = table_left;

    for ((cs, (lines, leading)), &col_w) in styles.iter().zip(&layout.cells).zip(col_widths) {
        if let Some(color) = cs.background {
            flow.canvas.with_saved_state(|canvas| {
                canvas.set_fill_color(color);
                canvas.fill_rect(cell_x, row_bottom, col_w, row_h);
                Ok(())
            })?;
        }

        if lines.iter().any(|l| !l.chunks.is_empty()) {
            let font_size = max_font_size(lines, cs.font_size);
            let content_h = lines.len() as f32 * leading;
            let avail = row_h - 2.0 * cs.padding;
            let offset = match cs.valign {
                CellVAlign::Top => 0.0,
                CellVAlign::Middle => ((avail - content_h) / 2.0).max(0.0),
                CellVAlign::Bottom => (avail - content_h).max(0.0),
            };
            let ascent = line_ascent(&lines[0], flow.canvas.fonts(), font_size);
            let baseline_y = row_top - cs.padding - offset - ascent;
            render_paragraph_lines(
                &mut flow.canvas,
                lines,
                cs.align,
                cell_x + cs.padding,
                (col_w - 2.0 * cs.padding).max(0.0),
                baseline_y,
                *leading,
                lines.len(),
                0,
            )?;
        }
        cell_x += col_w;
    }

    // Borders after fills so neighbouring backgrounds never cover them.
    let mut bx = table_left;
    for (cs, &col_w) in styles.iter().zip(col_widths) {
        let edges = [
            (cs.top, bx, row_top, bx + col_w, row_top),
            (cs.bottom, bx, row_bottom, bx + col_w, row_bottom),
            (cs.left, bx, row_top, bx, row_bottom),
            (cs.right, bx + col_w, row_top, bx + col_w, row_bottom),
        ];
        for (border, x1, y1, x2, y2) in edges {
            if let Some((width, color)) = border {
                flow.canvas.with_saved_state(|canvas| {
                    canvas.set_line_width(width);
                    canvas.set_stroke_color(color);
                    canvas.line(x1, y1, x2, y2);
                    Ok(())
                })?;
            }
        }
        bx += col_w;
    }
    Ok(())
}

pub(super) fn render_table(flow: &mut Flow, table: &TableNode) -> Result<()> {
    let ncols = table.column_count();
    let nrows = table.rows.len();
    if ncols == 0 || nrows == 0 {
        return Ok(());
    }
    let mut padded = table.clone();
    for row in &mut padded.rows {
        row.resize(ncols, String::new());
    }
    let table = &padded;

    let styles = resolve_cell_styles(table, ncols, nrows);
    let frame = flow.frame;
    let col_widths = fit_columns(table, &styles, ncols, flow.canvas.fonts(), frame.width)?;
    let row_layouts = compute_row_layouts(table, &styles, &col_widths, flow.canvas.fonts())?;
    let total_w: f32 = col_widths.iter().sum();
    let table_left = frame.x + ((frame.width - total_w) / 2.0).max(0.0);

    let repeat = table.repeat_header && nrows > 1;
    // A continuation page carries the header above every body row.
    let header_h = if repeat { row_layouts[0].height } else { 0.0 };
    for (ri, layout) in row_layouts.iter().enumerate() {
        let needed = if ri > 0 { layout.height + header_h } else { layout.height };
        if needed > frame.height {
            return Err(Error::Layout(format!(
                "table row {} needs {:.1}pt, frame holds {:.1}pt",
                ri + 1,
                needed,
                frame.height
            )));
        }
    }

    log::debug!(
        "TABLE rows={} cols={} widths={:?} repeat_header={}",
        nrows,
        ncols,
        col_widths,
        table.repeat_header
    );

    for (ri, layout) in row_layouts.iter().enumerate() {
        // The header row only goes down together with the first body row.
        let needed = if ri == 0 && repeat {
            layout.height + row_layouts[1].height
        } else {
            layout.height
        };
        let mut continued = false;
        if flow.cursor - needed < frame.y - 0.01 {
            if flow.page_has_content {
                flow.new_page();
                continued = ri > 0;
            } else {
                flow.reclaim_top();
            }
        }
        flow.ensure_page()?;
        if continued && repeat {
            let header = &row_layouts[0];
            let top = flow.cursor;
            draw_row(flow, &styles[0], header, &col_widths, table_left, top)?;
            flow.cursor -= header.height;
        }
        let top = flow.cursor;
        draw_row(flow, &styles[ri], layout, &col_widths, table_left, top)?;
        flow.cursor -= layout.height;
        flow.page_has_content = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellRange;

    fn table() -> TableNode {
        let mut t = TableNode::new(vec![
            vec!["Name".into(), "Value".into()],
            vec!["a".into(), "1".into()],
            vec!["b".into(), "2".into()],
            vec!["c".into(), "3".into()],
        ]);
        t.commands = vec![
            TableCommand::RowBackgrounds(
                CellRange::new((0, 1), (-1, -1)),
                vec![[255, 255, 255], [1, 2, 3]],
            ),
            TableCommand::Background(CellRange::row(0), [9, 9, 9]),
            TableCommand::Box(CellRange::all(), 2.0, [0, 0, 0]),
        ];
        t
    }

    #[test]
    fn commands_apply_in_order_over_ranges() {
        let styles = resolve_cell_styles(&table(), 2, 4);
        assert_eq!(styles[0][1].background, Some([9, 9, 9]));
        assert_eq!(styles[1][0].background, Some([255, 255, 255]));
        assert_eq!(styles[2][0].background, Some([1, 2, 3]));
        assert_eq!(styles[3][1].background, Some([255, 255, 255]));
        // Box only outlines the outer edge.
        assert!(styles[0][0].top.is_some() && styles[0][0].left.is_some());
        assert!(styles[0][0].right.is_none() && styles[1][0].top.is_none());
        assert!(styles[3][1].bottom.is_some() && styles[3][1].right.is_some());
    }

    #[test]
    fn hinted_widths_wider_than_frame_fail() {
        let mut t = table();
        t.col_widths = Some(vec![300.0, 300.0]);
        let styles = resolve_cell_styles(&t, 2, 4);
        let mut fonts = FontBook::builtin();
        let err = fit_columns(&t, &styles, 2, &mut fonts, 468.0).unwrap_err();
        assert!(matches!(err, Error::Layout(_)));
    }

    #[test]
    fn auto_widths_fit_the_frame() {
        let mut t = table();
        t.rows[1][1] = "a long cell of free text that would never fit on one line ".repeat(4);
        let styles = resolve_cell_styles(&t, 2, 4);
        let mut fonts = FontBook::builtin();
        let widths = fit_columns(&t, &styles, 2, &mut fonts, 468.0).unwrap();
        let total: f32 = widths.iter().sum();
        assert!((total - 468.0).abs() < 0.5);
        assert!(widths[1] > widths[0]);
    }
}
