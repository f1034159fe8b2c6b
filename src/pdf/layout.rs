use pdf_writer::{Name, Str};

use crate::error::Result;
use crate::fonts::{FontBook, FontId};
use crate::markup::{Inline, Markup};
use crate::model::Alignment;
use crate::style::ParagraphStyle;

use super::bidi;
use super::canvas::Canvas;

pub(super) struct WordChunk {
    pub(super) font: FontId,
    /// Text in visual order.
    pub(super) text: String,
    pub(super) font_size: f32,
    pub(super) color: [u8; 3],
    pub(super) x_offset: f32, // x relative to line start
    pub(super) width: f32,
    pub(super) underline: bool,
}

pub(super) struct TextLine {
    pub(super) chunks: Vec<WordChunk>,
    pub(super) total_width: f32,
    /// Logical text of the line, for the page text summary.
    pub(super) text: String,
    /// Ended by `<br/>` rather than by wrapping.
    pub(super) forced_break: bool,
}

fn finish_line(
    chunks: &mut Vec<WordChunk>,
    words: &mut Vec<String>,
    rtl: bool,
    forced_break: bool,
) -> TextLine {
    let total_width = chunks.last().map(|c| c.x_offset + c.width).unwrap_or(0.0);
    let mut chunks = std::mem::take(chunks);
    if rtl {
        // Mirror positions so the first logical word ends up rightmost.
        for c in &mut chunks {
            c.x_offset = total_width - c.x_offset - c.width;
        }
        chunks.reverse();
    }
    TextLine {
        chunks,
        total_width,
        text: std::mem::take(words).join(" "),
        forced_break,
    }
}

/// Layout marked-up text into wrapped lines.
/// No space is inserted between spans unless the preceding text ended with
/// whitespace or the new span starts with whitespace ("<b>bold</b>, x" stays
/// "bold, x").
pub(super) fn build_paragraph_lines(
    markup: &Markup,
    style: &ParagraphStyle,
    fonts: &mut FontBook,
    max_width: f32,
) -> Vec<TextLine> {
    let rtl = bidi::is_rtl(&markup.plain_text());
    let mut lines: Vec<TextLine> = Vec::new();
    let mut current_chunks: Vec<WordChunk> = Vec::new();
    let mut current_words: Vec<String> = Vec::new();
    let mut current_x: f32 = 0.0;
    let mut prev_ended_with_ws = false;
    let mut prev_space_w: f32 = 0.0;

    for item in &markup.items {
        let span = match item {
            Inline::Text(span) => span,
            Inline::LineBreak => {
                lines.push(finish_line(&mut current_chunks, &mut current_words, rtl, true));
                current_x = 0.0;
                prev_ended_with_ws = false;
                continue;
            }
        };

        let spec = span.font.as_deref().unwrap_or(&style.font_name);
        let font_size = span.size.unwrap_or(style.font_size);
        let color = span.color.unwrap_or(style.color);
        let base_font = fonts.resolve(spec, span.bold, span.italic);
        let space_w = fonts.space_width(base_font, font_size);
        let starts_with_ws = span.text.starts_with(char::is_whitespace);

        for (i, word) in span.text.split_whitespace().enumerate() {
            let visual = bidi::visual(word);
            let font = fonts.resolve_for_text(spec, span.bold, span.italic, &visual);
            let ww = fonts.text_width(font, &visual, font_size);

            let need_space =
                !current_chunks.is_empty() && (i > 0 || starts_with_ws || prev_ended_with_ws);

            // The space belongs to whichever span holds the whitespace character.
            let effective_space_w = if i > 0 || starts_with_ws {
                space_w
            } else {
                prev_space_w
            };

            let proposed_x = if need_space {
                current_x + effective_space_w
            } else {
                current_x
            };

            if !current_chunks.is_empty() && proposed_x + ww > max_width {
                lines.push(finish_line(&mut current_chunks, &mut current_words, rtl, false));
                current_x = 0.0;
            } else {
                current_x = proposed_x;
            }

            if need_space || current_words.is_empty() {
                current_words.push(word.to_string());
            } else if let Some(last) = current_words.last_mut() {
                last.push_str(word);
            }

            current_chunks.push(WordChunk {
                font,
                text: visual,
                font_size,
                color,
                x_offset: current_x,
                width: ww,
                underline: span.underline,
            });
            current_x += ww;
        }

        if !span.text.is_empty() {
            prev_ended_with_ws = span.text.ends_with(char::is_whitespace);
        }
        prev_space_w = space_w;
    }

    if !current_chunks.is_empty() || lines.is_empty() {
        lines.push(finish_line(&mut current_chunks, &mut current_words, rtl, false));
    }
    lines
}

/// Tallest font size used by any chunk, or `fallback` for empty lines.
pub(super) fn max_font_size(lines: &[TextLine], fallback: f32) -> f32 {
    lines
        .iter()
        .flat_map(|l| l.chunks.iter())
        .map(|c| c.font_size)
        .fold(fallback, f32::max)
}

/// Distance from the top of `line` to its baseline: the tallest ascent on it.
pub(super) fn line_ascent(line: &TextLine, fonts: &FontBook, fallback_size: f32) -> f32 {
    line.chunks
        .iter()
        .map(|c| c.font_size * fonts.ascender_ratio(c.font))
        .reduce(f32::max)
        .unwrap_or(fallback_size)
}

/// Extra space between chunks when justifying. The last line of a paragraph
/// and lines ended by `<br/>` keep natural spacing.
fn justify_gap(line: &TextLine, alignment: Alignment, is_last: bool, text_width: f32) -> f32 {
    if alignment != Alignment::Justify || is_last || line.forced_break || line.chunks.len() < 2 {
        return 0.0;
    }
    ((text_width - line.total_width) / (line.chunks.len() - 1) as f32).max(0.0)
}

/// Render pre-built lines applying the paragraph alignment.
/// `total_line_count` is the full paragraph line count (for justify: last line stays left-aligned).
#[allow(clippy::too_many_arguments)]
pub(super) fn render_paragraph_lines(
    canvas: &mut Canvas,
    lines: &[TextLine],
    alignment: Alignment,
    margin_left: f32,
    text_width: f32,
    first_baseline_y: f32,
    line_pitch: f32,
    total_line_count: usize,
    first_line_index: usize,
) -> Result<()> {
    let last_line_idx = total_line_count.saturating_sub(1);
    let mut current_color: Option<[u8; 3]> = None;

    for (line_num, line) in lines.iter().enumerate() {
        let y = first_baseline_y - line_num as f32 * line_pitch;
        let global_line_idx = first_line_index + line_num;

        let line_start_x = match alignment {
            Alignment::Center => margin_left + (text_width - line.total_width) / 2.0,
            Alignment::Right => margin_left + text_width - line.total_width,
            Alignment::Left | Alignment::Justify => margin_left,
        };

        let extra_per_gap =
            justify_gap(line, alignment, global_line_idx == last_line_idx, text_width);

        let mut underlines: Vec<(f32, f32, f32, f32, [u8; 3])> = Vec::new();
        let (content, fonts) = canvas.parts();

        if !line.chunks.is_empty() {
            content.begin_text();
            let mut td_x = 0.0_f32;
            let mut td_y = 0.0_f32;
            let mut cur_font: Option<(FontId, f32)> = None;

            for (chunk_idx, chunk) in line.chunks.iter().enumerate() {
                let x = line_start_x + chunk.x_offset + chunk_idx as f32 * extra_per_gap;

                if current_color != Some(chunk.color) {
                    let [r, g, b] = chunk.color;
                    content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
                    current_color = Some(chunk.color);
                }

                if cur_font != Some((chunk.font, chunk.font_size)) {
                    content.set_font(Name(fonts.pdf_name(chunk.font).as_bytes()), chunk.font_size);
                    cur_font = Some((chunk.font, chunk.font_size));
                }

                content.next_line(x - td_x, y - td_y);
                td_x = x;
                td_y = y;

                let text_bytes = fonts.encode(chunk.font, &chunk.text)?;
                content.show(Str(&text_bytes));

                if chunk.underline {
                    let thick = (chunk.font_size * 0.05).max(0.5);
                    let ul_y = y - chunk.font_size * 0.12;
                    underlines.push((x, ul_y - thick, chunk.width, thick, chunk.color));
                }
            }
            content.end_text();
        }

        for &(dx, dy, dw, dh, [r, g, b]) in &underlines {
            content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
            content.rect(dx, dy, dw, dh).fill_nonzero();
        }
        if !underlines.is_empty() {
            current_color = None;
        }

        canvas.log_text(line.text.clone());
    }
    if current_color.is_some() {
        canvas.parts().0.set_fill_gray(0.0);
    }
    Ok(())
}
