//! Text flow - greedy word wrap and pagination into positioned lines.
//!
//! Coordinates are PDF user space: points, origin at the bottom-left of the page,
//! `y` growing upwards. A frame is the rectangle text may occupy on every page.

use serde::Serialize;

use crate::layout::font_metrics::{get_metrics, FontFamily, FontWeight};
use crate::layout::template::TextStyle;

/// A piece of paragraph text set in one weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub weight: FontWeight,
}

impl Span {
    pub fn regular(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            weight: FontWeight::Regular,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            weight: FontWeight::Bold,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph { spans: Vec<Span>, style: TextStyle },
    Spacer(f32),
}

impl Flowable {
    /// A paragraph set entirely in the style's weight.
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Flowable::Paragraph {
            spans: vec![Span {
                text: text.into(),
                weight: style.weight,
            }],
            style,
        }
    }
}

/// Text drawn with one font at one position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedRun {
    pub x: f32,
    pub weight: FontWeight,
    pub font_size_pt: f32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub baseline_y: f32,
    pub runs: Vec<PlacedRun>,
}

impl PlacedLine {
    /// The line as plain text, runs separated by single spaces.
    #[cfg(test)]
    pub fn text(&self) -> String {
        self.runs
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub width: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Lines per page produced by one frame, and where the cursor stopped on the last page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowOutput {
    pub pages: Vec<Vec<PlacedLine>>,
    pub end_cursor: f32,
}

#[derive(Debug, Clone, PartialEq)]
struct Word {
    text: String,
    weight: FontWeight,
    width: f32,
}

/// Greedy word wrap over spans. Each returned line is a list of words; words wider than
/// `max_width` are broken between characters.
fn wrap_spans(spans: &[Span], family: FontFamily, size: f32, max_width: f32) -> Vec<Vec<Word>> {
    let mut lines: Vec<Vec<Word>> = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let mut current_width = 0.0_f32;

    for span in spans {
        let metrics = get_metrics(family, span.weight);
        let space_w = metrics.space_width * size;

        for raw in span.text.split_whitespace() {
            for piece in break_long_word(raw, span.weight, family, size, max_width) {
                let gap = if current.is_empty() { 0.0 } else { space_w };
                if !current.is_empty() && current_width + gap + piece.width > max_width {
                    // Line is full; this word opens the next one.
                    lines.push(std::mem::take(&mut current));
                    current_width = piece.width;
                } else {
                    current_width += gap + piece.width;
                }
                current.push(piece);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn break_long_word(
    word: &str,
    weight: FontWeight,
    family: FontFamily,
    size: f32,
    max_width: f32,
) -> Vec<Word> {
    let metrics = get_metrics(family, weight);
    let width = metrics.measure_pt(word, size);
    if width <= max_width {
        return vec![Word {
            text: word.to_string(),
            weight,
            width,
        }];
    }

    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut text_width = 0.0_f32;
    for c in word.chars() {
        let w = metrics.char_width(c) * size;
        if !text.is_empty() && text_width + w > max_width {
            pieces.push(Word {
                text: std::mem::take(&mut text),
                weight,
                width: text_width,
            });
            text_width = 0.0;
        }
        text.push(c);
        text_width += w;
    }
    if !text.is_empty() {
        pieces.push(Word {
            text,
            weight,
            width: text_width,
        });
    }
    pieces
}

/// Positions one wrapped line: consecutive words of the same weight share a run.
fn place_line(words: Vec<Word>, x0: f32, baseline_y: f32, family: FontFamily, size: f32) -> PlacedLine {
    let mut runs: Vec<PlacedRun> = Vec::new();
    let mut x = x0;

    for (i, word) in words.into_iter().enumerate() {
        if i > 0 {
            x += get_metrics(family, word.weight).space_width * size;
        }
        match runs.last_mut() {
            Some(run) if run.weight == word.weight => {
                run.text.push(' ');
                run.text.push_str(&word.text);
            }
            _ => runs.push(PlacedRun {
                x,
                weight: word.weight,
                font_size_pt: size,
                text: word.text.clone(),
            }),
        }
        x += word.width;
    }

    PlacedLine { baseline_y, runs }
}

/// Flows a story through a frame, opening pages as needed.
///
/// The first page starts at `first_top` (below a header, say); later pages start at
/// `frame.top`. A line that does not fit above `frame.bottom` moves to the next page.
/// Spacers and `space_before` are dropped at the top of a page. A `keep_with_next`
/// paragraph moves to a new page unless the first line of the following paragraph
/// fits after it.
pub fn flow(story: &[Flowable], frame: &Frame, first_top: f32, family: FontFamily) -> FlowOutput {
    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut cursor = first_top;
    let mut at_top = true;

    for (i, item) in story.iter().enumerate() {
        match item {
            Flowable::Spacer(height) => {
                if at_top {
                    continue;
                }
                if cursor - height < frame.bottom {
                    new_page(&mut pages, &mut cursor, &mut at_top, frame);
                } else {
                    cursor -= height;
                }
            }
            Flowable::Paragraph { spans, style } => {
                let lines = wrap_spans(spans, family, style.font_size_pt, frame.width);
                if lines.is_empty() {
                    continue;
                }

                if !at_top {
                    cursor -= style.space_before_pt;
                }

                if style.keep_with_next && !at_top {
                    let needed = style.leading_pt * lines.len() as f32
                        + style.space_after_pt
                        + next_first_line_height(&story[i + 1..]);
                    if cursor - needed < frame.bottom {
                        new_page(&mut pages, &mut cursor, &mut at_top, frame);
                    }
                }

                for words in lines {
                    if !at_top && cursor - style.leading_pt < frame.bottom {
                        new_page(&mut pages, &mut cursor, &mut at_top, frame);
                    }
                    let baseline = cursor - style.font_size_pt;
                    let line = place_line(words, frame.x, baseline, family, style.font_size_pt);
                    if let Some(page) = pages.last_mut() {
                        page.push(line);
                    }
                    cursor -= style.leading_pt;
                    at_top = false;
                }

                cursor -= style.space_after_pt;
            }
        }
    }

    FlowOutput {
        pages,
        end_cursor: cursor,
    }
}

fn new_page(pages: &mut Vec<Vec<PlacedLine>>, cursor: &mut f32, at_top: &mut bool, frame: &Frame) {
    pages.push(Vec::new());
    *cursor = frame.top;
    *at_top = true;
}

/// Leading of the next paragraph's first line; spacers in between count too.
fn next_first_line_height(rest: &[Flowable]) -> f32 {
    let mut height = 0.0;
    for item in rest {
        match item {
            Flowable::Spacer(h) => height += h,
            Flowable::Paragraph { style, .. } => return height + style.space_before_pt + style.leading_pt,
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::template::{BODY_STYLE, TITLE_STYLE};

    const FRAME: Frame = Frame {
        x: 72.0,
        width: 468.0,
        top: 720.0,
        bottom: 72.0,
    };

    fn body(text: &str) -> Flowable {
        Flowable::text(text, BODY_STYLE)
    }

    fn all_text(out: &FlowOutput) -> Vec<String> {
        out.pages
            .iter()
            .flat_map(|p| p.iter().map(PlacedLine::text))
            .collect()
    }

    #[test]
    fn test_short_paragraph_is_one_line() {
        let out = flow(&[body("Built things")], &FRAME, FRAME.top, FontFamily::Helvetica);
        assert_eq!(out.pages.len(), 1);
        assert_eq!(all_text(&out), ["Built things"]);
        let line = &out.pages[0][0];
        assert_eq!(line.baseline_y, 720.0 - 12.0);
        assert_eq!(line.runs[0].x, 72.0);
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let out = flow(&[body("Go,  Rust,\t C++\n")], &FRAME, FRAME.top, FontFamily::Helvetica);
        assert_eq!(all_text(&out), ["Go, Rust, C++"]);
    }

    #[test]
    fn test_long_paragraph_wraps_within_width() {
        let text = "Architected a distributed caching layer using consistent hashing ".repeat(6);
        let out = flow(&[body(&text)], &FRAME, FRAME.top, FontFamily::Helvetica);
        let lines = &out.pages[0];
        assert!(lines.len() > 1);
        let metrics = get_metrics(FontFamily::Helvetica, FontWeight::Regular);
        for line in lines {
            assert!(metrics.measure_pt(&line.text(), 12.0) <= FRAME.width + 0.01);
        }
        // Each line sits one leading below the previous.
        assert!((lines[0].baseline_y - lines[1].baseline_y - 14.0).abs() < 1e-3);
    }

    #[test]
    fn test_unbreakable_word_is_split() {
        let word = "x".repeat(200);
        let out = flow(&[body(&word)], &FRAME, FRAME.top, FontFamily::Courier);
        let lines = all_text(&out);
        assert!(lines.len() >= 2);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_overflow_starts_new_page() {
        let story: Vec<Flowable> = (0..60).map(|i| body(&format!("Entry {i}"))).collect();
        let out = flow(&story, &FRAME, FRAME.top, FontFamily::Helvetica);
        // 648 pt of frame / 14 pt leading = 46 lines per page.
        assert_eq!(out.pages.len(), 2);
        assert_eq!(out.pages[0].len(), 46);
        assert_eq!(out.pages[1][0].text(), "Entry 46");
        assert_eq!(out.pages[1][0].baseline_y, 720.0 - 12.0);
        for page in &out.pages {
            for line in page {
                assert!(line.baseline_y >= FRAME.bottom);
            }
        }
    }

    #[test]
    fn test_spacer_dropped_at_page_top() {
        let story = vec![Flowable::Spacer(30.0), body("first")];
        let out = flow(&story, &FRAME, FRAME.top, FontFamily::Helvetica);
        assert_eq!(out.pages[0][0].baseline_y, 720.0 - 12.0);
    }

    #[test]
    fn test_spacer_moves_cursor() {
        let story = vec![body("a"), Flowable::Spacer(10.0), body("b")];
        let out = flow(&story, &FRAME, FRAME.top, FontFamily::Helvetica);
        let gap = out.pages[0][0].baseline_y - out.pages[0][1].baseline_y;
        assert!((gap - 24.0).abs() < 1e-3);
    }

    #[test]
    fn test_title_kept_with_following_line() {
        // Fill the page so that only the title would fit at the bottom.
        let mut story: Vec<Flowable> = (0..45).map(|i| body(&format!("Line {i}"))).collect();
        story.push(Flowable::text("Education:", TITLE_STYLE));
        story.push(body("MSc"));
        let out = flow(&story, &FRAME, FRAME.top, FontFamily::Helvetica);
        assert_eq!(out.pages.len(), 2);
        assert_eq!(out.pages[1][0].text(), "Education:");
        assert_eq!(out.pages[1][1].text(), "MSc");
    }

    #[test]
    fn test_mixed_weight_runs() {
        let story = vec![Flowable::Paragraph {
            spans: vec![Span::bold("Job Title:"), Span::regular("Engineer")],
            style: BODY_STYLE,
        }];
        let out = flow(&story, &FRAME, FRAME.top, FontFamily::Helvetica);
        let line = &out.pages[0][0];
        assert_eq!(line.runs.len(), 2);
        assert_eq!(line.runs[0].weight, FontWeight::Bold);
        assert_eq!(line.runs[0].text, "Job Title:");
        assert_eq!(line.runs[1].weight, FontWeight::Regular);
        assert!(line.runs[1].x > line.runs[0].x);
        assert_eq!(line.text(), "Job Title: Engineer");
    }

    #[test]
    fn test_first_top_offsets_first_page_only() {
        let story: Vec<Flowable> = (0..50).map(|i| body(&format!("Row {i}"))).collect();
        let out = flow(&story, &FRAME, 600.0, FontFamily::Helvetica);
        assert_eq!(out.pages[0][0].baseline_y, 600.0 - 12.0);
        assert_eq!(out.pages[1][0].baseline_y, 720.0 - 12.0);
    }

    #[test]
    fn test_empty_story_has_one_empty_page() {
        let out = flow(&[], &FRAME, FRAME.top, FontFamily::Helvetica);
        assert_eq!(out.pages, vec![Vec::<PlacedLine>::new()]);
        assert_eq!(out.end_cursor, FRAME.top);
    }
}
