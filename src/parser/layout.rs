//! Layout analysis for PDF pages.
//!
//! This module replays a page's content stream to recover positioned text
//! runs, then groups them into lines (by baseline) and blocks (by spacing),
//! producing the page's layout tree with a top-left origin.

use std::collections::BTreeMap;

use super::backend::{
    decode_text_simple, get_number_from_value, ContentOp, MediaBox, PageId, PdfBackend, PdfValue,
};
use crate::error::Result;
use crate::model::{Block, BoundingBox, Line, Page, Span};

/// TJ adjustments beyond this (in 1/1000 text space units) read as word spaces.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Affine transform in PDF row-vector form `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_op(op: &ContentOp) -> Option<Matrix> {
        Some(Matrix {
            a: op.number(0)?,
            b: op.number(1)?,
            c: op.number(2)?,
            d: op.number(3)?,
            e: op.number(4)?,
            f: op.number(5)?,
        })
    }

    fn translation(tx: f32, ty: f32) -> Matrix {
        Matrix {
            e: tx,
            f: ty,
            ..Matrix::IDENTITY
        }
    }

    /// `self × other`: apply `self` first, then `other`.
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn transform(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Length of the transformed unit Y vector.
    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text drawn by one text-showing operator, in PDF user space.
#[derive(Debug, Clone)]
struct TextRun {
    text: String,
    /// Left edge
    x: f32,
    /// Baseline
    y: f32,
    /// Estimated advance width
    width: f32,
    font_size: f32,
    font_name: String,
}

impl TextRun {
    fn new(text: String, x: f32, y: f32, font_size: f32, font_name: String) -> Self {
        // No glyph metrics: assume an average glyph is half an em wide.
        let width = text.chars().count() as f32 * font_size * 0.5;
        Self {
            text,
            x,
            y,
            width,
            font_size,
            font_name,
        }
    }

    /// Approximate ascender line.
    fn top(&self) -> f32 {
        self.y + self.font_size * 0.8
    }

    /// Approximate descender line.
    fn bottom(&self) -> f32 {
        self.y - self.font_size * 0.2
    }

    fn same_style(&self, other: &TextRun) -> bool {
        self.font_name == other.font_name && (self.font_size - other.font_size).abs() < 0.01
    }
}

/// Runs sharing a baseline, sorted left to right.
#[derive(Debug, Clone)]
struct RunLine {
    runs: Vec<TextRun>,
    y: f32,
    x: f32,
    /// Length-weighted font size
    font_size: f32,
}

impl RunLine {
    fn from_runs(mut runs: Vec<TextRun>) -> Self {
        runs.sort_by(|a, b| a.x.total_cmp(&b.x));

        let total_chars: usize = runs.iter().map(|r| r.text.len()).sum();
        let weighted: f32 = runs.iter().map(|r| r.font_size * r.text.len() as f32).sum();
        let font_size = match (total_chars, runs.first()) {
            (0, Some(first)) => first.font_size,
            (0, None) => 0.0,
            _ => weighted / total_chars as f32,
        };
        let (x, y) = runs.first().map(|r| (r.x, r.y)).unwrap_or((0.0, 0.0));

        Self {
            runs,
            y,
            x,
            font_size,
        }
    }
}

/// Everything collected from one content stream.
#[derive(Debug, Default)]
struct PageContent {
    runs: Vec<TextRun>,
    /// Images and forms as (x0, y0, x1, y1) in user space
    images: Vec<[f32; 4]>,
}

/// State saved by `q` and restored by `Q`.
#[derive(Debug, Clone)]
struct GraphicsState {
    ctm: Matrix,
    font_resource: Vec<u8>,
    font_name: String,
    font_size: f32,
    leading: f32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            font_resource: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            leading: 0.0,
        }
    }
}

/// Replays content stream operators for one page.
struct ContentInterpreter<'a, B: PdfBackend> {
    backend: &'a B,
    page_id: PageId,
    fonts: &'a BTreeMap<Vec<u8>, String>,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    in_text_block: bool,
    content: PageContent,
}

impl<'a, B: PdfBackend> ContentInterpreter<'a, B> {
    fn new(backend: &'a B, page_id: PageId, fonts: &'a BTreeMap<Vec<u8>, String>) -> Self {
        Self {
            backend,
            page_id,
            fonts,
            state: GraphicsState::default(),
            saved: Vec::new(),
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            in_text_block: false,
            content: PageContent::default(),
        }
    }

    fn run(mut self, ops: &[ContentOp]) -> PageContent {
        for op in ops {
            self.apply(op);
        }
        self.content
    }

    fn apply(&mut self, op: &ContentOp) {
        match op.operator.as_str() {
            "q" => self.saved.push(self.state.clone()),
            "Q" => {
                if let Some(state) = self.saved.pop() {
                    self.state = state;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_op(op) {
                    self.state.ctm = m.multiply(&self.state.ctm);
                }
            }
            "BT" => {
                self.in_text_block = true;
                self.text_matrix = Matrix::IDENTITY;
                self.line_matrix = Matrix::IDENTITY;
            }
            "ET" => self.in_text_block = false,
            "Tf" => {
                if let Some(PdfValue::Name(resource)) = op.operands.first() {
                    self.state.font_name = self
                        .fonts
                        .get(resource)
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(resource).to_string());
                    self.state.font_resource = resource.clone();
                }
                if let Some(size) = op.number(1) {
                    self.state.font_size = size;
                }
            }
            "TL" => {
                if let Some(leading) = op.number(0) {
                    self.state.leading = leading;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    self.move_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    self.state.leading = -ty;
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = Matrix::from_op(op) {
                    self.text_matrix = m;
                    self.line_matrix = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.show_text(text);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let text = self.decode_array(items);
                    self.show_text(text);
                }
            }
            "'" | "\"" => {
                self.next_line();
                let text_idx = if op.operator == "\"" { 2 } else { 0 };
                if let Some(PdfValue::Str(bytes)) = op.operands.get(text_idx) {
                    let text = self.decode(bytes);
                    self.show_text(text);
                }
            }
            "Do" => self.record_xobject(),
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        // Streams that never set TL still expect T* to advance a line.
        let leading = if self.state.leading != 0.0 {
            self.state.leading
        } else {
            self.state.font_size * 1.2
        };
        self.move_line(0.0, -leading);
    }

    fn decode(&self, bytes: &[u8]) -> String {
        if self.state.font_resource.is_empty() {
            return decode_text_simple(bytes);
        }
        self.backend
            .decode_text(self.page_id, &self.state.font_resource, bytes)
    }

    /// Decode a TJ array, turning large negative adjustments into spaces.
    fn decode_array(&self, items: &[PdfValue]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&self.decode(bytes)),
                other => {
                    let Some(adjustment) = get_number_from_value(other) else {
                        continue;
                    };
                    if -adjustment > TJ_SPACE_THRESHOLD
                        && !combined.is_empty()
                        && !combined.ends_with(' ')
                        && !combined.ends_with('\u{00A0}')
                        && !combined.chars().last().is_some_and(is_spaceless_script_char)
                    {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }

    fn show_text(&mut self, text: String) {
        if !self.in_text_block || text.trim().is_empty() {
            return;
        }
        let rendering = self.text_matrix.multiply(&self.state.ctm);
        let (x, y) = rendering.transform(0.0, 0.0);
        let size = (self.state.font_size * rendering.vertical_scale()).abs();
        self.content.runs.push(TextRun::new(
            text,
            x,
            y,
            size,
            self.state.font_name.clone(),
        ));
    }

    /// XObjects paint the unit square under the current transform.
    fn record_xobject(&mut self) {
        let ctm = &self.state.ctm;
        let corners = [
            ctm.transform(0.0, 0.0),
            ctm.transform(1.0, 0.0),
            ctm.transform(0.0, 1.0),
            ctm.transform(1.0, 1.0),
        ];
        let (mut x0, mut y0, mut x1, mut y1) = (f32::MAX, f32::MAX, f32::MIN, f32::MIN);
        for (x, y) in corners {
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x);
            y1 = y1.max(y);
        }
        self.content.images.push([x0, y0, x1, y1]);
    }
}

/// Layout analyzer turning PDF pages into layout-tree pages.
pub struct LayoutAnalyzer<'a, B: PdfBackend> {
    backend: &'a B,
}

impl<'a, B: PdfBackend> LayoutAnalyzer<'a, B> {
    /// Create a new layout analyzer.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Decode one page. `index` is the page's 0-based position in the document.
    pub fn analyze_page(&self, index: usize, page_id: PageId) -> Result<Page> {
        let media_box = self.backend.page_media_box(page_id)?;
        let fonts = self.backend.page_fonts(page_id)?;
        let data = self.backend.page_content(page_id)?;
        let ops = if data.is_empty() {
            Vec::new()
        } else {
            self.backend.decode_content(&data)?
        };

        let content = ContentInterpreter::new(self.backend, page_id, &fonts).run(&ops);
        let page = build_page(index, &media_box, content);

        log::debug!(
            "Page {}: {} blocks from {} operations",
            index + 1,
            page.blocks.len(),
            ops.len()
        );

        Ok(page)
    }
}

/// Assemble the layout tree for a page from collected runs and images.
fn build_page(index: usize, media_box: &MediaBox, content: PageContent) -> Page {
    let mut page = Page::new(index, media_box.width(), media_box.height());

    let lines = group_runs_into_lines(content.runs);
    for block_lines in group_lines_into_blocks(lines) {
        let lines: Vec<Line> = block_lines
            .into_iter()
            .map(|line| to_model_line(line, media_box))
            .collect();
        page.add_block(Block::from_lines(lines));
    }

    for [x0, y0, x1, y1] in content.images {
        page.add_block(Block::non_text(BoundingBox::new(
            x0 - media_box.x0,
            media_box.y1 - y1,
            x1 - media_box.x0,
            media_box.y1 - y0,
        )));
    }

    page
}

/// Group runs into lines by baseline proximity.
fn group_runs_into_lines(mut runs: Vec<TextRun>) -> Vec<RunLine> {
    // Top to bottom (PDF Y grows upward), then left to right.
    runs.sort_by(|a, b| b.y.total_cmp(&a.y).then_with(|| a.x.total_cmp(&b.x)));

    let mut lines: Vec<RunLine> = Vec::new();
    let mut current: Vec<TextRun> = Vec::new();
    let mut current_y: Option<f32> = None;

    for run in runs {
        let tolerance = run.font_size * 0.3;
        match current_y {
            Some(y) if (run.y - y).abs() <= tolerance => current.push(run),
            _ => {
                if !current.is_empty() {
                    lines.push(RunLine::from_runs(std::mem::take(&mut current)));
                }
                current_y = Some(run.y);
                current.push(run);
            }
        }
    }

    if !current.is_empty() {
        lines.push(RunLine::from_runs(current));
    }

    lines
}

/// Group consecutive lines into blocks based on spacing, size and indent.
fn group_lines_into_blocks(lines: Vec<RunLine>) -> Vec<Vec<RunLine>> {
    let avg_spacing = average_line_spacing(&lines);
    let mut blocks: Vec<Vec<RunLine>> = Vec::new();
    let mut current: Vec<RunLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            if should_break_block(prev, &line, avg_spacing) {
                blocks.push(std::mem::take(&mut current));
            }
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn average_line_spacing(lines: &[RunLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }

    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn should_break_block(prev: &RunLine, curr: &RunLine, avg_spacing: f32) -> bool {
    // Large spacing indicates new paragraph
    if (prev.y - curr.y).abs() > avg_spacing * 1.5 {
        return true;
    }

    // Significant font size change
    if (prev.font_size - curr.font_size).abs() > 1.0 {
        return true;
    }

    // Significant left margin change (indentation)
    (prev.x - curr.x).abs() > 20.0
}

/// Merge same-style neighbours into spans and flip to a top-left origin.
fn to_model_line(line: RunLine, media_box: &MediaBox) -> Line {
    let mut merged: Vec<TextRun> = Vec::new();

    for run in line.runs {
        match merged.last_mut() {
            Some(prev) if prev.same_style(&run) => {
                if needs_space(prev, &run) {
                    prev.text.push(' ');
                }
                prev.text.push_str(&run.text);
                prev.width = (run.x + run.width - prev.x).max(prev.width);
            }
            _ => merged.push(run),
        }
    }

    let spans = merged
        .into_iter()
        .map(|run| {
            let bbox = BoundingBox::new(
                run.x - media_box.x0,
                media_box.y1 - run.top(),
                run.x + run.width - media_box.x0,
                media_box.y1 - run.bottom(),
            );
            Span::new(run.text, run.font_size, run.font_name, bbox)
        })
        .collect();

    Line::new(spans)
}

/// Whether a space separates two runs drawn next to each other.
fn needs_space(prev: &TextRun, next: &TextRun) -> bool {
    let gap = next.x - (prev.x + prev.width);

    let char_count = next.text.chars().count();
    let avg_char_width = if char_count > 0 && next.width > 0.0 {
        next.width / char_count as f32
    } else {
        next.font_size * 0.5
    };

    if gap <= avg_char_width * 0.2 {
        return false;
    }

    let prev_last = prev.text.chars().last();
    let next_first = next.text.chars().next();

    if prev_last.is_some_and(char::is_whitespace) || next_first.is_some_and(char::is_whitespace) {
        return false;
    }

    // No space between CJK characters
    !(prev_last.is_some_and(is_spaceless_script_char)
        && next_first.is_some_and(is_spaceless_script_char))
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parser::backend::DEFAULT_MEDIA_BOX;

    /// Backend serving pre-decoded operations for a single page.
    struct MockBackend {
        ops: Vec<ContentOp>,
        fonts: BTreeMap<Vec<u8>, String>,
    }

    impl MockBackend {
        fn new(ops: Vec<ContentOp>) -> Self {
            let mut fonts = BTreeMap::new();
            fonts.insert(b"F1".to_vec(), "Helvetica".to_string());
            fonts.insert(b"F2".to_vec(), "Helvetica-Bold".to_string());
            Self { ops, fonts }
        }
    }

    impl PdfBackend for MockBackend {
        fn pages(&self) -> BTreeMap<u32, PageId> {
            BTreeMap::from([(1, (1, 0))])
        }

        fn page_media_box(&self, _page: PageId) -> Result<MediaBox> {
            Ok(DEFAULT_MEDIA_BOX)
        }

        fn page_fonts(&self, _page: PageId) -> Result<BTreeMap<Vec<u8>, String>> {
            Ok(self.fonts.clone())
        }

        fn page_content(&self, _page: PageId) -> Result<Vec<u8>> {
            Ok(b"mock".to_vec())
        }

        fn decode_content(&self, _data: &[u8]) -> Result<Vec<ContentOp>> {
            if self.ops.is_empty() {
                return Err(Error::PdfParse("no operations".to_string()));
            }
            Ok(self.ops.clone())
        }

        fn decode_text(&self, _page: PageId, _font: &[u8], bytes: &[u8]) -> String {
            decode_text_simple(bytes)
        }
    }

    fn op(operator: &str, operands: Vec<PdfValue>) -> ContentOp {
        ContentOp::new(operator, operands)
    }

    fn num(v: f32) -> PdfValue {
        PdfValue::Real(v)
    }

    fn name(n: &str) -> PdfValue {
        PdfValue::Name(n.as_bytes().to_vec())
    }

    fn string(s: &str) -> PdfValue {
        PdfValue::Str(s.as_bytes().to_vec())
    }

    fn text_at(font: &str, size: f32, x: f32, y: f32, text: &str) -> Vec<ContentOp> {
        vec![
            op("BT", vec![]),
            op("Tf", vec![name(font), num(size)]),
            op("Td", vec![num(x), num(y)]),
            op("Tj", vec![string(text)]),
            op("ET", vec![]),
        ]
    }

    fn analyze(ops: Vec<ContentOp>) -> Result<Page> {
        let backend = MockBackend::new(ops);
        LayoutAnalyzer::new(&backend).analyze_page(0, (1, 0))
    }

    #[test]
    fn test_matrix_multiply_and_transform() {
        let scale = Matrix {
            a: 2.0,
            d: 2.0,
            ..Matrix::IDENTITY
        };
        let m = Matrix::translation(10.0, 5.0).multiply(&scale);
        assert_eq!(m.transform(0.0, 0.0), (20.0, 10.0));
        assert_eq!(m.vertical_scale(), 2.0);
    }

    #[test]
    fn test_heading_and_body_become_separate_blocks() {
        let mut ops = text_at("F2", 24.0, 72.0, 700.0, "Introduction");
        ops.extend(text_at("F1", 10.0, 72.0, 660.0, "First line of body text."));
        ops.extend(text_at("F1", 10.0, 72.0, 648.0, "Second line of body text."));

        let page = analyze(ops).unwrap();
        assert_eq!(page.blocks.len(), 2);

        let heading = &page.blocks[0].lines[0].spans[0];
        assert_eq!(heading.text, "Introduction");
        assert_eq!(heading.font_name, "Helvetica-Bold");
        assert_eq!(heading.rounded_size(), 24);
        // Top-left origin: 792 - (700 + 0.8 * 24)
        assert!((heading.bbox.top - 72.8).abs() < 0.01);
        assert!((heading.bbox.left - 72.0).abs() < 0.01);

        assert_eq!(page.blocks[1].lines.len(), 2);
        assert!(page.blocks[0].bbox.top < page.blocks[1].bbox.top);
    }

    #[test]
    fn test_same_style_runs_merge_into_one_span() {
        let ops = vec![
            op("BT", vec![]),
            op("Tf", vec![name("F2"), num(18.0)]),
            op("Td", vec![num(72.0), num(700.0)]),
            op("Tj", vec![string("Chapter")]),
            op("Td", vec![num(100.0), num(0.0)]),
            op("Tj", vec![string("Two")]),
            op("Tf", vec![name("F1"), num(18.0)]),
            op("Td", vec![num(60.0), num(0.0)]),
            op("Tj", vec![string("(draft)")]),
            op("ET", vec![]),
        ];

        let page = analyze(ops).unwrap();
        let line = &page.blocks[0].lines[0];
        let texts: Vec<&str> = line.spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Chapter Two", "(draft)"]);
        assert_eq!(line.text(), "Chapter Two (draft)");
    }

    #[test]
    fn test_tj_array_spacing() {
        let ops = vec![
            op("BT", vec![]),
            op("Tf", vec![name("F1"), num(12.0)]),
            op("Td", vec![num(72.0), num(700.0)]),
            op(
                "TJ",
                vec![PdfValue::Array(vec![
                    string("Hello"),
                    PdfValue::Integer(-250),
                    string("World"),
                    PdfValue::Integer(-20),
                    string("!"),
                ])],
            ),
            op("ET", vec![]),
        ];

        let page = analyze(ops).unwrap();
        assert_eq!(page.blocks[0].lines[0].text(), "Hello World!");
    }

    #[test]
    fn test_ctm_scales_font_size_and_position() {
        let mut ops = vec![
            op("q", vec![]),
            op("cm", vec![num(2.0), num(0.0), num(0.0), num(2.0), num(0.0), num(0.0)]),
        ];
        ops.extend(text_at("F2", 12.0, 36.0, 300.0, "Scaled Heading"));
        ops.push(op("Q", vec![]));
        ops.extend(text_at("F1", 12.0, 72.0, 100.0, "After restore"));

        let page = analyze(ops).unwrap();
        let spans: Vec<&Span> = page
            .blocks
            .iter()
            .flat_map(|b| b.lines.iter().flat_map(|l| l.spans.iter()))
            .collect();
        assert_eq!(spans[0].rounded_size(), 24);
        assert!((spans[0].bbox.left - 72.0).abs() < 0.01);
        assert_eq!(spans[1].rounded_size(), 12);
    }

    #[test]
    fn test_next_line_operators() {
        let ops = vec![
            op("BT", vec![]),
            op("Tf", vec![name("F1"), num(10.0)]),
            op("TL", vec![num(14.0)]),
            op("Td", vec![num(72.0), num(700.0)]),
            op("Tj", vec![string("one")]),
            op("T*", vec![]),
            op("Tj", vec![string("two")]),
            op("'", vec![string("three")]),
            op("ET", vec![]),
        ];

        let page = analyze(ops).unwrap();
        let texts: Vec<String> = page
            .blocks
            .iter()
            .flat_map(|b| b.lines.iter().map(Line::text))
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_xobject_becomes_non_text_block() {
        let ops = vec![
            op("q", vec![]),
            op("cm", vec![num(100.0), num(0.0), num(0.0), num(50.0), num(72.0), num(600.0)]),
            op("Do", vec![name("Im1")]),
            op("Q", vec![]),
        ];

        let page = analyze(ops).unwrap();
        assert_eq!(page.blocks.len(), 1);
        let block = &page.blocks[0];
        assert!(!block.is_text());
        assert_eq!(block.bbox, BoundingBox::new(72.0, 142.0, 172.0, 192.0));
    }

    #[test]
    fn test_text_outside_bt_is_ignored() {
        let ops = vec![op("Tj", vec![string("stray")])];
        let page = analyze(ops).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_decode_failure_propagates() {
        assert!(analyze(Vec::new()).is_err());
    }

    #[test]
    fn test_spaceless_script_chars() {
        assert!(is_spaceless_script_char('中'));
        assert!(is_spaceless_script_char('カ'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
    }
}
