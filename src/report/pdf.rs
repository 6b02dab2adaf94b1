//! PDF Document Writer
//! Turns an ordered list of draw calls into a single-font PDF 1.4 file.
//!
//! Writes the object table directly rather than going through a layout engine.
//! Coordinates are millimetres from the top-left of an A4 page.

/// A4 page size in millimetres
pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;

const PT_PER_MM: f64 = 72.0 / 25.4;
const LINE_WIDTH_PT: f64 = 0.57;

/// Helvetica advance widths (1/1000 em) for ASCII 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    pub const fn gray(level: u8) -> Self {
        Rgb(level, level, level)
    }

    fn components(self) -> String {
        format!(
            "{} {} {}",
            num(self.0 as f64 / 255.0),
            num(self.1 as f64 / 255.0),
            num(self.2 as f64 / 255.0)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// One drawing instruction, applied in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    FontSize(f64),
    TextColor(Rgb),
    DrawColor(Rgb),
    Text {
        text: String,
        x: f64,
        y: f64,
        align: TextAlign,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    NewPage,
}

/// Width of `text` in millimetres at `font_size` points.
pub fn text_width_mm(text: &str, font_size: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|c| match c as u32 {
            code @ 32..=126 => HELVETICA_WIDTHS[(code - 32) as usize] as u32,
            _ => 556,
        })
        .sum();
    units as f64 / 1000.0 * font_size / PT_PER_MM
}

/// PDF under construction: one content stream per page.
pub struct PdfDocument {
    pages: Vec<Vec<u8>>,
    font_size: f64,
    text_color: Rgb,
    draw_color: Rgb,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            font_size: 16.0,
            text_color: Rgb::BLACK,
            draw_color: Rgb::BLACK,
        }
    }

    /// Build a document by applying `calls` in order.
    pub fn from_calls(calls: &[DrawCall]) -> Self {
        let mut doc = Self::new();
        for call in calls {
            doc.apply(call);
        }
        doc
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn apply(&mut self, call: &DrawCall) {
        match call {
            DrawCall::FontSize(size) => self.font_size = *size,
            DrawCall::TextColor(color) => self.text_color = *color,
            DrawCall::DrawColor(color) => self.draw_color = *color,
            DrawCall::Text { text, x, y, align } => self.text(text, *x, *y, *align),
            DrawCall::Line { x1, y1, x2, y2 } => self.line(*x1, *y1, *x2, *y2),
            DrawCall::NewPage => self.pages.push(Vec::new()),
        }
    }

    fn current(&mut self) -> &mut Vec<u8> {
        // pages is never empty
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn text(&mut self, text: &str, x: f64, y: f64, align: TextAlign) {
        let left = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - text_width_mm(text, self.font_size) / 2.0,
        };
        let head = format!(
            "BT /F1 {} Tf {} rg {} {} Td (",
            num(self.font_size),
            self.text_color.components(),
            num(left * PT_PER_MM),
            num((PAGE_HEIGHT_MM - y) * PT_PER_MM)
        );
        let body = escape_text(text);
        let stream = self.current();
        stream.extend_from_slice(head.as_bytes());
        stream.extend_from_slice(&body);
        stream.extend_from_slice(b") Tj ET\n");
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let op = format!(
            "{} RG {} w {} {} m {} {} l S\n",
            self.draw_color.components(),
            num(LINE_WIDTH_PT),
            num(x1 * PT_PER_MM),
            num((PAGE_HEIGHT_MM - y1) * PT_PER_MM),
            num(x2 * PT_PER_MM),
            num((PAGE_HEIGHT_MM - y2) * PT_PER_MM)
        );
        self.current().extend_from_slice(op.as_bytes());
    }

    /// Serialize the document: header, objects, xref table, trailer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let page_count = self.pages.len();
        // 1 catalog, 2 page tree, 3 font, then (page, content) pairs
        let object_count = 3 + page_count * 2;
        let page_id = |i: usize| 4 + i * 2;

        let mut out: Vec<u8> = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(object_count);

        let mut object = |out: &mut Vec<u8>, id: usize, body: &[u8]| {
            offsets.push(out.len());
            out.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        };

        object(&mut out, 1, b"<< /Type /Catalog /Pages 2 0 R >>");

        let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", page_id(i))).collect();
        object(
            &mut out,
            2,
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                page_count
            )
            .as_bytes(),
        );

        object(
            &mut out,
            3,
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
        );

        for (i, content) in self.pages.iter().enumerate() {
            let id = page_id(i);
            object(
                &mut out,
                id,
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                    num(PAGE_WIDTH_MM * PT_PER_MM),
                    num(PAGE_HEIGHT_MM * PT_PER_MM),
                    id + 1
                )
                .as_bytes(),
            );

            let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
            stream.extend_from_slice(content);
            stream.extend_from_slice(b"\nendstream");
            object(&mut out, id + 1, &stream);
        }

        let xref_offset = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", object_count + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                object_count + 1,
                xref_offset
            )
            .as_bytes(),
        );
        out
    }
}

/// Encode as WinAnsi bytes and escape string delimiters.
///
/// Control characters and anything outside Latin-1 become `?`.
fn escape_text(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                bytes.push(b'\\');
                bytes.push(c as u8);
            }
            c if c.is_control() => bytes.push(b'?'),
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => bytes.push(c as u8),
            _ => bytes.push(b'?'),
        }
    }
    bytes
}

/// Compact decimal for content streams.
fn num(value: f64) -> String {
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
