//! Direct PDF layout: the quote is described as a flat list of
//! [`Element`]s, then painted onto A4 pages with printpdf drawing ops.

use printpdf::{
    BuiltinFont, Color, Line, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage, PdfSaveOptions,
    Point, Polygon, PolygonRing, Pt, Rgb, TextItem, WindingOrder,
};

use orcamento_core::company::CompanyProfile;
use orcamento_core::payment::format_brl;
use orcamento_core::quote::Quote;

use crate::error::ExportError;
use crate::styles::LayoutStyles;

const MM_PER_PT: f32 = 25.4 / 72.0;
/// Average Helvetica glyph advance, in ems. Good enough for wrapping.
const AVG_GLYPH_EM: f32 = 0.5;
const BOLD_GLYPH_EM: f32 = 0.55;
const CELL_PADDING_MM: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Paragraph {
        text: String,
        size: f32,
        bold: bool,
        align: Align,
    },
    /// Vertical gap in millimetres.
    Spacer(f32),
    /// Full-width horizontal line.
    Rule,
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl Element {
    fn body(text: impl Into<String>, styles: &LayoutStyles) -> Self {
        Element::Paragraph {
            text: text.into(),
            size: styles.body_size,
            bold: false,
            align: Align::Left,
        }
    }

    fn heading(text: impl Into<String>, styles: &LayoutStyles) -> Self {
        Element::Paragraph {
            text: text.into(),
            size: styles.body_size,
            bold: true,
            align: Align::Left,
        }
    }

    fn centered(text: impl Into<String>, size: f32, bold: bool) -> Self {
        Element::Paragraph {
            text: text.into(),
            size,
            bold,
            align: Align::Center,
        }
    }
}

/// The fixed sequence of elements making up a quote document.
pub fn build_elements(
    quote: &Quote,
    company: &CompanyProfile,
    styles: &LayoutStyles,
) -> Vec<Element> {
    let mut elements = vec![
        Element::centered(&company.name, styles.letterhead_size, true),
        Element::centered(format!("CNPJ: {}", company.tax_id), styles.small_size, false),
        Element::centered(&company.address, styles.small_size, false),
        Element::centered(
            format!("Tel: {} | E-mail: {}", company.phone, company.email),
            styles.small_size,
            false,
        ),
        Element::Spacer(2.0),
        Element::Rule,
        Element::Spacer(6.0),
        Element::centered("ORÇAMENTO", styles.title_size, true),
        Element::Spacer(4.0),
        Element::body(format!("Data: {}", quote.issued_on_display()), styles),
        Element::Spacer(4.0),
        Element::heading("Cliente", styles),
        Element::body(format!("Nome: {}", quote.client_name), styles),
        Element::body(
            format!(
                "CPF/CNPJ: {}",
                quote
                    .tax_id
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "Não informado".to_string())
            ),
            styles,
        ),
        Element::Spacer(4.0),
        Element::heading("Descrição do serviço", styles),
    ];

    elements.extend(quote.description.lines().map(|line| Element::body(line, styles)));

    if let Some(notes) = &quote.notes {
        elements.push(Element::Spacer(4.0));
        elements.push(Element::heading("Observações", styles));
        elements.extend(notes.lines().map(|line| Element::body(line, styles)));
    }

    let options = quote.payment_options();
    elements.extend([
        Element::Spacer(6.0),
        Element::heading("Formas de pagamento", styles),
        Element::Spacer(2.0),
        Element::Table {
            header: options.iter().map(|o| o.label.to_string()).collect(),
            rows: vec![
                options.iter().map(|o| o.terms.to_string()).collect(),
                options.iter().map(|o| format_brl(o.amount)).collect(),
            ],
        },
        Element::Spacer(4.0),
        Element::body(
            format!(
                "Valor à vista: {} | No cartão (+5%): {}",
                format_brl(quote.cash_amount()),
                format_brl(quote.card_amount())
            ),
            styles,
        ),
        Element::Spacer(8.0),
        Element::Rule,
        Element::Spacer(2.0),
        Element::centered(
            format!("Chave PIX para pagamento: {}", company.payment_key),
            styles.small_size,
            true,
        ),
    ]);

    elements
}

/// Builds the quote PDF in memory.
#[derive(Debug, Clone)]
pub struct LayoutRenderer {
    company: CompanyProfile,
    styles: LayoutStyles,
}

impl LayoutRenderer {
    pub fn new(company: CompanyProfile) -> Self {
        Self {
            company,
            styles: LayoutStyles::default(),
        }
    }

    pub fn with_styles(mut self, styles: LayoutStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn render_quote(&self, quote: &Quote) -> Result<Vec<u8>, ExportError> {
        let elements = build_elements(quote, &self.company, &self.styles);
        let pages = paint(&elements, &self.styles);
        if pages.is_empty() {
            return Err(ExportError::Pdf("layout produced no pages".to_string()));
        }

        let mut warnings = Vec::new();
        let bytes = PdfDocument::new("Orçamento")
            .with_pages(pages)
            .save(&PdfSaveOptions::default(), &mut warnings);

        if !warnings.is_empty() {
            tracing::debug!(warnings = warnings.len(), "pdf save produced warnings");
        }
        Ok(bytes)
    }
}

/// Paint elements top to bottom, starting a new page when the cursor
/// reaches the bottom margin.
pub fn paint(elements: &[Element], styles: &LayoutStyles) -> Vec<PdfPage> {
    let mut painter = Painter::new(styles);
    for element in elements {
        match element {
            Element::Paragraph {
                text,
                size,
                bold,
                align,
            } => painter.paragraph(text, *size, *bold, *align),
            Element::Spacer(mm) => painter.advance(*mm),
            Element::Rule => painter.rule(),
            Element::Table { header, rows } => painter.table(header, rows),
        }
    }
    painter.finish()
}

struct Painter<'a> {
    styles: &'a LayoutStyles,
    pages: Vec<PdfPage>,
    ops: Vec<Op>,
    /// Distance from the page bottom, in millimetres.
    cursor: f32,
}

impl<'a> Painter<'a> {
    fn new(styles: &'a LayoutStyles) -> Self {
        Self {
            styles,
            pages: Vec::new(),
            ops: Vec::new(),
            cursor: styles.page_height_mm - styles.margin_mm,
        }
    }

    fn content_width(&self) -> f32 {
        self.styles.page_width_mm - 2.0 * self.styles.margin_mm
    }

    fn line_height(&self, size: f32) -> f32 {
        size * self.styles.line_spacing * MM_PER_PT
    }

    fn ensure_room(&mut self, height: f32) {
        if self.cursor - height < self.styles.margin_mm && !self.ops.is_empty() {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(PdfPage::new(
            Mm(self.styles.page_width_mm),
            Mm(self.styles.page_height_mm),
            ops,
        ));
        self.cursor = self.styles.page_height_mm - self.styles.margin_mm;
    }

    fn advance(&mut self, mm: f32) {
        self.cursor -= mm;
        if self.cursor < self.styles.margin_mm {
            self.break_page();
        }
    }

    fn paragraph(&mut self, text: &str, size: f32, bold: bool, align: Align) {
        let line_height = self.line_height(size);
        let lines = wrap(text, self.content_width(), size, bold);
        for line in lines {
            self.ensure_room(line_height);
            self.cursor -= line_height;
            let x = match align {
                Align::Left => self.styles.margin_mm,
                Align::Center => {
                    let width = text_width(&line, size, bold);
                    self.styles.margin_mm + ((self.content_width() - width) / 2.0).max(0.0)
                }
            };
            let baseline = self.cursor + line_height * 0.25;
            self.text(&line, x, baseline, size, bold);
        }
    }

    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, bold: bool) {
        let font = if bold {
            BuiltinFont::HelveticaBold
        } else {
            BuiltinFont::Helvetica
        };
        self.ops.extend([
            Op::StartTextSection,
            Op::SetFontSizeBuiltinFont {
                size: Pt(size),
                font: font.clone(),
            },
            Op::SetTextCursor {
                pos: Point::new(Mm(x), Mm(y)),
            },
            Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(text.to_string())],
                font,
            },
            Op::EndTextSection,
        ]);
    }

    fn rule(&mut self) {
        let left = self.styles.margin_mm;
        let right = self.styles.page_width_mm - self.styles.margin_mm;
        let y = self.cursor;
        self.line(left, y, right, y);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.ops.extend([
            Op::SetOutlineColor { col: black() },
            Op::SetOutlineThickness { pt: Pt(0.5) },
            Op::DrawLine {
                line: Line {
                    points: vec![point(x1, y1), point(x2, y2)],
                    is_closed: false,
                },
            },
        ]);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, col: Color) {
        self.ops.extend([
            Op::SetFillColor { col },
            Op::DrawPolygon {
                polygon: Polygon {
                    rings: vec![PolygonRing {
                        points: vec![
                            point(x, y),
                            point(x + width, y),
                            point(x + width, y + height),
                            point(x, y + height),
                        ],
                    }],
                    mode: PaintMode::Fill,
                    winding_order: WindingOrder::NonZero,
                },
            },
            Op::SetFillColor { col: black() },
        ]);
    }

    fn table(&mut self, header: &[String], rows: &[Vec<String>]) {
        let columns = header.len().max(1);
        let column_width = self.content_width() / columns as f32;
        let left = self.styles.margin_mm;
        let size = self.styles.body_size;
        let line_height = self.line_height(size);

        let all_rows = std::iter::once((true, header))
            .chain(rows.iter().map(|row| (false, row.as_slice())));
        for (is_header, cells) in all_rows {
            let wrapped: Vec<Vec<String>> = cells
                .iter()
                .map(|cell| wrap(cell, column_width - 2.0 * CELL_PADDING_MM, size, is_header))
                .collect();
            let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
            let row_height = line_count as f32 * line_height + 2.0 * CELL_PADDING_MM;

            self.ensure_room(row_height);
            let top = self.cursor;
            let bottom = top - row_height;

            if is_header {
                let (r, g, b) = self.styles.table_header_fill;
                let fill = Color::Rgb(Rgb {
                    r,
                    g,
                    b,
                    icc_profile: None,
                });
                self.fill_rect(left, bottom, self.content_width(), row_height, fill);
            }

            for (col, lines) in wrapped.iter().enumerate() {
                let x = left + col as f32 * column_width + CELL_PADDING_MM;
                for (i, line) in lines.iter().enumerate() {
                    let baseline = top - CELL_PADDING_MM - (i as f32 + 1.0) * line_height
                        + line_height * 0.25;
                    self.text(line, x, baseline, size, is_header);
                }
            }

            let right = left + self.content_width();
            self.line(left, top, right, top);
            self.line(left, bottom, right, bottom);
            for col in 0..=columns {
                let x = left + col as f32 * column_width;
                self.line(x, top, x, bottom);
            }

            self.cursor = bottom;
        }
    }

    fn finish(mut self) -> Vec<PdfPage> {
        if !self.ops.is_empty() {
            self.break_page();
        }
        self.pages
    }
}

fn point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point::new(Mm(x), Mm(y)),
        bezier: false,
    }
}

fn black() -> Color {
    Color::Rgb(Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        icc_profile: None,
    })
}

fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let em = if bold { BOLD_GLYPH_EM } else { AVG_GLYPH_EM };
    text.chars().count() as f32 * size * em * MM_PER_PT
}

/// Greedy word wrap against an estimated glyph width. Words longer than a
/// full line are split.
pub fn wrap(text: &str, width_mm: f32, size: f32, bold: bool) -> Vec<String> {
    let em = if bold { BOLD_GLYPH_EM } else { AVG_GLYPH_EM };
    let max_chars = ((width_mm / (size * em * MM_PER_PT)).floor() as usize).max(1);

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
