//! Single-page PDF export of a rendered card
//!
//! The card is laid out at screen scale (pixels, top-left origin) and
//! captured as one Form XObject, which the page then places like an image:
//! its width is the page width minus the margins and its height follows the
//! card's aspect ratio, clamped to the space left on the page. Text uses the
//! standard Helvetica faces with WinAnsi encoding, so no fonts are embedded.

use std::fmt::Write as _;

/// A4 portrait width in points
pub const PAGE_WIDTH_PT: f64 = 595.28;
/// A4 portrait height in points
pub const PAGE_HEIGHT_PT: f64 = 841.89;
/// Margin kept on every side of the placed card
pub const MARGIN_PT: f64 = 30.0;

/// File name of the invitation export
pub const INVITATION_PDF_FILE: &str = "invitation.pdf";

const CARD_WIDTH_PX: f64 = 720.0;
const CARD_PADDING_PX: f64 = 32.0;
const RULE_HEIGHT_PX: f64 = 24.0;
const CARD_BACKGROUND: (f64, f64, f64) = (0.043, 0.063, 0.125);

/// Visual role of a card line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Heading,
    Title,
    Body,
    Muted,
    /// Horizontal separator; the text is ignored
    Rule,
}

impl LineStyle {
    fn font_size(self) -> f64 {
        match self {
            LineStyle::Heading => 18.0,
            LineStyle::Title => 24.0,
            LineStyle::Body | LineStyle::Muted => 16.0,
            LineStyle::Rule => 0.0,
        }
    }

    fn font(self) -> &'static str {
        match self {
            LineStyle::Heading | LineStyle::Title => "F2",
            _ => "F1",
        }
    }

    fn color(self) -> (f64, f64, f64) {
        match self {
            LineStyle::Title | LineStyle::Heading => (1.0, 1.0, 1.0),
            LineStyle::Body => (0.82, 0.84, 0.86),
            LineStyle::Muted | LineStyle::Rule => (0.61, 0.64, 0.69),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLine {
    pub text: String,
    pub style: LineStyle,
}

/// Content of a card, top to bottom
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    pub lines: Vec<CardLine>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, style: LineStyle, text: impl Into<String>) -> Self {
        self.lines.push(CardLine {
            text: text.into(),
            style,
        });
        self
    }

    pub fn rule(self) -> Self {
        self.line(LineStyle::Rule, "")
    }
}

/// A card line after wrapping, in card pixels from the top
#[derive(Debug, Clone, PartialEq)]
struct PlacedLine {
    text: String,
    style: LineStyle,
    baseline: f64,
}

/// Card laid out at screen scale
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: f64,
    pub height: f64,
    lines: Vec<PlacedLine>,
    rules: Vec<f64>,
}

impl CardLayout {
    /// Wrap and stack the card's lines
    pub fn measure(card: &Card) -> Self {
        let content_width = CARD_WIDTH_PX - 2.0 * CARD_PADDING_PX;
        let mut y = CARD_PADDING_PX;
        let mut lines = Vec::new();
        let mut rules = Vec::new();

        for line in &card.lines {
            if line.style == LineStyle::Rule {
                rules.push(y + RULE_HEIGHT_PX / 2.0);
                y += RULE_HEIGHT_PX;
                continue;
            }

            let size = line.style.font_size();
            let line_height = size * 1.5;
            // Helvetica averages about half an em per glyph
            let max_chars = ((content_width / (size * 0.5)).floor() as usize).max(1);

            for wrapped in wrap(&line.text, max_chars) {
                lines.push(PlacedLine {
                    text: wrapped,
                    style: line.style,
                    baseline: y + size * 1.15,
                });
                y += line_height;
            }
        }

        Self {
            width: CARD_WIDTH_PX,
            height: y + CARD_PADDING_PX,
            lines,
            rules,
        }
    }
}

/// Where the card lands on the page, in points from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Fit a `width` × `height` picture onto the page
pub fn placement(width: f64, height: f64) -> Placement {
    let image_width = PAGE_WIDTH_PT - 2.0 * MARGIN_PT;
    let image_height = if width > 0.0 { height * (image_width / width) } else { 0.0 };

    Placement {
        x: MARGIN_PT,
        y: MARGIN_PT,
        width: image_width,
        height: image_height.min(PAGE_HEIGHT_PT - 2.0 * MARGIN_PT),
    }
}

/// Produce a single-page A4 PDF showing `card`
pub fn render_card_pdf(card: &Card) -> Vec<u8> {
    let layout = CardLayout::measure(card);
    let place = placement(layout.width, layout.height);

    let form = form_content(&layout);
    let page = format!(
        "q\n{} 0 0 {} {} {} cm\n/Card Do\nQ\n",
        num(place.width / layout.width),
        num(place.height / layout.height),
        num(place.x),
        num(PAGE_HEIGHT_PT - place.y - place.height),
    );

    let objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << /XObject << /Card 7 0 R >> >> /Contents 6 0 R >>",
            num(PAGE_WIDTH_PT),
            num(PAGE_HEIGHT_PT)
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>".to_string(),
        stream_object("", &page),
        stream_object(
            &format!(
                "/Type /XObject /Subtype /Form /BBox [0 0 {} {}] /Resources << /Font << /F1 4 0 R /F2 5 0 R >> >> ",
                num(layout.width),
                num(layout.height)
            ),
            &form,
        ),
    ];

    assemble(&objects)
}

/// Drawing operators of the card, in card pixels with a bottom-left origin
fn form_content(layout: &CardLayout) -> String {
    let mut out = String::new();
    let (r, g, b) = CARD_BACKGROUND;
    let _ = writeln!(out, "{} {} {} rg", num(r), num(g), num(b));
    let _ = writeln!(out, "0 0 {} {} re f", num(layout.width), num(layout.height));

    let (r, g, b) = LineStyle::Rule.color();
    for y in &layout.rules {
        let _ = writeln!(out, "{} {} {} RG 1 w", num(r), num(g), num(b));
        let _ = writeln!(
            out,
            "{} {} m {} {} l S",
            num(CARD_PADDING_PX),
            num(layout.height - y),
            num(layout.width - CARD_PADDING_PX),
            num(layout.height - y)
        );
    }

    for line in &layout.lines {
        let (r, g, b) = line.style.color();
        let _ = writeln!(
            out,
            "BT /{} {} Tf {} {} {} rg {} {} Td ({}) Tj ET",
            line.style.font(),
            num(line.style.font_size()),
            num(r),
            num(g),
            num(b),
            num(CARD_PADDING_PX),
            num(layout.height - line.baseline),
            pdf_string(&line.text)
        );
    }

    out
}

fn stream_object(dict_entries: &str, content: &str) -> String {
    format!(
        "<< {}/Length {} >>\nstream\n{}\nendstream",
        dict_entries,
        content.len(),
        content
    )
}

/// Number objects from 1, then write the cross-reference table
fn assemble(objects: &[String]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = write!(xref, "{:010} 00000 n \n", offset);
    }
    let _ = write!(
        xref,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    );
    out.extend_from_slice(xref.as_bytes());
    out
}

/// Fixed two-decimal number without a trailing `-0`
fn num(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    if formatted == "-0.00" {
        "0.00".to_string()
    } else {
        formatted
    }
}

/// PDF literal string body in WinAnsi, non-ASCII bytes as octal escapes
fn pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => match win_ansi_byte(c) {
                byte @ 0x20..=0x7e => out.push(byte as char),
                byte => {
                    let _ = write!(out, "\\{:03o}", byte);
                }
            },
        }
    }
    out
}

/// WinAnsi code for `c`; letters the encoding lacks fall back to their base letter
fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '–' => 0x96,
        '—' => 0x97,
        '€' => 0x80,
        'ș' | 'ş' => b's',
        'Ș' | 'Ş' => b'S',
        'ț' | 'ţ' => b't',
        'Ț' | 'Ţ' => b'T',
        'ă' => b'a',
        'Ă' => b'A',
        _ => b'?',
    }
}

/// Greedy word wrap; words longer than a line are split
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card() -> Card {
        Card::new()
            .line(LineStyle::Heading, "Invitation for event")
            .line(LineStyle::Muted, "You are invited to:")
            .line(LineStyle::Title, "Reunion (10 years)")
            .line(LineStyle::Muted, "2025-06-14 · Cluj")
            .rule()
            .line(LineStyle::Body, "RSVP: -")
    }

    #[test]
    fn test_pdf_is_single_page_and_well_formed() {
        let bytes = render_card_pdf(&sample_card());
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));

        let text = String::from_utf8_lossy(&bytes);
        assert_eq!(text.matches("/Type /Page ").count(), 1);
        assert!(text.contains("/Count 1"));
        assert!(text.contains("(Reunion \\(10 years\\)) Tj"));
        assert!(text.contains("2025-06-14 \\267 Cluj"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = render_card_pdf(&sample_card());
        let text = String::from_utf8_lossy(&bytes).to_string();
        let xref_start = text.rfind("xref\n").unwrap();
        let entries: Vec<&str> = text[xref_start..].lines().skip(3).take(7).collect();
        for (index, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            assert!(bytes[offset..].starts_with(format!("{} 0 obj", index + 1).as_bytes()));
        }
    }

    #[test]
    fn test_placement_keeps_aspect_ratio() {
        let place = placement(720.0, 360.0);
        assert_eq!(place.x, MARGIN_PT);
        assert!((place.width - (PAGE_WIDTH_PT - 60.0)).abs() < 1e-9);
        assert!((place.height - place.width / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_placement_clamps_tall_cards() {
        let place = placement(720.0, 10_000.0);
        assert!((place.height - (PAGE_HEIGHT_PT - 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_long_text_wraps() {
        let long = "word ".repeat(200);
        let layout = CardLayout::measure(&Card::new().line(LineStyle::Body, long));
        assert!(layout.lines.len() > 1);
        assert!(layout.height > CARD_PADDING_PX * 2.0 + 24.0);

        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn test_romanian_letters_fall_back() {
        assert_eq!(pdf_string("Ești"), "Esti");
        assert_eq!(pdf_string("Î"), "\\316");
    }
}
