//! Brand configuration and the paragraph style sheet derived from it.
//!
//! A [`BrandConfig`] is built by the caller and handed to a generator; nothing in
//! this module is global, so two documents with different branding can be
//! produced side by side in one process.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::model::Alignment;

/// Points per inch.
pub const INCH: f32 = 72.0;

pub const TITLE: &str = "title";
pub const SUBTITLE: &str = "subtitle";
pub const HEADING1: &str = "heading1";
pub const HEADING2: &str = "heading2";
pub const BODY: &str = "body";
pub const BULLET: &str = "bullet";
pub const ARABIC: &str = "arabic";
pub const HIGHLIGHT: &str = "highlight";
pub const NOTICE: &str = "notice";

/// Parse `#rrggbb` (leading `#` optional) into an RGB triple.
pub fn parse_hex_color(val: &str) -> Option<[u8; 3]> {
    let hex = val.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

#[derive(Clone, Debug)]
pub struct Palette {
    pub midnight_blue: [u8; 3],
    pub medical_blue: [u8; 3],
    pub signal_teal: [u8; 3],
    pub deep_orange: [u8; 3],
    pub professional_gray: [u8; 3],
    pub light_gray: [u8; 3],
    pub border_gray: [u8; 3],
    pub white: [u8; 3],
    pub black: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            midnight_blue: [0x1a, 0x36, 0x5d],
            medical_blue: [0x2b, 0x6c, 0xb8],
            signal_teal: [0x0e, 0xa5, 0xe9],
            deep_orange: [0xea, 0x58, 0x0c],
            professional_gray: [0x64, 0x74, 0x8b],
            light_gray: [0xf1, 0xf5, 0xf9],
            border_gray: [0xcb, 0xd5, 0xe1],
            white: [0xff, 0xff, 0xff],
            black: [0x00, 0x00, 0x00],
        }
    }
}

/// Font names may list `;`-separated candidates; the first one that resolves wins.
#[derive(Clone, Debug)]
pub struct Typography {
    pub title_font: String,
    pub subtitle_font: String,
    pub body_font: String,
    pub body_bold_font: String,
    pub arabic_font: String,
    pub size_title: f32,
    pub size_subtitle: f32,
    pub size_heading1: f32,
    pub size_heading2: f32,
    pub size_body: f32,
    pub size_small: f32,
    pub size_footer: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            title_font: "Helvetica-Bold".into(),
            subtitle_font: "Helvetica-Bold".into(),
            body_font: "Helvetica".into(),
            body_bold_font: "Helvetica-Bold".into(),
            arabic_font: "IBM Plex Sans Arabic;Noto Sans Arabic;Noto Naskh Arabic;DejaVu Sans;Arial"
                .into(),
            size_title: 24.0,
            size_subtitle: 18.0,
            size_heading1: 16.0,
            size_heading2: 14.0,
            size_body: 11.0,
            size_small: 9.0,
            size_footer: 8.0,
        }
    }
}

/// Page size and margins, in points.
#[derive(Clone, Debug)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Height reserved above the content frame for the header band.
    pub header_band: f32,
}

impl PageGeometry {
    pub fn letter() -> Self {
        Self {
            width: 8.5 * INCH,
            height: 11.0 * INCH,
            margin_top: 0.75 * INCH,
            margin_bottom: 0.75 * INCH,
            margin_left: 0.75 * INCH,
            margin_right: 0.75 * INCH,
            header_band: 1.2 * INCH,
        }
    }

    pub fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            ..Self::letter()
        }
    }

    pub fn text_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

#[derive(Clone, Debug)]
pub struct Spacing {
    pub large: f32,
    pub medium: f32,
    pub small: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            large: 0.5 * INCH,
            medium: 0.3 * INCH,
            small: 0.15 * INCH,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Identity {
    pub company_name: String,
    pub company_name_localized: String,
    pub oid: String,
    pub security_classification: String,
    pub security_classification_localized: String,
    pub compliance_badge: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            company_name: "BrainSAIT".into(),
            company_name_localized: "برين سايت".into(),
            oid: "1.3.6.1.4.1.61026".into(),
            security_classification: "CONFIDENTIAL - HIPAA PROTECTED".into(),
            security_classification_localized: "سري - محمي بموجب HIPAA".into(),
            compliance_badge: "HIPAA | NPHIES Compliant".into(),
        }
    }
}

/// Everything that makes a document look like it belongs to one brand.
#[derive(Clone, Debug, Default)]
pub struct BrandConfig {
    pub palette: Palette,
    pub typography: Typography,
    pub page: PageGeometry,
    pub spacing: Spacing,
    pub identity: Identity,
    /// Font files registered ahead of the platform font directories.
    pub font_files: Vec<PathBuf>,
    /// Extra directories searched for fonts ahead of the platform ones.
    pub font_dirs: Vec<PathBuf>,
    /// Replace characters the selected font cannot encode with `?` instead of
    /// failing the build.
    pub substitute_missing_glyphs: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphStyle {
    pub name: String,
    pub font_name: String,
    pub font_size: f32,
    pub leading: f32,
    pub color: [u8; 3],
    pub alignment: Alignment,
    pub space_before: f32,
    pub space_after: f32,
    pub indent_left: f32,
    pub back_color: Option<[u8; 3]>,
    pub border_padding: f32,
}

impl ParagraphStyle {
    pub fn new(name: &str, font_name: &str, font_size: f32) -> Self {
        Self {
            name: name.to_string(),
            font_name: font_name.to_string(),
            font_size,
            leading: font_size * 1.2,
            color: [0, 0, 0],
            alignment: Alignment::Left,
            space_before: 0.0,
            space_after: 0.0,
            indent_left: 0.0,
            back_color: None,
            border_padding: 0.0,
        }
    }

    fn color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    fn spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }
}

/// Named paragraph styles. Immutable once built; rebuilt per document.
#[derive(Clone, Debug)]
pub struct StyleSheet {
    styles: BTreeMap<String, ParagraphStyle>,
}

impl StyleSheet {
    pub fn from_brand(brand: &BrandConfig) -> Self {
        let c = &brand.palette;
        let t = &brand.typography;

        let mut highlight = ParagraphStyle::new(HIGHLIGHT, &t.body_bold_font, t.size_body)
            .color(c.medical_blue)
            .spacing(0.0, 8.0);
        highlight.back_color = Some(c.light_gray);
        highlight.border_padding = 8.0;

        let mut bullet = ParagraphStyle::new(BULLET, &t.body_font, t.size_body)
            .color(c.black)
            .spacing(0.0, 6.0);
        bullet.indent_left = 20.0;

        let mut notice = ParagraphStyle::new(NOTICE, &t.body_font, 10.0)
            .color(c.deep_orange)
            .align(Alignment::Center)
            .spacing(brand.spacing.large, 8.0);
        notice.font_name = format!("{};{}", t.body_font, t.arabic_font);

        let styles = [
            ParagraphStyle::new(TITLE, &t.title_font, t.size_title)
                .color(c.midnight_blue)
                .align(Alignment::Center)
                .spacing(0.0, 20.0),
            ParagraphStyle::new(SUBTITLE, &t.subtitle_font, t.size_subtitle)
                .color(c.medical_blue)
                .spacing(10.0, 15.0),
            ParagraphStyle::new(HEADING1, &t.subtitle_font, t.size_heading1)
                .color(c.medical_blue)
                .spacing(12.0, 12.0),
            ParagraphStyle::new(HEADING2, &t.body_bold_font, t.size_heading2)
                .color(c.professional_gray)
                .spacing(10.0, 10.0),
            ParagraphStyle::new(BODY, &t.body_font, t.size_body)
                .color(c.black)
                .align(Alignment::Justify)
                .spacing(0.0, 8.0),
            bullet,
            ParagraphStyle::new(ARABIC, &t.arabic_font, t.size_body)
                .color(c.black)
                .align(Alignment::Right)
                .spacing(0.0, 8.0),
            highlight,
            notice,
        ];

        Self {
            styles: styles.into_iter().map(|s| (s.name.clone(), s)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Result<&ParagraphStyle> {
        self.styles
            .get(name)
            .ok_or_else(|| Error::Configuration(format!("no paragraph style named '{name}'")))
    }

    /// Style for a section heading. Only levels 1 and 2 exist.
    pub fn heading(&self, level: u8) -> Result<&ParagraphStyle> {
        match level {
            1 => self.get(HEADING1),
            2 => self.get(HEADING2),
            other => Err(Error::Configuration(format!(
                "no heading style for level {other} (expected 1 or 2)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#1a365d"), Some([0x1a, 0x36, 0x5d]));
        assert_eq!(parse_hex_color("EA580C"), Some([0xea, 0x58, 0x0c]));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#zz0000"), None);
    }

    #[test]
    fn heading_levels() {
        let sheet = StyleSheet::from_brand(&BrandConfig::default());
        assert_eq!(sheet.heading(1).unwrap().font_size, 16.0);
        assert_eq!(sheet.heading(2).unwrap().font_size, 14.0);
        assert!(matches!(sheet.heading(3), Err(Error::Configuration(_))));
        assert!(matches!(sheet.get("caption"), Err(Error::Configuration(_))));
    }
}
