use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use memmap2::Mmap;
use pdf_writer::{Name, Pdf, Rect, Ref};
use ttf_parser::Face;

use crate::error::{Error, Result};
use crate::style::BrandConfig;

/// Handle to a font registered in a [`FontBook`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

impl BuiltinFont {
    fn from_name(name: &str, bold: bool, italic: bool) -> Option<Self> {
        let (base_bold, base_italic) = match name.to_ascii_lowercase().as_str() {
            "helvetica" => (false, false),
            "helvetica-bold" => (true, false),
            "helvetica-oblique" => (false, true),
            "helvetica-boldoblique" => (true, true),
            _ => return None,
        };
        Some(match (base_bold || bold, base_italic || italic) {
            (false, false) => BuiltinFont::Helvetica,
            (true, false) => BuiltinFont::HelveticaBold,
            (false, true) => BuiltinFont::HelveticaOblique,
            (true, true) => BuiltinFont::HelveticaBoldOblique,
        })
    }

    fn base_font(self) -> &'static [u8] {
        match self {
            BuiltinFont::Helvetica => b"Helvetica",
            BuiltinFont::HelveticaBold => b"Helvetica-Bold",
            BuiltinFont::HelveticaOblique => b"Helvetica-Oblique",
            BuiltinFont::HelveticaBoldOblique => b"Helvetica-BoldOblique",
        }
    }

    fn is_bold(self) -> bool {
        matches!(
            self,
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique
        )
    }
}

// Helvetica AFM advance widths for ASCII 32..=126.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :;<=>?@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [\]^_`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {|}~
];

const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    333, 333, 584, 584, 584, 611, 975, // :;<=>?@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    333, 278, 333, 584, 556, 333, // [\]^_`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a-m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n-z
    389, 280, 389, 584, // {|}~
];

/// Width in 1000-units of a WinAnsi byte in the Helvetica family.
fn helvetica_width(byte: u8, bold: bool) -> f32 {
    let table = if bold {
        &HELVETICA_BOLD_ASCII
    } else {
        &HELVETICA_ASCII
    };
    match byte {
        32..=126 => table[(byte - 32) as usize] as f32,
        0x85 | 0x97 | 0x89 => 1000.0, // ellipsis, em dash, per mille
        0x95 => 350.0,                // bullet
        0x91 | 0x92 => if bold { 278.0 } else { 222.0 },
        0x93 | 0x94 => if bold { 500.0 } else { 333.0 },
        0xA0 => 278.0,
        _ => 556.0,
    }
}

/// Map a single Unicode char to its WinAnsi byte, or `None` if unmappable.
pub(crate) fn char_to_winansi(c: char) -> Option<u8> {
    let byte = match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => return None,
    };
    Some(byte)
}

enum FontData {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl FontData {
    fn bytes(&self) -> &[u8] {
        match self {
            FontData::Owned(v) => v,
            FontData::Mapped(m) => m,
        }
    }
}

struct TrueTypeFont {
    family: String,
    data: FontData,
    face_index: u32,
    units_per_em: f32,
    /// Original glyph ids renumbered in first-use order; text is encoded with the
    /// new ids so the subset can be cut after layout.
    remapper: subsetter::GlyphRemapper,
    char_to_gid: HashMap<char, u16>,
    widths_1000: HashMap<char, Option<f32>>,
}

impl TrueTypeFont {
    fn face(&self) -> Option<Face<'_>> {
        Face::parse(self.data.bytes(), self.face_index).ok()
    }

    /// Advance width in 1000-units, or `None` when the face has no glyph for `ch`.
    fn width_1000(&mut self, ch: char) -> Option<f32> {
        if let Some(w) = self.widths_1000.get(&ch) {
            return *w;
        }
        let units = self.units_per_em;
        let w = self.face().and_then(|face| {
            let gid = face.glyph_index(ch)?;
            Some(face.glyph_hor_advance(gid).unwrap_or(0) as f32 / units * 1000.0)
        });
        self.widths_1000.insert(ch, w);
        w
    }

    fn gid(&mut self, ch: char) -> Option<u16> {
        if let Some(&gid) = self.char_to_gid.get(&ch) {
            return Some(gid);
        }
        let old = self.face()?.glyph_index(ch)?;
        let new_gid = self.remapper.remap(old.0);
        self.char_to_gid.insert(ch, new_gid);
        Some(new_gid)
    }
}

enum FontKind {
    Builtin(BuiltinFont),
    TrueType(Box<TrueTypeFont>),
}

struct LoadedFont {
    pdf_name: String,
    kind: FontKind,
    ascender_ratio: f32,
}

/// (lowercase family name, bold, italic) -> (file path, face index within TTC)
type FontLookup = HashMap<(String, bool, bool), (PathBuf, u32)>;

static SYSTEM_FONT_INDEX: OnceLock<FontLookup> = OnceLock::new();

fn font_family_name(face: &Face) -> Option<String> {
    for name in face.names() {
        if name.name_id == ttf_parser::name_id::FAMILY
            && name.is_unicode()
            && let Some(s) = name.to_string()
        {
            return Some(s);
        }
    }
    None
}

fn read_font_style(data: &[u8], face_index: u32) -> Option<(String, bool, bool)> {
    let face = Face::parse(data, face_index).ok()?;
    let family = font_family_name(&face)?;
    Some((family, face.is_bold(), face.is_italic()))
}

fn platform_font_directories() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();

    #[cfg(target_os = "macos")]
    {
        dirs.extend([
            "/Library/Fonts".into(),
            "/System/Library/Fonts".into(),
            "/System/Library/Fonts/Supplemental".into(),
        ]);
        if let Ok(home) = std::env::var("HOME") {
            dirs.push(PathBuf::from(&home).join("Library/Fonts"));
        }
    }

    #[cfg(target_os = "linux")]
    {
        dirs.extend(["/usr/share/fonts".into(), "/usr/local/share/fonts".into()]);
        if let Ok(home) = std::env::var("HOME") {
            dirs.push(PathBuf::from(home).join(".local/share/fonts"));
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(windir) = std::env::var("WINDIR") {
            dirs.push(PathBuf::from(windir).join("Fonts"));
        } else {
            dirs.push("C:\\Windows\\Fonts".into());
        }
    }

    dirs
}

fn is_font_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("ttf" | "otf" | "ttc")
    )
}

fn index_font_file(path: &Path, index: &mut FontLookup) {
    let Ok(file) = std::fs::File::open(path) else {
        return;
    };
    // SAFETY: font files are opened read-only and only read during indexing.
    let Ok(data) = (unsafe { Mmap::map(&file) }) else {
        return;
    };
    let face_count = ttf_parser::fonts_in_collection(&data).unwrap_or(1);
    for face_index in 0..face_count {
        if let Some((family, bold, italic)) = read_font_style(&data, face_index) {
            index
                .entry((family.to_lowercase(), bold, italic))
                .or_insert_with(|| (path.to_path_buf(), face_index));
        }
    }
}

fn scan_font_dirs(dirs: &[PathBuf]) -> FontLookup {
    let t0 = std::time::Instant::now();
    let mut index = FontLookup::new();
    let mut stack: Vec<PathBuf> = dirs.to_vec();
    let mut files = 0usize;
    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if is_font_file(&path) {
                index_font_file(&path, &mut index);
                files += 1;
            }
        }
    }
    log::debug!(
        "Indexed {} font faces from {} files in {:.1}ms",
        index.len(),
        files,
        t0.elapsed().as_secs_f64() * 1000.0
    );
    index
}

fn system_font_index() -> &'static FontLookup {
    SYSTEM_FONT_INDEX.get_or_init(|| scan_font_dirs(&platform_font_directories()))
}

/// Look up a font file by family name and style. Falls back to the regular
/// variant if the requested bold/italic is not available.
fn find_in(index: &FontLookup, family: &str, bold: bool, italic: bool) -> Option<(PathBuf, u32)> {
    let key = family.to_lowercase();
    index
        .get(&(key.clone(), bold, italic))
        .or_else(|| {
            if bold || italic {
                index.get(&(key, false, false))
            } else {
                None
            }
        })
        .cloned()
}

fn load_truetype(path: &Path, face_index: u32, family: &str) -> Option<TrueTypeFont> {
    let file = std::fs::File::open(path).ok()?;
    // SAFETY: the mapping is read-only and lives as long as the font book.
    let data = match unsafe { Mmap::map(&file) } {
        Ok(m) => FontData::Mapped(m),
        Err(_) => FontData::Owned(std::fs::read(path).ok()?),
    };
    let units_per_em = Face::parse(data.bytes(), face_index)
        .ok()?
        .units_per_em() as f32;
    Some(TrueTypeFont {
        family: family.to_string(),
        data,
        face_index,
        units_per_em,
        remapper: subsetter::GlyphRemapper::new(),
        char_to_gid: HashMap::new(),
        widths_1000: HashMap::new(),
    })
}

pub(crate) fn font_candidates(spec: &str) -> impl Iterator<Item = &str> {
    spec.split(';').map(str::trim).filter(|s| !s.is_empty())
}

/// Fonts used by one document: resolves names, measures and encodes text, and
/// embeds what was used once layout is done.
pub struct FontBook {
    fonts: Vec<LoadedFont>,
    resolved: HashMap<(String, bool, bool), Option<FontId>>,
    extra_index: FontLookup,
    substitute_missing: bool,
}

impl FontBook {
    pub fn new(brand: &BrandConfig) -> Self {
        let mut extra_index = scan_font_dirs(&brand.font_dirs);
        for file in &brand.font_files {
            index_font_file(file, &mut extra_index);
        }
        Self {
            fonts: Vec::new(),
            resolved: HashMap::new(),
            extra_index,
            substitute_missing: brand.substitute_missing_glyphs,
        }
    }

    /// A book that only knows the built-in Helvetica family.
    pub fn builtin() -> Self {
        Self {
            fonts: Vec::new(),
            resolved: HashMap::new(),
            extra_index: FontLookup::new(),
            substitute_missing: false,
        }
    }

    fn push(&mut self, kind: FontKind, ascender_ratio: f32) -> FontId {
        let id = FontId(self.fonts.len());
        self.fonts.push(LoadedFont {
            pdf_name: format!("F{}", self.fonts.len() + 1),
            kind,
            ascender_ratio,
        });
        id
    }

    /// Resolve a single candidate name, caching misses too.
    fn try_resolve(&mut self, name: &str, bold: bool, italic: bool) -> Option<FontId> {
        let key = (name.to_lowercase(), bold, italic);
        if let Some(hit) = self.resolved.get(&key) {
            return *hit;
        }
        let id = if let Some(builtin) = BuiltinFont::from_name(name, bold, italic) {
            let existing = self.fonts.iter().position(
                |f| matches!(f.kind, FontKind::Builtin(b) if b == builtin),
            );
            Some(existing.map(FontId).unwrap_or_else(|| self.push(FontKind::Builtin(builtin), 0.718)))
        } else {
            find_in(&self.extra_index, name, bold, italic)
                .or_else(|| find_in(system_font_index(), name, bold, italic))
                .and_then(|(path, face_index)| {
                    let font = load_truetype(&path, face_index, name)?;
                    let ascender_ratio = font
                        .face()
                        .map(|f| f.ascender() as f32 / font.units_per_em)
                        .unwrap_or(0.75);
                    log::debug!(
                        "Resolved font {name} bold={bold} italic={italic} -> {}",
                        path.display()
                    );
                    Some(self.push(FontKind::TrueType(Box::new(font)), ascender_ratio))
                })
        };
        self.resolved.insert(key, id);
        id
    }

    /// Resolve a `;`-separated font spec, preferring the first candidate that can
    /// encode all of `text`. Unresolvable specs fall back to Helvetica.
    pub(crate) fn resolve_for_text(
        &mut self,
        spec: &str,
        bold: bool,
        italic: bool,
        text: &str,
    ) -> FontId {
        let mut first = None;
        for candidate in font_candidates(spec) {
            let Some(id) = self.try_resolve(candidate, bold, italic) else {
                continue;
            };
            if text.chars().all(|ch| self.has_glyph(id, ch)) {
                return id;
            }
            first.get_or_insert(id);
        }
        first.unwrap_or_else(|| {
            log::warn!("Font not found: {spec} bold={bold} italic={italic} — using Helvetica");
            let fallback = self.try_resolve("Helvetica", bold, italic);
            fallback.unwrap_or(FontId(0))
        })
    }

    pub(crate) fn resolve(&mut self, spec: &str, bold: bool, italic: bool) -> FontId {
        self.resolve_for_text(spec, bold, italic, "")
    }

    pub(crate) fn pdf_name(&self, id: FontId) -> &str {
        &self.fonts[id.0].pdf_name
    }

    pub(crate) fn ascender_ratio(&self, id: FontId) -> f32 {
        self.fonts[id.0].ascender_ratio
    }

    fn has_glyph(&mut self, id: FontId, ch: char) -> bool {
        if ch.is_whitespace() && ch != '\u{A0}' {
            return true;
        }
        match &mut self.fonts[id.0].kind {
            FontKind::Builtin(_) => char_to_winansi(ch).is_some(),
            FontKind::TrueType(tt) => tt.width_1000(ch).is_some(),
        }
    }

    fn char_width_1000(&mut self, id: FontId, ch: char) -> f32 {
        match &mut self.fonts[id.0].kind {
            FontKind::Builtin(b) => {
                let byte = char_to_winansi(ch).unwrap_or(b'?');
                helvetica_width(byte, b.is_bold())
            }
            FontKind::TrueType(tt) => tt
                .width_1000(ch)
                .or_else(|| tt.width_1000('?'))
                .unwrap_or(500.0),
        }
    }

    pub(crate) fn text_width(&mut self, id: FontId, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(id, ch) * font_size / 1000.0)
            .sum()
    }

    pub(crate) fn space_width(&mut self, id: FontId, font_size: f32) -> f32 {
        self.char_width_1000(id, ' ') * font_size / 1000.0
    }

    /// Encode text for a content stream: WinAnsi bytes for built-in fonts,
    /// big-endian 2-byte glyph ids for embedded ones.
    pub(crate) fn encode(&mut self, id: FontId, text: &str) -> Result<Vec<u8>> {
        let substitute = self.substitute_missing;
        let font = &mut self.fonts[id.0];
        let missing = |ch: char, font_name: &str| -> Result<()> {
            if substitute {
                log::warn!("No glyph for U+{:04X} in {font_name}; substituting '?'", ch as u32);
                Ok(())
            } else {
                Err(Error::Layout(format!(
                    "character '{ch}' (U+{:04X}) cannot be encoded in font {font_name}",
                    ch as u32
                )))
            }
        };
        match &mut font.kind {
            FontKind::Builtin(b) => {
                let name = String::from_utf8_lossy(b.base_font()).into_owned();
                let mut out = Vec::with_capacity(text.len());
                for ch in text.chars() {
                    match char_to_winansi(ch) {
                        Some(byte) => out.push(byte),
                        None => {
                            missing(ch, &name)?;
                            out.push(b'?');
                        }
                    }
                }
                Ok(out)
            }
            FontKind::TrueType(tt) => {
                let mut out = Vec::with_capacity(text.len() * 2);
                for ch in text.chars() {
                    let gid = match tt.gid(ch) {
                        Some(gid) => gid,
                        None => {
                            missing(ch, &tt.family)?;
                            tt.gid('?').unwrap_or(0)
                        }
                    };
                    out.extend_from_slice(&gid.to_be_bytes());
                }
                Ok(out)
            }
        }
    }

    /// Write every registered font into `pdf`. Returns `(resource name, ref)` pairs
    /// for the page resource dictionaries.
    pub(crate) fn write_fonts(
        &mut self,
        pdf: &mut Pdf,
        alloc: &mut impl FnMut() -> Ref,
    ) -> Result<Vec<(String, Ref)>> {
        let mut pairs = Vec::with_capacity(self.fonts.len());
        for font in &mut self.fonts {
            let font_ref = alloc();
            match &mut font.kind {
                FontKind::Builtin(b) => {
                    pdf.type1_font(font_ref)
                        .base_font(Name(b.base_font()))
                        .encoding_predefined(Name(b"WinAnsiEncoding"));
                }
                FontKind::TrueType(tt) => embed_truetype(pdf, font_ref, tt, alloc)?,
            }
            pairs.push((font.pdf_name.clone(), font_ref));
        }
        Ok(pairs)
    }
}

/// Embed a TrueType/OpenType font as a CIDFont (Type0 composite) with Identity-H
/// encoding, subset to the glyphs used by the document.
fn embed_truetype(
    pdf: &mut Pdf,
    font_ref: Ref,
    tt: &TrueTypeFont,
    alloc: &mut impl FnMut() -> Ref,
) -> Result<()> {
    let face = tt
        .face()
        .ok_or_else(|| Error::Layout(format!("font {} could not be parsed", tt.family)))?;
    let font_data = tt.data.bytes();

    let units = tt.units_per_em;
    let ascent = face.ascender() as f32 / units * 1000.0;
    let descent = face.descender() as f32 / units * 1000.0;
    let cap_height = face
        .capital_height()
        .map(|h| h as f32 / units * 1000.0)
        .unwrap_or(700.0);
    let bb = face.global_bounding_box();
    let bbox = Rect::new(
        bb.x_min as f32 / units * 1000.0,
        bb.y_min as f32 / units * 1000.0,
        bb.x_max as f32 / units * 1000.0,
        bb.y_max as f32 / units * 1000.0,
    );

    let subset_data = subsetter::subset(font_data, tt.face_index, &tt.remapper).unwrap_or_else(|e| {
        log::warn!("Font subsetting failed for {}: {e} — embedding full font", tt.family);
        font_data.to_vec()
    });
    let data_len = i32::try_from(subset_data.len())
        .map_err(|_| Error::Layout(format!("font {} is too large to embed", tt.family)))?;

    let descriptor_ref = alloc();
    let data_ref = alloc();
    let cid_font_ref = alloc();
    let tounicode_ref = alloc();

    pdf.stream(data_ref, &subset_data)
        .pair(Name(b"Length1"), data_len);

    let ps_name = tt.family.replace(' ', "");

    pdf.font_descriptor(descriptor_ref)
        .name(Name(ps_name.as_bytes()))
        .flags(pdf_writer::types::FontFlags::NON_SYMBOLIC)
        .bbox(bbox)
        .italic_angle(0.0)
        .ascent(ascent)
        .descent(descent)
        .cap_height(cap_height)
        .stem_v(80.0)
        .font_file2(data_ref);

    let system_info = pdf_writer::types::SystemInfo {
        registry: pdf_writer::Str(b"Adobe"),
        ordering: pdf_writer::Str(b"Identity"),
        supplement: 0,
    };
    {
        let mut cid = pdf.cid_font(cid_font_ref);
        cid.subtype(pdf_writer::types::CidFontType::Type2);
        cid.base_font(Name(ps_name.as_bytes()));
        cid.system_info(system_info);
        cid.font_descriptor(descriptor_ref);
        cid.default_width(0.0);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));
        let mut gid_widths: Vec<(u16, f32)> = tt
            .char_to_gid
            .iter()
            .filter_map(|(&ch, &new_gid)| {
                face.glyph_index(ch)
                    .and_then(|gid| face.glyph_hor_advance(gid))
                    .map(|adv| (new_gid, adv as f32 / units * 1000.0))
            })
            .collect();
        gid_widths.sort_by_key(|&(gid, _)| gid);
        if !gid_widths.is_empty() {
            let mut w = cid.widths();
            for &(gid, width) in &gid_widths {
                w.consecutive(gid, [width]);
            }
        }
    }

    let cmap_name = format!("{}-UTF16", ps_name);
    let mut cmap = pdf_writer::types::UnicodeCmap::new(
        Name(cmap_name.as_bytes()),
        pdf_writer::types::SystemInfo {
            registry: pdf_writer::Str(b"Adobe"),
            ordering: pdf_writer::Str(b"Identity"),
            supplement: 0,
        },
    );
    let mut mapped: Vec<(u16, char)> = tt.char_to_gid.iter().map(|(&c, &g)| (g, c)).collect();
    mapped.sort_unstable();
    for (new_gid, ch) in mapped {
        cmap.pair(new_gid, ch);
    }
    let cmap_data = cmap.finish();
    pdf.stream(tounicode_ref, cmap_data.as_slice());

    pdf.type0_font(font_ref)
        .base_font(Name(ps_name.as_bytes()))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_font_ref)
        .to_unicode(tounicode_ref);

    log::debug!(
        "Embedded {} ({} glyphs, {} bytes)",
        tt.family,
        tt.char_to_gid.len(),
        subset_data.len()
    );
    Ok(())
}
