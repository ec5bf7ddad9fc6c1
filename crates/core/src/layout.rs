//! Structured layout produced by the interpreter.
//!
//! Element properties are typed per element kind in memory. At the JSON
//! boundary every element is flattened to `{type, x, y, properties}` with a
//! generic `properties` object, which is the shape downstream consumers read.

use crate::units::{DPI, Unit};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Canvas description for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderData {
    /// Canvas width in pixels.
    pub width: i32,
    /// Canvas height in pixels.
    pub height: i32,
    /// Resolution used for the pixel values (always [`DPI`]).
    pub dpi: u32,
    /// Print orientation code from `DIRECTION`.
    pub direction: i32,
    /// Origin offset from `REFERENCE`.
    pub reference: Reference,
    /// Label dimensions from `SIZE`.
    pub label_size: LabelSize,
    /// Gap between labels from `GAP`.
    pub gap: Gap,
    /// Drawing elements in source order (later elements draw on top).
    pub elements: Vec<Element>,
}

impl Default for RenderData {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            dpi: DPI,
            direction: 0,
            reference: Reference::default(),
            label_size: LabelSize::default(),
            gap: Gap::default(),
            elements: Vec::new(),
        }
    }
}

/// Reference point in dots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

/// Label dimensions as declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LabelSize {
    /// Declared width.
    pub width: f64,
    /// Declared height.
    pub height: f64,
    /// Shared unit; `None` (serialized as `""`) until a `SIZE` line is seen.
    #[serde(serialize_with = "unit_or_empty")]
    pub unit: Option<Unit>,
}

/// Inter-label gap as declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Gap {
    /// Gap distance.
    pub distance: f64,
    /// Gap offset.
    pub offset: f64,
    /// Shared unit; `None` (serialized as `""`) until a `GAP` line is seen.
    #[serde(serialize_with = "unit_or_empty")]
    pub unit: Option<Unit>,
}

fn unit_or_empty<S: Serializer>(unit: &Option<Unit>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(unit.map_or("", Unit::as_str))
}

// ─── Elements ───────────────────────────────────────────────────────────────

/// One positioned drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Horizontal position in dots.
    pub x: i32,
    /// Vertical position in dots.
    pub y: i32,
    /// Kind-specific properties.
    pub kind: ElementKind,
}

/// Kind-specific element properties.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A `TEXT` element.
    Text(TextProps),
    /// A `BARCODE` element.
    Barcode(BarcodeProps),
    /// A `QRCODE` element.
    QrCode(QrCodeProps),
    /// A `BOX` outline.
    Box(BoxProps),
    /// A filled `BAR`.
    Bar(BarProps),
}

impl ElementKind {
    /// Type tag used in serialized output.
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementKind::Text(_) => "text",
            ElementKind::Barcode(_) => "barcode",
            ElementKind::QrCode(_) => "qrcode",
            ElementKind::Box(_) => "box",
            ElementKind::Bar(_) => "bar",
        }
    }
}

impl Element {
    /// Type tag (`"text"`, `"barcode"`, `"qrcode"`, `"box"`, `"bar"`).
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Generic key/value view of the properties, as serialized.
    pub fn properties(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(PropsRef(&self.kind)) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(4))?;
        map.serialize_entry("type", self.type_name())?;
        map.serialize_entry("x", &self.x)?;
        map.serialize_entry("y", &self.y)?;
        map.serialize_entry("properties", &PropsRef(&self.kind))?;
        map.end()
    }
}

/// Serializes only the inner property struct of an [`ElementKind`].
struct PropsRef<'a>(&'a ElementKind);

impl Serialize for PropsRef<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            ElementKind::Text(p) => p.serialize(s),
            ElementKind::Barcode(p) => p.serialize(s),
            ElementKind::QrCode(p) => p.serialize(s),
            ElementKind::Box(p) => p.serialize(s),
            ElementKind::Bar(p) => p.serialize(s),
        }
    }
}

/// Properties of a text element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    /// Text to print.
    pub text: String,
    /// Font name.
    pub font: String,
    /// Rotation in degrees.
    pub rotation: i32,
    /// Horizontal magnification.
    pub x_scale: i32,
    /// Vertical magnification.
    pub y_scale: i32,
}

/// Properties of a linear barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarcodeProps {
    /// Encoded payload.
    pub code: String,
    /// Symbology name.
    #[serde(rename = "type")]
    pub symbology: String,
    /// Bar height in dots.
    pub height: i32,
    /// Human-readable line mode.
    pub readable: i32,
    /// Rotation in degrees.
    pub rotation: i32,
    /// Narrow bar width in dots.
    pub narrow: i32,
    /// Wide bar width in dots.
    pub wide: i32,
}

/// Properties of a QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeProps {
    /// Encoded payload.
    pub data: String,
    /// Error-correction level.
    pub ecc_level: EccLevel,
    /// Module size in dots.
    pub cell_size: i32,
    /// Encoding mode.
    pub mode: QrMode,
    /// Rotation in degrees.
    pub rotation: i32,
}

/// Properties of a box outline; the element position is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxProps {
    /// Right edge.
    pub end_x: i32,
    /// Bottom edge.
    pub end_y: i32,
    /// Line thickness in dots.
    pub thickness: i32,
}

/// Properties of a filled bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BarProps {
    /// Width in dots.
    pub width: i32,
    /// Height in dots.
    pub height: i32,
}

/// QR error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EccLevel {
    /// High.
    H,
    /// Medium.
    M,
    /// Low.
    L,
}

impl EccLevel {
    /// Parse the single-letter form (case-sensitive).
    pub fn from_letter(s: &str) -> Option<Self> {
        match s {
            "H" => Some(EccLevel::H),
            "M" => Some(EccLevel::M),
            "L" => Some(EccLevel::L),
            _ => None,
        }
    }
}

/// QR encoding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QrMode {
    /// Automatic.
    A,
    /// Manual.
    M,
}

impl QrMode {
    /// Parse the single-letter form (case-sensitive).
    pub fn from_letter(s: &str) -> Option<Self> {
        match s {
            "A" => Some(QrMode::A),
            "M" => Some(QrMode::M),
            _ => None,
        }
    }
}
