use crate::graph::{NodeKind, Point, Rect};
use serde::{Deserialize, Serialize};

/// A detected diagram element: its rectangle, the detector's confidence and
/// the element class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub confidence: f64,
    #[serde(alias = "class_name")]
    pub class_label: NodeKind,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, confidence: f64, class_label: NodeKind) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            confidence,
            class_label,
        }
    }

    pub fn center_x(&self) -> f64 {
        (self.x1 + self.x2) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.y1 + self.y2) / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x1: self.x1,
            y1: self.y1,
            x2: self.x2,
            y2: self.y2,
        }
    }

    /// Describes the first problem that makes this box unusable, if any.
    pub(crate) fn defect(&self) -> Option<String> {
        let coords = [self.x1, self.y1, self.x2, self.y2];
        if coords.iter().any(|c| !c.is_finite()) {
            return Some(format!("non-finite coordinates {:?}", coords));
        }
        if self.x2 < self.x1 || self.y2 < self.y1 {
            return Some(format!(
                "inverted rectangle ({}, {}) -> ({}, {})",
                self.x1, self.y1, self.x2, self.y2
            ));
        }
        None
    }
}

/// Text recognized inside a region, with the recognizer's confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    pub text: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub bbox: Option<[f64; 4]>,
}

/// OCR input for one box: either the bare string or the full result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecognizedText {
    Plain(String),
    Detailed(OcrResult),
}

impl RecognizedText {
    pub fn text(&self) -> &str {
        match self {
            RecognizedText::Plain(text) => text,
            RecognizedText::Detailed(result) => &result.text,
        }
    }
}

impl From<&str> for RecognizedText {
    fn from(text: &str) -> Self {
        RecognizedText::Plain(text.to_string())
    }
}

impl From<String> for RecognizedText {
    fn from(text: String) -> Self {
        RecognizedText::Plain(text)
    }
}

impl From<OcrResult> for RecognizedText {
    fn from(result: OcrResult) -> Self {
        RecognizedText::Detailed(result)
    }
}
