use crate::graph::NodeKind;
use crate::spatial::{BoundingBox, RecognizedText, RecognizedTexts};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Detector and OCR output for one diagram, matching the expected JSON
/// format for analysis:
///
/// ```json
/// { "boxes": [{"x1": 0, "y1": 0, "x2": 100, "y2": 40, "confidence": 0.9, "class_label": "process"}],
///   "texts": {"0": "Начало"} }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct DetectionData {
    pub boxes: Vec<BoundingBox>,
    #[serde(default)]
    pub texts: RecognizedTexts,
}

impl DetectionData {
    /// Load detection data from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let data = serde_json::from_str(&content)?;
        Ok(data)
    }

    /// A small process diagram used when no file is provided. Rows step to
    /// the right so that only neighbouring elements line up: start, one
    /// action, a decision whose branches meet again at the end.
    pub fn sample() -> Self {
        let rows: [(f64, f64, NodeKind, &str); 6] = [
            (100.0, 50.0, NodeKind::Start, "Начало процесса"),
            (190.0, 150.0, NodeKind::Process, "Действие 1"),
            (280.0, 250.0, NodeKind::Decision, "Проверка условия"),
            (470.0, 250.0, NodeKind::Process, "Действие 2"),
            (370.0, 350.0, NodeKind::Process, "Действие 3"),
            (460.0, 450.0, NodeKind::End, "Конец процесса"),
        ];

        let mut data = Self::default();
        for (index, (cx, cy, kind, text)) in rows.into_iter().enumerate() {
            data.boxes.push(BoundingBox::new(
                cx - 60.0,
                cy - 20.0,
                cx + 60.0,
                cy + 20.0,
                0.9,
                kind,
            ));
            data.texts.insert(index, RecognizedText::from(text));
        }
        data
    }

    /// Recognized text for a box, empty when there is none.
    pub fn text(&self, index: usize) -> &str {
        self.texts.get(&index).map(RecognizedText::text).unwrap_or("")
    }
}
