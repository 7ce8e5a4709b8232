use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::QuestionType;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: question type → Color32
// ---------------------------------------------------------------------------

/// Fixed colour per question type so every chart uses the same legend.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<QuestionType, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// One hue per variant of [`QuestionType`], assigned in variant order.
    /// `Undefined` is always grey.
    pub fn for_question_types() -> Self {
        let named: Vec<QuestionType> = QuestionType::ALL
            .into_iter()
            .filter(|qt| *qt != QuestionType::Undefined)
            .collect();
        let mut mapping: BTreeMap<QuestionType, Color32> = named
            .iter()
            .copied()
            .zip(generate_palette(named.len()))
            .collect();
        mapping.insert(QuestionType::Undefined, Color32::GRAY);

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a question type.
    pub fn color_for(&self, question_type: QuestionType) -> Color32 {
        self.mapping
            .get(&question_type)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn every_type_has_a_distinct_colour() {
        let cm = ColorMap::for_question_types();
        let colours: std::collections::BTreeSet<[u8; 4]> = QuestionType::ALL
            .iter()
            .map(|qt| cm.color_for(*qt).to_array())
            .collect();
        assert_eq!(colours.len(), QuestionType::ALL.len());
        assert_eq!(cm.color_for(QuestionType::Undefined), Color32::GRAY);
    }
}
