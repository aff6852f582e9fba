//! Word Cloud Layout
//! Places words on an archimedean spiral around the canvas centre, largest
//! first, shrinking a word until it fits. Layout stops at the first word that
//! does not fit even at the minimum font size.

use crate::stats::TitleWordFrequencies;

const MIN_FONT_SIZE: f64 = 6.0;
const SHRINK_STEP: f64 = 0.9;
const SPIRAL_STEP: f64 = 0.1;
const SPIRAL_SPACING: f64 = 2.0;
const MARGIN: i32 = 2;

/// A word with its font size and top-left position in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub font_size: f64,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Frequency rank, 0 for the most frequent word
    pub rank: usize,
}

impl PlacedWord {
    fn overlaps(&self, x: i32, y: i32, w: u32, h: u32) -> bool {
        x < self.x + self.width as i32 + MARGIN
            && self.x < x + w as i32 + MARGIN
            && y < self.y + self.height as i32 + MARGIN
            && self.y < y + h as i32 + MARGIN
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudLayout {
    pub width: u32,
    pub height: u32,
    pub words: Vec<PlacedWord>,
}

impl WordCloudLayout {
    /// Lay out `frequencies` on a `width` x `height` canvas. `measure` returns
    /// the pixel box of a word at a font size.
    pub fn compute<F>(
        frequencies: &TitleWordFrequencies,
        width: u32,
        height: u32,
        mut measure: F,
    ) -> Self
    where
        F: FnMut(&str, f64) -> (u32, u32),
    {
        let max_count = frequencies.max_count().max(1) as f64;
        let max_font = (height as f64 * 0.25).max(MIN_FONT_SIZE);
        let mut placed: Vec<PlacedWord> = Vec::new();

        for (rank, (text, count)) in frequencies.words.iter().enumerate() {
            let relative = (*count as f64 / max_count).sqrt();
            let mut font_size = MIN_FONT_SIZE + (max_font - MIN_FONT_SIZE) * relative;
            let mut fitted = false;

            while font_size >= MIN_FONT_SIZE {
                let (w, h) = measure(text, font_size);
                if let Some((x, y)) = Self::find_position(&placed, width, height, w, h) {
                    placed.push(PlacedWord {
                        text: text.clone(),
                        font_size,
                        x,
                        y,
                        width: w,
                        height: h,
                        rank,
                    });
                    fitted = true;
                    break;
                }
                font_size *= SHRINK_STEP;
            }

            if !fitted {
                break;
            }
        }

        Self {
            width,
            height,
            words: placed,
        }
    }

    fn find_position(
        placed: &[PlacedWord],
        width: u32,
        height: u32,
        w: u32,
        h: u32,
    ) -> Option<(i32, i32)> {
        if w > width || h > height {
            return None;
        }

        let cx = width as f64 / 2.0;
        let cy = height as f64 / 2.0;
        let max_radius = (cx * cx + cy * cy).sqrt();
        // Flatten the spiral to the canvas aspect ratio.
        let aspect = height as f64 / width as f64;

        let mut theta = 0.0f64;
        loop {
            let radius = SPIRAL_SPACING * theta;
            if radius > max_radius {
                return None;
            }

            let x = (cx + radius * theta.cos() - w as f64 / 2.0).round() as i32;
            let y = (cy + radius * aspect * theta.sin() - h as f64 / 2.0).round() as i32;

            let inside = x >= 0
                && y >= 0
                && x + w as i32 <= width as i32
                && y + h as i32 <= height as i32;
            if inside && !placed.iter().any(|p| p.overlaps(x, y, w, h)) {
                return Some((x, y));
            }

            theta += SPIRAL_STEP;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure(text: &str, size: f64) -> (u32, u32) {
        ((text.len() as f64 * size * 0.6).ceil() as u32, size.ceil() as u32)
    }

    fn frequencies(words: &[(&str, usize)]) -> TitleWordFrequencies {
        TitleWordFrequencies {
            words: words.iter().map(|(w, c)| (w.to_string(), *c)).collect(),
        }
    }

    #[test]
    fn test_most_frequent_word_is_largest_and_centred() {
        let freq = frequencies(&[("covid", 10), ("virus", 5), ("cell", 1)]);

        let layout = WordCloudLayout::compute(&freq, 800, 400, measure);

        assert_eq!(layout.words.len(), 3);
        let first = &layout.words[0];
        assert_eq!(first.text, "covid");
        assert!((first.font_size - 100.0).abs() < 1e-9);
        let centre_x = first.x + first.width as i32 / 2;
        let centre_y = first.y + first.height as i32 / 2;
        assert!((centre_x - 400).abs() <= 1);
        assert!((centre_y - 200).abs() <= 1);
        assert!(layout.words[1].font_size < first.font_size);
        assert!(layout.words[2].font_size < layout.words[1].font_size);
    }

    #[test]
    fn test_words_never_overlap_and_stay_inside() {
        let words: Vec<(String, usize)> = (0..120)
            .map(|i| (format!("word{}", i), 200 - i))
            .collect();
        let freq = TitleWordFrequencies { words };

        let layout = WordCloudLayout::compute(&freq, 400, 200, measure);

        assert!(!layout.words.is_empty());
        for (i, a) in layout.words.iter().enumerate() {
            assert!(a.x >= 0 && a.y >= 0);
            assert!(a.x + a.width as i32 <= 400);
            assert!(a.y + a.height as i32 <= 200);
            assert!(a.font_size >= MIN_FONT_SIZE);
            for b in &layout.words[i + 1..] {
                let disjoint = a.x + a.width as i32 <= b.x
                    || b.x + b.width as i32 <= a.x
                    || a.y + a.height as i32 <= b.y
                    || b.y + b.height as i32 <= a.y;
                assert!(disjoint, "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn test_word_wider_than_canvas_is_shrunk() {
        let freq = frequencies(&[("pneumonia", 3)]);

        let layout = WordCloudLayout::compute(&freq, 120, 400, measure);

        assert_eq!(layout.words.len(), 1);
        assert!(layout.words[0].width <= 120);
        assert!(layout.words[0].font_size < 100.0);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let freq = frequencies(&[("a1", 4), ("b2", 3), ("c3", 3), ("d4", 1)]);
        let first = WordCloudLayout::compute(&freq, 300, 150, measure);
        let second = WordCloudLayout::compute(&freq, 300, 150, measure);
        assert_eq!(first, second);
    }

    #[test]
    fn test_layout_stops_at_first_unfittable_word() {
        let freq = frequencies(&[("ab", 5), ("abcdefghijklmnopqrst", 4), ("cd", 3)]);

        let layout = WordCloudLayout::compute(&freq, 40, 40, measure);

        let texts: Vec<&str> = layout.words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["ab"]);
    }

    #[test]
    fn test_empty_frequencies() {
        let empty = TitleWordFrequencies::default();
        let layout = WordCloudLayout::compute(&empty, 800, 400, measure);
        assert!(layout.words.is_empty());
    }
}
