//! Minimal markdown for the narrative text: `**bold**` spans and `- ` bullets.

use egui::RichText;

/// Split a line into (text, is_bold) runs.
pub fn parse_spans(line: &str) -> Vec<(String, bool)> {
    line.split("**")
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| (part.to_string(), i % 2 == 1))
        .collect()
}

pub fn show(ui: &mut egui::Ui, text: &str, size: f32) {
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            ui.add_space(4.0);
            continue;
        }

        let (bullet, body) = match line.strip_prefix("- ") {
            Some(rest) => (true, rest),
            None => (false, line),
        };

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            if bullet {
                ui.label(RichText::new("   •  ").size(size));
            }
            for (text, bold) in parse_spans(body) {
                let mut rich = RichText::new(text).size(size);
                if bold {
                    rich = rich.strong();
                }
                ui.label(rich);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_spans_alternate() {
        assert_eq!(
            parse_spans("📌 **Observation:** women live longer"),
            vec![
                ("📌 ".to_string(), false),
                ("Observation:".to_string(), true),
                (" women live longer".to_string(), false),
            ]
        );
    }

    #[test]
    fn line_starting_bold() {
        assert_eq!(
            parse_spans("**all bold**"),
            vec![("all bold".to_string(), true)]
        );
    }

    #[test]
    fn plain_text_is_one_span() {
        assert_eq!(parse_spans("plain"), vec![("plain".to_string(), false)]);
        assert!(parse_spans("").is_empty());
    }
}
