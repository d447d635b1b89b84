use eframe::egui::{self, RichText};

use crate::markup::{Block, Inline};

const BLOCK_SPACING: f32 = 8.0;

/// Paint parsed markup. Links go through egui's hyperlink widget, which hands
/// the URL to the OS default browser.
pub fn show(ui: &mut egui::Ui, blocks: &[Block]) {
    for block in blocks {
        for line in &block.lines {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                for inline in line {
                    match inline {
                        Inline::Text { text, bold, italic } => {
                            let mut rich = RichText::new(text);
                            if block.heading {
                                rich = rich.heading();
                            }
                            if *bold {
                                rich = rich.strong();
                            }
                            if *italic {
                                rich = rich.italics();
                            }
                            ui.label(rich);
                        }
                        Inline::Link { text, url } => {
                            ui.hyperlink_to(text.as_str(), url);
                        }
                    }
                }
            });
        }
        ui.add_space(BLOCK_SPACING);
    }
}
