//! Settings panel using egui.

use egui::{Align2, Context, RichText};
use resizable_core::{MultiTouchPolicy, ResizableConfig};
use resizable_render::VerticalAlignment;

/// Actions the panel asks the app to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Apply this configuration to every view.
    SetConfig(ResizableConfig),
    /// Show or hide the interactive edge bands.
    ShowInteractiveBorder(bool),
    /// Move every label to the top, middle or bottom of its view.
    SetAlignment(VerticalAlignment),
    /// Put the demo views back where they started.
    ResetViews,
}

/// State owned by the panel between frames.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Configuration being edited.
    pub config: ResizableConfig,
    pub show_interactive_border: bool,
    pub text_alignment: VerticalAlignment,
    /// Status lines to display, oldest first.
    pub status: Vec<String>,
}

impl UiState {
    pub fn new(
        config: ResizableConfig,
        show_interactive_border: bool,
        text_alignment: VerticalAlignment,
    ) -> Self {
        Self {
            config,
            show_interactive_border,
            text_alignment,
            status: Vec::new(),
        }
    }
}

/// Draw the settings panel. Returns at most one action per frame.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    egui::Window::new("Resizable view")
        .anchor(Align2::RIGHT_TOP, [-12.0, 12.0])
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            let config = &mut ui_state.config;
            let mut changed = false;

            ui.label(RichText::new("Gestures").strong());
            changed |= ui.checkbox(&mut config.disable, "Disable").changed();
            changed |= ui.checkbox(&mut config.disable_pan, "Disable pan").changed();
            changed |= ui
                .checkbox(&mut config.disable_on_multi_touch, "Disable on multi-touch")
                .changed();
            changed |= ui
                .checkbox(
                    &mut config.prevents_position_outside_superview,
                    "Keep inside window",
                )
                .changed();

            ui.horizontal(|ui| {
                ui.label("Multi-touch");
                changed |= ui
                    .radio_value(&mut config.multi_touch, MultiTouchPolicy::PrimaryTouch, "First touch")
                    .changed();
                changed |= ui
                    .radio_value(&mut config.multi_touch, MultiTouchPolicy::Pinch, "Pinch")
                    .changed();
            });

            ui.separator();
            ui.label(RichText::new("Geometry").strong());
            changed |= ui
                .add(egui::Slider::new(&mut config.min_width, 8.0..=200.0).text("Min width"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut config.min_height, 8.0..=200.0).text("Min height"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut config.resizable_inset, 0.0..=24.0).text("Inset"))
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut config.interactive_border_size, 0.0..=48.0)
                        .text("Border size"),
                )
                .changed();

            if changed {
                action = Some(UiAction::SetConfig(config.clone()));
            }

            if ui
                .checkbox(&mut ui_state.show_interactive_border, "Show interactive border")
                .changed()
            {
                action = Some(UiAction::ShowInteractiveBorder(ui_state.show_interactive_border));
            }

            ui.horizontal(|ui| {
                ui.label("Text");
                let alignment = &mut ui_state.text_alignment;
                let mut changed = false;
                changed |= ui.radio_value(alignment, VerticalAlignment::Top, "Top").changed();
                changed |= ui.radio_value(alignment, VerticalAlignment::Center, "Center").changed();
                changed |= ui.radio_value(alignment, VerticalAlignment::Bottom, "Bottom").changed();
                if changed {
                    action = Some(UiAction::SetAlignment(*alignment));
                }
            });

            ui.separator();
            if ui.button("Reset views").clicked() {
                action = Some(UiAction::ResetViews);
            }

            if !ui_state.status.is_empty() {
                ui.separator();
                for line in &ui_state.status {
                    ui.label(RichText::new(line).monospace().small());
                }
            }
        });

    action
}
