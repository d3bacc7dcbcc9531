use crate::bindings::{KEYBOARD_HINTS, TABLET_HINTS};
use egui::Context as EguiContext;
use wormhole_common::Galaxy;
use wormhole_render::{FrameStats, ResolutionScale};

/// What the overlay shows this frame.
pub struct OverlayView<'a> {
    pub stats: &'a FrameStats,
    pub galaxy: Galaxy,
    pub crossings: u64,
    pub render_size: (u32, u32),
    pub tablet_mode: bool,
    pub drag_to_look: bool,
}

/// Requests the user made through the overlay.
#[derive(Debug, Default)]
pub struct OverlayResponse {
    pub scale: Option<ResolutionScale>,
    pub reset: bool,
}

/// Frame statistics, resolution selector and control help.
pub struct Overlay {
    pub visible: bool,
}

impl Overlay {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn show(
        &self,
        ctx: &EguiContext,
        view: &OverlayView<'_>,
        current: ResolutionScale,
    ) -> OverlayResponse {
        let mut response = OverlayResponse::default();
        if !self.visible {
            return response;
        }

        egui::Window::new("Wormhole")
            .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.label(format!(
                    "{:.0} fps  {:.1} ms (worst {:.1})",
                    view.stats.fps(),
                    view.stats.mean_ms(),
                    view.stats.worst_ms()
                ));
                ui.label(format!(
                    "Render {}x{}",
                    view.render_size.0, view.render_size.1
                ));

                ui.separator();
                ui.label("Resolution");
                let mut selected = current;
                ui.horizontal(|ui| {
                    for scale in ResolutionScale::presets() {
                        ui.radio_value(&mut selected, scale, scale.label());
                    }
                });
                if selected != current {
                    response.scale = Some(selected);
                }

                ui.separator();
                let galaxy = match view.galaxy {
                    Galaxy::Home => "Saturn system",
                    Galaxy::Far => "Black hole",
                };
                ui.label(format!("Galaxy: {galaxy}"));
                ui.label(format!("Wormhole crossings: {}", view.crossings));
                if ui.button("Back to start").clicked() {
                    response.reset = true;
                }

                ui.separator();
                let hints = if view.tablet_mode {
                    TABLET_HINTS
                } else {
                    KEYBOARD_HINTS
                };
                egui::Grid::new("control_hints").show(ui, |ui| {
                    for (keys, what) in hints {
                        ui.strong(*keys);
                        ui.label(*what);
                        ui.end_row();
                    }
                });
                if !view.tablet_mode && view.drag_to_look {
                    ui.label("Drag-to-look is on");
                }
            });

        response
    }
}
