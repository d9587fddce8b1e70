use crate::viewer::ButtonBar;

/// Seconds the button bar takes to fade in
const REVEAL_FADE: f32 = 0.6;

/// What the overlay reported this frame
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UiResponse {
    /// Top edge of the button bar in points
    pub bar_top: Option<f32>,
    pub entered: Option<usize>,
    pub left: Option<usize>,
    pub clicked: Option<usize>,
}

/// Leave/enter pair for a change of hovered button
pub fn hover_transition(previous: Option<usize>, current: Option<usize>) -> (Option<usize>, Option<usize>) {
    if previous == current {
        (None, None)
    } else {
        (previous, current)
    }
}

pub struct Ui {
    hovered: Option<usize>,
    background: egui::Color32,
}

impl Ui {
    pub fn new(background: [f32; 3]) -> Self {
        let [r, g, b] = background.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        Self {
            hovered: None,
            background: egui::Color32::from_rgb(r, g, b),
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, bar: &ButtonBar) -> UiResponse {
        let mut response = UiResponse::default();
        let opacity = ctx.animate_bool_with_time(egui::Id::new("button_bar_reveal"), bar.is_visible(), REVEAL_FADE);

        let mut hovered_now = None;
        if !bar.buttons().is_empty() {
            let area = egui::Area::new(egui::Id::new("button_bar"))
                .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -40.0))
                .show(ctx, |ui| {
                    // Hidden buttons keep their place in the layout
                    ui.multiply_opacity(opacity);
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 16.0;
                        for (index, button) in bar.buttons().iter().enumerate() {
                            let label = egui::RichText::new(&button.label)
                                .size(18.0)
                                .color(egui::Color32::from_gray(30));
                            let button_response = ui
                                .add(
                                    egui::Button::new(label)
                                        .fill(egui::Color32::from_rgba_unmultiplied(255, 255, 255, 200))
                                        .corner_radius(22.0)
                                        .min_size(egui::vec2(128.0, 44.0)),
                                )
                                .on_hover_cursor(egui::CursorIcon::PointingHand);
                            if !bar.is_visible() {
                                continue;
                            }
                            if button_response.hovered() {
                                hovered_now = Some(index);
                            }
                            if button_response.clicked() {
                                response.clicked = Some(index);
                            }
                        }
                    });
                });
            response.bar_top = Some(area.response.rect.top());
        }

        let (left, entered) = hover_transition(self.hovered, hovered_now);
        self.hovered = hovered_now;
        response.left = left;
        response.entered = entered;

        if let Some(progress) = bar.exit_progress() {
            let painter = ctx.layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("page_exit_painter"),
            ));
            painter.rect_filled(ctx.viewport_rect(), 0.0, self.background.gamma_multiply(progress));
            ctx.request_repaint();
        }

        response
    }
}
