use winit::window::Window;

use crate::flip::outcome::Player;
use crate::flip::FlipSnapshot;
use crate::render::GpuState;
use crate::sprite::{self, Face};

/// Winner highlight ring, matching the original page's blue glow.
const WINNER_RING: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
/// Placeholder player label from the original layout.
const PLAYER_NAME: &str = "ThisUsernameIs20Char";
/// Placeholder leaderboard entry from the original layout.
const LEADERBOARD_NAME: &str = "VeryVeryLongTextLmaooo";
const LEADERBOARD_AMOUNT: &str = "R$ 6,741";
/// Leaderboard rows per column.
const LEADERBOARD_ROWS: usize = 4;

/// Card UI powered by egui. Purely presentational: it draws whatever the
/// flip controller's snapshot says; no flip logic lives here.
pub struct CardUi {
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl CardUi {
    pub fn new(window: &Window, gpu: &GpuState) -> Self {
        let egui_ctx = egui::Context::default();

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(gpu.device.limits().max_texture_dimension_2d as usize),
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                dithering: true,
                predictable_texture_filtering: false,
            },
        );

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
        }
    }

    /// Forward a winit event to egui. Returns true if egui consumed it.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        response.consumed
    }

    /// Run the egui frame and produce paint output.
    pub fn run_frame(
        &mut self,
        window: &Window,
        screen_w: u32,
        screen_h: u32,
        snap: &FlipSnapshot,
    ) -> (
        Vec<egui::epaint::ClippedPrimitive>,
        egui::TexturesDelta,
        egui_wgpu::ScreenDescriptor,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);

        let ctx = self.egui_ctx.clone();
        let full_output = ctx.run(raw_input, |ctx| {
            draw_card(ctx, snap);
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let clipped_primitives = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [screen_w, screen_h],
            pixels_per_point,
        };

        (clipped_primitives, full_output.textures_delta, screen_descriptor)
    }

    /// Upload egui textures and buffers. Call before the UI render pass.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::epaint::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor)
    }

    /// Render egui into the given render pass.
    pub fn render(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::epaint::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures after present.
    pub fn free_textures(&mut self, textures_delta: &egui::TexturesDelta) {
        for &id in &textures_delta.free {
            self.egui_renderer.free_texture(&id);
        }
    }
}

// ---------------------------------------------------------------------------
// Card layout
// ---------------------------------------------------------------------------

fn draw_card(ctx: &egui::Context, snap: &FlipSnapshot) {
    let card_frame = egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(24, 24, 32, 240))
        .corner_radius(12.0)
        .inner_margin(24.0);

    egui::Window::new("card")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(card_frame)
        .show(ctx, |ui| {
            ui.style_mut().visuals.override_text_color = Some(egui::Color32::from_gray(220));

            // --- Avatars + sprite viewport ---
            ui.horizontal(|ui| {
                draw_avatar(
                    ui,
                    snap.player1_side,
                    snap.winner == Some(Player::One) && !snap.is_animating,
                );
                draw_viewport(ui, snap);
                draw_avatar(
                    ui,
                    snap.player2_side,
                    snap.winner == Some(Player::Two) && !snap.is_animating,
                );
            });
            ui.add_space(12.0);

            // --- Percentage bars ---
            ui.horizontal(|ui| {
                draw_percent_bar(ui);
                draw_percent_bar(ui);
            });
            ui.add_space(12.0);

            // --- Leaderboard columns ---
            ui.horizontal(|ui| {
                draw_leaderboard_column(ui);
                draw_leaderboard_column(ui);
            });
            ui.add_space(8.0);
            ui.separator();
        });
}

/// One avatar: "?" fallback glyph, side badge, name label, winner ring.
fn draw_avatar(ui: &mut egui::Ui, side: Face, is_winner: bool) {
    ui.vertical(|ui| {
        let (response, painter) =
            ui.allocate_painter(egui::vec2(160.0, 160.0), egui::Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let radius = rect.width() * 0.5 - 6.0;

        painter.circle_filled(center, radius, egui::Color32::from_gray(48));
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "?",
            egui::FontId::proportional(56.0),
            egui::Color32::from_gray(200),
        );
        if is_winner {
            painter.circle_stroke(center, radius + 2.0, egui::Stroke::new(4.0, WINNER_RING));
        }

        // Side badge, bottom-left like the original overlay avatar.
        let badge_center = egui::pos2(rect.left() + 22.0, rect.bottom() - 14.0);
        let badge_color = match side {
            Face::Heads => egui::Color32::from_rgb(218, 178, 66),
            Face::Tails => egui::Color32::from_rgb(140, 150, 170),
        };
        painter.circle_filled(badge_center, 18.0, badge_color);
        painter.text(
            badge_center,
            egui::Align2::CENTER_CENTER,
            match side {
                Face::Heads => "H",
                Face::Tails => "T",
            },
            egui::FontId::proportional(16.0),
            egui::Color32::BLACK,
        );
        response.on_hover_text(side.icon_url());

        ui.label(egui::RichText::new(PLAYER_NAME).strong());
        ui.label(egui::RichText::new(side.label()).weak());
    });
}

/// The sprite viewport. The sheet pixels live on a remote host, so this
/// visualizes the shell's inputs instead: the 8x32 cell grid with the
/// current background offset's cell lit, plus the raw URL and offset.
fn draw_viewport(ui: &mut egui::Ui, snap: &FlipSnapshot) {
    ui.vertical(|ui| {
        let (response, painter) =
            ui.allocate_painter(egui::vec2(256.0, 160.0), egui::Sense::hover());
        let rect = response.rect;

        painter.rect_filled(rect, 4.0, egui::Color32::from_gray(20));

        let cell_w = rect.width() / sprite::COLS as f32;
        let cell_h = rect.height() / sprite::ROWS as f32;
        let active_col = (-snap.offset.x / sprite::FRAME_WIDTH) as f32;
        let active_row = (-snap.offset.y / sprite::FRAME_HEIGHT) as f32;

        // Faint grid lines.
        for col in 1..sprite::COLS {
            let x = rect.left() + col as f32 * cell_w;
            painter.line_segment(
                [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
                egui::Stroke::new(0.5, egui::Color32::from_gray(36)),
            );
        }

        // Active cell.
        let cell_min = egui::pos2(
            rect.left() + active_col * cell_w,
            rect.top() + active_row * cell_h,
        );
        let cell = egui::Rect::from_min_size(cell_min, egui::vec2(cell_w, cell_h));
        let cell_color = if snap.is_animating {
            egui::Color32::from_rgb(255, 200, 80)
        } else {
            egui::Color32::from_rgb(100, 180, 255)
        };
        painter.rect_filled(cell, 1.0, cell_color);

        ui.label(egui::RichText::new(&snap.sheet_url).monospace().size(10.0));
        ui.label(
            egui::RichText::new(format!("bg-position: {}", snap.offset_string))
                .monospace()
                .size(10.0),
        );
        let status = if snap.is_animating {
            "flipping..."
        } else {
            "SPACE to flip"
        };
        ui.label(egui::RichText::new(status).weak());
    });
}

/// Static percentage bar ("R$ 67.41M+" / "41.67%" from the original page).
fn draw_percent_bar(ui: &mut egui::Ui) {
    let (response, painter) = ui.allocate_painter(egui::vec2(250.0, 40.0), egui::Sense::hover());
    let rect = response.rect;

    painter.rect_filled(rect, 6.0, egui::Color32::from_gray(40));
    let fill = egui::Rect::from_min_size(
        rect.min,
        egui::vec2(rect.width() * 0.4167, rect.height()),
    );
    painter.rect_filled(fill, 6.0, egui::Color32::from_gray(56));
    painter.text(
        egui::pos2(rect.left() + 12.0, rect.center().y),
        egui::Align2::LEFT_CENTER,
        "R$ 67.41M+",
        egui::FontId::proportional(13.0),
        egui::Color32::WHITE,
    );
    painter.text(
        egui::pos2(rect.right() - 12.0, rect.center().y),
        egui::Align2::RIGHT_CENTER,
        "41.67%",
        egui::FontId::proportional(13.0),
        egui::Color32::from_gray(160),
    );
}

/// One column of static leaderboard rows.
fn draw_leaderboard_column(ui: &mut egui::Ui) {
    ui.vertical(|ui| {
        for _ in 0..LEADERBOARD_ROWS {
            let (response, painter) =
                ui.allocate_painter(egui::vec2(250.0, 36.0), egui::Sense::hover());
            let rect = response.rect;

            painter.rect_filled(rect, 6.0, egui::Color32::from_gray(34));
            painter.circle_filled(
                egui::pos2(rect.left() + 18.0, rect.center().y),
                10.0,
                egui::Color32::from_gray(70),
            );
            painter.text(
                egui::pos2(rect.left() + 36.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                LEADERBOARD_NAME,
                egui::FontId::proportional(12.0),
                egui::Color32::from_gray(210),
            );
            painter.text(
                egui::pos2(rect.right() - 10.0, rect.center().y),
                egui::Align2::RIGHT_CENTER,
                LEADERBOARD_AMOUNT,
                egui::FontId::proportional(12.0),
                egui::Color32::from_rgb(74, 222, 128),
            );
            ui.add_space(6.0);
        }
    });
}
