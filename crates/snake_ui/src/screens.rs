//! Full-screen egui views for every non-board application state, plus the
//! in-game HUD.
//!
//! The application state machine is one enum with a single active
//! variant. Screens never mutate game state directly; navigation keys and
//! clicks fold into a `UiActions` struct the binary applies after the
//! frame's UI pass, so all transitions happen in one place.

use snake_core::difficulty::Difficulty;
use snake_core::leaderboard::{sanitize_name, ScoreEntry, MAX_NAME_LEN};

const MENU_ITEMS: &[&str] = &["Start Game", "Leaderboard", "Options", "Exit"];

const TITLE_COLOR: egui::Color32 = egui::Color32::GREEN;
const ITEM_COLOR: egui::Color32 = egui::Color32::WHITE;
const HINT_COLOR: egui::Color32 = egui::Color32::GRAY;

/// Which view the application is showing. Exactly one is active; the
/// impossible flag combinations of a boolean-per-view design cannot be
/// expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu { selected: usize },
    DifficultyMenu { selected: usize },
    Leaderboard,
    NameInput { name: String, pending_score: u32 },
    Playing,
    GameOver { score: u32 },
}

impl Screen {
    pub fn menu() -> Self {
        Screen::Menu { selected: 0 }
    }
}

/// Read-only snapshot of the data the screens display.
pub struct GameView<'a> {
    pub difficulty: Difficulty,
    pub score: u32,
    pub high_score: u32,
    pub scores: &'a [ScoreEntry],
}

#[derive(Debug, Clone, Default)]
pub struct UiActions {
    pub start_game: bool,
    pub open_leaderboard: bool,
    pub open_options: bool,
    pub exit: bool,
    /// Difficulty tier index picked in the options screen.
    pub select_difficulty: Option<usize>,
    /// Name entered for the pending high score.
    pub submit_score: Option<String>,
    pub back_to_menu: bool,
}

/// Draw the active screen and collect the user's intent for this frame.
pub fn draw(ctx: &egui::Context, screen: &mut Screen, view: &GameView<'_>) -> UiActions {
    let mut actions = UiActions::default();
    match screen {
        Screen::Menu { selected } => draw_menu(ctx, selected, &mut actions),
        Screen::DifficultyMenu { selected } => draw_difficulty_menu(ctx, selected, &mut actions),
        Screen::Leaderboard => draw_leaderboard(ctx, view, &mut actions),
        Screen::NameInput {
            name,
            pending_score,
        } => draw_name_input(ctx, name, *pending_score, &mut actions),
        Screen::Playing => draw_hud(ctx, view),
        Screen::GameOver { score } => draw_game_over(ctx, *score, &mut actions),
    }
    actions
}

/// Arrow/W/S navigation over a vertical item list, wrapping at both ends.
fn navigate_list(ctx: &egui::Context, selected: &mut usize, len: usize) {
    ctx.input(|i| {
        if i.key_pressed(egui::Key::ArrowUp) || i.key_pressed(egui::Key::W) {
            *selected = if *selected > 0 { *selected - 1 } else { len - 1 };
        }
        if i.key_pressed(egui::Key::ArrowDown) || i.key_pressed(egui::Key::S) {
            *selected = if *selected < len - 1 { *selected + 1 } else { 0 };
        }
    });
}

fn activate_pressed(ctx: &egui::Context) -> bool {
    ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Space))
}

/// Digit quick-select: keys 1-4 activate menu rows directly.
fn digit_pressed(ctx: &egui::Context) -> Option<usize> {
    ctx.input(|i| {
        [egui::Key::Num1, egui::Key::Num2, egui::Key::Num3, egui::Key::Num4]
            .iter()
            .position(|&key| i.key_pressed(key))
    })
}

fn fullscreen_panel() -> egui::CentralPanel {
    egui::CentralPanel::default().frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
}

fn title_label(ui: &mut egui::Ui, text: &str) {
    ui.add_space(30.0);
    ui.label(
        egui::RichText::new(text)
            .size(36.0)
            .strong()
            .color(TITLE_COLOR),
    );
    ui.add_space(50.0);
}

/// One menu row: highlighted when selected, activates on click.
fn menu_item(ui: &mut egui::Ui, selected: bool, text: &str) -> bool {
    let color = if selected { TITLE_COLOR } else { ITEM_COLOR };
    let label = egui::RichText::new(text).size(24.0).strong().color(color);
    let response = ui.selectable_label(selected, label);
    ui.add_space(14.0);
    response.clicked()
}

fn draw_menu(ctx: &egui::Context, selected: &mut usize, actions: &mut UiActions) {
    navigate_list(ctx, selected, MENU_ITEMS.len());

    let mut activated = None;
    if activate_pressed(ctx) {
        activated = Some(*selected);
    }
    if let Some(index) = digit_pressed(ctx) {
        activated = Some(index);
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        actions.exit = true;
    }

    fullscreen_panel().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            title_label(ui, "SNAKE GAME");
            for (index, item) in MENU_ITEMS.iter().enumerate() {
                if menu_item(ui, index == *selected, item) {
                    activated = Some(index);
                }
            }
        });
    });

    match activated {
        Some(0) => actions.start_game = true,
        Some(1) => actions.open_leaderboard = true,
        Some(2) => actions.open_options = true,
        Some(3) => actions.exit = true,
        _ => {}
    }
}

fn draw_difficulty_menu(ctx: &egui::Context, selected: &mut usize, actions: &mut UiActions) {
    navigate_list(ctx, selected, Difficulty::ALL.len());

    if activate_pressed(ctx) {
        actions.select_difficulty = Some(*selected);
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        actions.back_to_menu = true;
    }

    fullscreen_panel().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            title_label(ui, "SELECT DIFFICULTY");
            for (index, tier) in Difficulty::ALL.iter().enumerate() {
                if menu_item(ui, index == *selected, tier.label()) {
                    actions.select_difficulty = Some(index);
                }
            }
        });
    });
}

fn draw_leaderboard(ctx: &egui::Context, view: &GameView<'_>, actions: &mut UiActions) {
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        actions.back_to_menu = true;
    }

    fullscreen_panel().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            title_label(ui, &format!("LEADERBOARD - {}", view.difficulty.label()));

            if view.scores.is_empty() {
                ui.label(
                    egui::RichText::new("No scores recorded yet!")
                        .size(20.0)
                        .color(ITEM_COLOR),
                );
            } else {
                egui::Grid::new("leaderboard_grid")
                    .num_columns(3)
                    .spacing([60.0, 8.0])
                    .show(ui, |ui| {
                        for header in ["RANK", "NAME", "SCORE"] {
                            ui.label(
                                egui::RichText::new(header)
                                    .size(20.0)
                                    .strong()
                                    .color(egui::Color32::YELLOW),
                            );
                        }
                        ui.end_row();

                        for (rank, entry) in view.scores.iter().enumerate() {
                            ui.label(
                                egui::RichText::new(format!("{}", rank + 1))
                                    .size(18.0)
                                    .color(ITEM_COLOR),
                            );
                            ui.label(
                                egui::RichText::new(&entry.name)
                                    .size(18.0)
                                    .color(ITEM_COLOR),
                            );
                            ui.label(
                                egui::RichText::new(format!("{}", entry.score))
                                    .size(18.0)
                                    .color(ITEM_COLOR),
                            );
                            ui.end_row();
                        }
                    });
            }

            ui.add_space(40.0);
            ui.label(
                egui::RichText::new("Press ESC to return to menu")
                    .size(16.0)
                    .color(HINT_COLOR),
            );
        });
    });
}

fn draw_name_input(
    ctx: &egui::Context,
    name: &mut String,
    pending_score: u32,
    actions: &mut UiActions,
) {
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        actions.back_to_menu = true;
    }

    fullscreen_panel().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            title_label(ui, "HIGH SCORE!");
            ui.label(
                egui::RichText::new(format!("Your score: {pending_score}"))
                    .size(28.0)
                    .strong()
                    .color(ITEM_COLOR),
            );
            ui.add_space(24.0);
            ui.label(
                egui::RichText::new("Enter your name:")
                    .size(24.0)
                    .color(ITEM_COLOR),
            );
            ui.add_space(8.0);

            let response = ui.add(
                egui::TextEdit::singleline(name)
                    .char_limit(MAX_NAME_LEN)
                    .desired_width(300.0)
                    .font(egui::TextStyle::Heading),
            );
            response.request_focus();

            // The table only stores alphanumerics and spaces; scrub
            // anything else the OS keyboard layer let through.
            let cleaned: String = name
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == ' ')
                .take(MAX_NAME_LEN)
                .collect();
            if cleaned != *name {
                *name = cleaned;
            }

            let submitted =
                response.lost_focus() && ctx.input(|i| i.key_pressed(egui::Key::Enter));
            if submitted && !name.trim().is_empty() {
                actions.submit_score = Some(sanitize_name(name));
            }

            ui.add_space(24.0);
            ui.label(
                egui::RichText::new("Press ENTER to submit")
                    .size(16.0)
                    .color(HINT_COLOR),
            );
        });
    });
}

fn draw_game_over(ctx: &egui::Context, score: u32, actions: &mut UiActions) {
    if ctx.input(|i| {
        i.key_pressed(egui::Key::Enter)
            || i.key_pressed(egui::Key::Space)
            || i.key_pressed(egui::Key::Escape)
    }) {
        actions.back_to_menu = true;
    }

    // Translucent overlay so the final board state stays visible behind it.
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(egui::Color32::from_black_alpha(160)))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(180.0);
                ui.label(
                    egui::RichText::new("GAME OVER")
                        .size(36.0)
                        .strong()
                        .color(egui::Color32::RED),
                );
                ui.add_space(20.0);
                ui.label(
                    egui::RichText::new(format!("Score: {score}"))
                        .size(28.0)
                        .color(ITEM_COLOR),
                );
                ui.add_space(30.0);
                ui.label(
                    egui::RichText::new("Press ENTER to return to menu")
                        .size(16.0)
                        .color(HINT_COLOR),
                );
            });
        });
}

/// Score bar over the top strip of the window while playing.
fn draw_hud(ctx: &egui::Context, view: &GameView<'_>) {
    egui::Area::new(egui::Id::new("score_hud"))
        .anchor(egui::Align2::CENTER_TOP, [0.0, 10.0])
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!(
                    "Score: {}   HighScore: {}",
                    view.score, view.high_score
                ))
                .size(24.0)
                .color(ITEM_COLOR),
            );
        });
}
