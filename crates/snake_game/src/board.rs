//! Board mesh building: the snake, the apple, and the score-bar backing
//! strip as a single CPU-built quad mesh, streamed into GPU buffers each
//! frame. Consecutive quads sharing a texture merge into one draw call.
//!
//! Everything here is plain geometry math on the session snapshot (no
//! GPU handles), so mesh layout is unit-testable.

use snake_core::grid::Cell;
use snake_core::orientation::{classify_body_segment, tail_angle, BodyShape, CornerKind};
use snake_core::session::GameSession;
use snake_render::SpriteVertex;
use std::sync::Arc;

use crate::sprites;

pub const BOARD_SIZE: i32 = 20;
/// Cell edge at the default window size; cells grow with the window but
/// never shrink below this.
pub const BASE_CELL_PX: u32 = 25;
/// Height of the score bar above the board.
pub const HUD_OFFSET_PX: f32 = 50.0;

const HUD_BACKING_COLOR: [f32; 4] = [0.25, 0.25, 0.25, 1.0];
const NO_TINT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// A contiguous run of indices that share the same texture binding.
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub texture_key: Arc<str>,
    pub index_start: u32,
    pub index_count: u32,
}

struct QuadSpec<'a> {
    texture_key: &'a str,
    center_x: f32,
    center_y: f32,
    width: f32,
    height: f32,
    rotation_deg: f32,
    color: [f32; 4],
}

/// Pixel layout of the board within the current viewport.
#[derive(Debug, Clone, Copy)]
pub struct BoardLayout {
    pub cell_px: f32,
}

impl BoardLayout {
    /// Largest square fit for the viewport, clamped to the base cell size
    /// from below so a tiny window cannot make sprites unreadable.
    pub fn for_viewport(width: u32, height: u32) -> Self {
        let fit = (width / BOARD_SIZE as u32).min(height / BOARD_SIZE as u32);
        Self {
            cell_px: fit.max(BASE_CELL_PX) as f32,
        }
    }

    pub fn board_px(&self) -> f32 {
        BOARD_SIZE as f32 * self.cell_px
    }

    /// Pixel center of a grid cell; the board sits below the score bar.
    pub fn cell_center(&self, cell: Cell) -> (f32, f32) {
        (
            cell.x as f32 * self.cell_px + self.cell_px * 0.5,
            HUD_OFFSET_PX + cell.y as f32 * self.cell_px + self.cell_px * 0.5,
        )
    }
}

/// Build the full board mesh for one frame.
pub fn build_mesh(
    session: &GameSession,
    layout: &BoardLayout,
) -> (Vec<SpriteVertex>, Vec<u32>, Vec<DrawCall>) {
    let snake = session.snake();
    let quad_estimate = snake.len() + 3;
    let mut vertices = Vec::with_capacity(quad_estimate * 4);
    let mut indices = Vec::with_capacity(quad_estimate * 6);
    let mut draw_calls = Vec::with_capacity(8);

    // Score bar backing strip across the top.
    add_quad(
        &mut vertices,
        &mut indices,
        &mut draw_calls,
        QuadSpec {
            texture_key: sprites::WHITE,
            center_x: layout.board_px() * 0.5,
            center_y: HUD_OFFSET_PX * 0.5,
            width: layout.board_px(),
            height: HUD_OFFSET_PX,
            rotation_deg: 0.0,
            color: HUD_BACKING_COLOR,
        },
    );

    let segments = snake.segments();

    // Head, with the chomp texture while the eating countdown runs.
    let head_key = if snake.is_eating() {
        sprites::SNAKE_HEAD_EATING
    } else {
        sprites::SNAKE_HEAD
    };
    add_cell_sprite(
        &mut vertices,
        &mut indices,
        &mut draw_calls,
        layout,
        segments[0],
        head_key,
        snake.facing_deg() as f32,
    );

    // Interior segments: straight runs alternate two body textures; turns
    // pick a corner texture and rotation by corner kind.
    for i in 1..segments.len().saturating_sub(1) {
        let (key, rotation) = match classify_body_segment(segments[i - 1], segments[i], segments[i + 1])
        {
            BodyShape::Straight { angle_deg } => {
                let key = if i % 2 == 0 {
                    sprites::SNAKE_BODY
                } else {
                    sprites::SNAKE_BODY_2
                };
                (key, angle_deg as f32)
            }
            BodyShape::Corner(kind) => corner_sprite(kind),
        };
        add_cell_sprite(
            &mut vertices,
            &mut indices,
            &mut draw_calls,
            layout,
            segments[i],
            key,
            rotation,
        );
    }

    // Tail, animated and pointing away from the body.
    if segments.len() >= 2 {
        let last = segments[segments.len() - 1];
        let second_last = segments[segments.len() - 2];
        add_cell_sprite(
            &mut vertices,
            &mut indices,
            &mut draw_calls,
            layout,
            last,
            sprites::tail_key(snake.tail_frame()),
            tail_angle(second_last, last) as f32,
        );
    }

    add_cell_sprite(
        &mut vertices,
        &mut indices,
        &mut draw_calls,
        layout,
        session.apple().position(),
        sprites::APPLE,
        0.0,
    );

    (vertices, indices, draw_calls)
}

/// Corner texture and rotation per turn quadrant.
fn corner_sprite(kind: CornerKind) -> (&'static str, f32) {
    match kind {
        CornerKind::TopLeft => (sprites::SNAKE_CORNER_LEFT, 180.0),
        CornerKind::TopRight => (sprites::SNAKE_CORNER_RIGHT, 180.0),
        CornerKind::BottomLeft => (sprites::SNAKE_CORNER_LEFT, 90.0),
        CornerKind::BottomRight => (sprites::SNAKE_CORNER_RIGHT, 270.0),
    }
}

fn add_cell_sprite(
    vertices: &mut Vec<SpriteVertex>,
    indices: &mut Vec<u32>,
    draw_calls: &mut Vec<DrawCall>,
    layout: &BoardLayout,
    cell: Cell,
    texture_key: &str,
    rotation_deg: f32,
) {
    let (center_x, center_y) = layout.cell_center(cell);
    add_quad(
        vertices,
        indices,
        draw_calls,
        QuadSpec {
            texture_key,
            center_x,
            center_y,
            width: layout.cell_px,
            height: layout.cell_px,
            rotation_deg,
            color: NO_TINT,
        },
    );
}

fn add_quad(
    vertices: &mut Vec<SpriteVertex>,
    indices: &mut Vec<u32>,
    draw_calls: &mut Vec<DrawCall>,
    spec: QuadSpec<'_>,
) {
    let half_w = spec.width * 0.5;
    let half_h = spec.height * 0.5;
    let base_index = vertices.len() as u32;

    // Corner order: top-left, top-right, bottom-right, bottom-left in
    // screen space (y down). Positive rotation turns clockwise on screen.
    let mut corners = [
        [-half_w, -half_h],
        [half_w, -half_h],
        [half_w, half_h],
        [-half_w, half_h],
    ];
    let radians = spec.rotation_deg.to_radians();
    if radians != 0.0 {
        let cos_r = radians.cos();
        let sin_r = radians.sin();
        for c in &mut corners {
            let x = c[0];
            let y = c[1];
            c[0] = x * cos_r - y * sin_r;
            c[1] = x * sin_r + y * cos_r;
        }
    }

    let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    for (corner, uv) in corners.iter().zip(uvs.iter()) {
        vertices.push(SpriteVertex {
            position: [spec.center_x + corner[0], spec.center_y + corner[1]],
            tex_coords: *uv,
            color: spec.color,
        });
    }

    let draw_start = indices.len() as u32;
    indices.extend_from_slice(&[
        base_index,
        base_index + 1,
        base_index + 2,
        base_index,
        base_index + 2,
        base_index + 3,
    ]);

    push_draw_call(draw_calls, Arc::from(spec.texture_key), draw_start, 6);
}

/// Append a draw call, merging with the previous one when the texture
/// matches and indices are contiguous. Sprites are emitted in draw order,
/// so runs sharing a texture collapse into a single `draw_indexed` call.
fn push_draw_call(
    draw_calls: &mut Vec<DrawCall>,
    texture_key: Arc<str>,
    index_start: u32,
    index_count: u32,
) {
    if let Some(last) = draw_calls.last_mut() {
        let contiguous = last.index_start + last.index_count == index_start;
        if *last.texture_key == *texture_key && contiguous {
            last.index_count += index_count;
            return;
        }
    }
    draw_calls.push(DrawCall {
        texture_key,
        index_start,
        index_count,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::difficulty::Difficulty;

    #[test]
    fn layout_matches_the_default_window() {
        let layout = BoardLayout::for_viewport(500, 550);
        assert_eq!(layout.cell_px, 25.0);
        assert_eq!(layout.board_px(), 500.0);
    }

    #[test]
    fn layout_never_shrinks_below_the_base_cell_size() {
        let layout = BoardLayout::for_viewport(300, 200);
        assert_eq!(layout.cell_px, 25.0);
    }

    #[test]
    fn layout_scales_up_with_the_window() {
        let layout = BoardLayout::for_viewport(800, 900);
        assert_eq!(layout.cell_px, 40.0);
    }

    #[test]
    fn cell_centers_sit_below_the_score_bar() {
        let layout = BoardLayout::for_viewport(500, 550);
        assert_eq!(layout.cell_center(Cell::new(0, 0)), (12.5, 62.5));
        assert_eq!(layout.cell_center(Cell::new(15, 10)), (387.5, 312.5));
    }

    #[test]
    fn fresh_session_mesh_has_one_quad_per_sprite() {
        let session = GameSession::new(BOARD_SIZE, Difficulty::Medium);
        let layout = BoardLayout::for_viewport(500, 550);
        let (vertices, indices, draw_calls) = build_mesh(&session, &layout);

        // HUD strip + head + one interior segment + tail + apple.
        assert_eq!(vertices.len(), 5 * 4);
        assert_eq!(indices.len(), 5 * 6);
        // All five use distinct textures, so nothing merges.
        assert_eq!(draw_calls.len(), 5);
        assert_eq!(
            draw_calls.iter().map(|d| d.index_count).sum::<u32>(),
            indices.len() as u32
        );
    }

    #[test]
    fn apple_quad_is_centered_on_its_cell() {
        let session = GameSession::new(BOARD_SIZE, Difficulty::Medium);
        let layout = BoardLayout::for_viewport(500, 550);
        let (vertices, _, draw_calls) = build_mesh(&session, &layout);

        let apple_call = draw_calls
            .iter()
            .find(|d| &*d.texture_key == sprites::APPLE)
            .expect("apple draw call present");
        let first_vertex = vertices[(apple_call.index_start / 6 * 4) as usize];
        // Top-left corner of the apple cell (15, 10) at 25 px cells.
        assert_eq!(first_vertex.position, [375.0, 300.0]);
    }

    #[test]
    fn consecutive_quads_with_one_texture_merge_into_one_draw_call() {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut draw_calls = Vec::new();
        for i in 0..3 {
            add_quad(
                &mut vertices,
                &mut indices,
                &mut draw_calls,
                QuadSpec {
                    texture_key: sprites::SNAKE_BODY,
                    center_x: i as f32 * 25.0,
                    center_y: 0.0,
                    width: 25.0,
                    height: 25.0,
                    rotation_deg: 0.0,
                    color: NO_TINT,
                },
            );
        }
        assert_eq!(draw_calls.len(), 1);
        assert_eq!(draw_calls[0].index_count, 18);
    }

    #[test]
    fn rotation_keeps_the_quad_centered() {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut draw_calls = Vec::new();
        add_quad(
            &mut vertices,
            &mut indices,
            &mut draw_calls,
            QuadSpec {
                texture_key: sprites::SNAKE_HEAD,
                center_x: 100.0,
                center_y: 200.0,
                width: 25.0,
                height: 25.0,
                rotation_deg: 90.0,
                color: NO_TINT,
            },
        );
        let cx: f32 = vertices.iter().map(|v| v.position[0]).sum::<f32>() / 4.0;
        let cy: f32 = vertices.iter().map(|v| v.position[1]).sum::<f32>() / 4.0;
        assert!((cx - 100.0).abs() < 1e-4);
        assert!((cy - 200.0).abs() < 1e-4);
    }
}
