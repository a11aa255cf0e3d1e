//! Sprite texture registry.
//!
//! Every sprite the board uses is a standalone PNG under
//! `assets/textures/`. A sprite whose file is missing or fails to decode
//! degrades to a 1x1 solid-color placeholder in the snake's palette, so
//! the game is fully playable from a bare checkout; the warning is logged
//! once at load time.

use snake_render::{SpritePipeline, Texture};
use std::collections::HashMap;
use std::sync::Arc;

pub const SNAKE_HEAD: &str = "snake_head";
pub const SNAKE_HEAD_EATING: &str = "snake_head_eating";
pub const SNAKE_BODY: &str = "snake_body";
pub const SNAKE_BODY_2: &str = "snake_body_2";
pub const SNAKE_CORNER_LEFT: &str = "snake_corner_left";
pub const SNAKE_CORNER_RIGHT: &str = "snake_corner_right";
pub const SNAKE_TAIL: [&str; 5] = [
    "snake_tail_0",
    "snake_tail_1",
    "snake_tail_2",
    "snake_tail_3",
    "snake_tail_4",
];
pub const APPLE: &str = "apple";

/// 1x1 white texture behind untextured quads (HUD strip backing).
pub const WHITE: &str = "__white";

pub struct GpuSpriteTexture {
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

fn asset_path(key: &str) -> String {
    format!("assets/textures/{key}.png")
}

/// Placeholder color when the PNG is unavailable.
fn fallback_rgba(key: &str) -> [u8; 4] {
    match key {
        SNAKE_HEAD => [40, 140, 40, 255],
        SNAKE_HEAD_EATING => [40, 170, 40, 255],
        SNAKE_BODY | SNAKE_CORNER_LEFT | SNAKE_CORNER_RIGHT => [60, 180, 60, 255],
        SNAKE_BODY_2 => [50, 160, 50, 255],
        APPLE => [200, 30, 30, 255],
        _ if key.starts_with("snake_tail") => [70, 190, 70, 255],
        _ => [255, 255, 255, 255],
    }
}

fn sprite_keys() -> Vec<&'static str> {
    let mut keys = vec![
        SNAKE_HEAD,
        SNAKE_HEAD_EATING,
        SNAKE_BODY,
        SNAKE_BODY_2,
        SNAKE_CORNER_LEFT,
        SNAKE_CORNER_RIGHT,
        APPLE,
    ];
    keys.extend(SNAKE_TAIL);
    keys
}

fn load_sprite(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pipeline: &SpritePipeline,
    key: &str,
) -> GpuSpriteTexture {
    let path = asset_path(key);
    let texture = std::fs::read(&path)
        .map_err(|e| format!("Failed to read texture '{path}': {e}"))
        .and_then(|bytes| Texture::from_bytes(device, queue, &bytes, key))
        .unwrap_or_else(|err| {
            log::warn!("{err}. Falling back to a solid-color placeholder.");
            Texture::from_rgba8(device, queue, &fallback_rgba(key), 1, 1, key)
        });
    let bind_group = pipeline.create_texture_bind_group(device, &texture);
    GpuSpriteTexture {
        texture,
        bind_group,
    }
}

/// Load every board sprite plus the white backing texture.
pub fn load_sprite_textures(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pipeline: &SpritePipeline,
) -> HashMap<Arc<str>, GpuSpriteTexture> {
    let mut textures = HashMap::new();
    for key in sprite_keys() {
        textures.insert(Arc::from(key), load_sprite(device, queue, pipeline, key));
    }

    let white = Texture::from_rgba8(device, queue, &[255, 255, 255, 255], 1, 1, "white");
    let bind_group = pipeline.create_texture_bind_group(device, &white);
    textures.insert(
        Arc::from(WHITE),
        GpuSpriteTexture {
            texture: white,
            bind_group,
        },
    );
    textures
}

/// Tail sprite for the current animation frame.
pub fn tail_key(frame: u8) -> &'static str {
    SNAKE_TAIL[frame as usize % SNAKE_TAIL.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sprite_has_a_distinct_key() {
        let keys = sprite_keys();
        let mut unique: Vec<&str> = keys.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), keys.len());
        assert_eq!(keys.len(), 12);
    }

    #[test]
    fn tail_key_cycles_through_all_frames() {
        for frame in 0..5u8 {
            assert_eq!(tail_key(frame), SNAKE_TAIL[frame as usize]);
        }
        assert_eq!(tail_key(5), SNAKE_TAIL[0]);
    }

    #[test]
    fn fallback_colors_are_opaque() {
        for key in sprite_keys() {
            assert_eq!(fallback_rgba(key)[3], 255);
        }
    }
}
