//! Snake -- main loop and application entry point.
//!
//! Architecture: winit drives the event loop via `ApplicationHandler`. All
//! per-frame work runs inside `RedrawRequested` using a **fixed-timestep**
//! model (see `TimeState`):
//!
//!   1. `begin_frame()` -- measure wall-clock delta, feed accumulator
//!   2. `while should_step()` -- consume one step per `1 / speed factor`
//!      seconds; the interval shrinks as the score-driven speed ramp
//!      kicks in, and the loop stops immediately on a collision
//!   3. Rebuild the board quad mesh from the session snapshot
//!   4. Upload camera uniform, issue draw calls, composite the egui layer
//!
//! Rendering is throttled independently of the simulation by the Fifo
//! (vsync) present mode, so a fast display never speeds the snake up and
//! a slow one is covered by accumulator catch-up.
//!
//! Application flow is a single `Screen` enum (menu, difficulty menu,
//! leaderboard, name entry, playing, game over); every transition is
//! applied in one place from the `UiActions` the egui layer returns.

mod audio;
mod board;
#[cfg(test)]
mod replay;
mod sprites;

use std::collections::HashMap;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use audio::AudioManager;
use board::{BoardLayout, DrawCall, BOARD_SIZE};
use snake_core::difficulty::Difficulty;
use snake_core::input::{InputState, Key};
use snake_core::leaderboard::Leaderboard;
use snake_core::session::{GameSession, StepOutcome};
use snake_core::time::TimeState;
use snake_render::{GpuContext, ScreenCamera, SpritePipeline, SpriteVertex};
use snake_ui::{DebugStats, GameView, Screen, UiLayer};
use sprites::GpuSpriteTexture;

/// All mutable application state lives here. Constructed lazily in
/// `ApplicationHandler::resumed` once the window and GPU surface exist.
///
/// Ownership is split into three conceptual groups:
///  - **Core systems** (time, input, camera, ui, audio) -- live for the
///    whole process
///  - **Game state** (screen, difficulty, leaderboard, session) -- the
///    session is recreated per game, the rest persists
///  - **GPU resources** (buffers, draw calls, textures) -- the mesh side
///    is rebuilt every simulated frame; buffers grow but never shrink
struct GameState {
    window: Arc<Window>,
    gpu: GpuContext,
    time: TimeState,
    input: InputState,
    camera: ScreenCamera,
    sprite_pipeline: SpritePipeline,
    ui: UiLayer,
    audio: AudioManager,

    screen: Screen,
    difficulty: Difficulty,
    leaderboard: Leaderboard,
    session: Option<GameSession>,

    textures: HashMap<Arc<str>, GpuSpriteTexture>,

    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    draw_calls: Vec<DrawCall>,
    sprite_count: usize,
}

impl GameState {
    fn new(window: Arc<Window>) -> Self {
        let gpu = GpuContext::new(window.clone());
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let ui = UiLayer::new(&gpu.device, gpu.surface_format, &window);
        let textures = sprites::load_sprite_textures(&gpu.device, &gpu.queue, &sprite_pipeline);

        let camera = ScreenCamera::new(gpu.size.0, gpu.size.1);
        let camera_uniform = camera.build_uniform();
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        let difficulty = Difficulty::default();
        Self {
            window,
            gpu,
            time: TimeState::new(),
            input: InputState::new(),
            camera,
            sprite_pipeline,
            ui,
            audio: AudioManager::new(),
            screen: Screen::menu(),
            difficulty,
            leaderboard: Leaderboard::load(difficulty),
            session: None,
            textures,
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            mesh_vertex_capacity: 0,
            mesh_index_capacity: 0,
            draw_calls: Vec::new(),
            sprite_count: 0,
        }
    }

    fn rebuild_board_mesh(&mut self) {
        let Some(session) = &self.session else {
            self.draw_calls.clear();
            self.sprite_count = 0;
            return;
        };

        let layout = BoardLayout::for_viewport(self.gpu.size.0, self.gpu.size.1);
        let (vertices, indices, draw_calls) = board::build_mesh(session, &layout);
        self.ensure_mesh_capacity(vertices.len(), indices.len());
        self.sprite_count = vertices.len() / 4;
        self.draw_calls = draw_calls;

        if !vertices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }
        if !indices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&indices));
        }
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }
}

struct App {
    config: snake_platform::window::PlatformConfig,
    state: Option<GameState>,
}

impl App {
    fn new() -> Self {
        Self {
            config: snake_platform::window::PlatformConfig::default(),
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window = snake_platform::window::create_window(event_loop, &self.config);
        log::info!(
            "Window created: {}x{}",
            self.config.width,
            self.config.height
        );
        self.state = Some(GameState::new(window));
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state.ui.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    state.camera.viewport = (w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    // Steering bypasses InputState: applying the change at
                    // event time keeps two rapid presses in order for the
                    // snake's single-slot direction queue.
                    if event.state == ElementState::Pressed
                        && matches!(state.screen, Screen::Playing)
                    {
                        if let (Some((dx, dy)), Some(session)) =
                            (direction_for_key(key_code), state.session.as_mut())
                        {
                            session.set_direction(dx, dy);
                        }
                    }

                    if let Some(engine_key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(engine_key),
                            ElementState::Released => state.input.key_up(engine_key),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }

                state.time.begin_frame();

                if state.input.is_just_pressed(Key::F3) {
                    state.ui.toggle_debug();
                }

                // Fixed-step simulation phase.
                let mut finished: Option<u32> = None;
                if matches!(state.screen, Screen::Playing) {
                    if state.input.is_just_pressed(Key::Escape) {
                        // Escape abandons the run but still submits a
                        // qualifying score, same as a collision.
                        finished = state.session.as_ref().map(|s| s.score());
                    } else if let Some(session) = state.session.as_mut() {
                        state.time.set_step_rate(session.speed_factor());
                        let mut ate = false;
                        while state.time.should_step() {
                            match session.step() {
                                StepOutcome::Moved => {}
                                StepOutcome::AteApple => {
                                    ate = true;
                                    // The eat may have crossed a speed
                                    // threshold; later steps this frame
                                    // already use the shorter interval.
                                    state.time.set_step_rate(session.speed_factor());
                                }
                                StepOutcome::GameOver => {
                                    finished = Some(session.score());
                                    break;
                                }
                            }
                        }
                        session.tick_eating();
                        if ate {
                            state.audio.play_eat();
                        }
                    }
                } else {
                    // Menu screens bank no simulation time; without this a
                    // long menu visit would replay as a movement burst.
                    state.time.reset();
                }

                state.rebuild_board_mesh();

                // UI phase: draw the active screen, collect its actions.
                let game_view = GameView {
                    difficulty: state.difficulty,
                    score: state.session.as_ref().map(|s| s.score()).unwrap_or(0),
                    high_score: state.leaderboard.highest_score(),
                    scores: state.leaderboard.scores(),
                };
                let stats = state.session.as_ref().map(|session| DebugStats {
                    draw_calls: state.draw_calls.len() as u32,
                    sprite_count: state.sprite_count as u32,
                    snake_len: session.snake().len(),
                    speed_factor: session.speed_factor(),
                });
                let (primitives, textures_delta, actions) = state.ui.prepare(
                    &state.window,
                    &state.time,
                    &mut state.screen,
                    &game_view,
                    stats,
                );

                if actions.exit {
                    log::info!("Exit selected, quitting.");
                    event_loop.exit();
                    return;
                }
                if actions.start_game {
                    let session = GameSession::new(BOARD_SIZE, state.difficulty);
                    state.time.reset();
                    state.time.set_step_rate(session.speed_factor());
                    state.session = Some(session);
                    state.screen = Screen::Playing;
                    log::info!("New game started on {}", state.difficulty);
                }
                if actions.open_leaderboard {
                    state.leaderboard = Leaderboard::load(state.difficulty);
                    state.screen = Screen::Leaderboard;
                }
                if actions.open_options {
                    state.screen = Screen::DifficultyMenu {
                        selected: state.difficulty.index(),
                    };
                }
                if let Some(index) = actions.select_difficulty {
                    let difficulty = Difficulty::from_index(index);
                    state.difficulty = difficulty;
                    state.leaderboard = Leaderboard::load(difficulty);
                    state.screen = Screen::menu();
                    log::info!("Difficulty set to {difficulty}");
                }
                if let Some(name) = actions.submit_score {
                    if let Screen::NameInput { pending_score, .. } = &state.screen {
                        let pending_score = *pending_score;
                        state.leaderboard.add_score(&name, pending_score);
                        log::info!("High score submitted: {name} ({pending_score})");
                    }
                    state.screen = Screen::Leaderboard;
                }
                if actions.back_to_menu {
                    state.screen = Screen::menu();
                }

                // The game-over transition is applied after the UI pass so
                // the key press that ended the run (Escape) is not replayed
                // into the next screen's own Escape handling.
                if let Some(score) = finished {
                    log::info!("Game over with score {score}");
                    state.screen = if state.leaderboard.is_high_score(score) {
                        Screen::NameInput {
                            name: String::new(),
                            pending_score: score,
                        }
                    } else {
                        Screen::GameOver { score }
                    };
                }

                // Render phase reads finalized state from this frame.
                let camera_uniform = state.camera.build_uniform();
                state.gpu.queue.write_buffer(
                    &state.camera_buffer,
                    0,
                    bytemuck::cast_slice(&[camera_uniform]),
                );

                let Some((output, surface_view)) = state.gpu.begin_frame() else {
                    return;
                };

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [state.gpu.size.0, state.gpu.size.1],
                    pixels_per_point: state.window.scale_factor() as f32,
                };

                let mut encoder =
                    state
                        .gpu
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("Render Encoder"),
                        });

                {
                    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("Board Render Pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &surface_view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        ..Default::default()
                    });

                    if !state.draw_calls.is_empty() {
                        render_pass.set_pipeline(&state.sprite_pipeline.render_pipeline);
                        render_pass.set_bind_group(0, &state.camera_bind_group, &[]);
                        render_pass.set_vertex_buffer(0, state.vertex_buffer.slice(..));
                        render_pass.set_index_buffer(
                            state.index_buffer.slice(..),
                            wgpu::IndexFormat::Uint32,
                        );

                        let mut last_bound_texture_key: Option<&Arc<str>> = None;
                        for draw in &state.draw_calls {
                            if let Some(texture) = state.textures.get(&draw.texture_key) {
                                let need_rebind = match last_bound_texture_key {
                                    Some(last) => **last != *draw.texture_key,
                                    None => true,
                                };
                                if need_rebind {
                                    render_pass.set_bind_group(1, &texture.bind_group, &[]);
                                    last_bound_texture_key = Some(&draw.texture_key);
                                }
                                render_pass.draw_indexed(
                                    draw.index_start..(draw.index_start + draw.index_count),
                                    0,
                                    0..1,
                                );
                            }
                        }
                    }
                }

                state.ui.upload(
                    &state.gpu.device,
                    &state.gpu.queue,
                    &mut encoder,
                    &primitives,
                    &textures_delta,
                    &screen_descriptor,
                );

                {
                    let mut egui_pass = encoder
                        .begin_render_pass(&wgpu::RenderPassDescriptor {
                            label: Some("egui Render Pass"),
                            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                view: &surface_view,
                                resolve_target: None,
                                ops: wgpu::Operations {
                                    load: wgpu::LoadOp::Load,
                                    store: wgpu::StoreOp::Store,
                                },
                            })],
                            depth_stencil_attachment: None,
                            ..Default::default()
                        })
                        .forget_lifetime();

                    state
                        .ui
                        .paint(&mut egui_pass, &primitives, &screen_descriptor);
                }

                state.ui.cleanup(&textures_delta);

                state.gpu.queue.submit(std::iter::once(encoder.finish()));
                output.present();

                state.input.end_frame();
            }

            _ => {}
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Board Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Board Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Grid velocity for a steering key, arrows or WASD.
fn direction_for_key(key_code: KeyCode) -> Option<(i32, i32)> {
    match key_code {
        KeyCode::ArrowUp | KeyCode::KeyW => Some((0, -1)),
        KeyCode::ArrowLeft | KeyCode::KeyA => Some((-1, 0)),
        KeyCode::ArrowDown | KeyCode::KeyS => Some((0, 1)),
        KeyCode::ArrowRight | KeyCode::KeyD => Some((1, 0)),
        _ => None,
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::F3 => Some(Key::F3),
        KeyCode::Digit1 => Some(Key::Num1),
        KeyCode::Digit2 => Some(Key::Num2),
        KeyCode::Digit3 => Some(Key::Num3),
        KeyCode::Digit4 => Some(Key::Num4),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Snake starting...");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
