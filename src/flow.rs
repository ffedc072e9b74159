//! Flow control and application event loop.
//!
//! This module provides the main event loop and flow abstraction for the
//! engine. A "flow" represents a scene that handles user input, updates its
//! state, and provides renderable solids each frame. The engine manages the
//! active flows and coordinates input distribution, camera updates and
//! rendering.
//!
//! # Lifecycle Flow
//!
//! The event loop follows this pattern each frame:
//! 1. Collect window/device events
//! 2. Call `on_<device/window>_events` on all flows for event distribution
//! 3. Render all flows' `on_render()` output with the active [`RenderMode`]
//! 4. Update the camera from the accumulated controller input
//! 5. Call `on_update` on all flows
//! 6. Present the frame

use std::{iter, pin::Pin, sync::Arc};

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{
    context::{Context, InitContext, MouseButtonState},
    data_structures::{mesh::DrawPrimitive, texture::Texture},
    render::{Primitive, Render, RenderMode},
};

/// Trait for implementing a renderable scene.
///
/// A `SceneFlow` manages a self-contained portion of the application:
/// its meshes, textures and per-frame logic. The engine passes events to all
/// flows and composes their renders.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once when the flow is created; configure the
///    context (camera start position, clear colour, etc.) here
/// 2. `on_window_events()` and `on_device_events()` are called for each
///    winit input event
/// 3. `on_update()` is called every frame after rendering
/// 4. `on_render()` is called each frame and specifies how to render `self`
pub trait SceneFlow {
    /// Initialize the flow and configure the context.
    ///
    /// This is the place to configure things such as the default background
    /// colour or camera start position.
    fn on_init(&mut self, ctx: &mut Context);

    /// Update state every frame.
    ///
    /// Called every frame with the elapsed time `dt`. Use for animations and
    /// other per-frame logic; the context is mutable so flows can constrain
    /// the camera.
    fn on_update(&mut self, ctx: &mut Context, dt: Duration);

    /// Handle raw device events (mouse hardware input).
    fn on_device_events(&mut self, ctx: &Context, event: &DeviceEvent);

    /// Handle window events (keyboard, mouse, window resizing, etc.).
    fn on_window_events(&mut self, ctx: &Context, event: &WindowEvent);

    /// Return renderable solids for this flow.
    ///
    /// Called each frame. Collect your objects into a [`Render`] and return
    /// it; the engine draws them with the pipelines the active render mode
    /// selects.
    fn on_render(&self) -> Render<'_>;
}

/// Type alias for a flow constructor (factory function).
///
/// A flow constructor takes an [`InitContext`] and asynchronously returns a
/// boxed [`SceneFlow`]. This allows lazy initialization and resource loading.
pub type FlowConstructor =
    Box<dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = Box<dyn SceneFlow>>>>>;

/// Wrap an async scene constructor into a [`FlowConstructor`].
///
/// Lets callers pass a plain `async fn new(InitContext) -> MyScene` without
/// spelling out the boxing and pinning:
///
/// ```ignore
/// flow::run(vec![flow_constructor(MyScene::new)])
/// ```
pub fn flow_constructor<S, F, Fut>(f: F) -> FlowConstructor
where
    S: SceneFlow + 'static,
    F: FnOnce(InitContext) -> Fut + 'static,
    Fut: Future<Output = S> + 'static,
{
    Box::new(
        move |ctx: InitContext| -> Pin<Box<dyn Future<Output = Box<dyn SceneFlow>>>> {
            Box::pin(async move { Box::new(f(ctx).await) as Box<dyn SceneFlow> })
        },
    )
}

/// Application state bundle: GPU context and surface status.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>) -> Self {
        let ctx = Context::new(window).await;
        let ctx = match ctx {
            Ok(ctx) => ctx,
            Err(e) => panic!(
                "App initialization failed. Cannot create the main context: {}",
                e
            ),
        };
        Self {
            ctx,
            is_surface_configured: false,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    fn render(&mut self, flows: &mut Vec<Box<dyn SceneFlow>>) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder: wgpu::CommandEncoder =
            self.ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });
        {
            let mut render_pass: wgpu::RenderPass<'_> =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.ctx.depth_texture.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                });

            // Actual rendering:
            let mut solids: Vec<Primitive> = Vec::new();
            flows
                .iter()
                .for_each(|flow| flow.on_render().collect(&mut solids));

            let passes: Vec<&wgpu::RenderPipeline> = match self.ctx.render_mode {
                RenderMode::Fill => vec![&self.ctx.pipelines.fill],
                RenderMode::Wireframe => vec![&self.ctx.pipelines.line],
                RenderMode::Point => vec![&self.ctx.pipelines.point],
                RenderMode::Both => vec![&self.ctx.pipelines.fill, &self.ctx.pipelines.line],
            };
            for pipeline in passes {
                render_pass.set_pipeline(pipeline);
                for primitive in &solids {
                    if primitive.mesh.num_indices == 0 {
                        log::warn!("you attempted to render a mesh with zero indices");
                        continue;
                    }
                    render_pass.draw_mesh(
                        primitive.mesh,
                        primitive.texture,
                        &self.ctx.camera.bind_group,
                    );
                }
            }
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    state: Option<AppState>,
    // This will hold the fully initialized flows once they are ready.
    flows: Vec<Box<dyn SceneFlow>>,
    // This holds the constructors at the start.
    // We use Option to `take()` it after use.
    constructors: Option<Vec<FlowConstructor>>,
    last_time: Instant,
    mode_key_held: bool,
}

impl App {
    fn new(async_runtime: tokio::runtime::Runtime, constructors: Vec<FlowConstructor>) -> Self {
        Self {
            async_runtime,
            state: None,
            flows: Vec::new(),
            constructors: Some(constructors),
            last_time: Instant::now(),
            mode_key_held: false,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window_attributes = Window::default_attributes().with_title("solid-ngin");
        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        let constructors = self.constructors.take().unwrap();

        let init_future = async move {
            let app_state = AppState::new(window).await;

            let flow_futures: Vec<_> = constructors
                .into_iter()
                // The clone in into() leverages the internal Arcs of Device and Queue and thus only clones the ref
                .map(|constructor| constructor((&app_state.ctx).into()))
                .collect();
            let flows: Vec<_> = futures::future::join_all(flow_futures).await;
            (app_state, flows)
        };

        let (mut app_state, flows) = self.async_runtime.block_on(init_future);
        self.flows = flows;
        self.flows
            .iter_mut()
            .for_each(|flow| flow.on_init(&mut app_state.ctx));

        let size = app_state.ctx.window.inner_size();
        app_state.resize(size.width, size.height);
        self.state = Some(app_state);
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            // TODO: make the below factor configurable
            let speed_factor = 5.0;
            if let MouseButtonState::Right = state.ctx.mouse.pressed {
                state
                    .ctx
                    .camera
                    .controller
                    .handle_mouse(dx * speed_factor, dy * speed_factor);
            }
        }
        self.flows
            .iter_mut()
            .for_each(|f| f.on_device_events(&state.ctx, &event));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        // general stuff
        state.ctx.camera.controller.handle_window_events(&event);

        if let WindowEvent::CursorMoved {
            device_id: _,
            position,
        } = event
        {
            state.ctx.mouse.coords = position;
        };

        self.flows
            .iter_mut()
            .for_each(|f| f.on_window_events(&state.ctx, &event));

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => match (code, key_state.is_pressed()) {
                (KeyCode::Escape, true) => event_loop.exit(),
                // Edge detector: one cycle per press, not one per repeat.
                (KeyCode::KeyM, true) => {
                    if !self.mode_key_held {
                        state.ctx.render_mode = state.ctx.render_mode.cycle();
                        log::info!("render mode: {:?}", state.ctx.render_mode);
                        self.mode_key_held = true;
                    }
                }
                (KeyCode::KeyM, false) => self.mode_key_held = false,
                _ => (),
            },
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => match (button, button_state.is_pressed()) {
                (MouseButton::Left, true) => state.ctx.mouse.pressed = MouseButtonState::Left,
                (MouseButton::Right, true) => state.ctx.mouse.pressed = MouseButtonState::Right,
                (_, false) => state.ctx.mouse.pressed = MouseButtonState::None,
                _ => (),
            },
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                match state.render(&mut self.flows) {
                    Ok(_) => {
                        // Update the camera
                        state
                            .ctx
                            .camera
                            .controller
                            .update(&mut state.ctx.camera.camera, dt);
                        state
                            .ctx
                            .camera
                            .uniform
                            .update_view_proj(&state.ctx.camera.camera, &state.ctx.projection);
                        state.ctx.queue.write_buffer(
                            &state.ctx.camera.buffer,
                            0,
                            bytemuck::cast_slice(&[state.ctx.camera.uniform]),
                        );
                        // Update custom stuff
                        self.flows
                            .iter_mut()
                            .for_each(|f| f.on_update(&mut state.ctx, dt));
                    }
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

pub fn run(constructors: Vec<FlowConstructor>) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let async_runtime = tokio::runtime::Runtime::new()?;
    let event_loop = EventLoop::new()?;

    let mut app = App::new(async_runtime, constructors);
    event_loop.run_app(&mut app)?;

    Ok(())
}
