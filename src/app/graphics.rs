//! Hardware-accelerated rendering context bound to a window
//!
//! `GraphicsContext` owns every GPU object tied to the window. Dropping it
//! releases them in field order; the surface goes before the window it was
//! created from.

use std::sync::Arc;

use tracing::{debug, info};
use wgpu::{Adapter, AdapterInfo, Device, Queue, Surface, SurfaceConfiguration, TextureView};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::config::{BackendPreference, GraphicsConfig};
use crate::error::ContextError;
use crate::platform::Platform;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Backends to request for the given preference on this platform
pub fn backends_for(preference: BackendPreference, platform: Platform) -> wgpu::Backends {
    match preference {
        BackendPreference::Auto => platform.preferred_backends(),
        BackendPreference::Gl => wgpu::Backends::GL,
        BackendPreference::All => wgpu::Backends::all(),
    }
}

/// Window surface, device and queue
pub struct GraphicsContext {
    depth_view: Option<TextureView>,
    surface: Surface<'static>,
    device: Device,
    queue: Queue,
    adapter_info: AdapterInfo,
    config: SurfaceConfiguration,
    clear_color: wgpu::Color,
    window: Arc<Window>,
}

impl GraphicsContext {
    /// Creates the context for `window`
    pub async fn new(
        window: Arc<Window>,
        config: &GraphicsConfig,
        vsync: bool,
        platform: Platform,
    ) -> Result<Self, ContextError> {
        let backends = backends_for(config.backend, platform);
        info!(?backends, %platform, "Initializing graphics context");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power_preference.into(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let adapter_info = adapter.get_info();
        info!(
            adapter.name = adapter_info.name.as_str(),
            adapter.backend = ?adapter_info.backend,
            adapter.driver = adapter_info.driver.as_str(),
            "Found GPU adapter"
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Main Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                experimental_features: Default::default(),
            })
            .await?;

        let surface_config =
            surface_configuration(&surface, &adapter, window.inner_size(), vsync, config)?;
        surface.configure(&device, &surface_config);

        info!(
            surface.width = surface_config.width,
            surface.height = surface_config.height,
            surface.format = ?surface_config.format,
            surface.present_mode = ?surface_config.present_mode,
            "Surface configured"
        );

        let depth_view = config
            .depth_buffer
            .then(|| create_depth_view(&device, surface_config.width, surface_config.height));

        let [r, g, b, a] = config.clear_color;

        Ok(Self {
            depth_view,
            surface,
            device,
            queue,
            adapter_info,
            config: surface_config,
            clear_color: wgpu::Color { r, g, b, a },
            window,
        })
    }

    /// Reconfigures the surface for a new window size; zero sizes are ignored
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        if self.depth_view.is_some() {
            self.depth_view = Some(create_depth_view(
                &self.device,
                new_size.width,
                new_size.height,
            ));
        }

        debug!(
            width = new_size.width,
            height = new_size.height,
            "Surface resized"
        );
    }

    /// Re-applies the current configuration (after the surface was lost)
    pub fn reconfigure(&mut self) {
        self.resize(self.window.inner_size());
    }

    /// Clears color (and depth) and presents the frame
    pub fn render_clear(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let depth_stencil_attachment =
                self.depth_view
                    .as_ref()
                    .map(|depth_view| wgpu::RenderPassDepthStencilAttachment {
                        view: depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    });

            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();

        Ok(())
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn adapter_info(&self) -> &AdapterInfo {
        &self.adapter_info
    }

    /// Current surface size in physical pixels
    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    pub fn surface_config(&self) -> &SurfaceConfiguration {
        &self.config
    }

    pub fn has_depth_buffer(&self) -> bool {
        self.depth_view.is_some()
    }
}

impl Drop for GraphicsContext {
    fn drop(&mut self) {
        info!(
            adapter = self.adapter_info.name.as_str(),
            "Releasing graphics context"
        );
    }
}

fn surface_configuration(
    surface: &Surface<'_>,
    adapter: &Adapter,
    size: PhysicalSize<u32>,
    vsync: bool,
    config: &GraphicsConfig,
) -> Result<SurfaceConfiguration, ContextError> {
    let caps = surface.get_capabilities(adapter);

    let Some(fallback_format) = caps.formats.first().copied() else {
        return Err(ContextError::UnsupportedSurface {
            adapter: adapter.get_info().name,
        });
    };
    let format = caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .copied()
        .unwrap_or(fallback_format);

    let alpha_mode = caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    Ok(SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: present_mode(vsync),
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: config.max_frame_latency.max(1),
    })
}

/// Present mode for the vsync setting
pub fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

fn create_depth_view(device: &Device, width: u32, height: u32) -> TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
