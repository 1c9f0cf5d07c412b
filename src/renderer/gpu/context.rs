//! wgpu Context
//!
//! The [`WgpuContext`] holds the device, queue and canvas surface, plus the
//! depth and multisample targets that follow the surface size.

use web_sys::HtmlCanvasElement;

use crate::errors::{GiantError, Result};
use crate::renderer::settings::RenderSettings;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub struct WgpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,

    /// Format render passes write through; the sRGB view of the surface
    /// format when sRGB output is on.
    pub view_format: wgpu::TextureFormat,
    pub sample_count: u32,
    pub depth_view: wgpu::TextureView,
    /// Multisampled color target, resolved into the surface.
    pub msaa_view: Option<wgpu::TextureView>,
    pub clear_color: wgpu::Color,
}

impl WgpuContext {
    pub async fn for_canvas(
        canvas: HtmlCanvasElement,
        settings: &RenderSettings,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| GiantError::Render(format!("surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GiantError::Render(format!("adapter: {e}")))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Atlas Giant Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::Performance,
                ..Default::default()
            })
            .await
            .map_err(|e| GiantError::Render(format!("device: {e}")))?;

        let mut config = surface
            .get_default_config(&adapter, width.max(1), height.max(1))
            .ok_or_else(|| GiantError::Render("surface not supported by adapter".into()))?;

        let view_format = if settings.srgb_output {
            config.format.add_srgb_suffix()
        } else {
            config.format.remove_srgb_suffix()
        };
        if view_format != config.format {
            config.view_formats.push(view_format);
        }

        let capabilities = surface.get_capabilities(&adapter);
        if settings.alpha
            && capabilities
                .alpha_modes
                .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            config.alpha_mode = wgpu::CompositeAlphaMode::PreMultiplied;
        }
        surface.configure(&device, &config);

        let sample_count = if settings.antialias { 4 } else { 1 };
        let depth_view = Self::create_depth_texture(&device, &config, sample_count);
        let msaa_view = Self::create_msaa_texture(&device, &config, view_format, sample_count);

        let clear_color = if settings.alpha {
            wgpu::Color::TRANSPARENT
        } else {
            wgpu::Color::BLACK
        };

        log::info!(
            "GPU ready: {:?} via {:?}, {view_format:?}, {sample_count}x MSAA",
            adapter.get_info().name,
            adapter.get_info().backend
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
            view_format,
            sample_count,
            depth_view,
            msaa_view,
            clear_color,
        })
    }

    /// Reconfigures the surface for a new backing size in device pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.reconfigure();
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_view = Self::create_depth_texture(&self.device, &self.config, self.sample_count);
        self.msaa_view =
            Self::create_msaa_texture(&self.device, &self.config, self.view_format, self.sample_count);
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_msaa_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Option<wgpu::TextureView> {
        if sample_count <= 1 {
            return None;
        }
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("MSAA Color Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
    }
}
