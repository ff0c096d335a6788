//! Graphics backend health check

use anyhow::Context;

use crate::health::check::{CheckResult, SystemCheck};

/// Checks that wgpu can find an adapter to render with
pub struct GraphicsBackendCheck {
    backends: wgpu::Backends,
}

impl GraphicsBackendCheck {
    pub fn new() -> Self {
        Self {
            backends: wgpu::Backends::all(),
        }
    }

    /// Restricts the check to specific backends
    pub fn with_backends(backends: wgpu::Backends) -> Self {
        Self { backends }
    }

    fn request_adapter(&self) -> anyhow::Result<wgpu::Adapter> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: self.backends,
            ..Default::default()
        });

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .context("async runtime unavailable")?;

        runtime
            .block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            }))
            .with_context(|| format!("no adapter for backends {:?}", self.backends))
    }
}

impl Default for GraphicsBackendCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for GraphicsBackendCheck {
    fn name(&self) -> &'static str {
        "Graphics Backend"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates wgpu instance creation and adapter availability")
    }

    fn check(&self) -> CheckResult {
        let adapter = match self.request_adapter() {
            Ok(adapter) => adapter,
            Err(e) => {
                return CheckResult::fail("No compatible graphics adapter available")
                    .with_details(vec![format!("✗ {:#}", e)]);
            }
        };

        let info = adapter.get_info();
        let details = vec![
            format!("✓ {} ({:?}, {:?})", info.name, info.device_type, info.backend),
            format!(
                "Max texture size: {0}x{0}",
                adapter.limits().max_texture_dimension_2d
            ),
        ];

        match info.device_type {
            wgpu::DeviceType::DiscreteGpu | wgpu::DeviceType::IntegratedGpu => {
                CheckResult::pass(format!("Hardware adapter: {}", info.name)).with_details(details)
            }
            _ => CheckResult::warn(format!("No hardware GPU, using {}", info.name))
                .with_details(details),
        }
    }
}
