//! GPU adapter check

use crate::health::check::{CheckResult, SystemCheck};
use crate::platform::Platform;

/// Enumerates adapters for the host platform's preferred backends
#[derive(Debug, Default)]
pub struct GraphicsBackendCheck {
    platform: Option<Platform>,
}

impl GraphicsBackendCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform: Some(platform),
        }
    }
}

fn device_type_name(device_type: wgpu::DeviceType) -> &'static str {
    match device_type {
        wgpu::DeviceType::DiscreteGpu => "discrete",
        wgpu::DeviceType::IntegratedGpu => "integrated",
        wgpu::DeviceType::VirtualGpu => "virtual",
        wgpu::DeviceType::Cpu => "cpu",
        wgpu::DeviceType::Other => "other",
    }
}

impl SystemCheck for GraphicsBackendCheck {
    fn name(&self) -> &'static str {
        "Graphics Backend"
    }

    fn description(&self) -> Option<&'static str> {
        Some("A GPU adapter is available for the preferred backends")
    }

    fn check(&self) -> CheckResult {
        let platform = match self.platform.map(Ok).unwrap_or_else(Platform::detect) {
            Ok(platform) => platform,
            Err(e) => return CheckResult::fail(e.to_string()),
        };
        let backends = platform.preferred_backends();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });
        let adapters = instance.enumerate_adapters(backends);

        let mut details = vec![format!("Backends requested: {backends:?}")];
        details.extend(adapters.iter().map(|adapter| {
            let info = adapter.get_info();
            format!(
                "{} ({}, {:?})",
                info.name,
                device_type_name(info.device_type),
                info.backend
            )
        }));

        let hardware = adapters.iter().any(|adapter| {
            matches!(
                adapter.get_info().device_type,
                wgpu::DeviceType::DiscreteGpu | wgpu::DeviceType::IntegratedGpu
            )
        });

        match (adapters.len(), hardware) {
            (0, _) => CheckResult::skip(format!("no adapters for {platform}"))
                .with_details(details),
            (n, true) => CheckResult::pass(format!("{n} adapter(s)")).with_details(details),
            (n, false) => CheckResult::warn(format!("{n} adapter(s), no hardware GPU"))
                .with_details(details),
        }
    }
}
