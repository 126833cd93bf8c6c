//! Host system check

use sysinfo::System;

use crate::health::check::{CheckResult, SystemCheck};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Gathers OS, CPU and memory information
#[derive(Debug, Default)]
pub struct SystemInfoCheck;

impl SystemInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl SystemCheck for SystemInfoCheck {
    fn name(&self) -> &'static str {
        "System Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("OS, CPU and memory information")
    }

    fn check(&self) -> CheckResult {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();

        let unknown = || "unknown".to_string();
        let mut details = vec![
            format!(
                "OS: {} {}",
                System::name().unwrap_or_else(unknown),
                System::os_version().unwrap_or_else(unknown)
            ),
            format!("Kernel: {}", System::kernel_version().unwrap_or_else(unknown)),
        ];

        let logical = sys.cpus().len();
        if logical == 0 {
            return CheckResult::warn("CPU count unavailable").with_details(details);
        }
        details.push(format!(
            "CPU: {} logical cores ({})",
            logical,
            sys.cpus()
                .first()
                .map(|cpu| cpu.brand().trim().to_string())
                .unwrap_or_else(unknown)
        ));

        let total_gib = sys.total_memory() as f64 / GIB;
        details.push(format!(
            "Memory: {:.1} GiB total, {:.1} GiB available",
            total_gib,
            sys.available_memory() as f64 / GIB
        ));

        if total_gib < 1.0 {
            CheckResult::warn(format!("low memory ({total_gib:.1} GiB)")).with_details(details)
        } else {
            CheckResult::pass(format!("{logical} cores, {total_gib:.1} GiB")).with_details(details)
        }
    }
}
