//! Aggregate system resource sampling.
//!
//! One-shot, synchronous: CPU is measured over a short fixed interval (the
//! call blocks for that long), memory and disk are instantaneous
//! percentages. No history, no trend, no alerting.

use std::time::Duration;

use crate::config;
use crate::error::ReapResult;

#[cfg(unix)]
use crate::error::ReapError;

/// Point-in-time utilization percentages, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceSample {
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub disk_percent: f32,
}

/// Sample CPU over the default interval, plus instantaneous memory and disk
/// usage of the root filesystem / system drive.
pub fn sample() -> ReapResult<ResourceSample> {
    sample_with_interval(config::CPU_SAMPLE_INTERVAL)
}

pub fn sample_with_interval(interval: Duration) -> ReapResult<ResourceSample> {
    #[cfg(unix)]
    {
        sample_unix(interval)
    }

    #[cfg(windows)]
    {
        sample_windows(interval)
    }
}

#[cfg(unix)]
fn sample_unix(interval: Duration) -> ReapResult<ResourceSample> {
    use psutil::cpu::CpuPercentCollector;

    let mut collector = CpuPercentCollector::new().map_err(ReapError::unknown)?;
    std::thread::sleep(interval);
    let cpu_percent = collector.cpu_percent().map_err(ReapError::unknown)?;

    let memory_percent = psutil::memory::virtual_memory()
        .map_err(ReapError::unknown)?
        .percent();
    let disk_percent = psutil::disk::disk_usage("/")
        .map_err(ReapError::unknown)?
        .percent();

    Ok(clamped(cpu_percent, memory_percent, disk_percent))
}

#[cfg(windows)]
fn sample_windows(interval: Duration) -> ReapResult<ResourceSample> {
    use sysinfo::{Disks, MemoryRefreshKind, RefreshKind, System};

    let refresh = RefreshKind::new()
        .with_cpu(sysinfo::CpuRefreshKind::new().with_cpu_usage())
        .with_memory(MemoryRefreshKind::everything());
    let mut system = System::new_with_specifics(refresh);

    std::thread::sleep(interval.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
    system.refresh_specifics(refresh);

    let cpu_percent = system.global_cpu_usage();
    let memory_percent = if system.total_memory() == 0 {
        0.0
    } else {
        system.used_memory() as f32 / system.total_memory() as f32 * 100.0
    };

    let disks = Disks::new_with_refreshed_list();
    let disk_percent = disks
        .iter()
        .find(|disk| {
            let root = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".into());
            disk.mount_point().to_string_lossy().starts_with(&root)
        })
        .or_else(|| disks.iter().next())
        .map(|disk| {
            if disk.total_space() == 0 {
                0.0
            } else {
                (disk.total_space() - disk.available_space()) as f32 / disk.total_space() as f32
                    * 100.0
            }
        })
        .unwrap_or(0.0);

    Ok(clamped(cpu_percent, memory_percent, disk_percent))
}

/// Sampling jitter can nudge a reading past its bound; clamp to the
/// documented range.
fn clamped(cpu: f32, memory: f32, disk: f32) -> ResourceSample {
    ResourceSample {
        cpu_percent: cpu.clamp(0.0, 100.0),
        memory_percent: memory.clamp(0.0, 100.0),
        disk_percent: disk.clamp(0.0, 100.0),
    }
}
