//! sysinfo-backed readers for every domain except GPU.
//!
//! Each reader owns its own sysinfo handle so domains refresh independently.

use std::path::Path;

use sysinfo::{
    CpuRefreshKind, DiskKind, Disks, MemoryRefreshKind, Networks, ProcessRefreshKind,
    ProcessesToUpdate, RefreshKind, System, UpdateKind, Users,
};

use super::{
    CpuReader, CpuReading, DiskReader, InterfaceCounters, MemoryReader, MemoryReading,
    NetworkReader, ProcessEntry, ProcessReader, UsageReading, VolumeInfo,
};
use crate::error::{MonitorError, Result};

/// Filesystems that only ever live on optical media
const MEDIA_FILESYSTEMS: [&str; 3] = ["iso9660", "udf", "cdfs"];

pub struct SysinfoCpuReader {
    system: System,
}

impl SysinfoCpuReader {
    pub fn new() -> Self {
        let refresh_kind =
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage());

        Self {
            system: System::new_with_specifics(refresh_kind),
        }
    }
}

impl Default for SysinfoCpuReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuReader for SysinfoCpuReader {
    fn read(&mut self) -> Result<CpuReading> {
        // Core count is taken before the refresh so a hot-plug in between shows
        // up as a length mismatch.
        let core_count = self.system.cpus().len();
        self.system.refresh_cpu_usage();

        let per_core_percent: Vec<f32> = self
            .system
            .cpus()
            .iter()
            .map(|cpu| cpu.cpu_usage())
            .collect();

        if per_core_percent.is_empty() {
            return Err(MonitorError::metric_collection("no CPUs reported"));
        }

        Ok(CpuReading {
            core_count,
            overall_percent: self.system.global_cpu_usage(),
            per_core_percent,
        })
    }
}

pub struct SysinfoMemoryReader {
    system: System,
}

impl SysinfoMemoryReader {
    pub fn new() -> Self {
        let refresh_kind =
            RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram());

        Self {
            system: System::new_with_specifics(refresh_kind),
        }
    }
}

impl Default for SysinfoMemoryReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryReader for SysinfoMemoryReader {
    fn read(&mut self) -> Result<MemoryReading> {
        self.system
            .refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram());

        let total_bytes = self.system.total_memory();
        if total_bytes == 0 {
            return Err(MonitorError::metric_collection("total memory reported as 0"));
        }

        Ok(MemoryReading {
            total_bytes,
            available_bytes: self.system.available_memory(),
            used_bytes: self.system.used_memory(),
        })
    }
}

pub struct SysinfoDiskReader {
    disks: Disks,
}

impl SysinfoDiskReader {
    pub fn new() -> Self {
        Self {
            disks: Disks::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoDiskReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DiskReader for SysinfoDiskReader {
    fn volumes(&mut self) -> Result<Vec<VolumeInfo>> {
        // Re-enumerate: removable drives come and go between ticks
        self.disks = Disks::new_with_refreshed_list();

        Ok(self
            .disks
            .list()
            .iter()
            .map(|disk| {
                let mount_point = disk.mount_point().to_path_buf();
                let name = disk.name().to_string_lossy().to_string();
                let fs_type = disk.file_system().to_string_lossy().to_string();

                let kind = match disk.kind() {
                    DiskKind::HDD => "hdd",
                    DiskKind::SSD => "ssd",
                    DiskKind::Unknown(_) => "unknown",
                };
                let options = if disk.is_removable() {
                    format!("{},removable", kind)
                } else {
                    kind.to_string()
                };

                let is_media = disk.is_removable()
                    || MEDIA_FILESYSTEMS.contains(&fs_type.to_ascii_lowercase().as_str());

                VolumeInfo {
                    device: if name.is_empty() {
                        mount_point.to_string_lossy().to_string()
                    } else {
                        name
                    },
                    mount_point,
                    fs_type,
                    options,
                    is_media,
                }
            })
            .collect())
    }

    #[cfg(unix)]
    fn usage(&mut self, mount_point: &Path) -> Result<UsageReading> {
        statvfs_usage(mount_point)
    }

    #[cfg(not(unix))]
    fn usage(&mut self, mount_point: &Path) -> Result<UsageReading> {
        let disk = self
            .disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == mount_point)
            .ok_or_else(|| {
                MonitorError::metric_collection(format!(
                    "volume {} disappeared",
                    mount_point.display()
                ))
            })?;

        let total = disk.total_space();
        let free = disk.available_space();

        Ok(UsageReading {
            total_bytes: total,
            used_bytes: total.saturating_sub(free),
            free_bytes: free,
        })
    }
}

#[cfg(unix)]
fn statvfs_usage(mount_point: &Path) -> Result<UsageReading> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path = CString::new(mount_point.as_os_str().as_bytes()).map_err(|_| {
        MonitorError::metric_collection(format!("invalid mount point {}", mount_point.display()))
    })?;

    // SAFETY: statvfs is plain old data and `path` is a valid NUL-terminated string
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(path.as_ptr(), &mut stat) };

    if rc != 0 {
        let err = std::io::Error::last_os_error();
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            return Err(MonitorError::permission_denied(format!(
                "{}: {}",
                mount_point.display(),
                err
            )));
        }
        return Err(err.into());
    }

    let fragment = stat.f_frsize as u64;
    let blocks = stat.f_blocks as u64;
    let free_blocks = stat.f_bfree as u64;
    let available_blocks = stat.f_bavail as u64;

    Ok(UsageReading {
        total_bytes: blocks * fragment,
        used_bytes: blocks.saturating_sub(free_blocks) * fragment,
        free_bytes: available_blocks * fragment,
    })
}

pub struct SysinfoNetworkReader {
    networks: Networks,
}

impl SysinfoNetworkReader {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoNetworkReader {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkReader for SysinfoNetworkReader {
    fn counters(&mut self) -> Result<Vec<InterfaceCounters>> {
        self.networks.refresh(true);

        let mut counters: Vec<InterfaceCounters> = self
            .networks
            .iter()
            .map(|(name, data)| InterfaceCounters {
                name: name.to_string(),
                bytes_sent: data.total_transmitted(),
                bytes_recv: data.total_received(),
            })
            .collect();

        counters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(counters)
    }
}

pub struct SysinfoProcessReader {
    system: System,
    users: Users,
}

impl SysinfoProcessReader {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            users: Users::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoProcessReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessReader for SysinfoProcessReader {
    fn processes(&mut self) -> Result<Vec<ProcessEntry>> {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_cpu()
                .with_exe(UpdateKind::OnlyIfNotSet)
                .with_user(UpdateKind::OnlyIfNotSet),
        );

        let mut entries: Vec<ProcessEntry> = self
            .system
            .processes()
            .values()
            .map(|process| {
                let name = process.name().to_string_lossy().to_string();
                let user = process
                    .user_id()
                    .and_then(|uid| self.users.get_user_by_id(uid))
                    .map(|user| user.name().to_string());

                ProcessEntry {
                    pid: process.pid().as_u32(),
                    name: (!name.is_empty()).then_some(name),
                    user,
                    exe: process.exe().map(Path::to_path_buf),
                    cpu_percent: process.cpu_usage(),
                }
            })
            .collect();

        entries.sort_by_key(|entry| entry.pid);
        Ok(entries)
    }
}
