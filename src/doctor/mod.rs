//! Doctor command for environment diagnostics
//!
//! Health checks for the dataset, configuration, and host environment.

use std::path::{Path, PathBuf};

use sysinfo::{Disks, System};

use crate::config::Config;
use crate::dataset::Dataset;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

/// True when any check failed outright
pub fn has_failures(checks: &[HealthCheck]) -> bool {
    checks
        .iter()
        .any(|c| matches!(c.status, HealthStatus::Fail(_)))
}

/// Doctor diagnostics system
pub struct Doctor {
    dataset_path: PathBuf,
    config_path: Option<PathBuf>,
}

impl Doctor {
    /// Create a new doctor instance
    pub fn new(dataset_path: PathBuf, config_path: Option<PathBuf>) -> Self {
        Self {
            dataset_path,
            config_path,
        }
    }

    /// Run all health checks
    pub fn run_diagnostics(&self) -> Vec<HealthCheck> {
        vec![
            self.check_dataset_file(),
            self.check_dataset_parse(),
            self.check_outcome_fields(),
            self.check_config(),
            self.check_home_dir(),
            self.check_disk_space(),
            self.check_memory(),
        ]
    }

    /// Check 1: dataset file present
    fn check_dataset_file(&self) -> HealthCheck {
        let status = if self.dataset_path.is_file() {
            HealthStatus::Pass
        } else {
            HealthStatus::Fail(format!(
                "Dataset file not found at {}",
                self.dataset_path.display()
            ))
        };

        HealthCheck {
            name: "Dataset File".to_string(),
            status,
        }
    }

    /// Check 2: dataset parses
    fn check_dataset_parse(&self) -> HealthCheck {
        let status = match Dataset::load(&self.dataset_path) {
            Ok(dataset) if dataset.is_empty() => {
                HealthStatus::Warn("Dataset has no rows; matching will fail".to_string())
            }
            Ok(_) => HealthStatus::Pass,
            Err(e) => HealthStatus::Fail(e.to_string()),
        };

        HealthCheck {
            name: "Dataset Parse".to_string(),
            status,
        }
    }

    /// Check 3: outcome fields populated
    ///
    /// The matcher assumes advice and risk are present on every row; risk
    /// is enforced at load time, advice is only reported here.
    fn check_outcome_fields(&self) -> HealthCheck {
        let status = match Dataset::load(&self.dataset_path) {
            Ok(dataset) => {
                let missing = dataset.summary().missing_advice;
                if missing == 0 {
                    HealthStatus::Pass
                } else {
                    HealthStatus::Warn(format!("{} rows have empty advice text", missing))
                }
            }
            Err(_) => HealthStatus::Fail("Cannot inspect rows: dataset does not parse".to_string()),
        };

        HealthCheck {
            name: "Outcome Fields".to_string(),
            status,
        }
    }

    /// Check 4: configuration readable
    fn check_config(&self) -> HealthCheck {
        let path = match &self.config_path {
            Some(path) => path.clone(),
            None => match Config::config_path() {
                Ok(path) => path,
                Err(e) => {
                    return HealthCheck {
                        name: "Configuration".to_string(),
                        status: HealthStatus::Fail(e.to_string()),
                    }
                }
            },
        };

        let status = if !path.exists() {
            HealthStatus::Warn("No config file yet; defaults will be written on first run".to_string())
        } else {
            match Config::load_from(&path) {
                Ok(_) => HealthStatus::Pass,
                Err(e) => HealthStatus::Fail(format!("{:#}", e)),
            }
        };

        HealthCheck {
            name: "Configuration".to_string(),
            status,
        }
    }

    /// Check 5: home directory available for history and config
    fn check_home_dir(&self) -> HealthCheck {
        let status = match dirs::home_dir() {
            Some(_) => HealthStatus::Pass,
            None => HealthStatus::Warn(
                "No home directory; input history will not persist".to_string(),
            ),
        };

        HealthCheck {
            name: "Home Directory".to_string(),
            status,
        }
    }

    /// Check 6: disk space
    fn check_disk_space(&self) -> HealthCheck {
        let disks = Disks::new_with_refreshed_list();
        let reference = if self.dataset_path.is_absolute() {
            self.dataset_path.clone()
        } else {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        };

        let mut best: Option<(&Path, u64)> = None;
        for disk in &disks {
            if reference.starts_with(disk.mount_point()) {
                let depth = disk.mount_point().components().count();
                if best.map(|(p, _)| depth > p.components().count()).unwrap_or(true) {
                    best = Some((disk.mount_point(), disk.available_space()));
                }
            }
        }

        let status = match best {
            Some((_, available)) => {
                let available_gb = available / (1024 * 1024 * 1024);
                if available_gb < 1 {
                    HealthStatus::Fail(format!("Less than 1GB available ({} GB)", available_gb))
                } else if available_gb < 5 {
                    HealthStatus::Warn(format!("Low disk space ({} GB available)", available_gb))
                } else {
                    HealthStatus::Pass
                }
            }
            None => HealthStatus::Warn("Could not determine disk usage".to_string()),
        };

        HealthCheck {
            name: "Disk Space".to_string(),
            status,
        }
    }

    /// Check 7: memory headroom
    fn check_memory(&self) -> HealthCheck {
        let mut system = System::new();
        system.refresh_memory();

        let available_mb = system.available_memory() / (1024 * 1024);
        let status = if available_mb < 128 {
            HealthStatus::Warn(format!("Only {} MB memory available", available_mb))
        } else {
            HealthStatus::Pass
        };

        HealthCheck {
            name: "Memory".to_string(),
            status,
        }
    }
}
