// Domain models

mod counters;
mod frame;
mod system;

pub use counters::{
    CounterSnapshot, DiskCounters, DiskIoRates, NetworkCounters, NetworkRates, counter_rate,
};
pub use frame::{DashboardFrame, DiskLine};
pub use system::{DiskUsage, DiskVolume, StaticSystemInfo};
