//! Recovers the radio channel of the access point a Wi-Fi station is associated with.  The
//! network stack only tells us the BSSID, so on each new association we wait for the link to
//! settle, scan, and pick the channel out of the scan result whose BSSID matches ours.

pub mod access_point;
pub mod band;
pub mod bssid;
pub mod channel_monitor;
pub mod channel_result;
pub mod clock;
pub mod control_handle;
pub mod diagnostics;
pub mod discovery_state;
pub mod global;
pub mod monitor_config;
pub mod monitor_loop;
mod scan_correlator;
pub mod shared_channel;
pub mod wifi_station;

pub use global::instance;
