//! In-memory stand-ins for the host Wi-Fi driver and clock, used to integration test the channel
//! monitor and to drive the host simulator.

pub mod manual_clock;
pub mod scripted_station;
