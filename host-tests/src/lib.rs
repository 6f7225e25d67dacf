//! Host-based scenario tests for the update gate
//! These drive the full worker (gate + executor) with in-memory devices,
//! on the development machine rather than the ESP32
