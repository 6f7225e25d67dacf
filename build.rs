use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const DEVICE_CONFIG: &str = "device_config.h";
const ROOT_CERT: &str = "certs/server_root_cert.pem";

// (define name, default when absent)
const DEFINES: &[(&str, &str)] = &[
    ("WIFI_SSID", ""),
    ("WIFI_PASSWORD", ""),
    ("OTA_FIRMWARE_URL", ""),
    ("OTA_TRIGGER_URL", ""),
];

fn main() -> anyhow::Result<()> {
    // Necessary for ESP-IDF
    embuild::espidf::sysenv::output();

    // Add crash log helper for better panic diagnostics
    println!("cargo:rustc-link-arg=-Wl,--undefined=esp_backtrace_print_app_description");

    println!("cargo:rerun-if-changed={}", DEVICE_CONFIG);
    println!("cargo:rerun-if-changed={}", ROOT_CERT);

    let contents = if Path::new(DEVICE_CONFIG).exists() {
        fs::read_to_string(DEVICE_CONFIG)?
    } else {
        println!("cargo:warning={} not found! Copy device_config.h.example to {} and fill in your network and update server.", DEVICE_CONFIG, DEVICE_CONFIG);
        String::new()
    };

    for (name, default) in DEFINES {
        let value = string_define(&contents, name).unwrap_or_else(|| default.to_string());
        println!("cargo:rustc-env={}={}", name, value);
    }

    // The certificate is multi-line, so it travels through OUT_DIR rather than an env var
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let pem = if Path::new(ROOT_CERT).exists() {
        fs::read_to_string(ROOT_CERT)?
    } else {
        println!("cargo:warning={} not found! Updates stay disabled until a root certificate is embedded.", ROOT_CERT);
        String::new()
    };
    fs::write(out_dir.join("server_root_cert.pem"), pem)?;

    Ok(())
}

/// Value of `#define NAME "value"`, ignoring commented-out lines.
fn string_define(contents: &str, name: &str) -> Option<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with("//"))
        .find(|line| {
            let mut parts = line.split_whitespace();
            parts.next() == Some("#define") && parts.next() == Some(name)
        })
        .and_then(|line| line.split('"').nth(1))
        .map(str::to_string)
}
