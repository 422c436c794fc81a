use std::env;
use std::fs;
use std::path::Path;

/// Claves de configuración que se pueden definir en `.env`
const CONFIG_KEYS: &[&str] = &[
    "API_URL",
    "API_URL_DEVELOPMENT",
    "API_URL_PRODUCTION",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    let contents = match fs::read_to_string(env_file) {
        Ok(contents) => contents,
        Err(_) => {
            println!("cargo:warning=No .env file found, using compiled-in defaults (API_URL=http://localhost:8000)");
            return;
        }
    };

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        // Solo claves conocidas, y nunca pisar el entorno real
        if !CONFIG_KEYS.contains(&key) || env::var(key).is_ok() {
            continue;
        }
        println!("cargo:rustc-env={}={}", key, value);
    }
}
