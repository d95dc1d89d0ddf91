use once_cell::sync::Lazy;
use std::env;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

static ENABLE_LOGGING: AtomicBool = AtomicBool::new(false);
static LOG_TO_FILE: AtomicBool = AtomicBool::new(false);
static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Initializes logging based on environment variables:
/// - FLOWPLANE_LOGGING: enables/disables logging (true/false, default false)
/// - FLOWPLANE_LOG_TO_FILE: write to a file instead of stdout (true/false, default false)
/// - FLOWPLANE_LOG_FILE: the file to append to (default flowplane.log)
///
/// To enable logging in tests, run: FLOWPLANE_LOGGING=true cargo test -- --nocapture
pub fn init_logging() {
    let enabled = match env::var("FLOWPLANE_LOGGING").as_deref() {
        Ok("true") => true,
        Ok("false") | Err(_) => false,
        Ok(other) => {
            eprintln!("FLOWPLANE_LOGGING must be 'true' or 'false', got '{}'; logging disabled", other);
            false
        }
    };
    ENABLE_LOGGING.store(enabled, Ordering::SeqCst);
    if !enabled {
        return;
    }

    if env::var("FLOWPLANE_LOG_TO_FILE").as_deref() == Ok("true") {
        let path = env::var("FLOWPLANE_LOG_FILE").unwrap_or_else(|_| "flowplane.log".to_string());
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                if let Ok(mut slot) = LOG_FILE.lock() {
                    *slot = Some(file);
                    LOG_TO_FILE.store(true, Ordering::SeqCst);
                }
            }
            Err(e) => eprintln!("Failed to open log file {}: {}; logging to stdout", path, e),
        }
    }
}

/// Installs a `tracing` subscriber that honors RUST_LOG. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}

pub fn log(prefix: &str, message: &str) {
    if !ENABLE_LOGGING.load(Ordering::SeqCst) {
        return;
    }
    let log_message = format!("  [{}]   {}\n", prefix, message);

    if LOG_TO_FILE.load(Ordering::SeqCst) {
        if let Ok(mut slot) = LOG_FILE.lock() {
            if let Some(file) = slot.as_mut() {
                if let Err(e) = file.write_all(log_message.as_bytes()) {
                    eprintln!("Failed to write to log file: {}", e);
                }
                if let Err(e) = file.flush() {
                    eprintln!("Failed to flush log file: {}", e);
                }
            }
        }
    } else {
        print!("{}", log_message);
    }
}
