use chrono::prelude::{DateTime, Local};
use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

pub mod cluster;
pub mod configuration;

pub fn sleep_ms(milliseconds: u64) {
    thread::sleep(Duration::from_millis(milliseconds));
}

pub fn convergence_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Polls the condition until it holds or the timeout elapses.
pub fn wait_until<F>(timeout: Duration, condition: F) -> bool
where
    F: Fn() -> bool,
{
    let started = Instant::now();
    while started.elapsed() < timeout {
        if condition() {
            return true;
        }
        sleep_ms(20);
    }

    condition()
}

/// Installs the logger once; later calls are ignored.
pub fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .format(|buf, record| {
            let now: DateTime<Local> = Local::now();
            let now_str = now.format("%H:%M:%S.%3f").to_string();
            writeln!(buf, "{:5}: {} - {}", record.level(), now_str, record.args())
        })
        .try_init();
}
