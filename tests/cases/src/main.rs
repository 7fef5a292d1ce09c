extern crate cases;
extern crate chrono;
extern crate env_logger;

use chrono::prelude::{DateTime, Local};
use std::io::Write;

use cases::cases as scenarios;

fn init_logger() {
    env_logger::builder()
        .format(|buf, record| {
            let now: DateTime<Local> = Local::now();
            let now_str = now.format("%H:%M:%S.%3f").to_string();
            writeln!(buf, "{:5}: {} - {}", record.level(), now_str, record.args())
        })
        .init();
}

fn main() {
    init_logger();

    scenarios::base_case::run();
    scenarios::deference::run();
    scenarios::failure_tolerance::run();
    scenarios::failure_tolerance::run_with_silent_node();
    scenarios::idempotence::run();
    scenarios::concurrent_elections::run();
    scenarios::leader_crash::run();
    scenarios::leader_stability::run();
    scenarios::random_priorities::run();
    scenarios::invalid_configuration::run();
}
