pub mod base_case;
pub mod concurrent_elections;
pub mod deference;
pub mod failure_tolerance;
pub mod idempotence;
pub mod invalid_configuration;
pub mod leader_crash;
pub mod leader_stability;
pub mod random_priorities;
