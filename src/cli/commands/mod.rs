//! CLI command implementations
//!
//! Commands print their result and return the process exit code:
//! 0 success, 1 request rejected, 2 configuration error, 5 fatal.

pub mod init;
pub mod operators;
pub mod preview;
pub mod request;
pub mod validate;

use crate::service::ServiceResponse;

/// Exit code for a request the service rejected
pub const EXIT_REJECTED: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Map a service response to a process exit code
pub fn exit_code(response: &ServiceResponse) -> i32 {
    match response.status {
        200..=299 => 0,
        400..=499 => EXIT_REJECTED,
        _ => EXIT_FATAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let response = |status| ServiceResponse {
            status,
            body: String::new(),
        };
        assert_eq!(exit_code(&response(200)), 0);
        assert_eq!(exit_code(&response(400)), EXIT_REJECTED);
        assert_eq!(exit_code(&response(422)), EXIT_REJECTED);
        assert_eq!(exit_code(&response(500)), EXIT_FATAL);
    }
}
