//! Control protocol replies
//!
//! Reply codes and formatting.

pub const OK: u16 = 200;
pub const CREATED: u16 = 201;
pub const STATUS: u16 = 211;
pub const READY: u16 = 220;
pub const GOODBYE: u16 = 221;
pub const LOGIN_SUCCESS: u16 = 230;
pub const SERVICE_UNAVAILABLE: u16 = 421;
pub const LOCAL_ERROR: u16 = 451;
pub const SYNTAX_ERROR: u16 = 500;
pub const SYNTAX_ERROR_IN_ARGUMENTS: u16 = 501;
pub const BAD_SEQUENCE: u16 = 503;
pub const AUTH_FAILED: u16 = 530;
pub const NAME_TAKEN: u16 = 550;

/// Format a reply line
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\r\n", code, message)
}
