// src/constants.rs
//
// Fixed values of the note-data endpoint and the exported document.

/// Production host of the note-data API.
pub const DEFAULT_BASE_URL: &str = "https://backscan.tfdatamaster.com";

/// Path of the per-item note endpoint, appended to the base URL.
pub const NOTE_DATA_PATH: &str = "/api/dashboard/qritemdata";

/// Query parameter carrying the scanned code.
pub const QUERY_KEY_PARAM: &str = "qrCodeData";

/// Request header carrying the session token.
pub const AUTH_HEADER: &str = "auth-token";

/// Cookie holding the session token in a browser cookie string.
pub const TOKEN_COOKIE: &str = "token";

/// Environment variable consulted for the token when no flag is given.
pub const DEFAULT_TOKEN_ENV: &str = "NOTEDASH_TOKEN";

/// Key loaded when the table is first shown.
pub const DEFAULT_QUERY_KEY: &str = "100.100.6SN6.R";

/// en-US locale date, e.g. `1/5/2024`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Name of the exported document.
pub const EXPORT_FILE_NAME: &str = "checkout_data.pdf";

/// Header row of the exported document, in export column order.
pub const EXPORT_HEADERS: [&str; 5] = ["QR CodeData", "Quantity", "Description", "Date", "Note"];

/// Header row of the on-screen table, in display column order.
pub const TABLE_HEADERS: [&str; 5] = ["QR Code Data", "Quantity", "Description", "Note", "Date"];

/// Delay after spawning the opener so short-lived terminals don't kill it.
///
/// Used in: `infrastructure/opener.rs`
pub const OPENER_LAUNCH_DELAY_MS: u64 = 200;
