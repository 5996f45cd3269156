// src/config/consts.rs

// Portal
pub const BASE_URL: &str = "https://rh.zaffari.com.br";
pub const LOGIN_PATH: &str = "/auth/Account/Login";
pub const CONSULT_PATH: &str = "/core/Ponto/Consulta";
pub const USER_AGENT: &str = concat!("ponto_harvest/", env!("CARGO_PKG_VERSION"));

// Login form field ids
pub const IDENTIFIER_FIELD_ID: &str = "txtIdentificacao";
pub const SECRET_FIELD_ID: &str = "senha";

// Waits
pub const REQUEST_TIMEOUT_MS: u64 = 20_000;
pub const LOGIN_TIMEOUT_MS: u64 = 30_000;
pub const NAVIGATION_TIMEOUT_MS: u64 = 30_000;
pub const POLL_INTERVAL_MS: u64 = 100;

// Walk
pub const MAX_PAGES_PER_DIRECTION: usize = 120; // ten years of monthly pages

// Extraction
pub const MIN_DAY_CELLS: usize = 3;
pub const DATE_CELL: usize = 0;
pub const PUNCH_CELL: usize = 2;

// Aggregation
pub const WEEKLY_GOAL_HOURS: f64 = 44.0;
