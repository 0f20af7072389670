use crate::BondPairConfig;

pub fn default_service_name() -> String {
    "mep-calculator".to_string()
}

// Server defaults
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_http_port() -> u16 {
    8080
}

pub fn default_calculate_path() -> String {
    "/api/calculate-mep".to_string()
}

// Broker defaults
pub fn default_auth_url() -> String {
    "https://api.invertironline.com/token".to_string()
}

pub fn default_api_url() -> String {
    "https://api.invertironline.com".to_string()
}

pub fn default_market() -> String {
    "bCBA".to_string()
}

pub fn default_timeout_seconds() -> u64 {
    10
}

pub fn default_connect_timeout_seconds() -> u64 {
    5
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}

/// Sovereign bond pairs quoted on BYMA, in output order
pub fn default_bond_pairs() -> Vec<BondPairConfig> {
    [
        ("AL30D", "AL30"),
        ("GD30D", "GD30"),
        ("AL35D", "AL35"),
        ("GD35D", "GD35"),
        ("AE38D", "AE38"),
        ("GD38D", "GD38"),
        ("AL41D", "AL41"),
        ("GD41D", "GD41"),
        ("GD46D", "GD46"),
    ]
    .into_iter()
    .map(|(dollar, peso)| BondPairConfig::new(dollar, peso))
    .collect()
}
