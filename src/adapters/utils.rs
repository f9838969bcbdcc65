//! Credential checks shared by the Wi-Fi adapter and config validation.

/// Returns `true` if every byte of `s` is in the printable ASCII range
/// `0x20..=0x7E` (space through tilde, inclusive).
pub fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// 1-32 printable ASCII bytes.
pub fn is_valid_ssid(ssid: &str) -> bool {
    (1..=32).contains(&ssid.len()) && is_printable_ascii(ssid)
}

/// Empty (open network) or an 8-64 byte WPA2 passphrase.
pub fn is_valid_password(password: &str) -> bool {
    password.is_empty() || (8..=64).contains(&password.len())
}
