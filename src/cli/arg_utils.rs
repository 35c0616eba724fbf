//! Small string helpers for argument and environment handling.

/// Last path component of `path`, for either separator.
pub fn last_name_from_path(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// `true` if `exe_name` is `name`, optionally followed by an extension
/// (`uncompress.exe` matches `uncompress`).
pub fn exe_name_match(exe_name: &str, name: &str) -> bool {
    match exe_name.strip_prefix(name) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Parses the leading decimal digits of `s`.
///
/// Returns the value and the unparsed remainder, or `None` when `s` does not
/// start with a digit or the value overflows `u32`.
pub fn read_u32_from_str(s: &str) -> Option<(u32, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value = s[..digits].parse::<u32>().ok()?;
    Some((value, &s[digits..]))
}
