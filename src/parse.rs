/// Parse a year the way the host page's own scripts read its inputs:
/// leading whitespace, an optional sign, then at least one decimal digit.
/// Anything after the digits is ignored (`"1500 AD"` is 1500, `"1.5"` is 1).
pub fn parse_year(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
