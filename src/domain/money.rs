use thiserror::Error;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// For BRL/EUR/USD, 1 unit = 100 cents, so R$ 50.00 = 5000 cents.
pub type Cents = i64;

/// Format cents as a two-decimal amount.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Format cents prefixed with a currency symbol.
/// Example: ("R$", 5000) -> "R$ 50.00"
pub fn format_money(symbol: &str, cents: Cents) -> String {
    format!("{} {}", symbol, format_cents(cents))
}

/// Parse a decimal string into cents.
/// Accepts both `.` and `,` as decimal separator.
/// Example: "50.00" -> 5000, "12,5" -> 1250, "100" -> 10000
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let normalized = digits.replace(',', ".");
    let mut parts = normalized.split('.');
    let units_str = parts.next().unwrap_or_default();
    let decimal_str = parts.next();
    if parts.next().is_some() {
        return Err(ParseCentsError::InvalidFormat);
    }

    if units_str.is_empty() && decimal_str.is_none_or(str::is_empty) {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        parse_digits(units_str)?
    };

    // Pad or truncate the fractional part to 2 digits
    let decimal_cents: i64 = match decimal_str {
        None | Some("") => 0,
        Some(d) if d.len() == 1 => parse_digits(d)? * 10,
        Some(d) if !is_digits(d) => return Err(ParseCentsError::InvalidFormat),
        Some(d) => parse_digits(&d[..2])?,
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseCentsError::OutOfRange)?;
    Ok(if negative { -cents } else { cents })
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_digits(s: &str) -> Result<i64, ParseCentsError> {
    if !is_digits(s) {
        return Err(ParseCentsError::InvalidFormat);
    }
    s.parse().map_err(|_| ParseCentsError::OutOfRange)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    #[error("invalid money format")]
    InvalidFormat,

    #[error("amount is too large")]
    OutOfRange,
}
