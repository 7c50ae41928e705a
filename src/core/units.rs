//! Unit formatting: wei -> ether / gwei

use alloy_primitives::U256;

pub const ETHER_DECIMALS: u8 = 18;
pub const GWEI_DECIMALS: u8 = 9;

/// Render `value` (in the smallest unit) with `decimals` fractional digits.
///
/// Trailing zeros of the fraction are dropped, so `0` renders as `"0"` and
/// one ether renders as `"1"`.
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / divisor;
    let frac = value % divisor;

    if frac.is_zero() {
        return whole.to_string();
    }
    let frac_str = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}

pub fn format_ether(wei: U256) -> String {
    format_units(wei, ETHER_DECIMALS)
}

pub fn format_gwei(wei: U256) -> String {
    format_units(wei, GWEI_DECIMALS)
}

/// Parse a plain decimal string ("1.5", "0.000042", "12") into the smallest
/// unit. Digits beyond `decimals` are truncated.
pub fn parse_units(input: &str, decimals: u8) -> Option<U256> {
    let input = input.trim();
    let (integer_part, decimal_part) = match input.split_once('.') {
        Some((integer, decimal)) => (integer, decimal),
        None => (input, ""),
    };
    if integer_part.is_empty() && decimal_part.is_empty() {
        return None;
    }
    if !integer_part.chars().all(|c| c.is_ascii_digit())
        || !decimal_part.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let multiplier = U256::from(10u64).pow(U256::from(decimals));
    let integer = if integer_part.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(integer_part, 10).ok()?
    };

    let kept: String = decimal_part.chars().take(decimals as usize).collect();
    let fraction = if kept.is_empty() {
        U256::ZERO
    } else {
        let padded = format!("{:0<width$}", kept, width = decimals as usize);
        U256::from_str_radix(&padded, 10).ok()?
    };

    integer.checked_mul(multiplier)?.checked_add(fraction)
}

/// Normalize an amount already expressed in ether (as reported by the
/// transfers API) into its canonical display form.
pub fn normalize_ether(amount: &str) -> Option<String> {
    parse_units(amount, ETHER_DECIMALS).map(format_ether)
}

/// First `len` characters of `value` followed by `...`
pub fn short_hex(value: &str, len: usize) -> String {
    let head: String = value.chars().take(len).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(value: u128) -> U256 {
        U256::from(value)
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(wei(1_000_000_000_000_000_000)), "1");
        assert_eq!(format_ether(wei(1_500_000_000_000_000_000)), "1.5");
        assert_eq!(format_ether(wei(100_000_000_000_000_000)), "0.1");
        assert_eq!(format_ether(wei(1)), "0.000000000000000001");
    }

    #[test]
    fn test_zero_formats_as_zero() {
        assert_eq!(format_ether(U256::ZERO), "0");
        assert_eq!(format_gwei(U256::ZERO), "0");
    }

    #[test]
    fn test_format_is_deterministic() {
        let value = wei(123_456_789_000_000_000);
        assert_eq!(format_ether(value), format_ether(value));
        assert_eq!(format_ether(value), "0.123456789");
    }

    #[test]
    fn test_format_gwei() {
        assert_eq!(format_gwei(wei(1_000_000_000)), "1");
        assert_eq!(format_gwei(wei(25_500_000_000)), "25.5");
        assert_eq!(format_gwei(wei(7)), "0.000000007");
    }

    #[test]
    fn test_large_values() {
        let value = U256::from(10u64).pow(U256::from(30u64));
        assert_eq!(format_ether(value), "1000000000000");
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("1", 18), Some(wei(1_000_000_000_000_000_000)));
        assert_eq!(parse_units("1.5", 18), Some(wei(1_500_000_000_000_000_000)));
        assert_eq!(parse_units(".5", 18), Some(wei(500_000_000_000_000_000)));
        assert_eq!(parse_units("0.0000000000000000019", 18), Some(wei(1)));
        assert_eq!(parse_units("abc", 18), None);
        assert_eq!(parse_units("", 18), None);
        assert_eq!(parse_units("-1", 18), None);
    }

    #[test]
    fn test_normalize_ether() {
        assert_eq!(normalize_ether("0.0500").as_deref(), Some("0.05"));
        assert_eq!(normalize_ether("3").as_deref(), Some("3"));
        assert_eq!(normalize_ether("0").as_deref(), Some("0"));
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(
            short_hex("0x1234567890abcdef", 10),
            "0x12345678..."
        );
        assert_eq!(short_hex("0x12", 10), "0x12...");
    }
}
