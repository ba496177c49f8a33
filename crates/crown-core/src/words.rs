//! # Amount in Words
//!
//! Renders a rupee amount the way it is printed on an invoice, using the
//! Indian numbering system.
//!
//! ```text
//!   1,23,45,678.50
//!   │  │  │  └──── hundreds group (3 digits)
//!   │  │  └─────── Thousand (2 digits)
//!   │  └────────── Lakh     (2 digits)
//!   └───────────── Crore    (everything above, itself spelled out)
//!
//!   "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred
//!    Seventy Eight Rupees and Fifty Paise Only"
//! ```

use crate::money::Money;

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u128 = 10_000_000;
const LAKH: u128 = 100_000;
const THOUSAND: u128 = 1_000;

/// Renders an amount as `"X Rupees Only"` / `"X Rupees and Y Paise Only"`.
///
/// ## Example
/// ```rust
/// use crown_core::{amount_to_words, Money};
///
/// assert_eq!(amount_to_words(Money::zero()), "Zero");
/// assert_eq!(amount_to_words(Money::from_f64(100.0)), "One Hundred Rupees Only");
/// assert_eq!(
///     amount_to_words(Money::from_f64(100.50)),
///     "One Hundred Rupees and Fifty Paise Only"
/// );
/// ```
pub fn amount_to_words(amount: Money) -> String {
    let (rupees, paise) = amount.rupees_and_paise();
    if rupees == 0 && paise == 0 {
        return "Zero".to_string();
    }

    let rupee_words = if rupees == 0 {
        "Zero".to_string()
    } else {
        integer_words(rupees)
    };
    let sign = if amount.is_negative() { "Minus " } else { "" };

    if paise > 0 {
        format!(
            "{sign}{rupee_words} Rupees and {} Paise Only",
            below_thousand(u128::from(paise))
        )
    } else {
        format!("{sign}{rupee_words} Rupees Only")
    }
}

/// Spells out `n > 0` in Indian groups.
fn integer_words(n: u128) -> String {
    let mut parts = Vec::new();

    let crores = n / CRORE;
    if crores > 0 {
        parts.push(format!("{} Crore", integer_words(crores)));
    }

    let rest = n % CRORE;
    for (scale, label) in [(LAKH, "Lakh"), (THOUSAND, "Thousand")] {
        let group = (rest / scale) % 100;
        if group > 0 {
            parts.push(format!("{} {}", below_thousand(group), label));
        }
    }

    let hundreds = rest % THOUSAND;
    if hundreds > 0 {
        parts.push(below_thousand(hundreds));
    }

    parts.join(" ")
}

/// Spells out 1–999.
fn below_thousand(n: u128) -> String {
    let n = n as usize;
    match n {
        0..=9 => ONES[n].to_string(),
        10..=19 => TEENS[n - 10].to_string(),
        20..=99 => {
            let tens = TENS[n / 10];
            if n % 10 == 0 {
                tens.to_string()
            } else {
                format!("{} {}", tens, ONES[n % 10])
            }
        }
        _ => {
            let head = format!("{} Hundred", ONES[n / 100]);
            if n % 100 == 0 {
                head
            } else {
                format!("{} {}", head, below_thousand((n % 100) as u128))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn words(amount: f64) -> String {
        amount_to_words(Money::from_f64(amount))
    }

    #[test]
    fn test_zero() {
        assert_eq!(words(0.0), "Zero");
    }

    #[test]
    fn test_whole_rupees() {
        assert_eq!(words(1.0), "One Rupees Only");
        assert_eq!(words(15.0), "Fifteen Rupees Only");
        assert_eq!(words(40.0), "Forty Rupees Only");
        assert_eq!(words(100.0), "One Hundred Rupees Only");
        assert_eq!(words(212.0), "Two Hundred Twelve Rupees Only");
        assert_eq!(words(2499.0), "Two Thousand Four Hundred Ninety Nine Rupees Only");
    }

    #[test]
    fn test_paise() {
        assert_eq!(words(100.50), "One Hundred Rupees and Fifty Paise Only");
        assert_eq!(words(0.75), "Zero Rupees and Seventy Five Paise Only");
        assert_eq!(words(10.05), "Ten Rupees and Five Paise Only");
    }

    #[test]
    fn test_indian_groups() {
        assert_eq!(
            words(123456.0),
            "One Lakh Twenty Three Thousand Four Hundred Fifty Six Rupees Only"
        );
        assert_eq!(words(100000.0), "One Lakh Rupees Only");
        assert_eq!(words(1005000.0), "Ten Lakh Five Thousand Rupees Only");
        assert_eq!(
            words(12345678.0),
            "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred Seventy Eight Rupees Only"
        );
    }

    #[test]
    fn test_hundreds_of_crores() {
        assert_eq!(words(1_000_000_000.0), "One Hundred Crore Rupees Only");
        assert_eq!(
            words(2_500_000_000.0),
            "Two Hundred Fifty Crore Rupees Only"
        );
    }

    #[test]
    fn test_amounts_beyond_u64_are_spelled_out() {
        // 10^20 rupees = 10^13 crore
        let amount = Money::from_decimal(Decimal::from_i128_with_scale(10i128.pow(20), 0));
        assert_eq!(amount_to_words(amount), "Ten Lakh Crore Crore Rupees Only");

        let saturated = amount_to_words(Money::from_decimal(Decimal::MAX));
        assert_ne!(saturated, "Zero");
        assert!(saturated.ends_with("Rupees Only"));
    }
}
