//! Luhn mod-10 check digits.
//!
//! Inputs are expected to be non-empty ASCII digit strings. Callers validate
//! that contract before reaching this module; a non-digit input yields `None`.

fn digits(input: &str) -> Option<Vec<u32>> {
    if input.is_empty() {
        return None;
    }
    input.chars().map(|c| c.to_digit(10)).collect()
}

fn double(d: u32) -> u32 {
    let d = d * 2;
    if d > 9 { d - 9 } else { d }
}

/// Luhn sum walking from the rightmost digit, doubling every digit at an odd
/// distance from the right when `double_rightmost` is false, or at an even
/// distance when it is true.
fn luhn_sum(digits: &[u32], double_rightmost: bool) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            let doubled = (i % 2 == 0) == double_rightmost;
            if doubled { double(d) } else { d }
        })
        .sum()
}

/// Check digit for `partial`, the number without its trailing check digit.
///
/// The rightmost digit of `partial` becomes second from the right once the
/// check digit is appended, so doubling starts there.
pub fn check_digit(partial: &str) -> Option<u8> {
    let digits = digits(partial)?;
    let sum = luhn_sum(&digits, true);
    Some(((10 - (sum % 10)) % 10) as u8)
}

/// Same result as [`check_digit`], computed left to right with a parity
/// offset taken from the length of the finished number (input + 1).
pub fn check_digit_by_parity(partial: &str) -> Option<u8> {
    let digits = digits(partial)?;
    let parity = (digits.len() + 1) % 2;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| if i % 2 == parity { double(d) } else { d })
        .sum();
    Some(((10 - (sum % 10)) % 10) as u8)
}

/// Whether `number` (including its own check digit) passes the Luhn check.
pub fn is_valid(number: &str) -> bool {
    match digits(number) {
        Some(digits) if digits.len() >= 2 => luhn_sum(&digits, false) % 10 == 0,
        _ => false,
    }
}

/// `partial` with its check digit appended.
pub fn append_check_digit(partial: &str) -> Option<String> {
    let check = check_digit(partial)?;
    let mut out = String::with_capacity(partial.len() + 1);
    out.push_str(partial);
    out.push(char::from(b'0' + check));
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_digits(rng: &mut StdRng, len: usize) -> String {
        (0..len)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect()
    }

    #[test]
    fn known_test_numbers_are_valid() {
        for number in [
            "4111111111111111",
            "5500000000000004",
            "378282246310005",
            "6011111111111117",
            "79927398713",
        ] {
            assert!(is_valid(number), "{number} should pass");
        }
        assert!(!is_valid("4111111111111112"));
    }

    #[test]
    fn check_digit_of_textbook_number() {
        assert_eq!(check_digit("7992739871"), Some(3));
        assert_eq!(check_digit("411111111111111"), Some(1));
    }

    #[test]
    fn rejects_non_digit_and_empty_input() {
        assert_eq!(check_digit(""), None);
        assert_eq!(check_digit("41a1"), None);
        assert!(!is_valid(""));
        assert!(!is_valid("4"));
        assert!(!is_valid("4111-1111"));
    }

    #[test]
    fn appended_check_digit_always_validates() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5_000 {
            let len = rng.random_range(1..=18);
            let partial = random_digits(&mut rng, len);
            let full = append_check_digit(&partial).unwrap();
            assert!(is_valid(&full), "{full} should be valid");
        }
    }

    #[test]
    fn both_formulations_agree() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..5_000 {
            let len = rng.random_range(1..=19);
            let partial = random_digits(&mut rng, len);
            assert_eq!(
                check_digit(&partial),
                check_digit_by_parity(&partial),
                "formulations disagree on {partial}"
            );
        }
    }

    #[test]
    fn single_digit_substitution_is_detected() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let partial = random_digits(&mut rng, 15);
            let full = append_check_digit(&partial).unwrap();
            let bytes = full.as_bytes();
            for pos in 0..bytes.len() {
                for replacement in b'0'..=b'9' {
                    if replacement == bytes[pos] {
                        continue;
                    }
                    let mut mutated = bytes.to_vec();
                    mutated[pos] = replacement;
                    let mutated = String::from_utf8(mutated).unwrap();
                    assert!(!is_valid(&mutated), "{full} -> {mutated} undetected");
                }
            }
        }
    }

    // Luhn misses some adjacent transpositions, notably 09 <-> 90, so only a
    // detection rate is asserted here.
    #[test]
    fn adjacent_transpositions_are_mostly_detected() {
        let mut rng = StdRng::seed_from_u64(5);
        let (mut changed, mut detected) = (0u32, 0u32);
        for _ in 0..2_000 {
            let partial = random_digits(&mut rng, 15);
            let full = append_check_digit(&partial).unwrap();
            let mut bytes = full.into_bytes();
            let pos = rng.random_range(0..bytes.len() - 1);
            if bytes[pos] == bytes[pos + 1] {
                continue;
            }
            bytes.swap(pos, pos + 1);
            changed += 1;
            if !is_valid(std::str::from_utf8(&bytes).unwrap()) {
                detected += 1;
            }
        }
        let rate = f64::from(detected) / f64::from(changed);
        assert!(rate > 0.95, "transposition detection rate too low: {rate}");
    }

    #[test]
    fn nine_zero_transposition_is_a_blind_spot() {
        let full = append_check_digit("09").unwrap();
        let swapped = format!("90{}", &full[2..]);
        assert_eq!(is_valid(&full), is_valid(&swapped));
    }
}
