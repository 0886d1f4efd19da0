//! Integers and bytes.

use mparse::prelude::*;

/// A decimal integer with an optional leading `-` and no leading zeros.
///
/// `0` is accepted on its own, but `01` and `-0` are not.
///
/// ```
/// # use mparse_samples::number::number;
/// assert_eq!(number().parse("-42"), Ok(-42));
/// assert!(number().parse("007").is_err());
/// ```
pub fn number<'a>() -> Parser<'a, i64> {
    let positive = digit(1, 9).and_then(|first| {
        many::<_, Vec<_>>(digit(0, 9)).try_transform(move |rest| {
            rest.into_iter()
                .try_fold(i64::from(first), |n, d| n.checked_mul(10)?.checked_add(i64::from(d)))
                .ok_or("number too large")
        })
    });
    let zero = digit(0, 0).to(0).and_not(digit(0, 9));
    let negative = literal('-').ignore_then(positive.clone()).transform(|n| -n);

    positive.or_else(zero).or_else(negative).labelled("number")
}

/// The value of one hexadecimal digit, in either case.
pub fn hexit<'a>() -> Parser<'a, u32> {
    hex_digit().try_transform(|digit| u32::from_str_radix(digit, 16))
}

/// Exactly two hexadecimal digits, such as `7F`.
pub fn hex_byte<'a>() -> Parser<'a, u8> {
    hexit().and_then(|high| {
        hexit().try_transform(move |low| u8::try_from(high * 16 + low))
    })
}

/// A byte written either in hexadecimal with a `0x` prefix (`0xA0`) or as one to three decimal digits no greater than
/// 255 (`160`).
pub fn byte<'a>() -> Parser<'a, u8> {
    let hex = string("0x").or_else(string("0X")).ignore_then(hex_byte());
    let decimal = times_between::<_, &str>(range('0', '9'), 1, 3).try_transform(|digits| digits.parse::<u8>());
    hex.or_else(decimal).labelled("byte")
}
