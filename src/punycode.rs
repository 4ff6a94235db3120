//! The Punycode codec.
//!
//! Punycode, specified in [RFC 3492], transforms a sequence of Unicode
//! code points into a sequence of ASCII characters and back. The ASCII
//! characters of the input — the *basic* code points — are copied to the
//! output as they are, followed by a delimiter; every other code point is
//! represented as a delta in a clever variable-length integer encoding
//! whose digit thresholds adapt to the input.
//!
//! The codec works on bare labels. It neither adds nor strips the ACE
//! prefix `xn--`; that is the business of the [domain][crate::domain]
//! module.
//!
//! [RFC 3492]: https://datatracker.ietf.org/doc/html/rfc3492

use core::fmt;

use crate::bootstring::Bootstring;

#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::vec::Vec;

//------------ encode --------------------------------------------------------

/// Encodes a Unicode label into its Punycode form.
///
/// Basic code points — those below 0x80 — are copied to the output in
/// their original order, followed by a single delimiter if there was at
/// least one. The remaining code points are turned into a sequence of
/// base-36 digits. A label consisting only of ASCII is returned
/// unchanged, without a trailing delimiter.
///
/// The output is ASCII throughout and decodes back to the input via
/// [`decode`]. Encoding cannot fail: all arithmetic is carried out in 64
/// bits, which no string that fits in memory can overflow.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[must_use]
pub fn encode(input: &str) -> String {
    let mut target = String::with_capacity(input.len() + 8);
    encode_into(input, &mut target).expect("writing to a string failed");
    target
}

/// Encodes a Unicode label into the provided writer.
///
/// This is the allocation-free form of [`encode`]. It only fails if the
/// writer does.
pub fn encode_into<W: fmt::Write>(
    input: &str,
    target: &mut W,
) -> fmt::Result {
    let params = &Bootstring::PUNYCODE;

    // A label without extended code points needs no encoding at all.
    if input.is_ascii() {
        return target.write_str(input);
    }

    let mut basic_len: u64 = 0;
    for ch in input.chars() {
        if ch.is_ascii() {
            target.write_char(ch)?;
            basic_len += 1;
        }
    }
    if basic_len > 0 {
        target.write_char(params.delimiter)?;
    }

    let input_len = input.chars().count() as u64;
    let mut n = params.initial_n;
    let mut delta: u64 = 0;
    let mut bias = params.initial_bias;
    let mut handled = basic_len;

    while handled < input_len {
        // The smallest code point that has not been handled yet. While
        // unhandled code points remain, `n` never exceeds the largest
        // code point of the input, so the scan cannot come up empty.
        let m = input.chars().map(u32::from).filter(|&c| c >= n).min();
        let m = match m {
            Some(m) => m,
            None => break,
        };

        // Advance the decoder state <n, i> past all the insertions it
        // would perform for code points below `m`.
        delta += u64::from(m - n) * (handled + 1);
        n = m;

        for c in input.chars().map(u32::from) {
            if c < n {
                delta += 1;
            }
            if c == n {
                // Emit delta as a variable-length integer.
                let mut q = delta;
                let mut k = params.base;
                loop {
                    let t = params.threshold(k, bias);
                    if q < u64::from(t) {
                        break;
                    }
                    let rest = q - u64::from(t);
                    let span = u64::from(params.base - t);
                    target.write_char(
                        params.digit_to_char(t + (rest % span) as u32),
                    )?;
                    q = rest / span;
                    k += params.base;
                }
                target.write_char(params.digit_to_char(q as u32))?;

                bias = params.adapt(delta, handled + 1, handled == basic_len);
                delta = 0;
                handled += 1;
            }
        }

        delta += 1;
        n += 1;
    }

    Ok(())
}

//------------ decode --------------------------------------------------------

/// Decodes a Punycode label into its Unicode form.
///
/// Everything up to the last delimiter is taken to be basic code points
/// and copied into the output verbatim. The remainder is read as a
/// sequence of variable-length integers, each of which inserts one code
/// point at a position chosen by the algorithm. A label without any
/// delimiter consists of digits only.
///
/// The input must not carry the ACE prefix; the caller strips it.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub fn decode(input: &str) -> Result<String, DecodeError> {
    Ok(decode_to_chars(input)?.into_iter().collect())
}

/// Decodes a Punycode label into the provided writer.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub fn decode_into<W: fmt::Write>(
    input: &str,
    target: &mut W,
) -> Result<(), DecodeError> {
    for ch in decode_to_chars(input)? {
        target.write_char(ch)?;
    }
    Ok(())
}

/// Decodes a label into a splice buffer of code points.
#[cfg(feature = "std")]
fn decode_to_chars(input: &str) -> Result<Vec<char>, DecodeError> {
    let params = &Bootstring::PUNYCODE;

    // Everything before the last delimiter is basic code points. A
    // delimiter at the very start separates nothing; it stays in the
    // digit region and is rejected there.
    let (basic, extended) = match input.rfind(params.delimiter) {
        Some(pos) if pos > 0 => (&input[..pos], &input[pos + 1..]),
        _ => ("", input),
    };

    let mut output = Vec::with_capacity(input.len());
    for ch in basic.chars() {
        if !ch.is_ascii() {
            return Err(DecodeError::NonAsciiBasic);
        }
        output.push(ch);
    }

    let mut n = params.initial_n;
    let mut i: u64 = 0;
    let mut bias = params.initial_bias;
    let mut digits = extended.chars();

    loop {
        let mut ch = match digits.next() {
            Some(ch) => ch,
            None => break,
        };

        // Read one variable-length integer, accumulating into `i`.
        let old_i = i;
        let mut weight: u64 = 1;
        let mut k = params.base;
        loop {
            let digit = match params.char_to_digit(ch) {
                Some(digit) => digit,
                None => return Err(DecodeError::InvalidDigit),
            };
            i = u64::from(digit)
                .checked_mul(weight)
                .and_then(|step| i.checked_add(step))
                .ok_or(DecodeError::Overflow)?;
            let t = params.threshold(k, bias);
            if digit < t {
                break;
            }
            weight = weight
                .checked_mul(u64::from(params.base - t))
                .ok_or(DecodeError::Overflow)?;
            k += params.base;
            ch = match digits.next() {
                Some(ch) => ch,
                None => return Err(DecodeError::ShortInput),
            };
        }

        // Split the integer into a code point and an insertion position.
        let out_len = output.len() as u64 + 1;
        bias = params.adapt(i - old_i, out_len, old_i == 0);
        n = u32::try_from(i / out_len)
            .ok()
            .and_then(|step| n.checked_add(step))
            .ok_or(DecodeError::Overflow)?;
        i %= out_len;

        let ch = char::try_from(n).map_err(|_| DecodeError::Overflow)?;
        output.insert(i as usize, ch);
        i += 1;
    }

    Ok(output)
}

//============ Error Types ===================================================

//------------ DecodeError ---------------------------------------------------

/// An attempt at decoding a Punycode label has failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// A code point of 0x80 or above appeared before the last delimiter.
    NonAsciiBasic,

    /// A character in the digit region was not a base-36 digit.
    InvalidDigit,

    /// The input ended in the middle of a variable-length integer.
    ShortInput,

    /// The decoded value left the range of valid code points.
    Overflow,

    /// The output writer failed.
    Fmt(fmt::Error),
}

//--- From

impl From<fmt::Error> for DecodeError {
    fn from(err: fmt::Error) -> Self {
        DecodeError::Fmt(err)
    }
}

//--- Display and Error

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::NonAsciiBasic => {
                f.write_str("non-ASCII character before the delimiter")
            }
            DecodeError::InvalidDigit => f.write_str("invalid digit"),
            DecodeError::ShortInput => {
                f.write_str("unterminated digit sequence")
            }
            DecodeError::Overflow => f.write_str("code point out of range"),
            DecodeError::Fmt(_) => f.write_str("writing output failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

//============ Testing =======================================================
