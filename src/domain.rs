//! Converting whole domain names.
//!
//! The Punycode codec works on a single label. An internationalized
//! domain name, however, is a dot-separated sequence of labels of which
//! only some need encoding: those containing at least one code point of
//! 0x80 or above. Encoded labels are marked with the ACE prefix `xn--` so
//! they can be told apart from labels that were ASCII to begin with.
//!
//! [`convert_domain`] applies the codec across a whole name in either
//! direction, [`convert_auto`] guesses the direction, and
//! [`is_punycode_label`] is the guesswork itself.

use crate::punycode::{self, DecodeError};
use std::string::String;

//------------ ACE_PREFIX ----------------------------------------------------

/// The prefix that marks a label as Punycode-encoded.
///
/// Defined as the "ACE prefix" in [RFC 3490, section 5].
///
/// [RFC 3490, section 5]: https://datatracker.ietf.org/doc/html/rfc3490#section-5
pub const ACE_PREFIX: &str = "xn--";

//------------ convert_domain ------------------------------------------------

/// Converts a domain name between its Unicode and Punycode forms.
///
/// The domain is lower-cased first — domain names are case-insensitive,
/// so the conversion is deliberately lossy in this regard — and then
/// processed label by label. When encoding, labels containing a code
/// point of 0x80 or above are encoded and marked with the ACE prefix.
/// When decoding, labels starting with the prefix are stripped of it and
/// decoded. All other labels pass through unchanged.
///
/// Encoding cannot fail; decoding errors are passed on to the caller.
pub fn convert_domain(
    domain: &str,
    to_punycode: bool,
) -> Result<String, DecodeError> {
    let domain = domain.to_lowercase();
    let mut target = String::with_capacity(domain.len());

    for (index, label) in domain.split('.').enumerate() {
        if index > 0 {
            target.push('.');
        }
        if to_punycode {
            if label.is_ascii() {
                target.push_str(label);
            } else {
                target.push_str(ACE_PREFIX);
                punycode::encode_into(label, &mut target)
                    .expect("writing to a string failed");
            }
        } else if let Some(rest) = label.strip_prefix(ACE_PREFIX) {
            punycode::decode_into(rest, &mut target)?;
        } else {
            target.push_str(label);
        }
    }

    Ok(target)
}

//------------ convert_auto --------------------------------------------------

/// Converts a domain name, choosing the direction automatically.
///
/// A name that looks Punycode-encoded — see [`is_punycode_label`] — is
/// decoded, everything else is encoded.
pub fn convert_auto(domain: &str) -> Result<String, DecodeError> {
    convert_domain(domain, !is_punycode_label(domain))
}

//------------ is_punycode_label ---------------------------------------------

/// Returns whether a label looks Punycode-encoded.
///
/// This checks for the ACE prefix anywhere in the string, not only at the
/// start, so a whole domain name can be fed to it as well: a name with a
/// single encoded label anywhere counts as encoded. The flip side is that
/// a label merely containing `xn--` in its middle is misclassified; such
/// labels do not occur in registered domain names.
#[must_use]
pub fn is_punycode_label(label: &str) -> bool {
    label.contains(ACE_PREFIX)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_direction() {
        assert_eq!(
            convert_domain("münchen.de", true).unwrap(),
            "xn--mnchen-3ya.de"
        );
        assert_eq!(convert_domain("日本.jp", true).unwrap(), "xn--wgv71a.jp");
    }

    #[test]
    fn decode_direction() {
        assert_eq!(
            convert_domain("xn--mnchen-3ya.de", false).unwrap(),
            "münchen.de"
        );
        assert_eq!(
            convert_domain("xn--80adxhks.xn--p1ai", false).unwrap(),
            "москва.рф"
        );
    }

    #[test]
    fn lowercases_first() {
        assert_eq!(
            convert_domain("MÜNCHEN.DE", true).unwrap(),
            "xn--mnchen-3ya.de"
        );
        assert_eq!(
            convert_domain("XN--MNCHEN-3YA.DE", false).unwrap(),
            "münchen.de"
        );
    }

    #[test]
    fn ascii_domains_are_untouched() {
        assert_eq!(
            convert_domain("example.com", true).unwrap(),
            "example.com"
        );
        assert_eq!(
            convert_domain("example.com", false).unwrap(),
            "example.com"
        );
    }

    #[test]
    fn empty_labels_survive() {
        assert_eq!(
            convert_domain("münchen.de.", true).unwrap(),
            "xn--mnchen-3ya.de."
        );
        assert_eq!(convert_domain("xn--.de", false).unwrap(), ".de");
    }

    #[test]
    fn decode_errors_propagate() {
        assert_eq!(
            convert_domain("xn--mnchen-3y!.de", false),
            Err(DecodeError::InvalidDigit)
        );
        assert_eq!(
            convert_domain("xn--mnchen-3y.de", false),
            Err(DecodeError::ShortInput)
        );
    }

    #[test]
    fn auto_detection() {
        assert_eq!(
            convert_auto("münchen.de").unwrap(),
            "xn--mnchen-3ya.de"
        );
        assert_eq!(
            convert_auto("xn--mnchen-3ya.de").unwrap(),
            "münchen.de"
        );
    }

    #[test]
    fn punycode_detection_is_substring_based() {
        assert!(is_punycode_label("xn--mnchen-3ya"));
        assert!(is_punycode_label("foo.xn--bar"));

        // A label merely containing the prefix mid-string matches, too.
        assert!(is_punycode_label("axn--b"));

        assert!(!is_punycode_label("münchen"));
        assert!(!is_punycode_label("example"));
        assert!(!is_punycode_label("xn-"));
    }

    #[test]
    fn decoding_leaves_unprefixed_labels_alone() {
        // The prefix must be at the start of a label to trigger decoding.
        assert_eq!(
            convert_domain("axn--b.de", false).unwrap(),
            "axn--b.de"
        );
    }
}
