use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode};

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
const TARGETS_FOR_PARAMS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes `input` with the protocol's strict unreserved set.
///
/// Every call site of the signing pipeline uses this same set: space becomes
/// `%20` (never `+`), and anything outside ALPHA / DIGIT / `-.~_` is escaped.
pub(crate) fn percent_encode(input: &str) -> PercentEncode<'_> {
    utf8_percent_encode(input, TARGETS_FOR_PARAMS)
}

pub(crate) fn percent_encode_str(input: &str) -> String {
    percent_encode(input).to_string()
}
