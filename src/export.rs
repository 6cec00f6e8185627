//! Textual export of derived parameters for firmware embedding.
//!
//! The output is consumed verbatim by the firmware build tooling, so the
//! format is bit-exact: a C array literal whose first entry is `n0inv`
//! followed by the little-endian word decomposition.

use core::fmt::Write;

/// Formats `n0inv` and a word sequence as a `const uint32_t` array literal:
///
/// ```text
/// const uint32_t <tag>[<nwords> + 1] = {<n0inv>, <w0>, ..., <w_{nwords-1}>};
/// ```
///
/// Every entry is printed as `0x` plus eight lowercase hex digits, matching
/// the reference formatter byte for byte (including the separator after
/// `n0inv` and the trailing newline).
pub fn format_word_array(tag: &str, n0inv: u32, words: &[u32]) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "const uint32_t {}[{} + 1] = {{0x{:08x}, ",
        tag,
        words.len(),
        n0inv
    );
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "0x{:08x}", word);
    }
    out.push_str("};\n");
    out
}
