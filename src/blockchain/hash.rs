use log::trace;
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use sha2::{Digest, Sha256};
use std::io;

use super::Block;

/// JSON layout used for hashing: `", "` and `": "` separators, every
/// character outside printable ASCII written as a `\uXXXX` escape, integers
/// written verbatim and floats in shortest round-trip `repr` form.
/// Keys are sorted before the formatter sees them.
struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if (' '..='~').contains(&ch) {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(float_repr(value).as_bytes())
    }

    // With `arbitrary_precision`, every number arrives here as its source text.
    fn write_number_str<W>(&mut self, writer: &mut W, value: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if value.contains(['.', 'e', 'E']) {
            let float: f64 = value
                .parse()
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "malformed number"))?;
            self.write_f64(writer, float)
        } else if value == "-0" {
            writer.write_all(b"0")
        } else {
            writer.write_all(value.as_bytes())
        }
    }
}

/// Shortest round-trip rendering of a float: positional when the decimal
/// point sits between 10^-4 and 10^16, otherwise `d.ddde±XX`.
fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .expect("LowerExp always writes an exponent");
    let exponent: i32 = exponent.parse().expect("LowerExp exponent is an integer");
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(unsigned) => ("-", unsigned),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    // position of the decimal point relative to the first digit
    let point = exponent + 1;
    if !(-3..=16).contains(&point) {
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{mantissa}e{exponent_sign}{:02}", exponent.abs());
    }

    if point <= 0 {
        format!("{sign}0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else if (point as usize) < digits.len() {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{sign}{whole}.{fraction}")
    } else {
        let padding = "0".repeat(point as usize - digits.len());
        format!("{sign}{digits}{padding}.0")
    }
}

/// Serialize `value` with sorted keys and the canonical separators.
pub fn canonical_json<T: Serialize>(value: &T) -> Vec<u8> {
    let mut value = serde_json::to_value(value).expect("value serializes to JSON");
    // no-op unless serde_json's `preserve_order` feature is unified in
    value.sort_all_objects();
    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, CanonicalFormatter);
    value
        .serialize(&mut ser)
        .expect("writing JSON into a Vec cannot fail");
    out
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Digest of a block over its canonical JSON form.
pub fn hash_block(block: &Block) -> String {
    let encoded = canonical_json(block);
    trace!("hashing {}", String::from_utf8_lossy(&encoded));
    sha256_hex(&encoded)
}

#[cfg(test)]
mod tests {
    use super::{canonical_json, float_repr, hash_block};
    use crate::blockchain::Block;
    use crate::transaction::Transaction;
    use serde_json::Number;

    fn genesis_at(timestamp: &str) -> Block {
        Block {
            index: 1,
            timestamp: timestamp.into(),
            proof: 1,
            previous_hash: "0".into(),
            transactions: Vec::new(),
        }
    }

    #[test]
    fn canonical_form_sorts_keys_and_spaces_separators() {
        let block = genesis_at("2024-01-01 00:00:00.000000");
        let encoded = String::from_utf8(canonical_json(&block)).unwrap();
        assert_eq!(
            encoded,
            r#"{"index": 1, "previous_hash": "0", "proof": 1, "timestamp": "2024-01-01 00:00:00.000000", "transactions": []}"#
        );
        assert_eq!(
            hash_block(&block),
            "cad612a090e91b7e87692edd4b95eb203c86ced15e5252c36469e33f3a90a784"
        );
    }

    #[test]
    fn nested_transactions_keep_order_and_escape_non_ascii() {
        let block = Block {
            index: 2,
            timestamp: "t".into(),
            proof: 533,
            previous_hash: "abc".into(),
            transactions: vec![
                Transaction::new("a", "é", Number::from(10)),
                Transaction::new("b", "c", Number::from_f64(2.5).unwrap()),
            ],
        };
        let encoded = String::from_utf8(canonical_json(&block)).unwrap();
        assert_eq!(
            encoded,
            r#"{"index": 2, "previous_hash": "abc", "proof": 533, "timestamp": "t", "transactions": [{"amount": 10, "receiver": "\u00e9", "sender": "a"}, {"amount": 2.5, "receiver": "c", "sender": "b"}]}"#
        );
        assert_eq!(
            hash_block(&block),
            "499b76a2dadf5430a88a7e04c600e6f655e8f5c0d095b3a385e450436daa989c"
        );
    }

    #[test]
    fn hash_is_stable_and_content_sensitive() {
        let block = genesis_at("t");
        assert_eq!(hash_block(&block), hash_block(&block.clone()));
        assert_eq!(hash_block(&block).len(), 64);

        let mut other = block.clone();
        other.proof = 2;
        assert_ne!(hash_block(&block), hash_block(&other));
    }

    #[test]
    fn floats_render_in_repr_form() {
        let cases = [
            (1e-05, "1e-05"),
            (0.0001, "0.0001"),
            (1e16, "1e+16"),
            (1e15, "1000000000000000.0"),
            (12345678901234567.0, "1.2345678901234568e+16"),
            (1.5e300, "1.5e+300"),
            (-2.5e-7, "-2.5e-07"),
            (-0.0, "-0.0"),
            (123456789.123, "123456789.123"),
            (1000.0, "1000.0"),
        ];
        for (value, expected) in cases {
            assert_eq!(float_repr(value), expected, "rendering {value:?}");
        }
    }

    #[test]
    fn exponent_and_wide_amounts_hash_like_reference_encoding() {
        let block: Block = serde_json::from_str(
            r#"{"index": 2, "previous_hash": "abc", "proof": 533, "timestamp": "t",
                "transactions": [
                    {"sender": "a", "receiver": "b", "amount": 1e-05},
                    {"sender": "b", "receiver": "c", "amount": 100000000000000000000},
                    {"sender": "c", "receiver": "d", "amount": 1E3}
                ]}"#,
        )
        .unwrap();

        let encoded = String::from_utf8(canonical_json(&block)).unwrap();
        assert_eq!(
            encoded,
            r#"{"index": 2, "previous_hash": "abc", "proof": 533, "timestamp": "t", "transactions": [{"amount": 1e-05, "receiver": "b", "sender": "a"}, {"amount": 100000000000000000000, "receiver": "c", "sender": "b"}, {"amount": 1000.0, "receiver": "d", "sender": "c"}]}"#
        );
        assert_eq!(
            hash_block(&block),
            "3cc4dc6d220e5a899e808cedf0275e0907dd50ecb3a63c4760b651b6c901f2c6"
        );
    }
}
