//! Minimal ASN.1 DER helpers.
//!
//! JOSE transports ECDSA signatures as the raw concatenation `r‖s`, while
//! most other ecosystems use the DER `ECDSA-Sig-Value` structure from
//! [RFC 5912 section 6]. The helpers in here cover exactly what is needed to
//! move between the two: parsing DER into a tree of [`Node`]s and writing a
//! `SEQUENCE` of primitive nodes.
//!
//! [RFC 5912 section 6]: <https://www.rfc-editor.org/rfc/rfc5912#section-6>

use der::{
    asn1::{Any, AnyRef},
    Decode as _, Encode as _, Reader as _, SliceReader, Tag, Tagged as _,
};

use crate::error::{EncodingError, Result};

/// Constructed nodes nested deeper than this are rejected.
const MAX_DEPTH: usize = 32;

/// A single parsed DER node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: Tag,
    content: Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Primitive(Vec<u8>),
    Constructed(Vec<Node>),
}

impl Node {
    /// Parses exactly one DER node from `bytes`, recursing into constructed
    /// nodes.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedEncoding`](crate::Error::MalformedEncoding) if the
    /// input is truncated, has trailing data, or any nested node is invalid.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let any = AnyRef::from_der(bytes).map_err(EncodingError::from)?;
        Self::from_any(any, 0)
    }

    fn from_any(any: AnyRef<'_>, depth: usize) -> Result<Self> {
        let tag = any.tag();

        let content = if tag.is_constructed() {
            if depth >= MAX_DEPTH {
                return Err(der::Error::from(der::ErrorKind::Value { tag }).into());
            }

            let mut reader = SliceReader::new(any.value()).map_err(EncodingError::from)?;
            let mut children = Vec::new();
            while !reader.is_finished() {
                let child = AnyRef::decode(&mut reader).map_err(EncodingError::from)?;
                children.push(Self::from_any(child, depth + 1)?);
            }
            Content::Constructed(children)
        } else {
            Content::Primitive(any.value().to_vec())
        };

        Ok(Self { tag, content })
    }

    /// The tag of this node.
    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The raw payload of a leaf node, or [`None`] for a constructed node.
    pub fn primitive(&self) -> Option<&[u8]> {
        match &self.content {
            Content::Primitive(value) => Some(value),
            Content::Constructed(_) => None,
        }
    }

    /// The children of a constructed node, or [`None`] for a leaf node.
    pub fn sequence(&self) -> Option<&[Node]> {
        match &self.content {
            Content::Primitive(_) => None,
            Content::Constructed(nodes) => Some(nodes),
        }
    }
}

/// Writes a DER `SEQUENCE` whose children are primitive nodes tagged with
/// `element_tag`, each holding one of `values` verbatim.
///
/// No re-encoding takes place. For `INTEGER` elements the caller must supply
/// minimally encoded, non-negative big-endian integers.
///
/// # Errors
///
/// Returns an error if a value is too long to be DER encoded.
pub fn serialize_fixed_sequence<V: AsRef<[u8]>>(
    values: &[V],
    element_tag: Tag,
) -> Result<Vec<u8>> {
    let mut children = Vec::new();
    for value in values {
        Any::new(element_tag, value.as_ref())?.encode_to_vec(&mut children)?;
    }

    Ok(Any::new(Tag::Sequence, children)?.to_der()?)
}

/// Converts a raw `r‖s` signature into a DER `ECDSA-Sig-Value`.
///
/// # Errors
///
/// Returns [`MalformedEncoding`](crate::Error::MalformedEncoding) if `raw` is
/// not exactly `2 * field_size` bytes long.
pub fn raw_signature_to_der(raw: &[u8], field_size: usize) -> Result<Vec<u8>> {
    let expected = signature_len(field_size)?;
    if raw.len() != expected {
        return Err(EncodingError::Truncated {
            expected,
            actual: raw.len(),
        }
        .into());
    }

    let (r, s) = raw.split_at(field_size);
    serialize_fixed_sequence(&[to_der_uint(r), to_der_uint(s)], Tag::Integer)
}

/// Converts a DER `ECDSA-Sig-Value` into the raw `r‖s` form, left padding
/// both integers to `field_size` bytes.
///
/// Only the outer `SEQUENCE` and its two `INTEGER`s are decoded.
///
/// # Errors
///
/// Returns [`MalformedEncoding`](crate::Error::MalformedEncoding) if the
/// input is not a sequence of two positive integers that fit the field size.
pub fn der_signature_to_raw(der: &[u8], field_size: usize) -> Result<Vec<u8>> {
    let mut raw = vec![0u8; signature_len(field_size)?];

    let sequence = AnyRef::from_der(der).map_err(EncodingError::from)?;
    if sequence.tag() != Tag::Sequence {
        return Err(der::Error::from(der::ErrorKind::Value { tag: Tag::Sequence }).into());
    }

    let mut reader = SliceReader::new(sequence.value()).map_err(EncodingError::from)?;
    for out in raw.chunks_mut(field_size) {
        let int = AnyRef::decode(&mut reader).map_err(EncodingError::from)?;
        copy_component(int, out)?;
    }
    reader.finish(()).map_err(EncodingError::from)?;

    Ok(raw)
}

/// Length of `r‖s`, rejecting a field size that cannot describe a curve.
fn signature_len(field_size: usize) -> Result<usize> {
    match field_size.checked_mul(2) {
        Some(len) if field_size > 0 => Ok(len),
        _ => Err(EncodingError::Truncated {
            expected: 1,
            actual: field_size,
        }
        .into()),
    }
}

/// Writes one positive `INTEGER` right-aligned into `out`.
fn copy_component(int: AnyRef<'_>, out: &mut [u8]) -> Result<()> {
    let malformed = || der::Error::from(der::ErrorKind::Value { tag: Tag::Integer });

    let value = int.value();
    // negative integers are never valid signature components
    if int.tag() != Tag::Integer || value.is_empty() || value[0] & 0x80 != 0 {
        return Err(malformed().into());
    }

    let value = strip_leading_zeros(value);
    if value.len() > out.len() {
        return Err(malformed().into());
    }
    let start = out.len() - value.len();
    out[start..].copy_from_slice(value);

    Ok(())
}

fn strip_leading_zeros(int: &[u8]) -> &[u8] {
    let start = int.iter().position(|b| *b != 0).unwrap_or(int.len());
    &int[start..]
}

/// Minimal DER encoding of an unsigned big-endian integer.
fn to_der_uint(int: &[u8]) -> Vec<u8> {
    let int = strip_leading_zeros(int);
    match int.first() {
        None => vec![0],
        Some(b) if b & 0x80 != 0 => {
            let mut out = Vec::with_capacity(int.len() + 1);
            out.push(0);
            out.extend_from_slice(int);
            out
        }
        Some(_) => int.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::Error;

    #[test]
    fn fixed_sequence_layout() {
        let der = serialize_fixed_sequence(&[&[0x01u8][..], &[0x7f, 0xff]], Tag::Integer).unwrap();
        assert_eq!(der, hex!("30 07 02 01 01 02 02 7f ff"));

        let node = Node::from_der(&der).unwrap();
        assert_eq!(node.tag(), Tag::Sequence);
        assert_eq!(node.primitive(), None);

        let children = node.sequence().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].primitive(), Some(&[0x01][..]));
        assert_eq!(children[1].primitive(), Some(&[0x7f, 0xff][..]));
        assert_eq!(children[1].sequence(), None);
    }

    #[test]
    fn truncated_input_is_rejected() {
        assert!(matches!(
            Node::from_der(&hex!("30 07 02 01 01 02 02 7f")),
            Err(Error::MalformedEncoding(EncodingError::Der(_)))
        ));
        assert!(matches!(
            Node::from_der(&hex!("30 03 02 01 01 00")),
            Err(Error::MalformedEncoding(EncodingError::Der(_)))
        ));
    }

    #[test]
    fn signature_conversion() {
        let mut raw = [0u8; 8];
        raw[..4].copy_from_slice(&hex!("00 00 80 01"));
        raw[4..].copy_from_slice(&hex!("12 34 56 78"));

        let der = raw_signature_to_der(&raw, 4).unwrap();
        assert_eq!(der, hex!("30 0b 02 03 00 80 01 02 04 12 34 56 78"));
        assert_eq!(der_signature_to_raw(&der, 4).unwrap(), raw);
    }

    /// `levels` SEQUENCEs wrapped around a NULL, with minimal length octets.
    fn nested(levels: usize) -> Vec<u8> {
        // built back to front, so every length is the size written so far
        let mut reversed = vec![0x00, 0x05];
        for _ in 0..levels {
            let len = reversed.len();
            if len < 0x80 {
                reversed.push(len as u8);
            } else {
                let octets = len.to_be_bytes();
                let first = octets.iter().position(|b| *b != 0).unwrap();
                reversed.extend(octets[first..].iter().rev());
                reversed.push(0x80 | (octets.len() - first) as u8);
            }
            reversed.push(0x30);
        }
        reversed.reverse();
        reversed
    }

    #[test]
    fn nesting_is_limited() {
        let shallow = Node::from_der(&nested(MAX_DEPTH)).unwrap();
        assert_eq!(shallow.tag(), Tag::Sequence);

        assert!(matches!(
            Node::from_der(&nested(MAX_DEPTH + 1)),
            Err(Error::MalformedEncoding(EncodingError::Der(_)))
        ));

        let deep = nested(50_000);
        assert!(matches!(
            Node::from_der(&deep),
            Err(Error::MalformedEncoding(EncodingError::Der(_)))
        ));
        assert!(matches!(
            der_signature_to_raw(&deep, 32),
            Err(Error::MalformedEncoding(EncodingError::Der(_)))
        ));
    }

    #[test]
    fn signature_shape_is_checked() {
        // one INTEGER only, then three
        assert!(der_signature_to_raw(&hex!("30 03 02 01 01"), 4).is_err());
        assert!(der_signature_to_raw(&hex!("30 09 02 01 01 02 01 02 02 01 03"), 4).is_err());
        // a negative component
        assert!(der_signature_to_raw(&hex!("30 06 02 01 81 02 01 01"), 4).is_err());
        // a SET instead of a SEQUENCE
        assert!(der_signature_to_raw(&hex!("31 06 02 01 01 02 01 01"), 4).is_err());
    }

    #[test]
    fn zero_field_size_is_rejected() {
        assert!(matches!(
            der_signature_to_raw(&hex!("30 06 02 01 01 02 01 01"), 0),
            Err(Error::MalformedEncoding(EncodingError::Truncated { .. }))
        ));
        assert!(matches!(
            raw_signature_to_der(&[], 0),
            Err(Error::MalformedEncoding(EncodingError::Truncated { .. }))
        ));
        assert!(raw_signature_to_der(&[], usize::MAX).is_err());
    }

    #[test]
    fn oversized_integers_are_rejected() {
        let der =
            serialize_fixed_sequence(&[&[0x01u8, 0x02, 0x03][..], &[0x01]], Tag::Integer).unwrap();
        assert!(der_signature_to_raw(&der, 2).is_err());
        assert!(raw_signature_to_der(&[0u8; 7], 4).is_err());
    }
}
