//! Compressed-payload decoder for `<diagram>` bodies.
//!
//! The editor stores page content as base64(raw-deflate(percent-encode(xml))).
//! Older exports skip the deflate/percent stages, so a failed inflate falls
//! back to the bare base64 result before giving up.

use crate::error::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::read::DeflateDecoder;
use percent_encoding::percent_decode_str;
use std::io::Read;

pub(crate) fn decode_diagram_payload(payload: &str) -> Result<String> {
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(Error::decode("empty diagram payload"));
    }

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| Error::decode(format!("invalid base64: {e}")))?;

    match inflate_and_percent_decode(&bytes) {
        Ok(xml) => Ok(xml),
        Err(inflate_err) => String::from_utf8(bytes).map_err(|_| {
            Error::decode(format!(
                "payload is neither deflate-compressed nor plain text: {inflate_err}"
            ))
        }),
    }
}

fn inflate_and_percent_decode(bytes: &[u8]) -> std::io::Result<String> {
    let mut decoder = DeflateDecoder::new(bytes);
    let mut inflated = String::new();
    decoder.read_to_string(&mut inflated)?;

    let decoded = percent_decode_str(&inflated)
        .decode_utf8()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_falls_back_to_plain_base64() {
        // base64 of an uncompressed `<mxGraphModel/>` fragment.
        let payload = STANDARD.encode("<mxGraphModel><root/></mxGraphModel>");
        let out = decode_diagram_payload(&payload).unwrap();
        assert_eq!(out, "<mxGraphModel><root/></mxGraphModel>");
    }

    #[test]
    fn decode_ignores_interior_whitespace() {
        let payload = STANDARD.encode("<a/>");
        let spread = payload
            .chars()
            .flat_map(|c| [c, '\n'])
            .collect::<String>();
        assert_eq!(decode_diagram_payload(&spread).unwrap(), "<a/>");
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode_diagram_payload("!!not-base64!!"),
            Err(Error::Decode { .. })
        ));
        assert!(matches!(
            decode_diagram_payload("   "),
            Err(Error::Decode { .. })
        ));
    }
}
