//
//  stripe-kit
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! Pretty-printed JSON for `--json`, suitable for piping to `jq`.

use serde::Serialize;
use std::io::Write;

/// Writes pretty-printed JSON to stdout.
///
/// # Returns
///
/// `Ok(())` on success, or an error if serialization or the write fails.
///
/// # Example
///
/// ```rust,ignore
/// use stripe_kit::output::write_json;
///
/// let page = client.products().list_all(&params).await?;
/// write_json(&page)?; // the whole list object, including has_more
/// ```
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_json_to(&mut stdout.lock(), value)
}

/// Writes pretty-printed JSON followed by a newline.
///
/// # Notes
///
/// Takes any writer so output can be captured in tests.
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DeletedObject;

    #[test]
    fn test_write_json_to_buffer() {
        let deleted = DeletedObject {
            id: "prod_1".to_string(),
            object: "product".to_string(),
            deleted: true,
        };

        let mut buf = Vec::new();
        write_json_to(&mut buf, &deleted).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["deleted"], true);
    }
}
