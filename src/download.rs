//! File Download
//!
//! Hands an export to the browser through a `data:` URL on a temporary
//! anchor element.

use keeplist_core::Export;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use wasm_bindgen::JsCast;

/// Characters left readable in the encoded payload
const DATA_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn data_url(export: &Export) -> String {
    format!(
        "data:{},{}",
        export.mime,
        utf8_percent_encode(&export.contents, DATA_ENCODE_SET)
    )
}

/// Start a download of `export`
pub fn offer(export: &Export) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "no document".to_string())?;
    let anchor = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "created element is not an anchor".to_string())?;

    anchor.set_href(&data_url(export));
    anchor.set_download(&export.filename);
    anchor.click();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_encodes_contents() {
        let export = Export {
            filename: "tasks.csv".to_string(),
            mime: "text/csv;charset=utf-8",
            contents: "\"Text\"\n\"a, b\"".to_string(),
        };
        assert_eq!(
            data_url(&export),
            "data:text/csv;charset=utf-8,%22Text%22%0A%22a%2C%20b%22"
        );
    }
}
