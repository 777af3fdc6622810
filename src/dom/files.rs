// ============================================================================
// FILES - Lectura de archivos seleccionados y descargas
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, Url};
use crate::dom::{append_child, create_element, document};
use crate::models::{ExportedFile, ImageUpload};

/// Lee un File completo en memoria
pub async fn read_upload(file: &File) -> Result<ImageUpload, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(ImageUpload {
        file_name: file.name(),
        content_type: file.type_(),
        bytes,
    })
}

/// Dispara la descarga de un archivo exportado (blob + enlace temporal)
pub fn download(file: &ExportedFile) -> Result<(), JsValue> {
    let array = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&array);
    let options = BlobPropertyBag::new();
    options.set_type(&file.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&file.file_name);
    let body = document()
        .and_then(|d| d.body())
        .ok_or_else(|| JsValue::from_str("No body"))?;
    append_child(&body, &anchor)?;
    anchor.click();
    anchor.remove();
    Url::revoke_object_url(&url)?;

    log::info!("📥 [EXPORT] {} ({} bytes)", file.file_name, file.bytes.len());
    Ok(())
}
