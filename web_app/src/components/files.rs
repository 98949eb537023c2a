//! Browser file inputs → [`Attachment`]s.

use leptos::ev::Event;
use supamenu::Attachment;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, FileReader, HtmlInputElement};

/// Files picked in the `<input type="file">` that fired `ev`.
pub fn selected_files(ev: &Event) -> Vec<File> {
    let Some(input) = ev.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
        return Vec::new();
    };
    let files = match input.files() {
        Some(list) => (0..list.length()).filter_map(|i| list.get(i)).collect(),
        None => Vec::new(),
    };
    // Allow picking the same file again
    input.set_value("");
    files
}

/// Reads `file` into memory and hands the attachment to `done`.
pub fn read_attachment(file: File, done: impl FnOnce(Attachment) + 'static) {
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(_) => {
            log::error!("FileReader is not available");
            return;
        }
    };

    let file_name = file.name();
    let content_type = file.type_();
    let reader_clone = reader.clone();
    let onload = Closure::once(move || match reader_clone.result() {
        Ok(result) => {
            let bytes = js_sys::Uint8Array::new(&result).to_vec();
            log::debug!("read {} ({} bytes)", file_name, bytes.len());
            done(Attachment::new(file_name, content_type, bytes));
        }
        Err(_) => log::error!("Failed to read {}", file_name),
    });
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    if reader.read_as_array_buffer(&file).is_err() {
        log::error!("Failed to start reading {}", file.name());
    }
}
