/// Выгрузка списка в CSV файл через браузер
use contracts::domain::EntityRecord;
use contracts::enums::EntityKind;
use contracts::shared::export::{entity_records_to_csv, export_filename};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Экспортирует записи в CSV файл и инициирует скачивание
pub fn export_records(kind: EntityKind, records: &[EntityRecord]) -> Result<(), String> {
    if records.is_empty() {
        return Err("Нет данных для экспорта".to_string());
    }

    let mut csv_content = String::new();
    // UTF-8 BOM для корректного отображения кириллицы в Excel
    csv_content.push('\u{FEFF}');
    csv_content.push_str(&entity_records_to_csv(kind, records));

    let blob = create_csv_blob(&csv_content)?;
    let filename = export_filename(kind, chrono::Local::now().date_naive());
    download_blob(&blob, &filename)?;

    log::info!("Экспорт {}: {} строк", filename, records.len());
    Ok(())
}

/// Создает Blob объект с CSV данными
fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Инициирует скачивание Blob через браузер
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    // Временная ссылка для скачивания
    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}
