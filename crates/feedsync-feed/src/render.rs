//! XML rendering of feed entries with `quick_xml::Writer`.

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::entry::{FeedEntry, FIXED_FIELDS};
use crate::error::FeedError;

const ROOT_ELEMENT: &str = "products";
const ENTRY_ELEMENT: &str = "product";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Renders the full feed document.
///
/// The root `<products>` element always declares `xmlns:xsi`; `generatedAt`
/// is added only when `generated_at` is given. Each entry's children are
/// written in a fixed order: `name`, `sku`, `url`, `brand`, option tags,
/// image tags, `productCategory`, `description`, `price`, `quantity`, then
/// the constant fields. Empty values render as empty elements.
///
/// # Errors
///
/// Returns [`FeedError`] if the XML writer fails.
pub fn render_feed(
    entries: &[FeedEntry],
    generated_at: Option<DateTime<Utc>>,
) -> Result<String, FeedError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let stamp = generated_at.map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true));
    let mut root = BytesStart::new(ROOT_ELEMENT);
    root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
    if let Some(stamp) = stamp.as_deref() {
        root.push_attribute(("generatedAt", stamp));
    }
    writer.write_event(Event::Start(root))?;

    for entry in entries {
        write_entry(&mut writer, entry)?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

fn write_entry(writer: &mut Writer<Vec<u8>>, entry: &FeedEntry) -> Result<(), FeedError> {
    writer.write_event(Event::Start(BytesStart::new(ENTRY_ELEMENT)))?;

    write_field(writer, "name", &entry.name)?;
    write_field(writer, "sku", &entry.sku)?;
    write_field(writer, "url", &entry.url)?;
    write_field(writer, "brand", &entry.brand)?;
    for tag in entry.attribute_tags.iter().chain(&entry.image_urls) {
        write_field(writer, &tag.name, &tag.value)?;
    }
    write_field(writer, "productCategory", &entry.category)?;
    write_field(writer, "description", &entry.description)?;
    write_field(writer, "price", &entry.price)?;
    write_field(writer, "quantity", &entry.quantity)?;
    for (name, value) in FIXED_FIELDS {
        write_field(writer, name, value)?;
    }

    writer.write_event(Event::End(BytesEnd::new(ENTRY_ELEMENT)))?;
    Ok(())
}

fn write_field(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<(), FeedError> {
    if value.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(name)))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new(name)))?;
    }
    Ok(())
}
