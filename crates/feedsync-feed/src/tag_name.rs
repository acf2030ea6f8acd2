//! Element-name helpers for option-derived and image tags.
//!
//! Option names are merchant-entered free text (`"Shoe Size"`, `"Renk"`,
//! `"Size (EU)"`, `"3D Print"`). They become XML element names, so anything
//! outside a conservative allow-list is dropped and names that would still be
//! invalid are prefixed.

use crate::entry::FIXED_ELEMENT_NAMES;

const IMAGE_TAG: &str = "imgUrl";

/// Turns an option name into a usable XML element name.
///
/// Rules, in order:
/// 1. Whitespace is removed (`"Shoe Size"` → `"ShoeSize"`).
/// 2. Only XML 1.0 name characters are kept, minus `:`. Everything else is
///    dropped (`"Size (EU)"` → `"SizeEU"`, `"Alan (m²)"` → `"Alanm"`).
/// 3. An empty result yields `None`: the option gets no tag.
/// 4. A first character that may not start a name (digit, `-`, `.`,
///    combining mark, ...), or a leading `xml` in any case, gets an `_`
///    prefix (`"3D"` → `"_3D"`).
/// 5. A name equal to a feed element or an image tag gets an `attr_`
///    prefix (`"Price"` stays, `"price"` → `"attr_price"`).
#[must_use]
pub fn sanitize_tag_name(raw: &str) -> Option<String> {
    let mut name: String = raw.chars().filter(|c| is_name_char(*c)).collect();
    if name.is_empty() {
        return None;
    }

    let bad_start = !name.starts_with(is_name_start_char)
        || name
            .get(..3)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("xml"));
    if bad_start {
        name.insert(0, '_');
    }

    if FIXED_ELEMENT_NAMES.contains(&name.as_str()) || is_image_tag(&name) {
        name.insert_str(0, "attr_");
    }

    Some(name)
}

/// Element name for the image at zero-based source `position`: `imgUrl` for
/// the first image, then `imgUrl1`, `imgUrl2`, ...
#[must_use]
pub fn image_tag_name(position: usize) -> String {
    if position == 0 {
        IMAGE_TAG.to_owned()
    } else {
        format!("{IMAGE_TAG}{position}")
    }
}

/// `NameStartChar` from XML 1.0 (fifth edition), without `:`.
fn is_name_start_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(
            c,
            '_' | '\u{C0}'..='\u{D6}'
                | '\u{D8}'..='\u{F6}'
                | '\u{F8}'..='\u{2FF}'
                | '\u{370}'..='\u{37D}'
                | '\u{37F}'..='\u{1FFF}'
                | '\u{200C}'..='\u{200D}'
                | '\u{2070}'..='\u{218F}'
                | '\u{2C00}'..='\u{2FEF}'
                | '\u{3001}'..='\u{D7FF}'
                | '\u{F900}'..='\u{FDCF}'
                | '\u{FDF0}'..='\u{FFFD}'
                | '\u{10000}'..='\u{EFFFF}'
        )
}

/// `NameChar` from XML 1.0 (fifth edition), without `:`.
fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || c.is_ascii_digit()
        || matches!(
            c,
            '-' | '.' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}'
        )
}

fn is_image_tag(name: &str) -> bool {
    name.strip_prefix(IMAGE_TAG)
        .is_some_and(|rest| rest.bytes().all(|b| b.is_ascii_digit()))
}
