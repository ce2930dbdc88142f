/// Escapes text for XML attribute values and element content.
///
/// `& < > " '` become named entities. Tab, newline and carriage return become
/// numeric references so attribute normalization keeps them. Other C0 control
/// characters are not allowed in XML 1.0 and are replaced with U+FFFD.
pub fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c if u32::from(c) < 0x20 => out.push(char::REPLACEMENT_CHARACTER),
            other => out.push(other),
        }
    }
    out
}

/// Reverses [`escape_xml`], including decimal and hex character references.
/// Unknown entities are kept verbatim.
pub fn unescape_xml(escaped: &str) -> String {
    const ENTITIES: [(&str, char); 5] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&apos;", '\''),
    ];
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        if let Some((ch, len)) = char_reference(rest) {
            out.push(ch);
            rest = &rest[len..];
            continue;
        }
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Parses `&#NN;` or `&#xHH;` at the start of `input`, returning the character
/// and the byte length consumed.
fn char_reference(input: &str) -> Option<(char, usize)> {
    let body = input.strip_prefix("&#")?;
    let end = body.find(';')?;
    let digits = &body[..end];
    let code = match digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
        Some(hex) if !hex.is_empty() => u32::from_str_radix(hex, 16).ok()?,
        Some(_) => return None,
        None if !digits.is_empty() => digits.parse::<u32>().ok()?,
        None => return None,
    };
    char::from_u32(code).map(|ch| (ch, "&#".len() + end + 1))
}
