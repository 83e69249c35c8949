/// Reserved C# keywords. Contextual keywords (`async`, `var`, ...) are valid
/// identifiers and are not listed.
const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Make a normalized name usable as a C# identifier.
///
/// Anything other than Unicode letters, digits and `_` is dropped, a leading
/// digit gets a `_` prefix and keywords get a verbatim `@` prefix. An empty
/// name stays empty.
pub fn sanitize_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if ident.starts_with(|c: char| c.is_numeric()) {
        ident.insert(0, '_');
    }
    if CSHARP_KEYWORDS.contains(&ident.as_str()) {
        ident.insert(0, '@');
    }
    ident
}

/// Whether `namespace` is a dotted sequence of plain identifiers.
pub fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty()
        && namespace.split('.').all(|segment| {
            !segment.is_empty()
                && !segment.starts_with('@')
                && sanitize_identifier(segment) == segment
        })
}

/// Escape text for an XML doc comment, keeping it on one line.
pub fn escape_doc(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text for a regular C# string literal.
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
