// ============================================================
// COLUMN SANITIZER
// ============================================================
// Normalize arbitrary header and table names into SQL identifiers

/// Maximum identifier length, the lowest common bound across the
/// supported dialects (MySQL and Oracle both stop at 64/128; 64 is safe
/// everywhere we target).
const MAX_IDENTIFIER_LEN: usize = 64;

/// Sanitize a header or table name into a valid SQL identifier.
/// Deterministic and total: trim, lowercase, replace anything outside
/// `[a-z0-9_]` with `_`, prefix with `_` when the first character is a
/// digit, truncate to 64 characters.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out: String = name
        .trim()
        .chars()
        .map(|c| {
            let lower = c.to_ascii_lowercase();
            if lower.is_ascii_lowercase() || lower.is_ascii_digit() || lower == '_' {
                lower
            } else {
                '_'
            }
        })
        .collect();

    if out.chars().next().map(|c| c.is_ascii_digit()) == Some(true) {
        out.insert(0, '_');
    }

    out.truncate(MAX_IDENTIFIER_LEN);
    out
}

/// Sanitize a list of headers, disambiguating collisions with numeric
/// suffixes so the emitted DDL never declares the same column twice.
/// `sanitize_identifier` itself stays collision-blind; uniqueness is a
/// property of the whole header list.
pub fn sanitize_headers(headers: &[String]) -> Vec<String> {
    let mut used = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(headers.len());

    for header in headers {
        let base = sanitize_identifier(header);

        // A suffixed name may itself collide with a later literal header
        // (e.g. "a", "a", "a_2"), so uniqueness is checked against every
        // emitted name, not just the bases.
        let mut candidate = base.clone();
        let mut n = 2usize;
        while used.contains(&candidate) {
            let suffix = format!("_{}", n);
            candidate = base.clone();
            candidate.truncate(MAX_IDENTIFIER_LEN - suffix.len());
            candidate.push_str(&suffix);
            n += 1;
        }

        used.insert(candidate.clone());
        out.push(candidate);
    }

    out
}
