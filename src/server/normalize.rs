//! Text normalization for device and part name matching.
//!
//! Every free-text lookup in the catalog goes through [`normalize`] so that
//! `"Realme C2!!"`, `"realme c2"` and `"REALME   C2"` all land on the same
//! canonical form. Slugs and the `device.normalized` column are derived here
//! and nowhere else.

/// Collapse a name to its canonical matching form.
///
/// Lowercases the input, replaces every character that is not an ASCII
/// letter, digit or whitespace with a space, collapses whitespace runs and
/// trims the ends. Punctuation acts as a token separator, so `"A1k-Pro"`
/// becomes `"a1k pro"` rather than `"a1kpro"`.
///
/// The function is a no-op on already-normalized input.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();

    let separated: String = lowered
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    separated.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derive a URL-friendly identifier: the normalized form with spaces turned
/// into hyphens.
pub fn slugify(text: &str) -> String {
    normalize(text).replace(' ', "-")
}

/// Canonical matching form for a device: brand name and model name joined.
pub fn device_normalized(brand_name: &str, device_name: &str) -> String {
    normalize(&format!("{brand_name} {device_name}"))
}

/// Slug for a device, derived from the same brand + model join as
/// [`device_normalized`].
pub fn device_slug(brand_name: &str, device_name: &str) -> String {
    slugify(&format!("{brand_name} {device_name}"))
}
