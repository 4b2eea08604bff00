use crate::model::OIL_MARKER;

/// Normalize an oil name from a formula or recipe to its cap-table key.
///
/// Steps:
/// 1. Trim whitespace
/// 2. Convert ASCII parentheses to full-width ("佛手柑(FCF)" -> "佛手柑（FCF）")
/// 3. Drop the oil marker ("甜橙精油" -> "甜橙")
pub fn normalize_oil_name(raw: &str) -> String {
    let s: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '(' => '（',
            ')' => '）',
            other => other,
        })
        .collect();

    let s = s.replacen(OIL_MARKER, "", 1);
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
