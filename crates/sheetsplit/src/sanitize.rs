//! Filesystem-safe rendering of cell values.

use std::sync::LazyLock;

use regex::Regex;
use sheetsplit_io_xlsx::EnumCellValue;

static RE_FILENAME_ILLEGAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|]"#).expect("valid file name pattern"));

/// Replace `\ / * ? : " < > |` with `_`, then trim surrounding whitespace.
pub fn sanitize_file_name(name: &str) -> String {
    RE_FILENAME_ILLEGAL
        .replace_all(name, "_")
        .trim()
        .to_string()
}

/// [`sanitize_file_name`] over the cell's text; missing cells give `""`.
pub fn sanitize_cell(value: &EnumCellValue) -> String {
    sanitize_file_name(&value.to_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_every_illegal_char() {
        assert_eq!(sanitize_file_name(r#"a\b/c*d?e:f"g<h>i|j"#), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize_file_name("  Москва / центр  "), "Москва _ центр");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for raw in ["  x:y  ", "|||", "", " plain ", "a/ b \\"] {
            let once = sanitize_file_name(raw);
            assert_eq!(sanitize_file_name(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn test_sanitize_cell_renders_text_first() {
        assert_eq!(sanitize_cell(&EnumCellValue::None), "");
        assert_eq!(sanitize_cell(&EnumCellValue::Number(42.0)), "42");
        assert_eq!(sanitize_cell(&EnumCellValue::from("1/2")), "1_2");
    }
}
