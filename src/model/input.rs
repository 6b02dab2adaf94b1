//! Prediction Input Module
//! Raw form fields and the wire-ready input assembled from them.

use serde::Serialize;

/// Display labels for input keys, in report order.
pub const INPUT_LABELS: [(&str, &str); 5] = [
    ("year", "Target Year"),
    ("node_size", "Node Size (nm)"),
    ("area", "Die Area (mm2)"),
    ("trans_density", "Transistor Density (tr/mm2)"),
    ("power_density", "Power Density (W/cm2)"),
];

/// Look up the display label for an input key, falling back to the key itself.
pub fn label_for(key: &str) -> &str {
    INPUT_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

/// Text exactly as typed into the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub year: String,
    pub node_size: String,
    pub area: String,
    pub trans_density: String,
    pub power_density: String,
}

impl FormFields {
    /// Assemble the request payload. Only node size is coerced to a number.
    pub fn to_input(&self) -> PredictionInput {
        PredictionInput {
            year: self.year.trim().to_string(),
            node_size: parse_number(&self.node_size),
            area: self.area.trim().to_string(),
            trans_density: self.trans_density.trim().to_string(),
            power_density: self.power_density.trim().to_string(),
        }
    }
}

/// One submission's worth of process parameters.
///
/// Serializes to `{year, node_size, area, trans_density, power_density}`.
/// A NaN node size goes over the wire as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionInput {
    pub year: String,
    pub node_size: f64,
    pub area: String,
    pub trans_density: String,
    pub power_density: String,
}

impl PredictionInput {
    /// True when node size is zero or negative. NaN does not count.
    pub fn needs_node_size_warning(&self) -> bool {
        self.node_size <= 0.0
    }

    /// Target year as a chart x coordinate (NaN when the text is not numeric).
    pub fn year_value(&self) -> f64 {
        parse_number(&self.year)
    }

    /// `(key, value)` pairs in report order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("year", self.year.clone()),
            ("node_size", self.node_size.to_string()),
            ("area", self.area.clone()),
            ("trans_density", self.trans_density.clone()),
            ("power_density", self.power_density.clone()),
        ]
    }
}

/// Parse the longest leading decimal number, ignoring anything after it.
///
/// `"2nm"` is 2, `"1e3x"` is 1000, `"Infinity"` is infinite. Text with no
/// leading number (including `"inf"` and `"NaN"`) is NaN.
fn parse_number(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = digits_from(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(node_size: &str) -> FormFields {
        FormFields {
            year: "2030".into(),
            node_size: node_size.into(),
            area: "100".into(),
            trans_density: "250".into(),
            power_density: "50".into(),
        }
    }

    #[test]
    fn labels_fall_back_to_raw_key() {
        assert_eq!(label_for("year"), "Target Year");
        assert_eq!(label_for("power_density"), "Power Density (W/cm2)");
        assert_eq!(label_for("voltage"), "voltage");
    }

    #[test]
    fn only_node_size_is_coerced() {
        let json = serde_json::to_value(fields("2").to_input()).unwrap();
        assert_eq!(json["year"], "2030");
        assert_eq!(json["node_size"], 2.0);
        assert_eq!(json["area"], "100");
        assert_eq!(json["trans_density"], "250");
        assert_eq!(json["power_density"], "50");
    }

    #[test]
    fn unparseable_node_size_is_sent_as_null() {
        let input = fields("abc").to_input();
        assert!(input.node_size.is_nan());
        assert!(!input.needs_node_size_warning());
        let json = serde_json::to_value(&input).unwrap();
        assert!(json["node_size"].is_null());
    }

    #[test]
    fn numbers_parse_from_leading_prefix() {
        assert_eq!(parse_number("2nm"), 2.0);
        assert_eq!(parse_number("  -3.5 "), -3.5);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("7."), 7.0);
        assert_eq!(parse_number("1e3x"), 1000.0);
        assert_eq!(parse_number("4e"), 4.0);
        assert_eq!(parse_number("4e+"), 4.0);
        assert_eq!(parse_number("2030 AD"), 2030.0);
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);

        for text in ["", "abc", "inf", "NaN", "-", ".", "+.e5", "nm2"] {
            assert!(parse_number(text).is_nan(), "{text:?} should not parse");
        }
    }

    #[test]
    fn node_size_with_unit_suffix_is_sent_as_number() {
        let input = fields("2nm").to_input();
        assert_eq!(input.node_size, 2.0);
        assert_eq!(serde_json::to_value(&input).unwrap()["node_size"], 2.0);
    }

    #[test]
    fn non_positive_node_size_warns() {
        assert!(fields("0").to_input().needs_node_size_warning());
        assert!(fields("-3").to_input().needs_node_size_warning());
        assert!(!fields("0.5").to_input().needs_node_size_warning());
    }

    #[test]
    fn entries_render_node_size_without_trailing_zero() {
        let entries = fields("2").to_input().entries();
        assert_eq!(entries[1], ("node_size", "2".to_string()));
        assert_eq!(entries.len(), INPUT_LABELS.len());
    }
}
