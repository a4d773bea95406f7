//! Deep merge of raw configuration value trees.
//!
//! Merging happens on the YAML value level, before typed resolution, so a
//! page override that sets a single nested key (say
//! `dimensions.page_width`) leaves every sibling key from the document
//! defaults intact.

use serde_yaml::Value;

/// Merge `overlay` onto `base` in place.
///
/// For each key in `overlay`: if both sides hold mappings the merge
/// recurses; otherwise the overlay value replaces the base value wholesale,
/// including replacing an entire sub-map with a scalar or vice versa.
/// Sequences and scalars are never appended or combined. Keys unknown to the
/// typed configuration pass through untouched.
pub fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Merge `overlay` onto a clone of `base` and return the result.
pub fn merged(base: &Value, overlay: &Value) -> Value {
    let mut result = base.clone();
    merge_values(&mut result, overlay.clone());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_scalar_replacement() {
        let mut base = yaml("layout: image_center\ncolumns: 1");
        merge_values(&mut base, yaml("columns: 3"));
        assert_eq!(base, yaml("layout: image_center\ncolumns: 3"));
    }

    #[test]
    fn test_nested_maps_recurse() {
        let mut base = yaml("dimensions:\n  page_width: 480\n  page_height: 270");
        merge_values(&mut base, yaml("dimensions:\n  page_width: 960"));
        assert_eq!(
            base,
            yaml("dimensions:\n  page_width: 960\n  page_height: 270")
        );
    }

    #[test]
    fn test_map_replaced_by_scalar_and_back() {
        let mut base = yaml("fonts:\n  font_file_title: a.ttf");
        merge_values(&mut base, yaml("fonts: none"));
        assert_eq!(base, yaml("fonts: none"));

        merge_values(&mut base, yaml("fonts:\n  font_file_footer: b.ttf"));
        assert_eq!(base, yaml("fonts:\n  font_file_footer: b.ttf"));
    }

    #[test]
    fn test_sequences_replaced_wholesale() {
        let mut base = yaml("text_color: [0, 0, 0]");
        merge_values(&mut base, yaml("text_color: [255, 255, 255]"));
        assert_eq!(base, yaml("text_color: [255, 255, 255]"));
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let mut base = yaml("layout: image_fill");
        merge_values(&mut base, yaml("transition: fade"));
        assert_eq!(base, yaml("layout: image_fill\ntransition: fade"));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let base = yaml("a: 1\nb:\n  c: 2\n  d: [3, 4]");
        let overlay = yaml("b:\n  c: 9\ne: true");
        let once = merged(&base, &overlay);
        let twice = merged(&once, &overlay);
        assert_eq!(once, twice);
    }
}
