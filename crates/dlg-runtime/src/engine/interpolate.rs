use dlg_core::StateMap;
use regex::Regex;

/// Substitutes every `${name}` placeholder in `template` with the
/// textual form of the mapped value. Undefined names render as the
/// literal `"null"` instead of failing the template. Placeholder
/// names cannot nest further `${}` delimiters.
pub fn interpolate(template: &str, state: &StateMap) -> String {
    let regex = Regex::new(r"\$\{([^{}]+)\}").expect("template regex must compile");
    let mut output = String::new();
    let mut last_index = 0usize;
    for captures in regex.captures_iter(template) {
        let full = captures
            .get(0)
            .expect("capture group 0 must exist for each regex capture");
        let name = captures
            .get(1)
            .expect("capture group 1 must exist for each regex capture");
        output.push_str(&template[last_index..full.start()]);
        match state.get(name.as_str()) {
            Some(value) => output.push_str(&value.to_text()),
            None => output.push_str("null"),
        }
        last_index = full.end();
    }
    output.push_str(&template[last_index..]);
    output
}
