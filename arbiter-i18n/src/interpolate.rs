//! Named placeholder substitution.

use std::collections::HashMap;

/// Replace `{name}` placeholders with the matching entry of `params`.
///
/// Unknown placeholders are left in place, every occurrence of a name is
/// replaced, names are case-sensitive and substituted text is not scanned
/// again.
///
/// ```
/// use arbiter_i18n::interpolate;
/// use std::collections::HashMap;
///
/// let params = HashMap::from([("value".to_string(), "10".to_string())]);
/// assert_eq!(interpolate("Must be greater than {value}", &params), "Must be greater than 10");
/// assert_eq!(interpolate("Must be {missing}", &HashMap::new()), "Must be {missing}");
/// ```
pub fn interpolate(template: &str, params: &HashMap<String, String>) -> String {
    interpolate_with(template, |name| params.get(name).map(String::as_str))
}

/// [`interpolate`] driven by a lookup function.
pub fn interpolate_with<'p, F>(template: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<&'p str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find(['{', '}']) {
            Some(close) if after.as_bytes()[close] == b'}' => {
                let name = &after[..close];
                match lookup(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            // "{ ... {": the first brace opens nothing
            Some(next_open) => {
                out.push('{');
                out.push_str(&after[..next_open]);
                rest = &after[next_open..];
            }
            None => {
                out.push('{');
                out.push_str(after);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
