//! `{Property}` template formatting.

use ctk_model::{Properties, Record, Value};

use crate::error::FormatError;

/// Renders `template`, replacing each `{Name}` with the readable property
/// `Name` of `value`.
///
/// Names match exactly after trimming whitespace inside the braces. `{{` and
/// `}}` produce literal braces and `Null` values render as nothing.
///
/// Placeholders are plain property names: member paths such as
/// `{Inner.Name}` or `{Inner.Method()}` are not evaluated. Any placeholder
/// that does not name a readable property fails the whole call with
/// [`FormatError::UnknownProperty`], and no partial output is returned.
///
/// ```
/// use ctk_model::properties;
/// use ctk_transfer::format_with;
///
/// #[derive(Clone, Default)]
/// struct Greeting {
///     name: String,
/// }
///
/// properties!(Greeting { name: String as "Name" });
///
/// let greeting = Greeting { name: "Ana".to_string() };
/// assert_eq!(format_with(&greeting, "Hi {Name} {{}}").unwrap(), "Hi Ana {}");
/// ```
pub fn format_with<T: Properties>(value: &T, template: &str) -> Result<String, FormatError> {
    let properties = T::properties();
    render(template, |name| {
        properties
            .iter()
            .find(|property| property.name() == name)
            .and_then(|property| property.get(value))
    })
}

/// Renders `template` against the fields of `record`.
pub fn format_record(record: &Record, template: &str) -> Result<String, FormatError> {
    render(template, |name| record.get(name).cloned())
}

fn render(
    template: &str,
    lookup: impl Fn(&str) -> Option<Value>,
) -> Result<String, FormatError> {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    while let Some((position, ch)) = chars.next() {
        match ch {
            '{' if chars.next_if(|&(_, next)| next == '{').is_some() => output.push('{'),
            '}' if chars.next_if(|&(_, next)| next == '}').is_some() => output.push('}'),
            '}' => return Err(FormatError::UnmatchedBrace(position)),
            '{' => {
                let start = position + 1;
                let end = loop {
                    match chars.next() {
                        Some((index, '}')) => break index,
                        Some(_) => {}
                        None => return Err(FormatError::Unterminated(position)),
                    }
                };
                let name = template[start..end].trim();
                let value =
                    lookup(name).ok_or_else(|| FormatError::UnknownProperty(name.to_string()))?;
                output.push_str(&value.to_string());
            }
            other => output.push(other),
        }
    }
    Ok(output)
}
