use crate::model::{ClassDescriptor, FieldDescriptor};
use crate::util::{capitalize_first, single_line, strip_non_alphanumeric};

/// Get or create an exposed field on the configuration class
///
/// The raw name is reduced to ASCII letters and digits with its first
/// character upper-cased. A name that reduces to nothing becomes
/// `Param<n>` where `n` is the current field count; a leading digit gets a
/// `Param` prefix. Repeated calls with the same usable raw name return the
/// same field and leave the class untouched.
///
/// # Examples
/// ```
/// use traitsynth::model::ClassDescriptor;
/// use traitsynth::synth::ensure_field;
///
/// let mut info = ClassDescriptor::new("FleeInfo", "ConditionalTraitInfo");
/// let name = ensure_field(&mut info, "is_brave", "bool", Some("false".into()), "");
/// assert_eq!(name, "Isbrave");
/// assert_eq!(ensure_field(&mut info, "is_brave", "bool", None, ""), name);
/// assert_eq!(info.fields.len(), 1);
/// ```
pub fn ensure_field(
    config: &mut ClassDescriptor,
    raw_name: &str,
    typ: &str,
    default_value: Option<String>,
    description: &str,
) -> String {
    let stripped = strip_non_alphanumeric(raw_name);
    let name = match stripped.chars().next() {
        None => format!("Param{}", config.fields.len()),
        Some(c) if c.is_ascii_digit() => format!("Param{}", stripped),
        Some(_) => capitalize_first(&stripped),
    };

    if config.field(&name).is_none() {
        let description = single_line(description);
        config
            .fields
            .push(FieldDescriptor::exposed(&name, typ, default_value, &description));
    }
    name
}
