use crate::{MAX_IDENT_LEN, validate::reserved::WORDS};

/// Ensure a host-facing identifier is non-empty and well-formed.
///
/// Host keywords are accepted here: the bindings expose declared names
/// verbatim and the host reaches them through `getattr`.
pub fn validate_ident(ident: &str) -> Result<(), String> {
    if ident.is_empty() {
        return Err("ident is empty".to_string());
    }
    if ident.len() > MAX_IDENT_LEN {
        return Err(format!(
            "ident '{ident}' exceeds max length {MAX_IDENT_LEN}"
        ));
    }

    let mut chars = ident.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !starts_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("ident '{ident}' is not a valid identifier"));
    }

    Ok(())
}

/// Ensure a module name can be imported: a well-formed identifier that is
/// also not a host keyword.
pub fn validate_module_name(name: &str) -> Result<(), String> {
    validate_ident(name)?;

    if is_reserved(name) {
        return Err(format!("the word '{name}' is reserved"));
    }

    Ok(())
}

/// Ensure a qualified native path is a `::`-separated list of identifiers.
/// Native paths may use host reserved words, so only the shape is checked.
pub fn validate_path(path: &str) -> Result<(), String> {
    let well_formed = !path.is_empty()
        && path.split("::").all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if well_formed {
        Ok(())
    } else {
        Err(format!("native path '{path}' is malformed"))
    }
}

/// True for host-language keywords.
#[must_use]
pub fn is_reserved(word: &str) -> bool {
    WORDS.contains(&word)
}
